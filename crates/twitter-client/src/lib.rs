//! Read-only client for a Twitter-v1.1-style REST surface
//!
//! This crate is the boundary collaborator for the credential pool: it owns
//! the credential records, the per-request signing for user-context calls,
//! the application-only bearer-token exchange, and the typed operation
//! surface. It knows nothing about pooling or rate-limit bookkeeping: it
//! executes exactly one request against exactly one identity and reports
//! what happened, keeping error bodies verbatim for downstream
//! classification.
//!
//! Handle lifecycle:
//! 1. Token sets load from a JSON credential file (or arrive inline)
//! 2. `RestClient::connect_user` verifies the credential; failure is fatal
//! 3. `RestClient::connect_app` exchanges the consumer key pair for a
//!    bearer token carrying an independent rate budget
//! 4. The pool drives the handle through the `Transport` trait

pub mod client;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod models;
pub mod request;
pub mod sign;
pub mod token;

pub use client::{RestClient, Transport};
pub use credentials::{TokenSet, load_token_sets};
pub use error::{Error, Result};
pub use models::{IdCursor, SearchMetadata, SearchResults, Tweet, User};
pub use request::{ApiRequest, SearchQuery, TimelineQuery, UserRef};
pub use token::{BearerToken, request_bearer_token};
