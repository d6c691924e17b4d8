//! REST endpoint constants
//!
//! Paths are fixed by the API version; the host is configurable so staging
//! deployments and mirrors can be targeted without code changes. None of
//! these values are secrets; credentials live in `TokenSet`.

/// Default API host.
pub const DEFAULT_API_BASE: &str = "https://api.twitter.com";

/// Application-only bearer token endpoint (consumer-key basic auth).
pub const BEARER_TOKEN_PATH: &str = "/oauth2/token";

/// Credential verification endpoint used for the user-context handshake.
pub const VERIFY_CREDENTIALS_PATH: &str = "/1.1/account/verify_credentials.json";
