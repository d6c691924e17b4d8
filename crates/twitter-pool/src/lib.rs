//! Multi-credential, rate-limit-aware request routing
//!
//! Wraps a pool of credentialed client handles and delegates operation
//! calls to them, cycling through handles when the remote service reports
//! a rate limit. Each slot keeps a per-operation throttle clock; the
//! router picks the slot whose clock is oldest for the requested
//! operation, sleeps out whatever remains of its cool-down, and invokes.
//!
//! Call path:
//! 1. `PooledClient` method builds the typed request and hands it to the
//!    router
//! 2. Router selects the least recently throttled slot for the operation
//!    (never-throttled slots first, index as tie-break)
//! 3. Any remaining cool-down is slept out before the call
//! 4. On failure the error is normalized; rate limits stamp the slot's
//!    clock and rotate (or, in break mode, surface a typed rate-limit
//!    error), over-capacity always rotates, everything else re-raises
//!    unchanged
//!
//! A single-slot pool under sustained limiting serializes calls roughly a
//! wait window apart. That is graceful degradation, not a failure mode.

pub mod classify;
pub mod config;
pub mod error;
pub mod facade;
pub mod pool;
pub mod router;

#[cfg(test)]
mod test_utils;

pub use classify::{NormalizedError, classify};
pub use config::{PoolConfig, RetryMode};
pub use error::{Error, Result};
pub use facade::PooledClient;
pub use pool::{Pool, Slot};
pub use router::Router;
