//! Error types for pool construction and routed calls

use crate::classify::NormalizedError;
use twitter_client::Error as ClientError;

/// Errors from pool construction and routed calls.
///
/// `RateLimited` is the break-mode signal: the throttled slot has already
/// been stamped, and the caller decides whether to wait, switch work, or
/// give up. Everything the remote service said arrives in the wrapped
/// `NormalizedError`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("rate limit reached: {0}")]
    RateLimited(NormalizedError),

    #[error("retry budget exhausted after {attempts} rotations: {last}")]
    RetriesExceeded { attempts: u32, last: NormalizedError },

    #[error("call deadline elapsed")]
    DeadlineElapsed,

    #[error("credential pool is empty")]
    Empty,

    #[error("unexpected {operation} payload: {source}")]
    Payload {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Result alias for pool operations.
pub type Result<T> = std::result::Result<T, Error>;
