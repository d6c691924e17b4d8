//! Error types for client operations

/// Errors from client construction and request execution.
///
/// `Api` carries the raw response body verbatim: the client does not
/// interpret remote error payloads, downstream classification does.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{operation} returned HTTP {status}")]
    Api {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{operation} returned a malformed body: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("credential handshake failed: {0}")]
    Handshake(String),

    #[error("credential parse error: {0}")]
    CredentialParse(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
