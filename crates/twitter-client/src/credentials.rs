//! Credential records and credential-file loading
//!
//! A credential file is a JSON array of token sets:
//!
//! ```json
//! [{"consumer_key": "...", "consumer_secret": "...",
//!   "access_token": "...", "access_token_secret": "..."}]
//! ```
//!
//! Values deserialize directly into `Secret` wrappers so they are redacted
//! in Debug output and zeroized on drop. Token sets are immutable once
//! loaded.

use std::path::Path;

use common::Secret;
use serde::Deserialize;
use tracing::info;

use crate::error::{Error, Result};

/// One account's API credentials: consumer key pair plus access token pair.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSet {
    pub consumer_key: Secret<String>,
    pub consumer_secret: Secret<String>,
    pub access_token: Secret<String>,
    pub access_token_secret: Secret<String>,
}

/// Load token sets from a JSON-array credential file.
///
/// Read failures and parse failures are distinct variants so callers can
/// tell a missing file from a corrupt one.
pub async fn load_token_sets(path: &Path) -> Result<Vec<TokenSet>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::Io(format!("reading credential file {}: {e}", path.display())))?;
    let sets: Vec<TokenSet> = serde_json::from_str(&contents).map_err(|e| {
        Error::CredentialParse(format!("parsing credential file {}: {e}", path.display()))
    })?;
    info!(path = %path.display(), accounts = sets.len(), "loaded credentials");
    Ok(sets)
}
