//! Request signing for user-context calls
//!
//! Each user-context request carries a random nonce, a unix timestamp, and
//! a SHA-256 digest binding both to the request method/path and to the
//! consumer/access secrets. The server recomputes the digest from its own
//! copy of the secrets, so the secrets themselves never travel on the wire.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngExt;
use sha2::{Digest, Sha256};

use crate::credentials::TokenSet;

/// Generate a cryptographically random request nonce.
///
/// 32 random bytes encoded as URL-safe base64 (no padding), 43 characters.
pub fn generate_nonce() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Compute the signature for a method/path at a given timestamp and nonce.
///
/// `signature = BASE64URL(SHA256(method, path, timestamp, nonce,
/// consumer_secret, access_token_secret))` with each part
/// newline-terminated so field boundaries cannot be shifted.
pub fn request_signature(
    credential: &TokenSet,
    method: &str,
    path: &str,
    timestamp: u64,
    nonce: &str,
) -> String {
    let timestamp = timestamp.to_string();
    let mut hasher = Sha256::new();
    for part in [
        method,
        path,
        timestamp.as_str(),
        nonce,
        credential.consumer_secret.expose(),
        credential.access_token_secret.expose(),
    ] {
        hasher.update(part.as_bytes());
        hasher.update(b"\n");
    }
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// Build the full signed header set for one request.
pub fn signed_headers(
    credential: &TokenSet,
    method: &str,
    path: &str,
) -> Vec<(&'static str, String)> {
    let timestamp = unix_timestamp();
    let nonce = generate_nonce();
    let signature = request_signature(credential, method, path, timestamp, &nonce);
    vec![
        ("x-consumer-key", credential.consumer_key.expose().clone()),
        ("x-access-token", credential.access_token.expose().clone()),
        ("x-request-timestamp", timestamp.to_string()),
        ("x-request-nonce", nonce),
        ("x-request-signature", signature),
    ]
}

fn unix_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
