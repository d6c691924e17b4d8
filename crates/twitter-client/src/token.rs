//! Application-only bearer token exchange
//!
//! App-only auth carries a rate budget independent of the user context, so
//! a pool can field two slots per credential. The exchange POSTs the
//! consumer key pair as HTTP basic auth with
//! `grant_type=client_credentials` and receives a bearer token used on all
//! subsequent requests from that handle.

use common::Secret;
use serde::Deserialize;

use crate::constants::BEARER_TOKEN_PATH;
use crate::credentials::TokenSet;
use crate::error::{Error, Result};

/// Response from the bearer token endpoint.
#[derive(Debug, Deserialize)]
pub struct BearerToken {
    pub token_type: String,
    pub access_token: String,
}

/// Exchange a consumer key pair for an application-only bearer token.
///
/// Any failure here is a handshake failure: the credential is unusable,
/// not temporarily unavailable, so it is propagated rather than retried.
pub async fn request_bearer_token(
    client: &reqwest::Client,
    api_base: &str,
    credential: &TokenSet,
) -> Result<Secret<String>> {
    let url = format!("{}{}", api_base.trim_end_matches('/'), BEARER_TOKEN_PATH);
    let response = client
        .post(url)
        .basic_auth(
            credential.consumer_key.expose(),
            Some(credential.consumer_secret.expose()),
        )
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| Error::Handshake(format!("bearer token request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<no body>"));
        return Err(Error::Handshake(format!(
            "bearer token endpoint returned {status}: {body}"
        )));
    }

    let token: BearerToken = response
        .json()
        .await
        .map_err(|e| Error::Handshake(format!("invalid bearer token response: {e}")))?;

    if token.token_type != "bearer" {
        return Err(Error::Handshake(format!(
            "unexpected token_type {:?} from bearer endpoint",
            token.token_type
        )));
    }

    Ok(Secret::new(token.access_token))
}
