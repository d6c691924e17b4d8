//! HTTP client and the transport seam
//!
//! `Transport` is the seam between the pool and the wire: the pool only
//! asks "execute this request on your identity". The concrete `RestClient`
//! signs user-context requests per call and holds a pre-exchanged bearer
//! token for app-only handles. Uses `Pin<Box<dyn Future>>` return types
//! for dyn-compatibility (`Box<dyn Transport>`).

use std::future::Future;
use std::pin::Pin;

use common::Secret;
use serde_json::Value;
use tracing::debug;

use crate::constants::VERIFY_CREDENTIALS_PATH;
use crate::credentials::TokenSet;
use crate::error::{Error, Result};
use crate::request::ApiRequest;
use crate::{sign, token};

/// Executes API requests against one authenticated identity.
pub trait Transport: Send + Sync {
    /// Execute a request, returning the decoded JSON payload.
    ///
    /// Error responses keep their raw body so callers can classify them.
    fn execute<'a>(
        &'a self,
        request: &'a ApiRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Value>> + Send + 'a>>;

    /// Label for logs ("user" or "app").
    fn auth_mode(&self) -> &'static str;
}

#[derive(Debug)]
enum AuthMode {
    /// Signs each request with the full token set.
    User(TokenSet),
    /// Sends a pre-exchanged application-only bearer token.
    App(Secret<String>),
}

/// Concrete HTTP transport bound to one credential.
///
/// The handle is created once per credential at pool construction and never
/// replaced; per-request timeouts belong to the `reqwest::Client` it is
/// built with.
#[derive(Debug)]
pub struct RestClient {
    http: reqwest::Client,
    api_base: String,
    auth: AuthMode,
}

impl RestClient {
    /// Connect a user-context client, verifying the credential up front.
    ///
    /// A rejected handshake means the credential is malformed or revoked;
    /// it is propagated, never retried.
    pub async fn connect_user(
        http: reqwest::Client,
        api_base: &str,
        credential: TokenSet,
    ) -> Result<Self> {
        let client = Self {
            http,
            api_base: api_base.trim_end_matches('/').to_owned(),
            auth: AuthMode::User(credential),
        };
        client
            .get_json("account/verify_credentials", VERIFY_CREDENTIALS_PATH, &[])
            .await
            .map_err(|e| Error::Handshake(format!("credential verification failed: {e}")))?;
        debug!("user-context handshake succeeded");
        Ok(client)
    }

    /// Connect an application-only client by exchanging the consumer key
    /// pair for a bearer token. The exchange is the handshake.
    pub async fn connect_app(
        http: reqwest::Client,
        api_base: &str,
        credential: &TokenSet,
    ) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/').to_owned();
        let bearer = token::request_bearer_token(&http, &api_base, credential).await?;
        debug!("app-only handshake succeeded");
        Ok(Self {
            http,
            api_base,
            auth: AuthMode::App(bearer),
        })
    }

    async fn get_json(
        &self,
        operation: &'static str,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Value> {
        let url = format!("{}{}", self.api_base, path);
        let mut builder = self.http.get(url).query(query);
        match &self.auth {
            AuthMode::User(credential) => {
                for (name, value) in sign::signed_headers(credential, "GET", path) {
                    builder = builder.header(name, value);
                }
            }
            AuthMode::App(bearer) => {
                builder = builder.bearer_auth(bearer.expose());
            }
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<no body>"));
            return Err(Error::Api {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| Error::Decode { operation, source })
    }
}

impl Transport for RestClient {
    fn execute<'a>(
        &'a self,
        request: &'a ApiRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Value>> + Send + 'a>> {
        Box::pin(async move {
            let query = request.query();
            self.get_json(request.operation(), request.path(), &query)
                .await
        })
    }

    fn auth_mode(&self) -> &'static str {
        match self.auth {
            AuthMode::User(_) => "user",
            AuthMode::App(_) => "app",
        }
    }
}
