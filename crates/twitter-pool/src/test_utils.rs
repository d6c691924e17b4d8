//! Scripted transports for exercising the router without a network.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use serde_json::{Value, json};

use twitter_client::{ApiRequest, Error as ClientError, Transport};

/// Transport returning canned outcomes in order; once the script drains,
/// every further call succeeds with the fallback payload.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<twitter_client::Result<Value>>>,
    fallback: Value,
    operations: Mutex<Vec<&'static str>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<twitter_client::Result<Value>>) -> Self {
        Self::with_fallback(script, json!({"ok": true}))
    }

    pub fn with_fallback(script: Vec<twitter_client::Result<Value>>, fallback: Value) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            operations: Mutex::new(Vec::new()),
        }
    }

    pub fn operations(&self) -> Vec<&'static str> {
        self.operations.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn execute<'a>(
        &'a self,
        request: &'a ApiRequest,
    ) -> Pin<Box<dyn Future<Output = twitter_client::Result<Value>> + Send + 'a>> {
        self.operations.lock().unwrap().push(request.operation());
        let outcome = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(self.fallback.clone()));
        Box::pin(async move { outcome })
    }

    fn auth_mode(&self) -> &'static str {
        "user"
    }
}

pub fn rate_limit_error() -> ClientError {
    ClientError::Api {
        operation: "scripted",
        status: 429,
        body: r#"{"errors":[{"code":88,"message":"Rate limit exceeded"}]}"#.into(),
    }
}

pub fn too_many_requests_error() -> ClientError {
    ClientError::Api {
        operation: "scripted",
        status: 429,
        body: r#"{"errors":[{"code":429,"message":"Too Many Requests"}]}"#.into(),
    }
}

pub fn over_capacity_error() -> ClientError {
    ClientError::Api {
        operation: "scripted",
        status: 503,
        body: r#"{"errors":[{"code":130,"message":"Over capacity"}]}"#.into(),
    }
}

pub fn not_found_error() -> ClientError {
    ClientError::Api {
        operation: "scripted",
        status: 404,
        body: r#"[{"code":34,"message":"Sorry, that page does not exist"}]"#.into(),
    }
}
