//! Error normalization across inconsistent remote error shapes
//!
//! The service reports failures three ways: an `{"errors": [...]}`
//! envelope, a bare `[{"code": .., "message": ..}]` array, or nothing
//! useful beyond the HTTP status. Transport failures carry no remote
//! payload at all. `classify` folds all of them into a single
//! `{code, message}` record and never fails; an input it cannot interpret
//! becomes code 1 with the stringified original rather than being dropped.

use std::fmt;

use serde::Deserialize;

use twitter_client::Error as ClientError;

/// Remote-declared code for a per-endpoint rate limit.
pub const RATE_LIMIT: i64 = 88;
/// HTTP-level too-many-requests, reported by some endpoints instead of 88.
pub const TOO_MANY_REQUESTS: i64 = 429;
/// Transient remote overload, not attributable to the caller.
pub const OVER_CAPACITY: i64 = 130;
/// Catch-all for inputs with no recognizable shape.
pub const UNKNOWN: i64 = 1;
/// Response body ended before the payload was complete.
pub const TRUNCATED_READ: i64 = 2;
/// Read or TLS timeout below the HTTP layer.
pub const READ_TIMEOUT: i64 = 3;
/// Success status whose body failed to decode.
pub const MALFORMED_BODY: i64 = 4;

/// A remote or transport failure normalized to `{code, message}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedError {
    pub code: i64,
    pub message: String,
}

impl NormalizedError {
    /// Caller-attributable limiting: rotate or surface per mode.
    pub fn is_rate_limit(&self) -> bool {
        self.code == RATE_LIMIT || self.code == TOO_MANY_REQUESTS
    }

    /// Remote overload: always rotated, never surfaced.
    pub fn is_over_capacity(&self) -> bool {
        self.code == OVER_CAPACITY
    }
}

impl fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code {}: {}", self.code, self.message)
    }
}

/// The error-array element both remote payload shapes share.
#[derive(Debug, Deserialize)]
struct ErrorItem {
    code: i64,
    message: String,
}

/// The `{"errors": [...]}` envelope shape.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    errors: Vec<ErrorItem>,
}

/// Normalize any client error. Total: always returns a value.
pub fn classify(error: &ClientError) -> NormalizedError {
    match error {
        ClientError::Api { status, body, .. } => classify_body(*status, body),
        ClientError::Transport(e) => classify_transport(e),
        ClientError::Decode { source, .. } => NormalizedError {
            code: MALFORMED_BODY,
            message: source.to_string(),
        },
        other => NormalizedError {
            code: UNKNOWN,
            message: other.to_string(),
        },
    }
}

/// Classify a non-success response body.
///
/// The envelope shape is tried first, then the bare array; a body matching
/// neither falls back to the HTTP status as the code with the body as the
/// message.
pub fn classify_body(status: u16, body: &str) -> NormalizedError {
    if let Some(first) = parse_error_items(body) {
        return NormalizedError {
            code: first.code,
            message: first.message,
        };
    }
    NormalizedError {
        code: i64::from(status),
        message: body.trim().to_owned(),
    }
}

fn parse_error_items(body: &str) -> Option<ErrorItem> {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.errors.into_iter().next();
    }
    if let Ok(items) = serde_json::from_str::<Vec<ErrorItem>>(body) {
        return items.into_iter().next();
    }
    None
}

/// Transport failures get fixed sentinel codes so they can never be
/// mistaken for remote-declared codes.
fn classify_transport(error: &reqwest::Error) -> NormalizedError {
    let code = if error.is_timeout() {
        READ_TIMEOUT
    } else if error.is_body() || error.is_decode() {
        TRUNCATED_READ
    } else {
        UNKNOWN
    };
    NormalizedError {
        code,
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_shape_yields_declared_code() {
        let result = classify_body(
            429,
            r#"{"errors":[{"code":88,"message":"Rate limit exceeded"}]}"#,
        );
        assert_eq!(
            result,
            NormalizedError {
                code: 88,
                message: "Rate limit exceeded".into()
            }
        );
        assert!(result.is_rate_limit());
    }

    #[test]
    fn bare_array_shape_yields_declared_code() {
        let result = classify_body(404, r#"[{"code":34,"message":"No user found"}]"#);
        assert_eq!(
            result,
            NormalizedError {
                code: 34,
                message: "No user found".into()
            }
        );
        assert!(!result.is_rate_limit());
    }

    #[test]
    fn envelope_takes_the_first_item() {
        let result = classify_body(
            403,
            r#"{"errors":[{"code":63,"message":"User suspended"},{"code":34,"message":"second"}]}"#,
        );
        assert_eq!(result.code, 63);
    }

    #[test]
    fn unrecognized_body_falls_back_to_status() {
        let result = classify_body(503, "<html>Service Unavailable</html>");
        assert_eq!(result.code, 503);
        assert_eq!(result.message, "<html>Service Unavailable</html>");
    }

    #[test]
    fn empty_errors_array_falls_back_to_status() {
        let result = classify_body(500, r#"{"errors":[]}"#);
        assert_eq!(result.code, 500);
    }

    #[test]
    fn over_capacity_is_recognized() {
        let result = classify_body(503, r#"{"errors":[{"code":130,"message":"Over capacity"}]}"#);
        assert!(result.is_over_capacity());
        assert!(!result.is_rate_limit());
    }

    #[test]
    fn http_429_code_counts_as_rate_limit() {
        let result = classify_body(429, "slow down");
        assert_eq!(result.code, 429);
        assert!(result.is_rate_limit());
    }

    #[test]
    fn garbage_without_status_is_unknown() {
        let error = ClientError::Handshake("garbage".into());
        let result = classify(&error);
        assert_eq!(result.code, UNKNOWN);
        assert!(result.message.contains("garbage"), "got: {}", result.message);
    }

    #[test]
    fn malformed_success_body_gets_its_sentinel() {
        let source = serde_json::from_str::<serde_json::Value>("{truncated").unwrap_err();
        let error = ClientError::Decode {
            operation: "statuses/user_timeline",
            source,
        };
        let result = classify(&error);
        assert_eq!(result.code, MALFORMED_BODY);
    }

    #[test]
    fn api_errors_route_through_body_classification() {
        let error = ClientError::Api {
            operation: "search/tweets",
            status: 429,
            body: r#"{"errors":[{"code":88,"message":"Rate limit exceeded"}]}"#.into(),
        };
        assert_eq!(classify(&error).code, 88);
    }

    #[tokio::test]
    async fn connect_failures_are_unknown_not_remote_codes() {
        // A refused connection carries no remote payload; it must land on
        // the catch-all, never on a remote-looking code.
        let transport_err = reqwest::Client::new()
            .get("http://127.0.0.1:1/")
            .send()
            .await
            .unwrap_err();
        let result = classify(&ClientError::Transport(transport_err));
        assert_eq!(result.code, UNKNOWN);
    }

    #[test]
    fn sentinel_codes_are_distinct() {
        let sentinels = [UNKNOWN, TRUNCATED_READ, READ_TIMEOUT, MALFORMED_BODY];
        for code in sentinels {
            assert_ne!(code, RATE_LIMIT);
            assert_ne!(code, TOO_MANY_REQUESTS);
            assert_ne!(code, OVER_CAPACITY);
        }
    }

    #[test]
    fn display_includes_code_and_message() {
        let err = NormalizedError {
            code: 88,
            message: "Rate limit exceeded".into(),
        };
        assert_eq!(err.to_string(), "code 88: Rate limit exceeded");
    }
}
