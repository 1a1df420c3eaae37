//! HTTP function invoker
//!
//! POSTs the payload to `{endpoint}/{key}` and reads a number back.
//! Uses ureq (sync HTTP), so no async runtime is needed.

use super::{FunctionInvoker, InvokerError, InvokerResult};
use crate::config::EXTERNAL_KEY_ENV;
use std::env;
use std::time::Duration;
use tracing::debug;

/// Environment variable holding the function service base URL
pub const FUNCTION_URL_ENV: &str = "BLACKBOX_FUNCTION_URL";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpInvoker {
    endpoint: String,
    api_key: String,
    agent: ureq::Agent,
}

fn make_agent(timeout: Duration) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // status codes are mapped to InvokerError::Api below
        .timeout_global(Some(timeout))
        .build()
        .new_agent()
}

impl HttpInvoker {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self {
            endpoint,
            api_key: api_key.into(),
            agent: make_agent(DEFAULT_TIMEOUT),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.agent = make_agent(timeout);
        self
    }

    pub fn from_env() -> InvokerResult<Self> {
        let endpoint = env::var(FUNCTION_URL_ENV).map_err(|_| InvokerError::MissingCredential {
            env_var: FUNCTION_URL_ENV.to_string(),
        })?;
        let api_key = env::var(EXTERNAL_KEY_ENV).map_err(|_| InvokerError::MissingCredential {
            env_var: EXTERNAL_KEY_ENV.to_string(),
        })?;
        Ok(Self::new(endpoint, api_key))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.endpoint, key)
    }
}

impl FunctionInvoker for HttpInvoker {
    fn invoke(&self, key: &str, payload: &str) -> InvokerResult<Option<f64>> {
        let url = self.url_for(key);
        debug!("Invoking {} ({} byte payload)", url, payload.len());

        let response = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .send(payload)
            .map_err(|e| InvokerError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = read_body(status, response.into_body().read_to_string())?;
        map_response(status, &body)
    }
}

/// A failed read is a request error on success. An unreadable error body
/// still reports the status.
fn read_body(status: u16, read: Result<String, ureq::Error>) -> InvokerResult<String> {
    if status >= 400 {
        return Ok(read.unwrap_or_default());
    }
    read.map_err(|e| InvokerError::Request(e.to_string()))
}

/// Map a status and body to the function's result.
pub(crate) fn map_response(status: u16, body: &str) -> InvokerResult<Option<f64>> {
    if status >= 400 {
        return Err(InvokerError::Api {
            status,
            message: body.to_string(),
        });
    }
    parse_numeric_response(body)
}

/// Interpret a function response body.
///
/// Accepts a bare JSON number, `null`, an object with a numeric `score`
/// field, or plain text holding a number. An empty body means no value.
pub(crate) fn parse_numeric_response(body: &str) -> InvokerResult<Option<f64>> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Number(n)) => Ok(n.as_f64()),
        Ok(serde_json::Value::Null) => Ok(None),
        Ok(serde_json::Value::Object(map)) => Ok(map.get("score").and_then(|v| v.as_f64())),
        Ok(serde_json::Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| InvokerError::Parse(format!("not a number: {s:?}"))),
        Ok(other) => Err(InvokerError::Parse(format!("unexpected response: {other}"))),
        Err(_) => trimmed
            .parse::<f64>()
            .map(Some)
            .map_err(|_| InvokerError::Parse(format!("not a number: {trimmed:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let invoker = HttpInvoker::new("https://functions.example.com/", "key");
        assert_eq!(invoker.endpoint(), "https://functions.example.com");
        assert_eq!(
            invoker.url_for("blackbox-production-spamScore"),
            "https://functions.example.com/blackbox-production-spamScore"
        );
    }

    #[test]
    fn test_parse_bare_number() {
        assert_eq!(parse_numeric_response("5").unwrap(), Some(5.0));
        assert_eq!(parse_numeric_response(" 12.5\n").unwrap(), Some(12.5));
    }

    #[test]
    fn test_parse_null_and_empty() {
        assert_eq!(parse_numeric_response("null").unwrap(), None);
        assert_eq!(parse_numeric_response("").unwrap(), None);
        assert_eq!(parse_numeric_response("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_score_object() {
        assert_eq!(parse_numeric_response(r#"{"score": 42}"#).unwrap(), Some(42.0));
        assert_eq!(parse_numeric_response(r#"{"other": 1}"#).unwrap(), None);
    }

    #[test]
    fn test_parse_quoted_number() {
        assert_eq!(parse_numeric_response(r#""7""#).unwrap(), Some(7.0));
    }

    #[test]
    fn test_parse_garbage_is_error() {
        assert!(matches!(
            parse_numeric_response("<html>oops</html>"),
            Err(InvokerError::Parse(_))
        ));
        assert!(parse_numeric_response("[1, 2]").is_err());
        assert!(parse_numeric_response(r#""abc""#).is_err());
    }

    #[test]
    fn test_map_success_with_number() {
        assert_eq!(map_response(200, "5").unwrap(), Some(5.0));
        assert_eq!(map_response(201, r#"{"score": 3.5}"#).unwrap(), Some(3.5));
    }

    #[test]
    fn test_map_success_with_empty_body() {
        assert_eq!(map_response(200, "").unwrap(), None);
        assert_eq!(map_response(204, "").unwrap(), None);
    }

    #[test]
    fn test_map_client_error() {
        match map_response(404, "no such function") {
            Err(InvokerError::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "no such function");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_map_server_error_keeps_message() {
        let err = map_response(500, "function crashed").unwrap_err();
        assert!(matches!(err, InvokerError::Api { status: 500, .. }));
        assert_eq!(err.to_string(), "Function error: 500 - function crashed");
    }

    #[test]
    fn test_map_error_status_ignores_numeric_body() {
        assert!(matches!(
            map_response(503, "7"),
            Err(InvokerError::Api { status: 503, .. })
        ));
    }

    fn truncated() -> ureq::Error {
        ureq::Error::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "connection closed mid-body",
        ))
    }

    #[test]
    fn test_read_failure_on_success_is_request_error() {
        assert!(matches!(
            read_body(200, Err(truncated())),
            Err(InvokerError::Request(_))
        ));
        assert_eq!(read_body(200, Ok("5".to_string())).unwrap(), "5");
    }

    #[test]
    fn test_read_failure_on_error_status_keeps_status() {
        let body = read_body(500, Err(truncated())).unwrap();
        assert_eq!(body, "");
        assert!(matches!(
            map_response(500, &body),
            Err(InvokerError::Api { status: 500, .. })
        ));
    }

    #[test]
    #[ignore = "needs a closed local port"]
    fn test_unreachable_service_is_request_error() {
        // Port 9 (discard) on localhost is usually closed
        let invoker = HttpInvoker::new("http://127.0.0.1:9", "key")
            .with_timeout(Duration::from_millis(500));
        assert!(matches!(
            invoker.invoke("k", "{}"),
            Err(InvokerError::Request(_))
        ));
    }
}
