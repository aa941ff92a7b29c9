use serde_json::Value as JsonValue;
use skyact_config::ClassificationMode;
use skyact_core::ApiResponse;

use crate::error::{ConnectorError, ConnectorResult};

/// Decides whether a response means the operation succeeded.
///
/// The API reports failures as a JSON object carrying an `error` (or
/// `errors`) field. In [`ClassificationMode::Compat`] anything without such a
/// marker is a success, including empty and non-JSON bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseClassifier {
    mode: ClassificationMode,
}

impl ResponseClassifier {
    pub fn new(mode: ClassificationMode) -> Self {
        Self { mode }
    }

    /// `Ok(())` on success, `Api` or `MalformedResponse` otherwise
    pub fn classify(&self, response: &ApiResponse) -> ConnectorResult<()> {
        let parsed = serde_json::from_str::<JsonValue>(&response.body).ok();

        if let Some(message) = parsed.as_ref().and_then(find_error_message) {
            tracing::debug!(status = response.status, error = %message, "Response carries an API error");
            return Err(ConnectorError::Api(message));
        }

        if self.mode == ClassificationMode::Strict {
            if !response.is_success_status() {
                return Err(ConnectorError::Api(format!("HTTP status {}", response.status)));
            }
            if response.body.trim().is_empty() {
                return Err(ConnectorError::MalformedResponse("empty response body".into()));
            }
            if parsed.is_none() {
                return Err(ConnectorError::MalformedResponse(
                    "response body is not valid JSON".into(),
                ));
            }
        }

        Ok(())
    }
}

/// Extract the human-readable message of an embedded API error, if any
pub fn find_error_message(body: &JsonValue) -> Option<String> {
    let object = body.as_object()?;

    if let Some(error) = object.get("error") {
        if error.is_null() {
            return None;
        }
        return Some(match error {
            JsonValue::String(message) => message.clone(),
            JsonValue::Object(inner) => match inner.get("message") {
                Some(JsonValue::String(message)) => message.clone(),
                _ => error.to_string(),
            },
            other => other.to_string(),
        });
    }

    match object.get("errors") {
        Some(JsonValue::Array(errors)) if !errors.is_empty() => Some(
            errors
                .iter()
                .map(|e| match e {
                    JsonValue::String(s) => s.clone(),
                    other => find_error_message(other).unwrap_or_else(|| other.to_string()),
                })
                .collect::<Vec<_>>()
                .join("; "),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compat() -> ResponseClassifier {
        ResponseClassifier::default()
    }

    fn strict() -> ResponseClassifier {
        ResponseClassifier::new(ClassificationMode::Strict)
    }

    #[test]
    fn test_nested_error_message() {
        let err = compat()
            .classify(&ApiResponse::new(200, r#"{"error":{"message":"bad request"}}"#))
            .unwrap_err();
        assert!(matches!(err, ConnectorError::Api(ref m) if m == "bad request"));
    }

    #[test]
    fn test_plain_error_string_and_errors_array() {
        assert_eq!(
            find_error_message(&json!({"error": "Configuration is busy"})).as_deref(),
            Some("Configuration is busy")
        );
        assert_eq!(
            find_error_message(&json!({"errors": ["quota exceeded", "try later"]})).as_deref(),
            Some("quota exceeded; try later")
        );
        assert_eq!(
            find_error_message(&json!({"error": {"code": 42}})).as_deref(),
            Some(r#"{"code":42}"#)
        );
    }

    #[test]
    fn test_success_bodies() {
        compat()
            .classify(&ApiResponse::new(200, r#"{"id":"999","name":"env1"}"#))
            .unwrap();
        compat().classify(&ApiResponse::new(200, "")).unwrap();
        compat().classify(&ApiResponse::new(200, "<html>ok</html>")).unwrap();
        compat().classify(&ApiResponse::new(200, r#"{"error":null}"#)).unwrap();
        compat().classify(&ApiResponse::new(200, r#"{"errors":[]}"#)).unwrap();
        compat().classify(&ApiResponse::new(200, r#"[{"error":"x"}]"#)).unwrap();
    }

    #[test]
    fn test_compat_ignores_status() {
        compat().classify(&ApiResponse::new(500, "oops")).unwrap();
    }

    #[test]
    fn test_strict_mode() {
        assert!(matches!(
            strict().classify(&ApiResponse::new(200, "")),
            Err(ConnectorError::MalformedResponse(_))
        ));
        assert!(matches!(
            strict().classify(&ApiResponse::new(200, "<html/>")),
            Err(ConnectorError::MalformedResponse(_))
        ));
        assert!(matches!(
            strict().classify(&ApiResponse::new(404, "{}")),
            Err(ConnectorError::Api(ref m)) if m == "HTTP status 404"
        ));
        strict().classify(&ApiResponse::new(200, r#"{"id":"1"}"#)).unwrap();
    }

    #[test]
    fn test_error_marker_wins_over_status() {
        let err = strict()
            .classify(&ApiResponse::new(422, r#"{"error":"Name is invalid"}"#))
            .unwrap_err();
        assert!(matches!(err, ConnectorError::Api(ref m) if m == "Name is invalid"));
    }
}
