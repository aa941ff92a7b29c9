use serde::{Deserialize, Serialize};
use std::fmt;

use crate::sanitization::SANITIZED_PLACEHOLDER;

/// HTTP methods used by Skytap actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the value of one identifier slot comes from, after pre-flight
/// validation picked exactly one of the user's two inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum ActionInput {
    /// Identifier typed in directly
    DirectId(String),
    /// Raw path of a JSON file whose root `id` holds the identifier.
    /// Env vars are not yet expanded.
    FileReference(String),
    /// Resource name that must be looked up remotely
    ResourceName(String),
}

/// Identifier of a remote resource, fixed for the rest of a step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedId(String);

impl ResolvedId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResolvedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResolvedId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Read an identifier out of a JSON value.
///
/// The API returns IDs as strings, but hand-written reference files often use
/// bare numbers; both are accepted. Empty strings are not identifiers.
pub fn id_from_json(value: &serde_json::Value) -> Option<ResolvedId> {
    match value {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(ResolvedId::new(s.trim())),
        serde_json::Value::Number(n) if n.is_u64() || n.is_i64() => Some(ResolvedId::new(n.to_string())),
        _ => None,
    }
}

/// Authorization header value. Forwarded verbatim, never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials(String);

impl Credentials {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credentials({})", SANITIZED_PLACEHOLDER)
    }
}

/// A fully assembled request against the Skytap API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub authorization: Credentials,
}

/// Raw response as received from the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success_status(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

/// One line of step output, in the order it was produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogLine {
    pub severity: Severity,
    pub message: String,
}

impl LogLine {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Stages of the step state machine, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStage {
    Validate,
    ResolveCredentials,
    ResolveIdentifiers,
    BuildRequest,
    Execute,
    Classify,
    Done,
}

impl StepStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStage::Validate => "validate",
            StepStage::ResolveCredentials => "resolve_credentials",
            StepStage::ResolveIdentifiers => "resolve_identifiers",
            StepStage::BuildRequest => "build_request",
            StepStage::Execute => "execute",
            StepStage::Classify => "classify",
            StepStage::Done => "done",
        }
    }
}

impl fmt::Display for StepStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_is_redacted() {
        let creds = Credentials::new("Basic dXNlcjprZXk=");
        let request = ApiRequest {
            method: HttpMethod::Delete,
            url: "https://cloud.skytap.com/configurations/1".into(),
            authorization: creds.clone(),
        };
        let debug = format!("{:?}", request);
        assert!(!debug.contains("dXNlcjprZXk="));
        assert!(debug.contains(SANITIZED_PLACEHOLDER));
        assert_eq!(creds.expose(), "Basic dXNlcjprZXk=");
    }

    #[test]
    fn test_method_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&HttpMethod::Post).unwrap(), "\"POST\"");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_stages_are_ordered() {
        assert!(StepStage::Validate < StepStage::ResolveCredentials);
        assert!(StepStage::Execute < StepStage::Classify);
        assert_eq!(StepStage::ResolveIdentifiers.to_string(), "resolve_identifiers");
    }

    #[test]
    fn test_id_from_json() {
        use serde_json::json;
        assert_eq!(id_from_json(&json!("12345")), Some(ResolvedId::from("12345")));
        assert_eq!(id_from_json(&json!(12345)), Some(ResolvedId::from("12345")));
        assert_eq!(id_from_json(&json!("")), None);
        assert_eq!(id_from_json(&json!(1.5)), None);
        assert_eq!(id_from_json(&json!(null)), None);
    }

    #[test]
    fn test_response_status_range() {
        assert!(ApiResponse::new(204, "").is_success_status());
        assert!(!ApiResponse::new(404, "{}").is_success_status());
    }
}
