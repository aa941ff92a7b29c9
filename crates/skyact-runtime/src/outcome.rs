use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skyact_core::{ApiRequest, HttpMethod, LogLine, StepError, StepStage};

/// Result of one step execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    pub success: bool,
    /// Console lines in emission order
    pub lines: Vec<LogLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<StepFailure>,
    /// The call that was sent, if the step got that far
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestSummary>,
    /// Raw body of the last response received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_body: Option<String>,
    pub metadata: ExecutionMetadata,
}

impl StepOutcome {
    /// Lines joined the way a build console shows them
    pub fn console_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.message.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFailure {
    pub stage: StepStage,
    /// Snake-case error kind, see [`StepError::kind`]
    pub kind: String,
    pub message: String,
}

impl StepFailure {
    pub fn new(stage: StepStage, error: &StepError) -> Self {
        Self {
            stage,
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

/// Method and URL of the sent request; never the credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSummary {
    pub method: HttpMethod,
    pub url: String,
}

impl From<&ApiRequest> for RequestSummary {
    fn from(request: &ApiRequest) -> Self {
        Self {
            method: request.method,
            url: request.url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    /// Action name, e.g. `delete-configuration`
    pub action: String,
    pub duration_ms: u64,
    /// When the step started
    pub timestamp: DateTime<Utc>,
}
