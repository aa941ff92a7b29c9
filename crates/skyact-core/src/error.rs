use thiserror::Error;

pub type StepResult<T> = Result<T, StepError>;

/// Every way a single action step can fail.
///
/// The orchestrator treats all variants the same (log, mark the step failed),
/// but they stay distinct so logs can tell an unreachable API apart from one
/// that rejected the operation.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("{message}")]
    InvalidInputCombination { slot: String, message: String },

    #[error("{message}")]
    MissingInput { slot: String, message: String },

    #[error("credentials unavailable: {0}")]
    CredentialsUnavailable(String),

    #[error("file not found: {path} ({source})")]
    FileNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read an identifier from {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("no project named '{0}'")]
    ProjectNotFound(String),

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Api(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl StepError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    pub fn parse(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Stable snake_case name of the variant, used in machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInputCombination { .. } => "invalid_input_combination",
            Self::MissingInput { .. } => "missing_input",
            Self::CredentialsUnavailable(_) => "credentials_unavailable",
            Self::FileNotFound { .. } => "file_not_found",
            Self::Parse { .. } => "parse_error",
            Self::ProjectNotFound(_) => "project_not_found",
            Self::Transport(_) => "transport_error",
            Self::Api(_) => "api_error",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }

    /// True for failures caught before any file or network I/O.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            Self::InvalidInputCombination { .. } | Self::MissingInput { .. }
        )
    }
}
