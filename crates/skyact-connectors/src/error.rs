use skyact_core::StepError;

#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("{0}")]
    Api(String),

    #[error("{0}")]
    MalformedResponse(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<ConnectorError> for StepError {
    fn from(err: ConnectorError) -> Self {
        match err {
            ConnectorError::Http(e) => StepError::Transport(describe_transport_error(&e)),
            ConnectorError::Serialization(e) => StepError::MalformedResponse(e.to_string()),
            ConnectorError::InvalidConfig(msg) => {
                StepError::Transport(format!("invalid client configuration: {}", msg))
            }
            ConnectorError::Authentication(msg) => StepError::CredentialsUnavailable(msg),
            ConnectorError::Api(msg) => StepError::Api(msg),
            ConnectorError::MalformedResponse(msg) => StepError::MalformedResponse(msg),
            ConnectorError::NotFound(name) => StepError::ProjectNotFound(name),
        }
    }
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    let kind = if err.is_timeout() {
        "request timed out"
    } else if err.is_connect() {
        "could not connect"
    } else if err.is_body() || err.is_decode() {
        "could not read response"
    } else if err.is_builder() {
        "could not build request"
    } else {
        "request failed"
    };
    format!("{}: {}", kind, err)
}

pub type ConnectorResult<T> = Result<T, ConnectorError>;
