use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ConfigError, ConfigResult};

pub const DEFAULT_BASE_URL: &str = "https://cloud.skytap.com";

/// How responses without an explicit error marker are judged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationMode {
    /// No error marker means success, whatever the status or body shape
    #[default]
    Compat,
    /// Non-2xx statuses and empty or non-JSON bodies also fail the step
    Strict,
}

impl std::str::FromStr for ClassificationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compat" => Ok(Self::Compat),
            "strict" => Ok(Self::Strict),
            other => Err(ConfigError::invalid_value(
                "classification",
                format!("expected 'compat' or 'strict', got '{}'", other),
            )),
        }
    }
}

/// Settings threaded into the action engine at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// API host every request path is appended to
    pub base_url: String,
    /// Record detail lines (URLs, identifiers, response bodies)
    pub logging_enabled: bool,
    pub classification: ClassificationMode,
    /// Whole-request timeout
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            logging_enabled: true,
            classification: ClassificationMode::Compat,
            timeout_secs: 60,
            user_agent: format!("skyact/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl EngineConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    pub fn with_classification(mut self, mode: ClassificationMode) -> Self {
        self.classification = mode;
        self
    }

    /// Base URL without a trailing slash, ready for path concatenation
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Reject settings that would let request assembly produce a bad URL
    pub fn validate(&self) -> ConfigResult<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::invalid_value("base_url", e.to_string()))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ConfigError::invalid_value(
                "base_url",
                "must not carry a query string or fragment",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid_value("timeout_secs", "must be positive"));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Validation("user_agent must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.base_url, "https://cloud.skytap.com");
        assert!(cfg.logging_enabled);
        assert_eq!(cfg.classification, ClassificationMode::Compat);
        cfg.validate().unwrap();
    }

    #[test]
    fn test_api_root_trims_trailing_slash() {
        let cfg = EngineConfig::default().with_base_url("http://127.0.0.1:8080/");
        assert_eq!(cfg.api_root(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let cfg = EngineConfig::default().with_base_url("ftp://cloud.skytap.com");
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidValue { .. })));

        let cfg = EngineConfig::default().with_base_url("not a url");
        assert!(cfg.validate().is_err());

        let cfg = EngineConfig::default().with_base_url("https://cloud.skytap.com/?x=1");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_classification_from_str() {
        assert_eq!("STRICT".parse::<ClassificationMode>().unwrap(), ClassificationMode::Strict);
        assert_eq!(" compat ".parse::<ClassificationMode>().unwrap(), ClassificationMode::Compat);
        assert!("lenient".parse::<ClassificationMode>().is_err());
    }
}
