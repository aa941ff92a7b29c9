use std::fs;
use std::path::Path;

use crate::engine::{ClassificationMode, EngineConfig};
use crate::error::{ConfigError, ConfigResult};

/// Prefix of environment variables that override file settings
pub const ENV_PREFIX: &str = "SKYACT_";

/// Builds an [`EngineConfig`] from defaults, an optional YAML file and
/// `SKYACT_*` environment overrides, in that order of precedence.
pub struct ConfigLoader<F = fn(&str) -> Option<String>> {
    lookup: F,
}

impl ConfigLoader {
    /// Loader reading overrides from the process environment
    pub fn from_process_env() -> Self {
        Self {
            lookup: |key: &str| std::env::var(key).ok(),
        }
    }
}

impl<F> ConfigLoader<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Loader reading overrides through a custom lookup
    pub fn with_lookup(lookup: F) -> Self {
        Self { lookup }
    }

    /// Load configuration; `path` may be omitted to start from defaults
    pub fn load(&self, path: Option<&Path>) -> ConfigResult<EngineConfig> {
        let mut config = match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading engine configuration");
                let content = fs::read_to_string(path)?;
                parse_config(&content)?
            }
            None => EngineConfig::default(),
        };

        self.apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&self, config: &mut EngineConfig) -> ConfigResult<()> {
        if let Some(value) = self.var("BASE_URL") {
            config.base_url = value;
        }
        if let Some(value) = self.var("LOGGING_ENABLED") {
            config.logging_enabled = parse_bool("logging_enabled", &value)?;
        }
        if let Some(value) = self.var("CLASSIFICATION") {
            config.classification = value.parse::<ClassificationMode>()?;
        }
        if let Some(value) = self.var("TIMEOUT_SECS") {
            config.timeout_secs = value.trim().parse().map_err(|_| {
                ConfigError::invalid_value("timeout_secs", format!("'{}' is not a number", value))
            })?;
        }
        if let Some(value) = self.var("USER_AGENT") {
            config.user_agent = value;
        }
        Ok(())
    }

    fn var(&self, suffix: &str) -> Option<String> {
        let key = format!("{}{}", ENV_PREFIX, suffix);
        let value = (self.lookup)(&key)?;
        tracing::debug!(key = %key, "Applying environment override");
        Some(value)
    }
}

/// Parse YAML (or JSON, which is valid YAML) configuration content
pub fn parse_config(content: &str) -> ConfigResult<EngineConfig> {
    if content.trim().is_empty() {
        return Ok(EngineConfig::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

fn parse_bool(key: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::invalid_value(
            key,
            format!("'{}' is not a boolean", other),
        )),
    }
}
