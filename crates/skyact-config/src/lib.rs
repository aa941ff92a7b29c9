pub mod engine;
pub mod env_resolver;
pub mod error;
pub mod loader;

// Re-export commonly used types
pub use engine::{ClassificationMode, EngineConfig, DEFAULT_BASE_URL};
pub use env_resolver::{expand_vars, to_absolute_path};
pub use error::{ConfigError, ConfigResult};
pub use loader::{parse_config, ConfigLoader, ENV_PREFIX};
