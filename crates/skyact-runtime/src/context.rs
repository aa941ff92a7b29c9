//! What the host build exposes to a running step

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Build-scoped environment a step runs in
pub trait BuildContext {
    /// Build environment variable, used for `${VAR}` expansion
    fn env_var(&self, name: &str) -> Option<String>;

    /// Directory relative reference-file paths are resolved against
    fn workspace(&self) -> &Path;

    /// Secret bound to the build (credentials)
    fn secret(&self, name: &str) -> Option<String>;
}

/// Expand build variables in a user-supplied value
pub fn expand_env_vars(ctx: &dyn BuildContext, raw: &str) -> String {
    skyact_config::expand_vars(raw, |name| ctx.env_var(name))
}

/// Resolve a possibly relative path against the build workspace
pub fn to_absolute_path(ctx: &dyn BuildContext, path: &str) -> PathBuf {
    skyact_config::to_absolute_path(ctx.workspace(), path)
}

/// In-process build context backed by maps
#[derive(Debug, Clone, Default)]
pub struct LocalBuildContext {
    workspace: PathBuf,
    env: HashMap<String, String>,
    secrets: HashMap<String, String>,
}

impl LocalBuildContext {
    /// Empty context rooted at `workspace`. `WORKSPACE` is always defined.
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        let workspace = workspace.into();
        let mut env = HashMap::new();
        env.insert("WORKSPACE".to_string(), workspace.display().to_string());
        Self {
            workspace,
            env,
            secrets: HashMap::new(),
        }
    }

    /// Context whose variables and secrets both come from the process
    /// environment, the way CI runners inject bound credentials.
    pub fn from_process(workspace: impl Into<PathBuf>) -> Self {
        let mut ctx = Self::new(workspace);
        for (key, value) in std::env::vars() {
            if key != "WORKSPACE" {
                ctx.env.insert(key, value);
            }
        }
        ctx
    }

    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), value.into());
        self
    }

    pub fn with_secret(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets.insert(name.into(), value.into());
        self
    }
}

impl BuildContext for LocalBuildContext {
    fn env_var(&self, name: &str) -> Option<String> {
        self.env.get(name).cloned()
    }

    fn workspace(&self) -> &Path {
        &self.workspace
    }

    fn secret(&self, name: &str) -> Option<String> {
        self.secrets
            .get(name)
            .or_else(|| self.env.get(name))
            .cloned()
    }
}
