use serde_json::Value as JsonValue;
use skyact_connectors::ProjectDirectory;
use skyact_core::{id_from_json, ActionInput, Credentials, ResolvedId, StepError, StepResult};
use std::fs;
use std::path::Path;

use crate::context::{expand_env_vars, to_absolute_path, BuildContext};

/// Turns validated inputs into concrete resource identifiers
pub struct IdentifierResolver<'a> {
    ctx: &'a dyn BuildContext,
    projects: ProjectDirectory<'a>,
    credentials: &'a Credentials,
}

impl<'a> IdentifierResolver<'a> {
    pub fn new(
        ctx: &'a dyn BuildContext,
        projects: ProjectDirectory<'a>,
        credentials: &'a Credentials,
    ) -> Self {
        Self {
            ctx,
            projects,
            credentials,
        }
    }

    pub fn resolve(&self, input: &ActionInput) -> StepResult<ResolvedId> {
        match input {
            ActionInput::DirectId(id) => Ok(ResolvedId::new(id.as_str())),
            ActionInput::FileReference(raw) => {
                let expanded = expand_env_vars(self.ctx, raw);
                let path = to_absolute_path(self.ctx, &expanded);
                tracing::debug!(path = %path.display(), "Reading identifier from reference file");
                read_reference_file(&path)
            }
            ActionInput::ResourceName(name) => Ok(self
                .projects
                .find_project_id(name, self.credentials)?),
        }
    }
}

/// Read the root `id` of a JSON reference file
pub fn read_reference_file(path: &Path) -> StepResult<ResolvedId> {
    let display = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|source| StepError::FileNotFound {
        path: display.clone(),
        source,
    })?;

    let document: JsonValue = serde_json::from_str(&content)
        .map_err(|e| StepError::parse(&display, format!("invalid JSON: {}", e)))?;

    let root = document
        .as_object()
        .ok_or_else(|| StepError::parse(&display, "root is not a JSON object"))?;

    let id = root
        .get("id")
        .ok_or_else(|| StepError::parse(&display, "no \"id\" field at the root"))?;

    id_from_json(id)
        .ok_or_else(|| StepError::parse(&display, "\"id\" is not a string or an integer"))
}
