//! Supported actions and the step configuration a host hands over

use serde::{Deserialize, Serialize};
use skyact_config::EngineConfig;
use skyact_connectors::{IdentifierMap, PathSegment, RequestTemplate};
use skyact_core::{AlternateSource, HttpMethod, IdentifierSlot};
use std::fmt;
use std::str::FromStr;

use crate::context::BuildContext;
use crate::engine::ActionEngine;

/// Plugin-wide settings shared by every step of a build
pub type GlobalOptions = EngineConfig;

pub const CONFIGURATION_SLOT: IdentifierSlot = IdentifierSlot {
    name: "configuration",
    alternate: AlternateSource::File,
    missing_hint: "Please provide either a valid Skytap configuration ID, or a valid configuration file.",
};

pub const PROJECT_SLOT: IdentifierSlot = IdentifierSlot {
    name: "project",
    alternate: AlternateSource::Name,
    missing_hint: "Please provide either the name or ID of a valid Skytap project.",
};

/// Static description of one action: what it needs and which call it makes
#[derive(Clone, Copy)]
pub struct ActionDescriptor {
    pub kind: ActionKind,
    /// Stable name used in job files and on the command line
    pub name: &'static str,
    /// Heading printed between the title bars
    pub title: &'static str,
    /// Identifier slots, in resolution order
    pub slots: &'static [IdentifierSlot],
    pub template: RequestTemplate,
    pub success_message: fn(&IdentifierMap) -> String,
}

static ADD_CONFIGURATION_TO_PROJECT: ActionDescriptor = ActionDescriptor {
    kind: ActionKind::AddConfigurationToProject,
    name: "add-configuration-to-project",
    title: "Add Configuration to Project",
    slots: &[CONFIGURATION_SLOT, PROJECT_SLOT],
    template: RequestTemplate {
        method: HttpMethod::Post,
        path: &[
            PathSegment::Literal("projects"),
            PathSegment::Slot("project"),
            PathSegment::Literal("configurations"),
            PathSegment::Slot("configuration"),
        ],
    },
    success_message: added_to_project,
};

static DELETE_CONFIGURATION: ActionDescriptor = ActionDescriptor {
    kind: ActionKind::DeleteConfiguration,
    name: "delete-configuration",
    title: "Delete Configuration",
    slots: &[CONFIGURATION_SLOT],
    template: RequestTemplate {
        method: HttpMethod::Delete,
        path: &[
            PathSegment::Literal("configurations"),
            PathSegment::Slot("configuration"),
        ],
    },
    success_message: configuration_deleted,
};

fn added_to_project(ids: &IdentifierMap) -> String {
    format!(
        "Environment {} was successfully added to project {}",
        slot_value(ids, "configuration"),
        slot_value(ids, "project")
    )
}

fn configuration_deleted(ids: &IdentifierMap) -> String {
    format!(
        "Configuration {} was successfully deleted.",
        slot_value(ids, "configuration")
    )
}

fn slot_value<'a>(ids: &'a IdentifierMap, slot: &str) -> &'a str {
    ids.get(slot).map(|id| id.as_str()).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    AddConfigurationToProject,
    DeleteConfiguration,
}

impl ActionKind {
    pub const ALL: [ActionKind; 2] = [ActionKind::AddConfigurationToProject, ActionKind::DeleteConfiguration];

    pub fn descriptor(&self) -> &'static ActionDescriptor {
        match self {
            ActionKind::AddConfigurationToProject => &ADD_CONFIGURATION_TO_PROJECT,
            ActionKind::DeleteConfiguration => &DELETE_CONFIGURATION,
        }
    }

    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown action '{}'", s))
    }
}

/// Raw user input for one identifier slot
#[derive(Debug, Clone, Copy)]
pub struct SlotInput<'a> {
    pub slot: &'static IdentifierSlot,
    pub direct: &'a str,
    pub alternate: &'a str,
}

/// One configured build step, as entered by the user.
///
/// Fields are kept verbatim; validation happens when the step runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case", deny_unknown_fields)]
pub enum ActionStep {
    AddConfigurationToProject {
        #[serde(default)]
        configuration_id: String,
        #[serde(default)]
        configuration_file: String,
        #[serde(default)]
        project_id: String,
        #[serde(default)]
        project_name: String,
    },
    DeleteConfiguration {
        #[serde(default)]
        configuration_id: String,
        #[serde(default)]
        configuration_file: String,
    },
}

impl ActionStep {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionStep::AddConfigurationToProject { .. } => ActionKind::AddConfigurationToProject,
            ActionStep::DeleteConfiguration { .. } => ActionKind::DeleteConfiguration,
        }
    }

    pub fn descriptor(&self) -> &'static ActionDescriptor {
        self.kind().descriptor()
    }

    /// User input per slot, in the descriptor's slot order
    pub fn slot_inputs(&self) -> Vec<SlotInput<'_>> {
        match self {
            ActionStep::AddConfigurationToProject {
                configuration_id,
                configuration_file,
                project_id,
                project_name,
            } => vec![
                SlotInput {
                    slot: &CONFIGURATION_SLOT,
                    direct: configuration_id,
                    alternate: configuration_file,
                },
                SlotInput {
                    slot: &PROJECT_SLOT,
                    direct: project_id,
                    alternate: project_name,
                },
            ],
            ActionStep::DeleteConfiguration {
                configuration_id,
                configuration_file,
            } => vec![SlotInput {
                slot: &CONFIGURATION_SLOT,
                direct: configuration_id,
                alternate: configuration_file,
            }],
        }
    }

    /// Host entry point: run the step and report whether the build may go on
    pub fn execute_step(&self, ctx: &dyn BuildContext, globals: &GlobalOptions) -> bool {
        match ActionEngine::from_config(globals.clone()) {
            Ok(engine) => engine.run(self, ctx).success,
            Err(e) => {
                tracing::error!(action = %self.kind(), error = %e, "Could not set up the step engine");
                false
            }
        }
    }
}
