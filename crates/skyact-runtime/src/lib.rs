pub mod action;
pub mod context;
pub mod engine;
pub mod logger;
pub mod outcome;
pub mod resolver;

pub use action::{
    ActionDescriptor, ActionKind, ActionStep, GlobalOptions, SlotInput, CONFIGURATION_SLOT,
    PROJECT_SLOT,
};
pub use context::{expand_env_vars, to_absolute_path, BuildContext, LocalBuildContext};
pub use engine::ActionEngine;
pub use logger::StepLogger;
pub use outcome::{ExecutionMetadata, RequestSummary, StepFailure, StepOutcome};
pub use resolver::{read_reference_file, IdentifierResolver};
