pub mod check;
pub mod job;
pub mod list;
pub mod step;

// Re-export command handlers
pub use check::CheckCommand;
pub use job::{JobCommand, JobFile};
pub use list::ListCommand;
pub use step::StepCommand;
