//! Single step execution

use crate::{
    cli::OutputFormat,
    error::{CliError, CliResult},
    utils::print_outcome,
};
use skyact_config::EngineConfig;
use skyact_runtime::{ActionEngine, ActionStep, BuildContext, StepOutcome};
use tracing::info;

pub struct StepCommand;

impl StepCommand {
    /// Run one step and print its outcome. `Ok(false)` means the step failed.
    pub fn run(
        config: EngineConfig,
        ctx: &dyn BuildContext,
        step: &ActionStep,
        format: OutputFormat,
    ) -> CliResult<bool> {
        let engine = Self::engine(config)?;
        let outcome = engine.run(step, ctx);
        Self::display(&outcome, format)?;
        Ok(outcome.success)
    }

    pub(crate) fn engine(config: EngineConfig) -> CliResult<ActionEngine> {
        info!(base_url = %config.base_url, "Preparing step engine");
        ActionEngine::from_config(config).map_err(|e| CliError::General(e.to_string()))
    }

    fn display(outcome: &StepOutcome, format: OutputFormat) -> CliResult<()> {
        match format {
            OutputFormat::Pretty => print_outcome(outcome),
            _ => println!("{}", format.render(outcome)?),
        }
        Ok(())
    }
}
