//! Job files: several steps run in order, as a build would

use crate::{
    cli::OutputFormat,
    error::{CliError, CliResult},
    utils::{print_outcome, ColoredOutput},
};
use serde::{Deserialize, Serialize};
use skyact_config::EngineConfig;
use skyact_runtime::{ActionStep, BuildContext, StepOutcome};
use std::path::Path;
use tracing::{debug, warn};

use super::step::StepCommand;

/// Contents of a job file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobFile {
    pub steps: Vec<ActionStep>,
}

impl JobFile {
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let job: JobFile = serde_yaml::from_str(&content)?;
        if job.steps.is_empty() {
            return Err(CliError::InvalidArgument(format!(
                "job file '{}' has no steps",
                path.display()
            )));
        }
        Ok(job)
    }
}

pub struct JobCommand;

impl JobCommand {
    /// Run every step until one fails; later steps are skipped
    pub fn run(
        config: EngineConfig,
        ctx: &dyn BuildContext,
        file: &Path,
        format: OutputFormat,
    ) -> CliResult<bool> {
        let job = JobFile::load(file)?;
        let engine = StepCommand::engine(config)?;
        debug!(steps = job.steps.len(), file = %file.display(), "Loaded job file");

        let mut outcomes: Vec<StepOutcome> = Vec::with_capacity(job.steps.len());
        for (index, step) in job.steps.iter().enumerate() {
            let outcome = engine.run(step, ctx);
            let success = outcome.success;
            if format == OutputFormat::Pretty {
                print_outcome(&outcome);
            }
            outcomes.push(outcome);

            if !success {
                let skipped = job.steps.len() - index - 1;
                if skipped > 0 {
                    warn!(skipped, "Stopping job after failed step");
                    if format == OutputFormat::Pretty {
                        println!(
                            "{}",
                            ColoredOutput::dim(&format!("{} remaining step(s) skipped", skipped))
                        );
                    }
                }
                break;
            }
        }

        if format != OutputFormat::Pretty {
            println!("{}", format.render(&outcomes)?);
        }

        Ok(outcomes.iter().all(|o| o.success))
    }
}
