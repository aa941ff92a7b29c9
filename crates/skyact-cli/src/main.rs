//! SkyAct CLI main entry point

use anyhow::{Context, Result};
use clap::Parser;
use skyact_cli::{
    cli::{Cli, Commands},
    commands::{CheckCommand, JobCommand, ListCommand, StepCommand},
    utils::{build_context, init_tracing, load_config, ColoredOutput},
};
use skyact_runtime::ActionStep;
use tracing::debug;

fn main() {
    let exit_code = match run() {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("{} {:#}", ColoredOutput::error("Error:"), e);
            2
        }
    };

    std::process::exit(exit_code);
}

/// `Ok(false)` when a step or check failed
fn run() -> Result<bool> {
    let cli = Cli::parse();

    init_tracing(cli.verbose)?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    debug!("SkyAct CLI v{}", env!("CARGO_PKG_VERSION"));

    let Cli {
        command,
        config,
        workspace,
        quiet,
        format,
        ..
    } = cli;
    let config = config.as_deref();

    match command {
        Commands::Check { slot, id, alternate } => {
            Ok(CheckCommand::run(slot, &id, &alternate, format)?)
        }

        Commands::List => {
            ListCommand::run(format)?;
            Ok(true)
        }

        Commands::AddConfigurationToProject {
            configuration,
            project_id,
            project_name,
        } => {
            let step = ActionStep::AddConfigurationToProject {
                configuration_id: configuration.configuration_id,
                configuration_file: configuration.configuration_file,
                project_id,
                project_name,
            };
            let ctx = build_context(&workspace)?;
            Ok(StepCommand::run(load_config(config, quiet)?, &ctx, &step, format)?)
        }

        Commands::DeleteConfiguration { configuration } => {
            let step = ActionStep::DeleteConfiguration {
                configuration_id: configuration.configuration_id,
                configuration_file: configuration.configuration_file,
            };
            let ctx = build_context(&workspace)?;
            Ok(StepCommand::run(load_config(config, quiet)?, &ctx, &step, format)?)
        }

        Commands::Run { file } => {
            let ctx = build_context(&workspace)?;
            let ok = JobCommand::run(load_config(config, quiet)?, &ctx, &file, format)
                .with_context(|| format!("Job {} could not be run", file.display()))?;
            Ok(ok)
        }
    }
}
