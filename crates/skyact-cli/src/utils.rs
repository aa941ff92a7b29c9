//! Utility functions for the CLI

use crate::error::{CliError, CliResult};
use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use skyact_config::{ConfigLoader, EngineConfig};
use skyact_core::Severity;
use skyact_runtime::{LocalBuildContext, StepOutcome};
use std::path::Path;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize tracing; `RUST_LOG` wins over the verbosity flag
pub fn init_tracing(verbose: bool) -> CliResult<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| CliError::General(format!("Failed to set tracing subscriber: {}", e)))?;

    Ok(())
}

/// Load engine configuration; `quiet` turns step logging off
pub fn load_config(path: Option<&Path>, quiet: bool) -> Result<EngineConfig> {
    let config = ConfigLoader::from_process_env().load(path).with_context(|| match path {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to load configuration from environment".to_string(),
    })?;

    Ok(if quiet {
        config.with_logging(false)
    } else {
        config
    })
}

/// Build context rooted at `workspace`, made absolute against the current directory
pub fn build_context(workspace: &Path) -> Result<LocalBuildContext> {
    let workspace = if workspace.is_absolute() {
        workspace.to_path_buf()
    } else {
        std::env::current_dir()
            .context("Failed to read current directory")?
            .join(workspace)
    };
    Ok(LocalBuildContext::from_process(workspace))
}

/// Utility for colored console output
pub struct ColoredOutput;

impl ColoredOutput {
    pub fn success(msg: &str) -> ColoredString {
        msg.green().bold()
    }

    pub fn error(msg: &str) -> ColoredString {
        msg.red().bold()
    }

    pub fn info(msg: &str) -> ColoredString {
        msg.blue()
    }

    pub fn dim(msg: &str) -> ColoredString {
        msg.dimmed()
    }

    pub fn highlight(msg: &str) -> ColoredString {
        msg.cyan().bold()
    }
}

/// Format duration in a human-readable way
pub fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        format!("{:.1}m", ms as f64 / 60_000.0)
    }
}

/// Print step console lines followed by a one-line summary
pub fn print_outcome(outcome: &StepOutcome) {
    for line in &outcome.lines {
        match line.severity {
            Severity::Info => println!("{}", line.message),
            Severity::Error => println!("{}", ColoredOutput::error(&line.message)),
        }
    }

    let duration = format_duration(outcome.metadata.duration_ms);
    match &outcome.failure {
        None => println!(
            "{} {} {}",
            ColoredOutput::success("✓"),
            ColoredOutput::highlight(&outcome.metadata.action),
            ColoredOutput::dim(&format!("({})", duration))
        ),
        Some(failure) => println!(
            "{} {} {}",
            ColoredOutput::error("✗"),
            ColoredOutput::highlight(&outcome.metadata.action),
            ColoredOutput::dim(&format!("(failed at {}, {})", failure.stage, duration))
        ),
    }
}
