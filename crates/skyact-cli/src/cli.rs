//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "skyact",
    about = "SkyAct - Skytap build-step actions",
    version,
    author = "SkyAct Team"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Engine configuration file (YAML)
    #[arg(long, global = true, env = "SKYACT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Build workspace that relative file paths resolve against
    #[arg(long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// Only print banners and errors
    #[arg(short, long, global = true, help = "Suppress detail lines in step output")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add an existing configuration to a project
    AddConfigurationToProject {
        #[command(flatten)]
        configuration: ConfigurationArgs,

        /// Project ID
        #[arg(long, default_value = "")]
        project_id: String,

        /// Project name, looked up through the API
        #[arg(long, default_value = "")]
        project_name: String,
    },

    /// Delete a configuration
    DeleteConfiguration {
        #[command(flatten)]
        configuration: ConfigurationArgs,
    },

    /// Run the steps of a YAML job file in order, stopping at the first failure
    Run {
        /// Job file path
        #[arg(help = "Job file listing the steps to run")]
        file: PathBuf,
    },

    /// Check one identifier field the way the step form does
    Check {
        /// Which identifier the values are for
        #[arg(value_enum)]
        slot: SlotArg,

        /// Value of the ID field
        #[arg(long, default_value = "")]
        id: String,

        /// Value of the file or name field
        #[arg(long, default_value = "")]
        alternate: String,
    },

    /// List available actions
    List,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigurationArgs {
    /// Configuration ID
    #[arg(long, default_value = "")]
    pub configuration_id: String,

    /// JSON file whose root "id" holds the configuration ID
    #[arg(long, default_value = "")]
    pub configuration_file: String,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotArg {
    Configuration,
    Project,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Console lines, colored
    Pretty,
    /// Step outcome as JSON
    Json,
    /// Step outcome as YAML
    Yaml,
}

impl OutputFormat {
    /// Serialize a value for the machine-readable formats
    pub fn render<T: serde::Serialize>(&self, value: &T) -> crate::error::CliResult<String> {
        match self {
            Self::Pretty | Self::Json => Ok(serde_json::to_string_pretty(value)?),
            Self::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_configuration() {
        let cli = Cli::parse_from([
            "skyact",
            "add-configuration-to-project",
            "--configuration-id",
            "555",
            "--project-name",
            "Nightly",
            "--format",
            "json",
        ]);

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::AddConfigurationToProject {
                configuration,
                project_id,
                project_name,
            } => {
                assert_eq!(configuration.configuration_id, "555");
                assert_eq!(configuration.configuration_file, "");
                assert_eq!(project_id, "");
                assert_eq!(project_name, "Nightly");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "skyact",
            "delete-configuration",
            "--configuration-file",
            "env.json",
            "--workspace",
            "/var/jobs/demo",
            "-q",
        ]);
        assert!(cli.quiet);
        assert_eq!(cli.workspace, PathBuf::from("/var/jobs/demo"));
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::parse_from(["skyact", "check", "project", "--id", "abc"]);
        match cli.command {
            Commands::Check { slot, id, alternate } => {
                assert_eq!(slot, SlotArg::Project);
                assert_eq!(id, "abc");
                assert!(alternate.is_empty());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
