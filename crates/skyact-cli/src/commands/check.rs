//! Form-style field checks

use crate::{
    cli::{OutputFormat, SlotArg},
    error::CliResult,
    utils::ColoredOutput,
};
use skyact_core::{check_identifier_field, FieldCheck};
use skyact_runtime::{CONFIGURATION_SLOT, PROJECT_SLOT};

pub struct CheckCommand;

impl CheckCommand {
    /// Print the check result; `Ok(false)` when the field would be flagged
    pub fn run(slot: SlotArg, id: &str, alternate: &str, format: OutputFormat) -> CliResult<bool> {
        let check = Self::check(slot, id, alternate);

        match (&check, format) {
            (FieldCheck::Ok, OutputFormat::Pretty) => println!("{}", ColoredOutput::success("OK")),
            (FieldCheck::Error(message), OutputFormat::Pretty) => {
                println!("{}", ColoredOutput::error(message))
            }
            _ => println!("{}", format.render(&check)?),
        }

        Ok(check.is_ok())
    }

    pub fn check(slot: SlotArg, id: &str, alternate: &str) -> FieldCheck {
        let slot = match slot {
            SlotArg::Configuration => &CONFIGURATION_SLOT,
            SlotArg::Project => &PROJECT_SLOT,
        };
        check_identifier_field(slot, id, alternate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_numeric_id_is_flagged() {
        assert_eq!(
            CheckCommand::check(SlotArg::Configuration, "abc", ""),
            FieldCheck::Error("Please enter a valid integer for the configuration ID.".into())
        );
    }

    #[test]
    fn test_both_values_flagged() {
        let check = CheckCommand::check(SlotArg::Project, "42", "Nightly");
        assert!(!check.is_ok());
    }

    #[test]
    fn test_empty_is_fine() {
        assert!(CheckCommand::check(SlotArg::Project, "", "").is_ok());
    }
}
