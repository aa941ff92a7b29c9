//! Input validation shared by every action.
//!
//! Each identifier an action needs (a configuration, a project, ...) is given
//! by the user as a pair: a direct ID and an alternate source (a reference
//! file or a name). Exactly one of the two must be filled in. These checks run
//! before any file or network I/O.

use serde::{Deserialize, Serialize};

use crate::error::{StepError, StepResult};
use crate::types::ActionInput;

/// How a slot can be filled when no direct ID is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlternateSource {
    /// JSON reference file with a root `id`
    File,
    /// Resource name resolved through the API
    Name,
}

impl AlternateSource {
    pub fn label(&self) -> &'static str {
        match self {
            AlternateSource::File => "file",
            AlternateSource::Name => "name",
        }
    }
}

/// Description of one identifier an action needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierSlot {
    /// Slot name, also used in messages ("configuration", "project")
    pub name: &'static str,
    pub alternate: AlternateSource,
    /// Appended to the "nothing provided" message
    pub missing_hint: &'static str,
}

impl IdentifierSlot {
    fn ambiguous_message(&self) -> String {
        format!(
            "Values were provided for both {} ID and {}. Please provide just one or the other.",
            self.name,
            self.alternate.label()
        )
    }

    fn missing_message(&self) -> String {
        format!(
            "No value was provided for {} ID or {}. {}",
            self.name,
            self.alternate.label(),
            self.missing_hint
        )
    }
}

/// Which side of a pair was populated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OneOf<'a> {
    First(&'a str),
    Second(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairViolation {
    Both,
    Neither,
}

/// A value counts as provided when it is non-empty; whitespace is content
pub fn is_populated(value: &str) -> bool {
    !value.is_empty()
}

/// Succeeds iff exactly one of `first` and `second` is populated.
pub fn exactly_one_of<'a>(first: &'a str, second: &'a str) -> Result<OneOf<'a>, PairViolation> {
    match (is_populated(first), is_populated(second)) {
        (true, false) => Ok(OneOf::First(first)),
        (false, true) => Ok(OneOf::Second(second)),
        (true, true) => Err(PairViolation::Both),
        (false, false) => Err(PairViolation::Neither),
    }
}

/// Apply [`exactly_one_of`] to a slot and turn the populated side into an
/// [`ActionInput`].
pub fn validate_slot(slot: &IdentifierSlot, direct: &str, alternate: &str) -> StepResult<ActionInput> {
    match exactly_one_of(direct, alternate) {
        Ok(OneOf::First(id)) => Ok(ActionInput::DirectId(id.to_string())),
        Ok(OneOf::Second(value)) => Ok(match slot.alternate {
            AlternateSource::File => ActionInput::FileReference(value.to_string()),
            AlternateSource::Name => ActionInput::ResourceName(value.to_string()),
        }),
        Err(PairViolation::Both) => Err(StepError::InvalidInputCombination {
            slot: slot.name.to_string(),
            message: slot.ambiguous_message(),
        }),
        Err(PairViolation::Neither) => Err(StepError::MissingInput {
            slot: slot.name.to_string(),
            message: slot.missing_message(),
        }),
    }
}

/// Result of an interactive field check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum FieldCheck {
    Ok,
    Error(String),
}

impl FieldCheck {
    pub fn is_ok(&self) -> bool {
        matches!(self, FieldCheck::Ok)
    }
}

/// Form-level check for an identifier field and its alternate.
///
/// Unlike [`validate_slot`] this also insists that a direct ID is an integer,
/// and it does not complain when both fields are empty.
pub fn check_identifier_field(slot: &IdentifierSlot, id: &str, alternate: &str) -> FieldCheck {
    if is_populated(id) && id.parse::<i32>().is_err() {
        return FieldCheck::Error(format!(
            "Please enter a valid integer for the {} ID.",
            slot.name
        ));
    }

    if is_populated(id) && is_populated(alternate) {
        return FieldCheck::Error(format!(
            "Please enter either a valid {name} ID or a valid {name} {alt}. Build step will fail if both values are entered.",
            name = slot.name,
            alt = slot.alternate.label()
        ));
    }

    FieldCheck::Ok
}
