pub mod error;
pub mod sanitization;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::{StepError, StepResult};
pub use sanitization::{redact_secret, SANITIZED_PLACEHOLDER};
pub use types::{
    id_from_json, ActionInput, ApiRequest, ApiResponse, Credentials, HttpMethod, LogLine,
    ResolvedId, Severity, StepStage,
};
pub use validation::{
    check_identifier_field, exactly_one_of, is_populated, validate_slot, AlternateSource,
    FieldCheck, IdentifierSlot, OneOf, PairViolation,
};
