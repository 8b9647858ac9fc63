//! Field-level validation primitives shared by the entity drafts.
//!
//! The record layer checks nothing beyond presence and closed-set
//! membership; richer validation belongs to the callers that collect the
//! input.

use thiserror::Error;

/// Error raised when a required text field is absent or blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} must not be empty")]
pub struct MissingFieldError {
    /// Name of the offending field.
    pub field: &'static str,
}

/// Reject empty or whitespace-only values for a required field.
///
/// # Errors
///
/// Returns [`MissingFieldError`] naming the field when the value is blank.
pub fn require_present(field: &'static str, value: &str) -> Result<(), MissingFieldError> {
    if value.trim().is_empty() {
        return Err(MissingFieldError { field });
    }
    Ok(())
}

/// Error raised when a closed-set column receives a value outside its set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} must be one of [{allowed}], got {value:?}")]
pub struct ClosedSetError {
    /// Name of the closed-set field.
    pub field: &'static str,
    /// Comma-separated rendering of the allowed values.
    pub allowed: &'static str,
    /// The rejected value.
    pub value: String,
}
