//! Shared error taxonomy surfaced by every persistence port.

use thiserror::Error;

use crate::domain::fields::{ClosedSetError, MissingFieldError};

/// Failures raised by record store and report catalog adapters.
///
/// One taxonomy serves every entity: the spectrum of failures is identical
/// across the schema (absent keys, uniqueness, dangling references, closed
/// sets), so per-entity error enums would only clone this shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The referenced key does not exist.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },
    /// A uniqueness constraint fired (email, phone number, or the
    /// caregiver/job application pair).
    #[error("conflict: {message}")]
    Conflict { message: String },
    /// A foreign key referenced a nonexistent parent row.
    #[error("invalid reference: {message}")]
    InvalidReference { message: String },
    /// A value fell outside its closed set or failed presence validation.
    #[error("invalid value: {message}")]
    InvalidValue { message: String },
    /// Pool checkout or connectivity failure.
    #[error("store connection failed: {message}")]
    Connection { message: String },
    /// Any other failure during statement execution.
    #[error("store query failed: {message}")]
    Query { message: String },
}

impl StoreError {
    /// The referenced key does not exist.
    pub const fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    /// A uniqueness constraint fired.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// A foreign key referenced a nonexistent parent row.
    pub fn invalid_reference(message: impl Into<String>) -> Self {
        Self::InvalidReference {
            message: message.into(),
        }
    }

    /// A value fell outside its closed set or failed presence validation.
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidValue {
            message: message.into(),
        }
    }

    /// Pool checkout or connectivity failure.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Any other failure during statement execution.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<MissingFieldError> for StoreError {
    fn from(error: MissingFieldError) -> Self {
        Self::invalid_value(error.to_string())
    }
}

impl From<ClosedSetError> for StoreError {
    fn from(error: ClosedSetError) -> Self {
        Self::invalid_value(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use crate::domain::fields::MissingFieldError;

    use super::*;

    #[rstest]
    fn display_carries_context() {
        assert_eq!(StoreError::not_found("user").to_string(), "user not found");
        assert_eq!(
            StoreError::conflict("duplicate email").to_string(),
            "conflict: duplicate email",
        );
    }

    #[rstest]
    fn presence_failures_convert_to_invalid_value() {
        let err: StoreError = MissingFieldError { field: "city" }.into();
        assert_eq!(err, StoreError::invalid_value("city must not be empty"));
    }
}
