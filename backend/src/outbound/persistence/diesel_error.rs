//! Shared mapping from Diesel and pool failures to the store taxonomy.

use tracing::debug;

use crate::domain::fields::ClosedSetError;
use crate::domain::ports::StoreError;

use super::pool::PoolError;

/// Map pool errors to the store taxonomy.
pub(crate) fn map_pool_error(error: PoolError) -> StoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StoreError::connection(message)
        }
    }
}

/// Map a Diesel error onto the store taxonomy.
///
/// Constraint violations keep the database message so callers can tell
/// which unique or foreign key fired; `entity` names the record type for
/// not-found results and failure logs.
pub(crate) fn map_diesel_error(entity: &'static str, error: diesel::result::Error) -> StoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), entity, "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            entity,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => StoreError::not_found(entity),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation => StoreError::conflict(info.message().to_owned()),
            DatabaseErrorKind::ForeignKeyViolation => {
                StoreError::invalid_reference(info.message().to_owned())
            }
            DatabaseErrorKind::CheckViolation => {
                StoreError::invalid_value(info.message().to_owned())
            }
            DatabaseErrorKind::ClosedConnection => {
                StoreError::connection("database connection closed")
            }
            _ => StoreError::query(info.message().to_owned()),
        },
        other => StoreError::query(other.to_string()),
    }
}

/// Decode a closed-set column stored as text.
///
/// Stored values only fall outside the set if the database was modified
/// past the CHECK constraints; surface that as an invalid value rather
/// than a panic.
pub(crate) fn parse_stored<T>(raw: &str) -> Result<T, StoreError>
where
    T: std::str::FromStr<Err = ClosedSetError>,
{
    raw.parse::<T>().map_err(StoreError::from)
}

/// Translate an affected-row count of zero into a not-found error.
pub(crate) fn expect_affected(entity: &'static str, rows: usize) -> Result<(), StoreError> {
    if rows == 0 {
        return Err(StoreError::not_found(entity));
    }
    Ok(())
}
