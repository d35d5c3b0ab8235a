//! Classification of pool and Diesel failures shared by the repositories.
//!
//! Repositories turn a [`StoreFailure`] into their own port error; keeping the
//! classification here means both adapters agree on what counts as a
//! connection problem.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Storage failure reduced to the cases the ports distinguish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    /// The database could not be reached or dropped the connection.
    Connection(String),
    /// A statement failed for any other reason.
    Query(String),
    /// A unique index rejected the write.
    UniqueViolation { constraint: Option<String> },
}

pub(crate) fn classify_pool_error(error: PoolError) -> StoreFailure {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StoreFailure::Connection(message)
        }
    }
}

/// Classify a Diesel error, logging the driver detail at `debug`.
///
/// The returned messages are generic; driver text stays in the logs.
pub(crate) fn classify_diesel_error(error: DieselError, operation: &'static str) -> StoreFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => debug!(
            operation,
            ?kind,
            message = info.message(),
            constraint = info.constraint_name(),
            "diesel operation failed"
        ),
        other => debug!(operation, error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StoreFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreFailure::Connection(format!("{operation}: database connection lost"))
        }
        DieselError::NotFound => StoreFailure::Query(format!("{operation}: record not found")),
        DieselError::DeserializationError(_) | DieselError::SerializationError(_) => {
            StoreFailure::Query(format!("{operation}: row conversion failed"))
        }
        _ => StoreFailure::Query(format!("{operation}: database error")),
    }
}
