//! Shared Diesel error mapping for the repository adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::UserPersistenceError;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(super) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.message().to_owned())
}

/// Map common Diesel error variants into query/connection constructors.
///
/// Repositories share the rule that closed connections map to connection
/// errors and everything else maps to query errors. Raw driver messages stay
/// in logs; the returned error carries a stable description.
pub(super) fn map_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    log_diesel_error(&error);
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::NotFound => query("record not found"),
        _ => query("database error"),
    }
}

/// Map Diesel errors from the users insert, distinguishing unique violations.
///
/// The unique constraints created by the migrations are named
/// `users_username_key` and `users_email_key`; a violation of either becomes
/// the matching structured duplicate error so the registration handler can
/// re-render the form instead of failing the request.
pub(super) fn map_user_insert_error(error: DieselError) -> UserPersistenceError {
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info) = error {
        let constraint = info.constraint_name().unwrap_or_default();
        if constraint.contains("username") {
            return UserPersistenceError::duplicate_username();
        }
        if constraint.contains("email") {
            return UserPersistenceError::duplicate_email();
        }
        // A unique violation on an unexpected constraint still means the
        // insert lost a race; report the username message rather than a 500.
        debug!(constraint, "unique violation on unrecognised constraint");
        return UserPersistenceError::duplicate_username();
    }
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn log_diesel_error(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }
}
