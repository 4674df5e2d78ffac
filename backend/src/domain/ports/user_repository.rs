//! Port abstraction for user account persistence.

use async_trait::async_trait;

use crate::domain::user::{Email, NewUser, User, UserId};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    ///
    /// Uniqueness is enforced by the store's constraints; the adapter maps a
    /// unique violation to the matching `Duplicate*` variant rather than the
    /// application probing for existence first.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The username column's unique constraint rejected the insert.
        DuplicateUsername => "username already exists",
        /// The email column's unique constraint rejected the insert.
        DuplicateEmail => "email already registered",
    }
}

/// Driven port for user account storage.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account, relying on store constraints for uniqueness.
    async fn insert(&self, user: &NewUser) -> Result<(), UserPersistenceError>;

    /// Fetch an account by login email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;
}
