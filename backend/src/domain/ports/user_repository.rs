//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId, UserSummary};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// An account with the same e-mail already exists.
        Duplicate { email: String } => "user with email {email} already exists",
    }
}

/// Storage for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Fails with `Duplicate` when the e-mail is taken.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by normalised e-mail.
    async fn find_by_email(&self, email: &EmailAddress)
    -> Result<Option<User>, UserPersistenceError>;

    /// Public summaries for the given ids. Unknown ids are skipped.
    async fn find_summaries(&self, ids: &[UserId])
    -> Result<Vec<UserSummary>, UserPersistenceError>;
}
