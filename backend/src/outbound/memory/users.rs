//! In-memory `UserRepository` with a unique e-mail index.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserId, UserSummary};

#[derive(Debug, Default)]
struct Accounts {
    by_id: HashMap<UserId, User>,
    id_by_email: HashMap<String, UserId>,
}

/// Account storage backed by process-local maps.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<Accounts>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Accounts> {
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut accounts = self.lock();
        let email = user.email().as_ref().to_owned();
        if accounts.id_by_email.contains_key(&email) {
            return Err(UserPersistenceError::duplicate(email));
        }
        if accounts.by_id.contains_key(&user.id()) {
            return Err(UserPersistenceError::query(format!(
                "user {} already exists",
                user.id()
            )));
        }
        accounts.id_by_email.insert(email, user.id());
        accounts.by_id.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock().by_id.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let accounts = self.lock();
        Ok(accounts
            .id_by_email
            .get(email.as_ref())
            .and_then(|id| accounts.by_id.get(id))
            .cloned())
    }

    async fn find_summaries(
        &self,
        ids: &[UserId],
    ) -> Result<Vec<UserSummary>, UserPersistenceError> {
        let accounts = self.lock();
        Ok(ids
            .iter()
            .filter_map(|id| accounts.by_id.get(id))
            .map(User::summary)
            .collect())
    }
}
