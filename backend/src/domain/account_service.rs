//! Account domain service: registration, login and the admin bootstrap.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    AccessTokens, LoginOutcome, LoginService, PasswordHasher, RegistrationService,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    AuthenticatedUser, Error, LoginCredentials, RegistrationDetails, Role, User, UserDraft, UserId,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

fn map_user_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { .. } => {
            Error::conflict("An account with this email already exists")
        }
    }
}

/// Result of [`AccountService::ensure_admin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminBootstrap {
    /// A new admin account was created.
    Created(UserId),
    /// An account already uses the e-mail; it was left untouched.
    AlreadyPresent(UserId),
}

/// Account service implementing [`LoginService`] and [`RegistrationService`].
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn AccessTokens>,
    clock: Arc<dyn Clock>,
}

impl<U> AccountService<U> {
    /// Create a service over the user store, hasher, token signer and clock.
    pub fn new(
        users: Arc<U>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn AccessTokens>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

impl<U> AccountService<U>
where
    U: UserRepository,
{
    async fn create_account(&self, details: &RegistrationDetails, role: Role) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(details.password())
            .map_err(|err| Error::internal(err.to_string()))?;
        let user = User::new(UserDraft {
            id: UserId::random(),
            name: details.name().clone(),
            email: details.email().clone(),
            password_hash,
            role,
            created_at: self.clock.utc(),
        });
        self.users
            .insert(&user)
            .await
            .map_err(map_user_repository_error)?;
        Ok(user)
    }

    /// Make sure an account with the configured admin e-mail exists.
    ///
    /// A missing account is created with the admin role. An existing account
    /// is never modified, even if its role is `user`.
    pub async fn ensure_admin(&self, details: &RegistrationDetails) -> Result<AdminBootstrap, Error> {
        if let Some(existing) = self
            .users
            .find_by_email(details.email())
            .await
            .map_err(map_user_repository_error)?
        {
            if !existing.role().is_admin() {
                warn!(
                    user_id = %existing.id(),
                    "admin bootstrap email belongs to a non-admin account; leaving it unchanged"
                );
            }
            return Ok(AdminBootstrap::AlreadyPresent(existing.id()));
        }

        let user = self.create_account(details, Role::Admin).await?;
        info!(user_id = %user.id(), "admin account created");
        Ok(AdminBootstrap::Created(user.id()))
    }
}

#[async_trait]
impl<U> LoginService for AccountService<U>
where
    U: UserRepository,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_repository_error)?
        else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .map_err(|err| Error::internal(err.to_string()))?;
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let token = self
            .tokens
            .issue(&AuthenticatedUser::new(user.id(), user.role()))
            .map_err(|err| Error::internal(err.to_string()))?;
        info!(user_id = %user.id(), role = %user.role(), "user logged in");
        Ok(LoginOutcome { token, user })
    }
}

#[async_trait]
impl<U> RegistrationService for AccountService<U>
where
    U: UserRepository,
{
    async fn register(&self, details: &RegistrationDetails) -> Result<User, Error> {
        let taken = self
            .users
            .find_by_email(details.email())
            .await
            .map_err(map_user_repository_error)?
            .is_some();
        if taken {
            return Err(map_user_repository_error(UserPersistenceError::duplicate(
                details.email().as_ref(),
            )));
        }

        let user = self.create_account(details, Role::User).await?;
        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
