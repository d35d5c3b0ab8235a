//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing the backing user store, hashing
//! scheme or token format. HTTP handler tests substitute a mock.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, LoginCredentials, User};

/// Successful login: a bearer token plus the account it belongs to.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Bearer token for subsequent requests.
    pub token: AccessToken,
    /// Authenticated account.
    pub user: User,
}

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and issue an access token.
    ///
    /// Unknown e-mails and wrong passwords fail identically with
    /// `unauthorized`.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error>;
}
