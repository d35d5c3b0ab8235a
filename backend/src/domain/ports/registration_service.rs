//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, RegistrationDetails, User};

/// Self-service account creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create a `user`-role account. A taken e-mail fails with `conflict`.
    async fn register(&self, details: &RegistrationDetails) -> Result<User, Error>;
}
