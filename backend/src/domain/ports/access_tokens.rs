//! Driven port for issuing and verifying bearer access tokens.

use crate::domain::{AccessToken, AuthenticatedUser};

use super::define_port_error;

define_port_error! {
    /// Failures raised while issuing or checking an access token.
    pub enum AccessTokenError {
        /// The token is not in the expected `claims.signature` shape.
        Malformed => "access token is malformed",
        /// The signature does not match the claims.
        BadSignature => "access token signature is invalid",
        /// The token's expiry is in the past.
        Expired => "access token has expired",
        /// The adapter could not produce a token.
        Issue { message: String } => "failed to issue access token: {message}",
    }
}

/// Signs and verifies the credentials carried in `Authorization: Bearer`.
///
/// Implementations own their clock and lifetime settings so callers only see
/// the identity going in and coming out.
#[cfg_attr(test, mockall::automock)]
pub trait AccessTokens: Send + Sync {
    /// Issue a token for `user`.
    fn issue(&self, user: &AuthenticatedUser) -> Result<AccessToken, AccessTokenError>;

    /// Verify `token` and return the identity it carries.
    fn verify(&self, token: &str) -> Result<AuthenticatedUser, AccessTokenError>;
}
