//! Authorization gate for bearer-token requests.
//!
//! Handlers take a [`BearerAuth`] argument to require a caller. The extractor
//! reads `Authorization: Bearer <token>`, verifies it through the
//! [`AccessTokens`](crate::domain::ports::AccessTokens) port held in
//! [`HttpState`], and resolves it to an [`AuthenticatedUser`]. Every failure is
//! a `401` so clients cannot tell a bad signature from an expired token.

use std::future::{Ready, ready};

use actix_web::http::header::{self, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use tracing::debug;

use crate::domain::{AuthenticatedUser, Error};
use crate::inbound::http::state::HttpState;

/// Caller identity resolved from a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BearerAuth(AuthenticatedUser);

impl BearerAuth {
    /// The authenticated caller.
    pub fn user(&self) -> AuthenticatedUser {
        self.0
    }

    /// Unwrap the authenticated caller.
    pub fn into_inner(self) -> AuthenticatedUser {
        self.0
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, Error> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("Authorization header is missing"))?;
    let value = value
        .to_str()
        .map_err(|_| Error::unauthorized("Authorization header is not valid ASCII"))?;
    // Auth schemes are case-insensitive (RFC 9110 section 11.1).
    let token = value
        .split_once(' ')
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .ok_or_else(|| Error::unauthorized("Authorization header must use the Bearer scheme"))?;
    if token.is_empty() {
        return Err(Error::unauthorized("Bearer token is empty"));
    }
    Ok(token)
}

fn authenticate(req: &HttpRequest) -> Result<BearerAuth, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let token = bearer_token(req.headers())?;
    state.tokens.verify(token).map(BearerAuth).map_err(|err| {
        debug!(error = %err, "bearer token rejected");
        Error::unauthorized("Invalid or expired token")
    })
}

impl FromRequest for BearerAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
