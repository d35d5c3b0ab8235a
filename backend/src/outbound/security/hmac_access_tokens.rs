//! HMAC-SHA256 signed bearer tokens.
//!
//! Wire form: `base64url(claims JSON) "." base64url(signature)`, both without
//! padding. The signature covers the encoded claims segment exactly as sent.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Duration;
use hmac::{Hmac, Mac};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::debug;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::ports::{AccessTokenError, AccessTokens};
use crate::domain::{AccessToken, AuthenticatedUser, Role, UserId};

type HmacSha256 = Hmac<Sha256>;

/// Default token lifetime.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::hours(24);

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    role: String,
    iat: i64,
    exp: i64,
}

/// [`AccessTokens`] adapter signing claims with a shared secret.
pub struct HmacAccessTokens {
    key: Zeroizing<Vec<u8>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl HmacAccessTokens {
    /// Build a signer over `key`. Tokens live for `ttl` from issue time.
    pub fn new(key: Zeroizing<Vec<u8>>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { key, ttl, clock }
    }

    fn mac(&self) -> Result<HmacSha256, AccessTokenError> {
        HmacSha256::new_from_slice(&self.key)
            .map_err(|err| AccessTokenError::issue(format!("signing key rejected: {err}")))
    }

    fn sign(&self, payload: &str) -> Result<String, AccessTokenError> {
        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }
}

impl AccessTokens for HmacAccessTokens {
    fn issue(&self, user: &AuthenticatedUser) -> Result<AccessToken, AccessTokenError> {
        let now = self.clock.utc();
        let claims = Claims {
            sub: *user.id().as_uuid(),
            role: user.role().as_str().to_owned(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        let json = serde_json::to_vec(&claims)
            .map_err(|err| AccessTokenError::issue(format!("encode claims: {err}")))?;
        let payload = URL_SAFE_NO_PAD.encode(json);
        let signature = self.sign(&payload)?;
        Ok(AccessToken::new(format!("{payload}.{signature}")))
    }

    fn verify(&self, token: &str) -> Result<AuthenticatedUser, AccessTokenError> {
        let (payload, signature) = token
            .split_once('.')
            .ok_or_else(AccessTokenError::malformed)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| AccessTokenError::malformed())?;

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        // `verify_slice` compares in constant time.
        mac.verify_slice(&signature)
            .map_err(|_| AccessTokenError::bad_signature())?;

        let json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| AccessTokenError::malformed())?;
        let claims: Claims =
            serde_json::from_slice(&json).map_err(|_| AccessTokenError::malformed())?;
        let role = claims.role.parse::<Role>().map_err(|err| {
            debug!(error = %err, "signed token carries unknown role");
            AccessTokenError::malformed()
        })?;

        if claims.exp <= self.clock.utc().timestamp() {
            return Err(AccessTokenError::expired());
        }

        Ok(AuthenticatedUser::new(UserId::from_uuid(claims.sub), role))
    }
}
