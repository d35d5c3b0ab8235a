//! Credential adapters: bearer token signing and password hashing.

mod argon2_password_hasher;
mod hmac_access_tokens;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use hmac_access_tokens::{DEFAULT_TOKEN_TTL, HmacAccessTokens};
