//! Access token configuration parsing and validation.
//!
//! Reads the signing key and token lifetime from the environment. Debug builds
//! fall back to defaults with a warning; release builds reject anything
//! missing or malformed.

use std::path::PathBuf;

use chrono::Duration;
use mockable::Env;
use rand::RngCore;
use tracing::warn;
use zeroize::{Zeroize, Zeroizing};

pub mod fingerprint;

const TOKEN_KEY_DEFAULT_PATH: &str = "/var/run/secrets/token_key";
/// Minimum accepted signing key length in release builds.
pub const TOKEN_KEY_MIN_LEN: usize = 32;
const EPHEMERAL_KEY_LEN: usize = 64;
const KEY_FILE_ENV: &str = "TOKEN_KEY_FILE";
const ALLOW_EPHEMERAL_ENV: &str = "TOKEN_ALLOW_EPHEMERAL";
const TTL_MINUTES_ENV: &str = "TOKEN_TTL_MINUTES";
const DEFAULT_TTL_MINUTES: i64 = 24 * 60;
const MAX_TTL_MINUTES: i64 = 30 * 24 * 60;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const TTL_EXPECTED: &str = "whole minutes between 1 and 43200";

/// Build mode for token configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings.
    Debug,
    /// Release builds require a readable, long enough key file.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use complaints::inbound::http::token_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated signing settings for the token adapter.
pub struct TokenSettings {
    /// HMAC signing key.
    pub key: Zeroizing<Vec<u8>>,
    /// Lifetime of issued tokens.
    pub ttl: Duration,
    /// Whether the key was generated for this process only.
    pub ephemeral: bool,
}

/// Errors raised while validating token configuration.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Raw value found.
        value: String,
        /// Description of the accepted values.
        expected: &'static str,
    },
    /// Reading the key file failed.
    #[error("failed to read token key at {path}: {source}")]
    KeyRead {
        /// Key file path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The key file is too short for release builds.
    #[error("token key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        /// Key file path.
        path: PathBuf,
        /// Bytes read.
        length: usize,
        /// Bytes required.
        min_len: usize,
    },
    /// Release builds must not sign with a throwaway key.
    #[error("TOKEN_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build token settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use complaints::inbound::http::token_config::{BuildMode, token_settings_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("token_key_example");
/// std::fs::write(&key_path, vec![b'k'; 32])?;
///
/// let key_path = key_path.to_string_lossy().into_owned();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "TOKEN_KEY_FILE" => Some(key_path.clone()),
///     "TOKEN_TTL_MINUTES" => Some("60".to_owned()),
///     _ => None,
/// });
///
/// let settings = token_settings_from_env(&env, BuildMode::Release)?;
/// assert_eq!(settings.ttl.num_minutes(), 60);
/// assert!(!settings.ephemeral);
/// # Ok(())
/// # }
/// ```
pub fn token_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSettings, TokenConfigError> {
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let ttl = ttl_from_env(env, mode)?;
    let (key, ephemeral) = key_from_env(env, mode, allow_ephemeral)?;
    Ok(TokenSettings {
        key,
        ttl,
        ephemeral,
    })
}

fn debug_warn_or_error<T, F>(
    mode: BuildMode,
    fallback: T,
    error: TokenConfigError,
    warn_fn: F,
) -> Result<T, TokenConfigError>
where
    F: FnOnce(),
{
    if mode.is_debug() {
        warn_fn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, TokenConfigError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return Ok(false);
    };
    match parse_bool(&value) {
        Some(true) if !mode.is_debug() => Err(TokenConfigError::EphemeralNotAllowed),
        Some(flag) => Ok(flag),
        None => debug_warn_or_error(
            mode,
            false,
            TokenConfigError::InvalidEnv {
                name: ALLOW_EPHEMERAL_ENV,
                value: value.clone(),
                expected: BOOL_EXPECTED,
            },
            || warn!(value = %value, "invalid TOKEN_ALLOW_EPHEMERAL; defaulting to disabled"),
        ),
    }
}

fn ttl_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Duration, TokenConfigError> {
    let default_ttl = Duration::minutes(DEFAULT_TTL_MINUTES);
    let Some(value) = env.string(TTL_MINUTES_ENV) else {
        return Ok(default_ttl);
    };
    match value.trim().parse::<i64>() {
        Ok(minutes) if (1..=MAX_TTL_MINUTES).contains(&minutes) => Ok(Duration::minutes(minutes)),
        _ => debug_warn_or_error(
            mode,
            default_ttl,
            TokenConfigError::InvalidEnv {
                name: TTL_MINUTES_ENV,
                value: value.clone(),
                expected: TTL_EXPECTED,
            },
            || warn!(value = %value, "invalid TOKEN_TTL_MINUTES; using 24 hours"),
        ),
    }
}

fn ephemeral_key() -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(vec![0_u8; EPHEMERAL_KEY_LEN]);
    rand::thread_rng().fill_bytes(key.as_mut_slice());
    key
}

fn key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<(Zeroizing<Vec<u8>>, bool), TokenConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| TOKEN_KEY_DEFAULT_PATH.to_owned()),
    );

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < TOKEN_KEY_MIN_LEN {
                if !mode.is_debug() {
                    bytes.zeroize();
                    return Err(TokenConfigError::KeyTooShort {
                        path,
                        length,
                        min_len: TOKEN_KEY_MIN_LEN,
                    });
                }
                warn!(
                    path = %path.display(),
                    length,
                    "token key shorter than {TOKEN_KEY_MIN_LEN} bytes (dev only)"
                );
            }
            Ok((Zeroizing::new(bytes), false))
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary token key (dev only); tokens will not survive a restart"
            );
            Ok((ephemeral_key(), true))
        }
        Err(error) => Err(TokenConfigError::KeyRead {
            path,
            source: error,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
