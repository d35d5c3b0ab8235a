//! Argon2id password hashing.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    self, PasswordHash as EncodedHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// [`PasswordHasher`] adapter producing PHC-encoded Argon2id hashes.
///
/// Verification reads the parameters from the stored hash, so hashes made with
/// different cost settings remain checkable.
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Hasher with the library's recommended Argon2id parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with explicit costs. Memory is in KiB.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Hash`] when the parameters are out of
    /// range.
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordHashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|encoded| PasswordHash::new(encoded.to_string()))
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let parsed = EncodedHash::new(hash.as_ref())
            .map_err(|err| PasswordHashError::corrupt(err.to_string()))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::hash(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::with_params(8, 1, 1).expect("minimal params are valid")
    }

    #[rstest]
    fn hashes_verify_against_the_original_password(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("correct horse").expect("hash succeeds");

        assert!(hash.as_ref().starts_with("$argon2id$"));
        assert_eq!(hasher.verify("correct horse", &hash), Ok(true));
        assert_eq!(hasher.verify("battery staple", &hash), Ok(false));
    }

    #[rstest]
    fn salts_differ_between_hashes(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("same password").expect("hash succeeds");
        let second = hasher.hash("same password").expect("hash succeeds");

        assert_ne!(first.as_ref(), second.as_ref());
    }

    #[rstest]
    fn corrupt_hashes_are_reported(hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify("anything", &PasswordHash::new("not-a-phc-string"))
            .expect_err("corrupt hash");

        assert!(matches!(err, PasswordHashError::Corrupt { .. }));
    }

    #[rstest]
    fn zero_memory_is_rejected() {
        assert!(Argon2PasswordHasher::with_params(0, 1, 1).is_err());
    }
}
