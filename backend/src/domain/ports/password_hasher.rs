//! Port abstraction for password hashing.
//!
//! Handlers and the account service depend on this trait; the Argon2id
//! implementation below is the only production adapter. Tests may substitute
//! a cheap double to keep suites fast.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};

use crate::domain::user::{Password, PasswordHashString};

use super::macros::define_port_error;

define_port_error! {
    /// Failures raised while hashing or verifying passwords.
    pub enum PasswordHashError {
        /// The hasher rejected its input or parameters.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed as a PHC string.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Driven port for deriving and checking password hashes.
pub trait PasswordHasher: Send + Sync {
    /// Derive an encoded hash from a plaintext password.
    fn hash(&self, password: &Password) -> Result<PasswordHashString, PasswordHashError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// A mismatch is `Ok(false)`, not an error; errors mean the check itself
    /// could not run.
    fn verify(
        &self,
        password: &Password,
        hash: &PasswordHashString,
    ) -> Result<bool, PasswordHashError>;
}

/// Argon2id hasher with the library's default parameters and a random salt
/// per hash.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHashString, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|error| PasswordHashError::hash(error.to_string()))?;
        Ok(PasswordHashString::new(hash.to_string()))
    }

    fn verify(
        &self,
        password: &Password,
        hash: &PasswordHashString,
    ) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(hash.as_str())
            .map_err(|error| PasswordHashError::malformed_hash(error.to_string()))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(error) => Err(PasswordHashError::hash(error.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn hash_then_verify_round_trip() {
        let hasher = Argon2PasswordHasher;
        let password = Password::new("correct horse battery").expect("valid password");
        let hash = hasher.hash(&password).expect("hashing succeeds");

        assert!(hasher.verify(&password, &hash).expect("verify runs"));

        let wrong = Password::new("incorrect horse").expect("valid password");
        assert!(!hasher.verify(&wrong, &hash).expect("verify runs"));
    }

    #[rstest]
    fn hashes_are_salted() {
        let hasher = Argon2PasswordHasher;
        let password = Password::new("correct horse battery").expect("valid password");
        let first = hasher.hash(&password).expect("hashing succeeds");
        let second = hasher.hash(&password).expect("hashing succeeds");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[rstest]
    fn malformed_stored_hash_is_an_error() {
        let hasher = Argon2PasswordHasher;
        let password = Password::new("correct horse battery").expect("valid password");
        let stored = PasswordHashString::new("not-a-phc-string");
        let result = hasher.verify(&password, &stored);
        assert!(matches!(
            result,
            Err(PasswordHashError::MalformedHash { .. })
        ));
    }
}
