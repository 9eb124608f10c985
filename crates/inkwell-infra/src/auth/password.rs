//! Account password storage.
//!
//! Passwords are stored as PHC strings (`$argon2id$v=19$...`) in
//! `users.password_hash`, so parameters and salt travel with each row and
//! login never needs anything but the stored column.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use inkwell_core::ports::{AuthError, PasswordService};

fn hashing_error(err: argon2::password_hash::Error) -> AuthError {
    AuthError::HashingError(err.to_string())
}

/// Argon2id hasher for account passwords.
#[derive(Default)]
pub struct Argon2PasswordService {
    hasher: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let stored = self
            .hasher
            .hash_password(password.as_bytes(), &salt)
            .map_err(hashing_error)?;
        Ok(stored.to_string())
    }

    /// `Ok(false)` for a wrong password; `Err` only when the stored column
    /// is not a PHC string.
    fn verify(&self, password: &str, stored: &str) -> Result<bool, AuthError> {
        let stored = PasswordHash::new(stored).map_err(hashing_error)?;
        match self.hasher.verify_password(password.as_bytes(), &stored) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(hashing_error(err)),
        }
    }
}
