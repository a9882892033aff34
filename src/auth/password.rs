// Password hashing and verification service

use crate::auth::error::AuthError;
use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use std::sync::Arc;
use tracing::error;

/// Argon2id cost parameters
///
/// The defaults (19 MiB, 2 passes, 1 lane) cost roughly 50-100ms per hash on
/// server hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Password service for hashing and verification
///
/// Cheap to clone; the hasher and the dummy hash are shared.
#[derive(Clone)]
pub struct PasswordService {
    argon2: Argon2<'static>,
    // Hash of a throwaway password, verified against when the account does not exist
    dummy_hash: Arc<str>,
}

impl PasswordService {
    /// Create a PasswordService with the given Argon2id cost
    pub fn new(cost: HashCost) -> Result<Self, AuthError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| AuthError::PasswordHash(format!("Invalid Argon2 parameters: {}", e)))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut service = Self {
            argon2,
            dummy_hash: Arc::from(""),
        };
        service.dummy_hash = Arc::from(service.hash_password("dummy-password-never-matches")?);
        Ok(service)
    }

    /// Hash a password using Argon2id with a fresh random salt
    /// Returns the PHC string (algorithm, parameters, salt and hash)
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::PasswordHash(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against a stored PHC hash
    /// Ok(false) on mismatch; Err only when the stored hash is unusable
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AuthError::PasswordHash(format!("Stored password hash is invalid: {}", e)))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::PasswordHash(format!("Password verification failed: {}", e))),
        }
    }

    /// Spend the same work as a real verification, for logins with an unknown email
    pub fn verify_dummy(&self, password: &str) {
        let _ = self.verify_password(password, &self.dummy_hash);
    }

    /// `hash_password` on the blocking pool
    pub async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let service = self.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || service.hash_password(&password))
            .await
            .map_err(|e| {
                error!("Password hashing task failed: {}", e);
                AuthError::Unknown
            })?
    }

    /// `verify_password` on the blocking pool
    /// With `hash == None` the dummy hash is checked and the result is always false
    pub async fn verify(&self, password: &str, hash: Option<String>) -> Result<bool, AuthError> {
        let service = self.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || match hash {
            Some(hash) => service.verify_password(&password, &hash),
            None => {
                service.verify_dummy(&password);
                Ok(false)
            }
        })
        .await
        .map_err(|e| {
            error!("Password verification task failed: {}", e);
            AuthError::Unknown
        })?
    }
}

#[cfg(test)]
pub(crate) fn cheap_cost() -> HashCost {
    HashCost {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    }
}
