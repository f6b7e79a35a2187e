use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use std::sync::OnceLock;

use crate::error::PasswordError;

/// Argon2 work parameters. Fixed per deployment, never chosen per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashCost {
    #[default]
    Standard,
    /// Minimal params for fast dev/test - NOT SECURE FOR PRODUCTION
    Insecure,
}

impl HashCost {
    /// Reads `INSECURE_PASSWORD_HASHING`; any value selects [`HashCost::Insecure`].
    pub fn from_env() -> Self {
        if std::env::var("INSECURE_PASSWORD_HASHING").is_ok() {
            HashCost::Insecure
        } else {
            HashCost::Standard
        }
    }
}

/// Salted argon2id hashing with constant-time verification.
#[derive(Debug)]
pub struct PasswordHasher {
    cost: HashCost,
    dummy_hash: OnceLock<Option<String>>,
}

impl PasswordHasher {
    pub fn new(cost: HashCost) -> Self {
        Self {
            cost,
            dummy_hash: OnceLock::new(),
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        match self.cost {
            HashCost::Standard => Argon2::default(),
            HashCost::Insecure => match Params::new(1024, 1, 1, None) {
                Ok(params) => Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
                Err(_) => Argon2::default(),
            },
        }
    }

    /// Hash a password into a PHC string with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hash(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// A malformed stored hash never verifies.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };
        self.argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Burn the same work as a real verification. Used when there is no
    /// stored hash so response timing does not reveal whether an account exists.
    pub fn verify_against_dummy(&self, password: &str) {
        let dummy = self
            .dummy_hash
            .get_or_init(|| self.hash("studio-placeholder-password").ok());
        if let Some(hash) = dummy {
            let _ = self.verify(password, hash);
        }
    }

    #[cfg(test)]
    pub(crate) fn has_dummy_hash(&self) -> bool {
        matches!(self.dummy_hash.get(), Some(Some(_)))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(HashCost::Standard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(HashCost::Insecure);
        let hash = hasher.hash("s3cret!").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("s3cret!", &hash));
        assert!(!hasher.verify("wrong", &hash));
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let hasher = PasswordHasher::new(HashCost::Insecure);
        let a = hasher.hash("s3cret!").unwrap();
        let b = hasher.hash("s3cret!").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_does_not_verify() {
        let hasher = PasswordHasher::new(HashCost::Insecure);
        assert!(!hasher.verify("s3cret!", "not-a-phc-string"));
        assert!(!hasher.verify("", ""));
    }

    #[test]
    fn test_hash_made_with_other_cost_still_verifies() {
        // Params are embedded in the PHC string
        let fast = PasswordHasher::new(HashCost::Insecure);
        let hash = fast.hash("s3cret!").unwrap();
        assert!(PasswordHasher::default().verify("s3cret!", &hash));
    }
}
