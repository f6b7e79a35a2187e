use std::sync::Arc;
use uuid::Uuid;

use super::password::{HashCost, PasswordHasher};
use crate::error::{AuthError, ProvisionError, StoreError};
use crate::store::{NewUserRecord, StoredUser, UserStore};
use crate::types::{FederatedIdentity, NewAccount, Provider, UserIdentity};

/// Credential and federated sign-in plus account provisioning.
///
/// Every method is blocking (storage access and argon2 work); the server
/// runs them on a blocking thread. Attempts are independent: nothing is
/// remembered between calls.
#[derive(Debug)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, cost: HashCost) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(cost),
        }
    }

    /// Create a credential-based account and return its id.
    ///
    /// The email lookup is only a fast path for a friendly error; the
    /// store's unique constraint decides when two signups race.
    pub fn sign_up(&self, account: NewAccount) -> Result<Uuid, ProvisionError> {
        let (name, email, password) = match (account.name, account.email, account.password) {
            (Some(name), Some(email), Some(password))
                if !name.trim().is_empty() && !email.trim().is_empty() && !password.is_empty() =>
            {
                (name, email, password)
            }
            _ => return Err(ProvisionError::MissingFields),
        };

        if self.store.find_by_email(&email)?.is_some() {
            return Err(ProvisionError::UserExists);
        }

        let password_hash = self
            .hasher
            .hash(&password)
            .map_err(|e| ProvisionError::Internal(e.to_string()))?;

        let user = self.store.insert(NewUserRecord {
            name,
            email,
            password_hash: Some(password_hash),
            avatar_url: None,
        })?;

        tracing::info!(user_id = %user.id, "created credential account");
        Ok(user.id)
    }

    /// Verify an email/password pair.
    ///
    /// Unknown email, federated-only account and wrong password all fail
    /// with [`AuthError::InvalidCredentials`] after the same amount of hashing work.
    pub fn sign_in_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserIdentity, AuthError> {
        if email.is_empty() || password.is_empty() {
            self.hasher.verify_against_dummy(password);
            return Err(AuthError::InvalidCredentials);
        }

        let user = self.store.find_by_email(email)?;
        let Some((user, hash)) = user.and_then(|u| {
            let hash = u.password_hash.clone()?;
            Some((u, hash))
        }) else {
            self.hasher.verify_against_dummy(password);
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &hash) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user.identity())
    }

    /// Sign in from a provider's identity assertion, creating a
    /// federated-only account on first sight of the email.
    ///
    /// Existing accounts are returned as stored; name and avatar are not re-synced
    /// and a stored password hash is left untouched.
    pub fn sign_in_federated(&self, assertion: FederatedIdentity) -> Result<UserIdentity, AuthError> {
        match Provider::parse(&assertion.provider) {
            Some(provider) if provider.is_federated() => {}
            _ => return Err(AuthError::Rejected("unrecognized provider")),
        }

        let email = match assertion.email {
            Some(email) if assertion.email_verified && !email.trim().is_empty() => email,
            _ => return Err(AuthError::Rejected("no verified email")),
        };

        if let Some(existing) = self.store.find_by_email(&email)? {
            return Ok(existing.identity());
        }

        let name = assertion
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| email.clone());

        match self.store.insert(NewUserRecord {
            name,
            email: email.clone(),
            password_hash: None,
            avatar_url: assertion.avatar_url,
        }) {
            Ok(user) => {
                tracing::info!(user_id = %user.id, provider = %assertion.provider, "created federated account");
                Ok(user.identity())
            }
            // Another request created the row between lookup and insert
            Err(StoreError::UniqueViolation) => self
                .store
                .find_by_email(&email)?
                .map(|u| u.identity())
                .ok_or_else(|| AuthError::Internal("user vanished after conflict".to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Look up the user a resolved session token points at.
    pub fn user(&self, id: Uuid) -> Result<Option<UserIdentity>, AuthError> {
        Ok(self.store.find_by_id(id)?.as_ref().map(StoredUser::identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryUserStore;

    fn service() -> (Arc<MemoryUserStore>, AuthService) {
        let store = Arc::new(MemoryUserStore::new());
        let service = AuthService::new(store.clone(), HashCost::Insecure);
        (store, service)
    }

    fn account(name: &str, email: &str, password: &str) -> NewAccount {
        NewAccount {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[test]
    fn test_empty_login_input_still_does_hashing_work() {
        let (_store, service) = service();
        assert!(!service.hasher.has_dummy_hash());
        assert!(matches!(
            service.sign_in_with_credentials("", "pw"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(service.hasher.has_dummy_hash());
    }

    #[test]
    fn test_whitespace_only_name_or_email_counts_as_missing() {
        let (store, service) = service();
        for acc in [
            account(" \t ", "ada@x.com", "pw"),
            account("Ada", "\n", "pw"),
        ] {
            assert!(matches!(service.sign_up(acc), Err(ProvisionError::MissingFields)));
        }
        assert!(store.is_empty());

        // Whitespace is only checked, never stripped from stored values.
        let id = service.sign_up(account(" Ada ", "ada@x.com", " pw ")).unwrap();
        let user = service.user(id).unwrap().unwrap();
        assert_eq!(user.name, " Ada ");
        assert!(service.sign_in_with_credentials("ada@x.com", " pw ").is_ok());
        assert!(service.sign_in_with_credentials("ada@x.com", "pw").is_err());
    }

    #[test]
    fn test_missing_or_empty_fields_rejected_before_storage() {
        let (store, service) = service();
        for acc in [
            NewAccount::default(),
            account("", "ada@x.com", "pw"),
            account("Ada", "  ", "pw"),
            account("Ada", "ada@x.com", ""),
        ] {
            assert!(matches!(service.sign_up(acc), Err(ProvisionError::MissingFields)));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_missing_fields_wins_over_existing_email() {
        let (_, service) = service();
        service.sign_up(account("Ada", "ada@x.com", "pw")).unwrap();
        let result = service.sign_up(account("Ada", "ada@x.com", ""));
        assert!(matches!(result, Err(ProvisionError::MissingFields)));
    }

    #[test]
    fn test_stored_password_is_hashed() {
        let (store, service) = service();
        service.sign_up(account("Ada", "ada@x.com", "s3cret!")).unwrap();
        let stored = store.find_by_email("ada@x.com").unwrap().unwrap();
        let hash = stored.password_hash.unwrap();
        assert_ne!(hash, "s3cret!");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_federated_account_cannot_use_credentials() {
        let (_, service) = service();
        service
            .sign_in_federated(FederatedIdentity {
                provider: "google".to_string(),
                email: Some("fed@x.com".to_string()),
                email_verified: true,
                name: Some("Fed".to_string()),
                avatar_url: None,
            })
            .unwrap();
        let result = service.sign_in_with_credentials("fed@x.com", "anything");
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_federated_name_falls_back_to_email() {
        let (_, service) = service();
        let identity = service
            .sign_in_federated(FederatedIdentity {
                provider: "google".to_string(),
                email: Some("anon@x.com".to_string()),
                email_verified: true,
                name: None,
                avatar_url: None,
            })
            .unwrap();
        assert_eq!(identity.name, "anon@x.com");
    }

    #[test]
    fn test_credentials_provider_is_not_a_federated_path() {
        let (store, service) = service();
        let result = service.sign_in_federated(FederatedIdentity {
            provider: "credentials".to_string(),
            email: Some("x@x.com".to_string()),
            email_verified: true,
            name: None,
            avatar_url: None,
        });
        assert!(matches!(result, Err(AuthError::Rejected(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_user_lookup_by_id() {
        let (_, service) = service();
        let id = service.sign_up(account("Ada", "ada@x.com", "pw")).unwrap();
        assert_eq!(service.user(id).unwrap().unwrap().email, "ada@x.com");
        assert!(service.user(Uuid::new_v4()).unwrap().is_none());
    }
}
