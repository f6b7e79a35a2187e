//! End-to-end account flows against the in-memory store: signup, credential
//! sign-in, federated sign-in and the concurrent signup race.

use std::sync::{Arc, Barrier};
use std::thread;

use studio_core::{
    AuthError, AuthService, FederatedIdentity, HashCost, MemoryUserStore, NewAccount,
    ProvisionError, UserStore,
};

fn setup() -> (Arc<MemoryUserStore>, Arc<AuthService>) {
    let store = Arc::new(MemoryUserStore::new());
    let service = Arc::new(AuthService::new(store.clone(), HashCost::Insecure));
    (store, service)
}

fn ada() -> NewAccount {
    NewAccount {
        name: Some("Ada".to_string()),
        email: Some("ada@x.com".to_string()),
        password: Some("s3cret!".to_string()),
    }
}

fn google(email: &str, verified: bool) -> FederatedIdentity {
    FederatedIdentity {
        provider: "google".to_string(),
        email: Some(email.to_string()),
        email_verified: verified,
        name: Some("Google Ada".to_string()),
        avatar_url: Some("https://example.com/ada.png".to_string()),
    }
}

#[test]
fn signup_then_login_round_trip() {
    let (_, service) = setup();

    let user_id = service.sign_up(ada()).unwrap();

    let wrong = service.sign_in_with_credentials("ada@x.com", "wrong");
    assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));

    let identity = service
        .sign_in_with_credentials("ada@x.com", "s3cret!")
        .unwrap();
    assert_eq!(identity.id, user_id);
    assert_eq!(identity.name, "Ada");
    assert_eq!(identity.email, "ada@x.com");
}

#[test]
fn second_signup_with_same_email_conflicts() {
    let (store, service) = setup();
    service.sign_up(ada()).unwrap();
    assert!(matches!(service.sign_up(ada()), Err(ProvisionError::UserExists)));
    assert_eq!(store.len(), 1);
}

#[test]
fn concurrent_signups_yield_exactly_one_account() {
    const RACERS: usize = 8;
    let (store, service) = setup();
    let barrier = Arc::new(Barrier::new(RACERS));

    let handles: Vec<_> = (0..RACERS)
        .map(|_| {
            let service = service.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                service.sign_up(ada())
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let successes = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(ProvisionError::UserExists)))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(conflicts, RACERS - 1);
    assert_eq!(store.len(), 1);
}

#[test]
fn wrong_password_and_unknown_email_are_indistinguishable() {
    let (_, service) = setup();
    service.sign_up(ada()).unwrap();

    let wrong_password = service
        .sign_in_with_credentials("ada@x.com", "nope")
        .unwrap_err();
    let unknown_email = service
        .sign_in_with_credentials("nobody@x.com", "nope")
        .unwrap_err();

    assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    assert!(matches!(unknown_email, AuthError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[test]
fn federated_sign_in_reuses_credential_account_without_touching_hash() {
    let (store, service) = setup();
    let user_id = service.sign_up(ada()).unwrap();
    let hash_before = store
        .find_by_email("ada@x.com")
        .unwrap()
        .unwrap()
        .password_hash;

    let identity = service.sign_in_federated(google("ada@x.com", true)).unwrap();

    assert_eq!(identity.id, user_id);
    // name and avatar are not re-synced
    assert_eq!(identity.name, "Ada");
    assert_eq!(identity.avatar_url, None);

    let after = store.find_by_email("ada@x.com").unwrap().unwrap();
    assert_eq!(after.password_hash, hash_before);
    assert_eq!(store.len(), 1);

    // the password still works
    assert!(service
        .sign_in_with_credentials("ada@x.com", "s3cret!")
        .is_ok());
}

#[test]
fn federated_sign_in_creates_one_passwordless_user() {
    let (store, service) = setup();

    let first = service.sign_in_federated(google("new@x.com", true)).unwrap();
    let second = service.sign_in_federated(google("new@x.com", true)).unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.name, "Google Ada");
    assert_eq!(
        first.avatar_url.as_deref(),
        Some("https://example.com/ada.png")
    );
    assert_eq!(store.len(), 1);
    let stored = store.find_by_email("new@x.com").unwrap().unwrap();
    assert!(stored.password_hash.is_none());
}

#[test]
fn federated_sign_in_requires_verified_email() {
    let (store, service) = setup();

    let unverified = service.sign_in_federated(google("new@x.com", false));
    assert!(matches!(unverified, Err(AuthError::Rejected(_))));

    let mut missing = google("new@x.com", true);
    missing.email = None;
    assert!(matches!(
        service.sign_in_federated(missing),
        Err(AuthError::Rejected(_))
    ));

    assert!(store.is_empty());
}

#[test]
fn federated_sign_in_rejects_unknown_provider() {
    let (store, service) = setup();
    let mut assertion = google("new@x.com", true);
    assertion.provider = "myspace".to_string();
    assert!(matches!(
        service.sign_in_federated(assertion),
        Err(AuthError::Rejected(_))
    ));
    assert!(store.is_empty());
}
