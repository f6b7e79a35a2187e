use thiserror::Error;

/// Failures reported by a [`crate::store::UserStore`] or [`crate::catalog::CatalogStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write (duplicate email).
    #[error("unique constraint violated")]
    UniqueViolation,

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Sign-in failures. Callers only ever see one generic rejection; the
/// variants exist so the server can log and pick a status code.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("federated sign-in rejected: {0}")]
    Rejected(&'static str),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("User already exists")]
    UserExists,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ProvisionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation => ProvisionError::UserExists,
            StoreError::Backend(msg) => ProvisionError::Internal(msg),
        }
    }
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("session token is invalid or expired")]
    Invalid,

    #[error("failed to sign session token: {0}")]
    Signing(String),
}

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(String),
}
