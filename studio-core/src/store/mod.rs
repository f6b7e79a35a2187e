//! Storage seam for user accounts.
//!
//! The server backs this with PostgreSQL; tests use [`MemoryUserStore`].
//! Implementations must enforce email uniqueness themselves and report a
//! duplicate insert as [`StoreError::UniqueViolation`].

mod memory;

pub use memory::{MemoryCatalog, MemoryUserStore};

use std::fmt;
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::UserIdentity;

/// A user row as persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// `None` for federated-only accounts.
    pub password_hash: Option<String>,
    pub avatar_url: Option<String>,
}

impl StoredUser {
    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub avatar_url: Option<String>,
}

/// Blocking access to the user table. Callers on an async runtime should
/// invoke these from a blocking thread.
pub trait UserStore: Send + Sync + fmt::Debug {
    fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, StoreError>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<StoredUser>, StoreError>;

    /// Insert a new user; the store assigns the id.
    fn insert(&self, user: NewUserRecord) -> Result<StoredUser, StoreError>;
}
