//! In-memory stores for tests and local experiments.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::{NewUserRecord, StoredUser, UserStore};
use crate::catalog::{CatalogStore, ShowOverview};
use crate::error::StoreError;

/// User store backed by a map keyed on email, which plays the role of the
/// unique index: an insert for a taken email fails with
/// [`StoreError::UniqueViolation`] no matter how many threads race.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<String, StoredUser>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.lock().map(|u| u.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Backend("memory store lock poisoned".to_string())
}

impl UserStore for MemoryUserStore {
    fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, StoreError> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.get(email).cloned())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<StoredUser>, StoreError> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.values().find(|u| u.id == id).cloned())
    }

    fn insert(&self, user: NewUserRecord) -> Result<StoredUser, StoreError> {
        let mut users = self.users.lock().map_err(poisoned)?;
        if users.contains_key(&user.email) {
            return Err(StoreError::UniqueViolation);
        }
        let stored = StoredUser {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            avatar_url: user.avatar_url,
        };
        users.insert(stored.email.clone(), stored.clone());
        Ok(stored)
    }
}

/// Catalog holding pre-built show overviews per owner.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    shows: RwLock<Vec<(Uuid, ShowOverview)>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_show(&self, owner: Uuid, show: ShowOverview) {
        if let Ok(mut shows) = self.shows.write() {
            shows.push((owner, show));
        }
    }
}

impl CatalogStore for MemoryCatalog {
    fn shows_for_owner(&self, owner: Uuid) -> Result<Vec<ShowOverview>, StoreError> {
        let shows = self.shows.read().map_err(poisoned)?;
        let mut owned: Vec<ShowOverview> = shows
            .iter()
            .filter(|(o, _)| *o == owner)
            .map(|(_, s)| s.clone())
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }
}
