//! PostgreSQL implementations of the studio-core storage traits.

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::HashMap;
use studio_core::{
    CatalogStore, EpisodeOverview, NewUserRecord, ShowOverview, StoreError, StoredUser, UserStore,
};
use uuid::Uuid;

use crate::db::{DbConn, DbPool};
use crate::models::{Episode, NewUser, PublishStatus, Show, User};
use crate::schema::{episodes, publish_status, shows, users};

fn store_error(err: DieselError) -> StoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            StoreError::UniqueViolation
        }
        other => StoreError::Backend(other.to_string()),
    }
}

fn get_conn(pool: &DbPool) -> Result<DbConn, StoreError> {
    pool.get()
        .map_err(|e| StoreError::Backend(format!("database connection failed: {e}")))
}

#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserStore for PgUserStore {
    fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, StoreError> {
        let mut conn = get_conn(&self.pool)?;
        users::table
            .filter(users::email.eq(email))
            .select(User::as_select())
            .first(&mut conn)
            .optional()
            .map(|u| u.map(StoredUser::from))
            .map_err(store_error)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<StoredUser>, StoreError> {
        let mut conn = get_conn(&self.pool)?;
        users::table
            .find(id)
            .select(User::as_select())
            .first(&mut conn)
            .optional()
            .map(|u| u.map(StoredUser::from))
            .map_err(store_error)
    }

    fn insert(&self, user: NewUserRecord) -> Result<StoredUser, StoreError> {
        let mut conn = get_conn(&self.pool)?;
        let new_user = NewUser {
            name: &user.name,
            email: &user.email,
            password_hash: user.password_hash.as_deref(),
            avatar_url: user.avatar_url.as_deref(),
        };
        diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .map(StoredUser::from)
            .map_err(store_error)
    }
}

#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: DbPool,
}

impl PgCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CatalogStore for PgCatalog {
    fn shows_for_owner(&self, owner: Uuid) -> Result<Vec<ShowOverview>, StoreError> {
        let mut conn = get_conn(&self.pool)?;

        let owned: Vec<Show> = shows::table
            .filter(shows::created_by.eq(owner))
            .order(shows::created_at.desc())
            .select(Show::as_select())
            .load(&mut conn)
            .map_err(store_error)?;

        let show_ids: Vec<Uuid> = owned.iter().map(|s| s.id).collect();
        let show_episodes: Vec<Episode> = episodes::table
            .filter(episodes::show_id.eq_any(show_ids))
            .order(episodes::created_at.asc())
            .select(Episode::as_select())
            .load(&mut conn)
            .map_err(store_error)?;

        let episode_ids: Vec<Uuid> = show_episodes.iter().map(|e| e.id).collect();
        let statuses: Vec<PublishStatus> = publish_status::table
            .filter(publish_status::episode_id.eq_any(episode_ids))
            .select(PublishStatus::as_select())
            .load(&mut conn)
            .map_err(store_error)?;

        Ok(group_catalog(owned, show_episodes, statuses))
    }
}

/// Assemble loaded rows into overviews: shows newest first, episodes oldest
/// first, publish rows attached to their episode. Rows whose parent is not
/// in the input are dropped.
fn group_catalog(
    mut owned: Vec<Show>,
    mut show_episodes: Vec<Episode>,
    statuses: Vec<PublishStatus>,
) -> Vec<ShowOverview> {
    owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    show_episodes.sort_by(|a, b| a.created_at.cmp(&b.created_at));

    let mut publish_by_episode: HashMap<Uuid, Vec<_>> = HashMap::new();
    for row in &statuses {
        if let Some(overview) = row.overview() {
            publish_by_episode
                .entry(row.episode_id)
                .or_default()
                .push(overview);
        } else {
            tracing::warn!(id = %row.id, "skipping publish status with unknown platform or state");
        }
    }

    let mut episodes_by_show: HashMap<Uuid, Vec<EpisodeOverview>> = HashMap::new();
    for episode in show_episodes {
        let status = episode.episode_status();
        episodes_by_show
            .entry(episode.show_id)
            .or_default()
            .push(EpisodeOverview {
                id: episode.id,
                publish: publish_by_episode.remove(&episode.id).unwrap_or_default(),
                title: episode.title,
                description: episode.description,
                status,
                final_url: episode.final_url,
            });
    }

    owned
        .into_iter()
        .map(|show| ShowOverview {
            id: show.id,
            episodes: episodes_by_show.remove(&show.id).unwrap_or_default(),
            title: show.title,
            description: show.description,
            created_at: show.created_at,
        })
        .collect()
}
