//! Read model over shows, episodes and their publish status, as shown on the
//! dashboard of the signed-in host.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::{EpisodeStatus, PublishPlatform, PublishState};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShowOverview {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub episodes: Vec<EpisodeOverview>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeOverview {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: EpisodeStatus,
    pub final_url: Option<String>,
    pub publish: Vec<PublishOverview>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishOverview {
    pub platform: PublishPlatform,
    pub status: PublishState,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub platform_url: Option<String>,
}

pub trait CatalogStore: Send + Sync + fmt::Debug {
    /// Shows created by `owner`, newest first, each with its episodes.
    fn shows_for_owner(&self, owner: Uuid) -> Result<Vec<ShowOverview>, StoreError>;
}
