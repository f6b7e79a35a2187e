use chrono::{DateTime, Utc};
use diesel::prelude::*;
use studio_core::{
    EpisodeStatus, PublishOverview, PublishPlatform, PublishState, RecordingKind, StoredUser,
};
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<User> for StoredUser {
    fn from(user: User) -> Self {
        StoredUser {
            id: user.id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            avatar_url: user.avatar_url,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: Option<&'a str>,
    pub avatar_url: Option<&'a str>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::shows)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Show {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_by: Uuid,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::shows)]
#[allow(dead_code)]
pub struct NewShow<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub created_by: Uuid,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::episodes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Episode {
    pub id: Uuid,
    pub show_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub final_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Episode {
    /// Rows that somehow hold an unknown status are reported as still recording.
    pub fn episode_status(&self) -> EpisodeStatus {
        EpisodeStatus::parse(&self.status).unwrap_or(EpisodeStatus::Recording)
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::episodes)]
#[allow(dead_code)]
pub struct NewEpisode<'a> {
    pub show_id: Uuid,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: &'a str,
    pub final_url: Option<&'a str>,
}

/// A live recording session of an episode (table `sessions`).
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct RecordingSession {
    pub id: Uuid,
    pub episode_id: Uuid,
    pub start_time: DateTime<Utc>,
    /// Set once `active` turns false.
    pub end_time: Option<DateTime<Utc>>,
    pub active: Option<bool>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sessions)]
#[allow(dead_code)]
pub struct NewRecordingSession {
    pub episode_id: Uuid,
    pub start_time: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::session_participants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct SessionParticipant {
    pub id: Uuid,
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub joined_at: DateTime<Utc>,
    pub left_at: Option<DateTime<Utc>>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::session_participants)]
#[allow(dead_code)]
pub struct NewSessionParticipant {
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub joined_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::recordings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Recording {
    pub id: Uuid,
    pub session_id: Uuid,
    pub participant_id: Uuid,
    #[diesel(column_name = type_)]
    pub recording_type: String,
    pub file_url: Option<String>,
    pub is_uploaded: Option<bool>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

#[allow(dead_code)]
impl Recording {
    pub fn kind(&self) -> Option<RecordingKind> {
        RecordingKind::parse(&self.recording_type)
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recordings)]
#[allow(dead_code)]
pub struct NewRecording<'a> {
    pub session_id: Uuid,
    pub participant_id: Uuid,
    #[diesel(column_name = type_)]
    pub recording_type: &'a str,
    pub started_at: Option<DateTime<Utc>>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::recording_chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct RecordingChunk {
    pub id: Uuid,
    pub recording_id: Uuid,
    pub chunk_index: i32,
    pub chunk_url: String,
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recording_chunks)]
#[allow(dead_code)]
pub struct NewRecordingChunk<'a> {
    pub recording_id: Uuid,
    pub chunk_index: i32,
    pub chunk_url: &'a str,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::publish_status)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct PublishStatus {
    pub id: Uuid,
    pub episode_id: Uuid,
    pub platform: String,
    pub status: String,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub platform_url: Option<String>,
}

impl PublishStatus {
    /// `None` for rows whose platform or status is not one we know.
    pub fn overview(&self) -> Option<PublishOverview> {
        Some(PublishOverview {
            platform: PublishPlatform::parse(&self.platform)?,
            status: PublishState::parse(&self.status)?,
            scheduled_for: self.scheduled_for,
            published_at: self.published_at,
            platform_url: self.platform_url.clone(),
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::publish_status)]
#[allow(dead_code)]
pub struct NewPublishStatus<'a> {
    pub episode_id: Uuid,
    pub platform: &'a str,
    pub status: &'a str,
    pub scheduled_for: Option<DateTime<Utc>>,
}
