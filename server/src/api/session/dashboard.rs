use crate::api::{blocking, ApiError, MessageResponse};
use crate::auth::SessionUser;
use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use studio_core::{ShowOverview, UserIdentity};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub user: UserIdentity,
    /// Shows created by the user, newest first, with their episodes
    pub shows: Vec<ShowOverview>,
}

/// The signed-in user's shows, episodes and publish status.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "studio",
    responses(
        (status = 200, description = "Dashboard", body = DashboardResponse),
        (status = 401, description = "Not signed in", body = MessageResponse)
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    SessionUser { user_id }: SessionUser,
) -> Result<Json<DashboardResponse>, ApiError> {
    let auth = state.auth.clone();
    let user = blocking(move || auth.user(user_id))
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let catalog = state.catalog.clone();
    let shows = blocking(move || catalog.shows_for_owner(user_id)).await?;

    Ok(Json(DashboardResponse { user, shows }))
}
