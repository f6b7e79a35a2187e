pub mod current;
pub mod dashboard;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Routes that require a signed-in caller. Each handler takes
/// [`crate::auth::SessionUser`], which rejects requests without a valid
/// session with 401.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/session", get(current::current_session))
        .route("/api/dashboard", get(dashboard::dashboard))
}

#[derive(OpenApi)]
#[openapi(
    paths(current::current_session, dashboard::dashboard),
    components(schemas(
        current::SessionResponse,
        dashboard::DashboardResponse,
        studio_core::UserIdentity,
        studio_core::ShowOverview,
        studio_core::EpisodeOverview,
        studio_core::PublishOverview,
        studio_core::EpisodeStatus,
        studio_core::PublishPlatform,
        studio_core::PublishState,
    )),
    security(("session_cookie" = []))
)]
pub struct ApiDoc;
