use crate::AppState;
use axum::{extract::State, http::StatusCode};
use tower_cookies::Cookies;

/// Clear the session cookie. Tokens are stateless, so a copied token stays
/// valid until it expires.
#[utoipa::path(
    post,
    path = "/api/auth/signout",
    tag = "auth",
    responses(
        (status = 204, description = "Signed out")
    )
)]
pub async fn signout(State(state): State<AppState>, cookies: Cookies) -> StatusCode {
    state.cookies.clear_session(&cookies);
    StatusCode::NO_CONTENT
}
