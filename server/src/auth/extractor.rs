use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use tower_cookies::Cookies;
use uuid::Uuid;

use super::cookie::SESSION_COOKIE;
use crate::api::ApiError;
use crate::AppState;

/// Identity of the caller, resolved from the session token.
///
/// Handlers take this as an explicit argument; there is no ambient
/// "current user". The token is read from the session cookie, or from an
/// `Authorization: Bearer` header for API clients.
/// ```ignore
/// async fn my_handler(SessionUser { user_id }: SessionUser) -> impl IntoResponse {
///     // user_id is the signed-in user
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SessionUser {
    pub user_id: Uuid,
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let token = match bearer_token(parts) {
            Some(token) => token,
            None => Cookies::from_request_parts(parts, &state)
                .await
                .ok()
                .and_then(|cookies| cookies.get(SESSION_COOKIE).map(|c| c.value().to_string()))
                .ok_or(ApiError::Unauthorized)?,
        };

        let user_id = state
            .tokens
            .resolve(&token)
            .map_err(|_| ApiError::Unauthorized)?;

        Ok(SessionUser { user_id })
    }
}
