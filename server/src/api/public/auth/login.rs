use crate::api::{blocking, ApiError, MessageResponse};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tower_cookies::Cookies;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub user_id: Uuid,
}

/// Credential sign-in. On success the session cookie is set.
///
/// Every failure (unknown email, no password on the account, wrong
/// password, malformed request) gets the same 400 response.
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "auth",
    request_body(content = LoginRequest, example = json!({"email": "ada@x.com", "password": "s3cret!"})),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid credentials", body = MessageResponse),
        (status = 500, description = "Internal Server Error", body = MessageResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Ok(Json(LoginRequest {
        email: Some(email),
        password: Some(password),
    })) = body
    else {
        return Err(ApiError::BadRequest("Invalid credentials"));
    };

    let auth = state.auth.clone();
    let identity = blocking(move || auth.sign_in_with_credentials(&email, &password)).await?;

    let token = state.tokens.issue(identity.id).map_err(|e| {
        tracing::error!(error = %e, "failed to issue session token");
        ApiError::Internal
    })?;
    state
        .cookies
        .set_session(&cookies, token, state.tokens.ttl());

    tracing::info!(user_id = %identity.id, "credential sign-in");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user_id: identity.id,
    }))
}
