use crate::api::{blocking, ApiError, MessageResponse};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use studio_core::NewAccount;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    pub user_id: Uuid,
}

/// Create a credential-based account. Does not sign the user in.
#[utoipa::path(
    post,
    path = "/api/signup",
    tag = "auth",
    request_body(content = NewAccount, example = json!({"name": "Ada", "email": "ada@x.com", "password": "s3cret!"})),
    responses(
        (status = 201, description = "User created successfully", body = SignupResponse),
        (status = 400, description = "Missing required fields", body = MessageResponse),
        (status = 409, description = "User already exists", body = MessageResponse),
        (status = 500, description = "Internal Server Error", body = MessageResponse)
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<NewAccount>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(account) = body.map_err(|_| ApiError::BadRequest("No form data provided"))?;

    let auth = state.auth.clone();
    let user_id = blocking(move || auth.sign_up(account)).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully".to_string(),
            user_id,
        }),
    ))
}
