pub mod auth;
pub mod health;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for public endpoints (no session required)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/signup", post(auth::signup::signup))
        .route("/api/login", post(auth::login::login))
        .route("/api/auth/signin/{provider}", get(auth::oauth::signin))
        .route("/api/auth/callback/{provider}", get(auth::oauth::callback))
        .route("/api/auth/signout", post(auth::signout::signout))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::signup::signup,
        auth::login::login,
        auth::oauth::signin,
        auth::oauth::callback,
        auth::signout::signout,
    ),
    components(schemas(
        studio_core::NewAccount,
        auth::signup::SignupResponse,
        auth::login::LoginRequest,
        auth::login::LoginResponse,
    ))
)]
pub struct ApiDoc;
