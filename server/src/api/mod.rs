pub mod public;
pub mod session;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use studio_core::{AuthError, ProvisionError, StoreError};
use tower_cookies::CookieManagerLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{OpenApi, ToSchema};

use crate::auth::SESSION_COOKIE;
use crate::AppState;

/// Body of every error response, and of simple acknowledgements.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Error taxonomy surfaced to HTTP callers.
///
/// Internal failures are logged where they happen and reach the client
/// only as a generic message.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(&'static str),
    Unauthorized,
    Conflict(&'static str),
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        };

        (
            status,
            Json(MessageResponse {
                message: message.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<ProvisionError> for ApiError {
    fn from(err: ProvisionError) -> Self {
        match err {
            ProvisionError::MissingFields => ApiError::BadRequest("Missing required fields"),
            ProvisionError::UserExists => ApiError::Conflict("User already exists"),
            ProvisionError::Internal(msg) => {
                tracing::error!(error = %msg, "signup failed");
                ApiError::Internal
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::Rejected(_) => {
                ApiError::BadRequest("Invalid credentials")
            }
            AuthError::Internal(msg) => {
                tracing::error!(error = %msg, "authentication failed");
                ApiError::Internal
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "storage failure");
        ApiError::Internal
    }
}

/// Run blocking work (storage, password hashing) off the async executor.
pub async fn blocking<T, E, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => result.map_err(Into::into),
        Err(e) => {
            tracing::error!(error = %e, "blocking task failed");
            Err(ApiError::Internal)
        }
    }
}

/// All API routes with cookie handling, ready for serving or for tests.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(public::router())
        .merge(session::router())
        .with_state(state)
        .layer(CookieManagerLayer::new())
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(components(schemas(MessageResponse)))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
    }

    for module_spec in [public::ApiDoc::openapi(), session::ApiDoc::openapi()] {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::Body;
    use axum::http::{header, Request, Response};
    use std::sync::Arc;
    use studio_core::{AuthService, HashCost, MemoryCatalog, MemoryUserStore, SessionTokens};

    use crate::auth::{CookieSettings, OAuthProviders};
    use crate::AppState;

    pub fn state_with(
        store: Arc<MemoryUserStore>,
        catalog: Arc<MemoryCatalog>,
        oauth: OAuthProviders,
    ) -> AppState {
        AppState {
            auth: Arc::new(AuthService::new(store, HashCost::Insecure)),
            catalog,
            tokens: Arc::new(SessionTokens::new(b"test-secret", chrono::Duration::hours(1))),
            oauth,
            cookies: CookieSettings { secure: false },
        }
    }

    pub fn state() -> AppState {
        state_with(
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryCatalog::new()),
            OAuthProviders::new(),
        )
    }

    pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// `name=value` pairs of every Set-Cookie header.
    pub fn set_cookies<B>(response: &Response<B>) -> Vec<String> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .map(str::to_string)
            .collect()
    }
}
