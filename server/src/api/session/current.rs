use crate::api::{blocking, ApiError, MessageResponse};
use crate::auth::SessionUser;
use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use studio_core::UserIdentity;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionResponse {
    pub user: UserIdentity,
}

/// The signed-in user.
///
/// A valid token whose user no longer exists is treated as signed out.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = "auth",
    responses(
        (status = 200, description = "Current session", body = SessionResponse),
        (status = 401, description = "Not signed in", body = MessageResponse)
    )
)]
pub async fn current_session(
    State(state): State<AppState>,
    SessionUser { user_id }: SessionUser,
) -> Result<Json<SessionResponse>, ApiError> {
    let auth = state.auth.clone();
    let user = blocking(move || auth.user(user_id))
        .await?
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(SessionResponse { user }))
}

#[cfg(test)]
mod tests {
    use crate::api::router;
    use crate::api::test_support::{body_json, json_request, set_cookies, state};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    fn session_request(cookie: Option<&str>, bearer: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri("/api/auth/session");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn signed_in_cookie(app: &axum::Router) -> String {
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/signup",
                json!({"name": "Ada", "email": "ada@x.com", "password": "s3cret!"}),
            ))
            .await
            .unwrap();
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/login",
                json!({"email": "ada@x.com", "password": "s3cret!"}),
            ))
            .await
            .unwrap();
        set_cookies(&response).into_iter().next().unwrap()
    }

    #[tokio::test]
    async fn test_session_from_login_cookie() {
        let app = router(state());
        let cookie = signed_in_cookie(&app).await;

        let response = app
            .oneshot(session_request(Some(&cookie), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["user"]["email"], "ada@x.com");
        assert_eq!(body["user"]["name"], "Ada");
        assert!(body["user"].get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn test_session_from_bearer_token() {
        let app = router(state());
        let cookie = signed_in_cookie(&app).await;
        let token = cookie.split_once('=').unwrap().1.to_string();

        let response = app
            .oneshot(session_request(None, Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_session_requires_valid_token() {
        let app = router(state());
        for request in [
            session_request(None, None),
            session_request(Some("studio_session=garbage"), None),
            session_request(None, Some("garbage")),
        ] {
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_session_for_deleted_user_is_unauthorized() {
        // Token signed with the test secret for a user that was never stored.
        let state = state();
        let token = state.tokens.issue(uuid::Uuid::new_v4()).unwrap();
        let app = router(state);

        let response = app
            .oneshot(session_request(None, Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
