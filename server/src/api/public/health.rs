use crate::api::MessageResponse;
use axum::{response::IntoResponse, Json};

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is up", body = MessageResponse)
    )
)]
pub async fn health() -> impl IntoResponse {
    Json(MessageResponse {
        message: "ok".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{body_json, state};
    use crate::api::{openapi, router};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_ok() {
        let response = router(state())
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "ok");
    }

    #[test]
    fn test_health_documented_under_health_tag() {
        let spec = openapi();
        let get = spec.paths.paths["/api/health"].get.as_ref().unwrap();
        assert_eq!(get.tags.as_deref(), Some(&["health".to_string()][..]));
    }
}
