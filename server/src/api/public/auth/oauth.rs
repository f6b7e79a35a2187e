use crate::api::blocking;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::Redirect,
};
use serde::Deserialize;
use studio_core::generate_token;
use tower_cookies::Cookies;
use utoipa::IntoParams;

const SIGNED_IN_REDIRECT: &str = "/dashboard";
const FAILURE_REDIRECT: &str = "/login?error=AccessDenied";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set by the provider when the user declined or the request was invalid
    pub error: Option<String>,
}

/// Start federated sign-in by redirecting to the provider.
#[utoipa::path(
    get,
    path = "/api/auth/signin/{provider}",
    tag = "auth",
    params(("provider" = String, Path, description = "Provider name, e.g. google")),
    responses(
        (status = 303, description = "Redirect to the provider, or to the login page if the provider is not configured")
    )
)]
pub async fn signin(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    cookies: Cookies,
) -> Redirect {
    let Some(oauth) = state.oauth.get(&provider) else {
        tracing::warn!(provider = %provider, "sign-in requested for unavailable provider");
        return Redirect::to(FAILURE_REDIRECT);
    };

    let nonce = generate_token();
    match oauth.authorize_url(&nonce) {
        Ok(url) => {
            state.cookies.set_oauth_state(&cookies, nonce);
            Redirect::to(&url)
        }
        Err(e) => {
            tracing::error!(provider = %provider, error = %e, "failed to build authorize URL");
            Redirect::to(FAILURE_REDIRECT)
        }
    }
}

/// Finish federated sign-in. On success the session cookie is set and
/// the browser goes to the dashboard; every failure lands on the login page.
#[utoipa::path(
    get,
    path = "/api/auth/callback/{provider}",
    tag = "auth",
    params(
        ("provider" = String, Path, description = "Provider name, e.g. google"),
        CallbackQuery
    ),
    responses(
        (status = 303, description = "Redirect to /dashboard on success, /login?error=AccessDenied otherwise")
    )
)]
pub async fn callback(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(query): Query<CallbackQuery>,
    cookies: Cookies,
) -> Redirect {
    // Consume the pending state even when the callback is rejected below.
    let expected = state.cookies.take_oauth_state(&cookies);

    if let Some(error) = &query.error {
        tracing::info!(provider = %provider, error = %error, "provider denied sign-in");
        return Redirect::to(FAILURE_REDIRECT);
    }

    let (Some(code), Some(returned)) = (query.code, query.state) else {
        tracing::warn!(provider = %provider, "callback missing code or state");
        return Redirect::to(FAILURE_REDIRECT);
    };
    if expected.as_deref() != Some(returned.as_str()) {
        tracing::warn!(provider = %provider, "callback state mismatch");
        return Redirect::to(FAILURE_REDIRECT);
    }

    let Some(oauth) = state.oauth.get(&provider) else {
        tracing::warn!(provider = %provider, "callback for unavailable provider");
        return Redirect::to(FAILURE_REDIRECT);
    };

    let identity = match oauth.exchange(&code).await {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!(provider = %provider, error = %e, "code exchange failed");
            return Redirect::to(FAILURE_REDIRECT);
        }
    };

    let auth = state.auth.clone();
    let user = match blocking(move || auth.sign_in_federated(identity)).await {
        Ok(user) => user,
        Err(_) => {
            tracing::warn!(provider = %provider, "federated sign-in rejected");
            return Redirect::to(FAILURE_REDIRECT);
        }
    };

    let token = match state.tokens.issue(user.id) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "failed to issue session token");
            return Redirect::to(FAILURE_REDIRECT);
        }
    };
    state
        .cookies
        .set_session(&cookies, token, state.tokens.ttl());

    tracing::info!(user_id = %user.id, provider = %provider, "federated sign-in");
    Redirect::to(SIGNED_IN_REDIRECT)
}
