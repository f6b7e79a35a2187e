//! Federated sign-in providers.
//!
//! A provider turns an authorization code from its redirect into a
//! [`FederatedIdentity`]. Whether that identity may sign in is decided by
//! [`studio_core::AuthService::sign_in_federated`].

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use studio_core::{FederatedIdentity, Provider};
use thiserror::Error;

use crate::config::GoogleCredentials;

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("provider returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("invalid provider URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[async_trait]
pub trait OAuthProvider: Send + Sync {
    fn provider(&self) -> Provider;

    /// Where to send the browser to start sign-in.
    fn authorize_url(&self, state: &str) -> Result<String, OAuthError>;

    /// Exchange the authorization code for the user's identity.
    async fn exchange(&self, code: &str) -> Result<FederatedIdentity, OAuthError>;
}

/// Configured providers, keyed by the name used in the route path.
#[derive(Clone, Default)]
pub struct OAuthProviders {
    providers: HashMap<Provider, Arc<dyn OAuthProvider>>,
}

impl OAuthProviders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: Arc<dyn OAuthProvider>) -> Self {
        self.providers.insert(provider.provider(), provider);
        self
    }

    /// Unknown names and providers without credentials both resolve to `None`.
    pub fn get(&self, name: &str) -> Option<Arc<dyn OAuthProvider>> {
        let provider = Provider::parse(name)?;
        self.providers.get(&provider).cloned()
    }
}

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

pub struct GoogleOAuth {
    client: reqwest::Client,
    credentials: GoogleCredentials,
    redirect_uri: String,
}

#[derive(Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct GoogleUserInfo {
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
    name: Option<String>,
    picture: Option<String>,
}

impl GoogleOAuth {
    /// `public_url` is the externally visible base URL of this server.
    pub fn new(credentials: GoogleCredentials, public_url: &str) -> Result<Self, OAuthError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            credentials,
            redirect_uri: format!("{}/api/auth/callback/google", public_url),
        })
    }
}

#[async_trait]
impl OAuthProvider for GoogleOAuth {
    fn provider(&self) -> Provider {
        Provider::Google
    }

    fn authorize_url(&self, state: &str) -> Result<String, OAuthError> {
        let url = url::Url::parse_with_params(
            GOOGLE_AUTH_URL,
            &[
                ("client_id", self.credentials.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", "openid email profile"),
                ("state", state),
            ],
        )?;
        Ok(url.to_string())
    }

    async fn exchange(&self, code: &str) -> Result<FederatedIdentity, OAuthError> {
        let response = self
            .client
            .post(GOOGLE_TOKEN_URL)
            .form(&[
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(OAuthError::ApiError {
                status: response.status().as_u16(),
                message: "token exchange failed".to_string(),
            });
        }
        let token: GoogleTokenResponse = response.json().await?;

        let response = self
            .client
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(OAuthError::ApiError {
                status: response.status().as_u16(),
                message: "userinfo request failed".to_string(),
            });
        }
        let info: GoogleUserInfo = response.json().await?;

        Ok(FederatedIdentity {
            provider: Provider::Google.as_str().to_string(),
            email: info.email,
            email_verified: info.email_verified,
            name: info.name,
            avatar_url: info.picture,
        })
    }
}
