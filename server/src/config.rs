use std::env;
use studio_core::HashCost;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Server configuration, read once at startup.
///
/// Environment variables (a `.env` file is honored):
/// - `DATABASE_URL` (required)
/// - `SESSION_SECRET` (required): signs session tokens
/// - `SESSION_TTL_HOURS`: session lifetime, default 720
/// - `GOOGLE_CLIENT_ID` / `GOOGLE_CLIENT_SECRET`: enable Google sign-in
/// - `PUBLIC_URL`: external base URL, default `http://localhost:3000`
/// - `BIND_ADDR`: default `0.0.0.0:3000`
/// - `INSECURE_PASSWORD_HASHING`: fast argon2 params for dev/test
/// - `SECURE_COOKIES`: set to `false` for plain-HTTP local dev
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub google: Option<GoogleCredentials>,
    pub public_url: String,
    pub bind_addr: String,
    pub hash_cost: HashCost,
    pub secure_cookies: bool,
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

const DEFAULT_SESSION_TTL_HOURS: i64 = 720;

/// Ten years.
const MAX_SESSION_TTL_HOURS: i64 = 10 * 365 * 24;

fn session_ttl_hours(raw: Option<String>) -> Result<i64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_SESSION_TTL_HOURS);
    };
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|h| (1..=MAX_SESSION_TTL_HOURS).contains(h))
        .ok_or_else(|| ConfigError::Invalid {
            name: "SESSION_TTL_HOURS",
            reason: format!(
                "expected between 1 and {MAX_SESSION_TTL_HOURS} hours, got {raw:?}"
            ),
        })
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let session_ttl_hours = session_ttl_hours(optional("SESSION_TTL_HOURS"))?;

        let google = match (optional("GOOGLE_CLIENT_ID"), optional("GOOGLE_CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(GoogleCredentials {
                client_id,
                client_secret,
            }),
            (None, None) => None,
            _ => {
                return Err(ConfigError::Invalid {
                    name: "GOOGLE_CLIENT_ID",
                    reason: "GOOGLE_CLIENT_ID and GOOGLE_CLIENT_SECRET must be set together"
                        .to_string(),
                })
            }
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            session_secret: required("SESSION_SECRET")?,
            session_ttl_hours,
            google,
            public_url: optional("PUBLIC_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string())
                .trim_end_matches('/')
                .to_string(),
            bind_addr: optional("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            hash_cost: HashCost::from_env(),
            secure_cookies: optional("SECURE_COOKIES")
                .map(|v| !(v == "false" || v == "0"))
                .unwrap_or(true),
        })
    }
}
