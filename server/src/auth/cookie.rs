use tower_cookies::cookie::{time::Duration, SameSite};
use tower_cookies::{Cookie, Cookies};

pub const SESSION_COOKIE: &str = "studio_session";
pub const OAUTH_STATE_COOKIE: &str = "studio_oauth_state";

/// How long a started OAuth round trip may take before its state expires.
const OAUTH_STATE_MINUTES: i64 = 10;

#[derive(Debug, Clone, Copy)]
pub struct CookieSettings {
    /// Mark cookies `Secure`. Off only for plain-HTTP local dev.
    pub secure: bool,
}

impl CookieSettings {
    fn build(&self, name: &'static str, value: String, max_age: Duration) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(max_age)
            .build()
    }

    pub fn set_session(&self, cookies: &Cookies, token: String, ttl: chrono::Duration) {
        let max_age = Duration::seconds(ttl.num_seconds());
        cookies.add(self.build(SESSION_COOKIE, token, max_age));
    }

    pub fn clear_session(&self, cookies: &Cookies) {
        cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
    }

    pub fn set_oauth_state(&self, cookies: &Cookies, state: String) {
        let max_age = Duration::minutes(OAUTH_STATE_MINUTES);
        cookies.add(self.build(OAUTH_STATE_COOKIE, state, max_age));
    }

    /// Remove and return the pending OAuth state, if any. Each state is single use.
    pub fn take_oauth_state(&self, cookies: &Cookies) -> Option<String> {
        let value = cookies
            .get(OAUTH_STATE_COOKIE)
            .map(|c| c.value().to_string());
        if value.is_some() {
            cookies.remove(Cookie::build((OAUTH_STATE_COOKIE, "")).path("/").build());
        }
        value
    }
}
