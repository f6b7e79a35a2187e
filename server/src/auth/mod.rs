mod cookie;
mod extractor;
mod oauth;

pub use cookie::{CookieSettings, OAUTH_STATE_COOKIE, SESSION_COOKIE};
pub use extractor::SessionUser;
pub use oauth::{GoogleOAuth, OAuthError, OAuthProvider, OAuthProviders};
