mod password;
mod service;
mod token;

pub use password::{HashCost, PasswordHasher};
pub use service::AuthService;
pub use token::{generate_token, SessionTokens};
