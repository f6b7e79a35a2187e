pub mod login;
pub mod oauth;
pub mod signout;
pub mod signup;
