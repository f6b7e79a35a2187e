pub mod auth;
pub mod catalog;
pub mod error;
pub mod store;
pub mod types;

pub use auth::{generate_token, AuthService, HashCost, PasswordHasher, SessionTokens};
pub use catalog::{CatalogStore, EpisodeOverview, PublishOverview, ShowOverview};
pub use error::{AuthError, PasswordError, ProvisionError, StoreError, TokenError};
pub use store::{MemoryCatalog, MemoryUserStore, NewUserRecord, StoredUser, UserStore};
pub use types::{
    EpisodeStatus, FederatedIdentity, NewAccount, Provider, PublishPlatform, PublishState,
    RecordingKind, UserIdentity,
};
