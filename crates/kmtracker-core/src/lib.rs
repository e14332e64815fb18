//! kmtracker-core - Core types and traits for the kmtracker mileage client.

pub mod credentials;
pub mod error;
pub mod model;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use tokens::{AccessToken, CredentialPair, RefreshToken};
pub use traits::{CredentialStore, MemoryCredentialStore};
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
