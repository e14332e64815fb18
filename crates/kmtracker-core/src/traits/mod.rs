//! Core traits for credential persistence.

mod store;

pub use store::{CredentialStore, MemoryCredentialStore};
