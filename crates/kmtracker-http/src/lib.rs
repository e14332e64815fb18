//! kmtracker-http - Authenticated request pipeline for the kmtracker API.
//!
//! Every call made through an [`ApiClient`] is augmented with the stored
//! bearer token, dispatched with a fixed timeout, and, if the API answers
//! `401`, renewed once through the token refresh endpoint and replayed.
//! When renewal is impossible the stored credentials are cleared and a
//! [`SessionEvent::Ended`] is broadcast to subscribers.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use kmtracker_core::{Credentials, MemoryCredentialStore};
//! use kmtracker_http::{ApiClient, ClientConfig};
//!
//! # async fn example() -> Result<(), kmtracker_core::Error> {
//! let client = ApiClient::new(ClientConfig::default(), Arc::new(MemoryCredentialStore::new()))?;
//! let mut events = client.subscribe();
//! tokio::spawn(async move {
//!     while let Ok(event) = events.recv().await {
//!         eprintln!("{event:?}: please log in again");
//!     }
//! });
//!
//! client.login(Credentials::new("alice", "hunter2")).await?;
//! let trips = client.list_trips(&Default::default()).await?;
//! println!("{} trips", trips.count);
//! # Ok(())
//! # }
//! ```

mod api;
mod augment;
mod client;
mod config;
mod endpoints;
mod refresh;
mod request;
mod session;
mod transport;

pub use augment::authorize;
pub use client::ApiClient;
pub use config::ClientConfig;
pub use request::{ApiRequest, Attempt};
pub use session::{EndReason, SessionEvent, is_authenticated};
