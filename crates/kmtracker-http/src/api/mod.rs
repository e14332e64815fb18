//! Typed endpoint methods on [`ApiClient`](crate::ApiClient).

mod auth;
mod reports;
mod trips;
