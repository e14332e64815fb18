//! Validated configuration types.
//!
//! These types enforce their invariants at construction time, so an invalid
//! base URL is rejected before any request is built.

mod api_url;

pub use api_url::ApiUrl;
