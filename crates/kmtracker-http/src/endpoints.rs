//! Endpoint paths and wire-only request/response types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Endpoint Paths
// ============================================================================

pub const LOGIN: &str = "/auth/login/";
pub const REGISTER: &str = "/auth/register/";
pub const TOKEN_REFRESH: &str = "/auth/token/refresh/";
pub const LOGOUT: &str = "/auth/logout/";
pub const PROFILE: &str = "/auth/profile/";
pub const CHANGE_PASSWORD: &str = "/auth/change-password/";

pub const TRIPS: &str = "/trips/";
pub const MONTHLY_SUMMARY: &str = "/trips/monthly-summary/";
pub const CALCULATE_DISTANCE: &str = "/trips/calculate-distance/";

pub const REPORTS: &str = "/reports/";
pub const GENERATE_REPORT: &str = "/reports/generate/";

pub fn trip(id: u64) -> String {
    format!("/trips/{}/", id)
}

pub fn report(id: u64) -> String {
    format!("/reports/{}/", id)
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body for token refresh and logout.
#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Response from token refresh. Any rotated refresh token is ignored.
#[derive(Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

#[derive(Serialize)]
pub struct ChangePasswordRequest<'a> {
    pub old_password: &'a str,
    pub new_password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MonthParams {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Serialize)]
pub struct DistanceRequest<'a> {
    pub start_address: &'a str,
    pub end_address: &'a str,
}
