//! Monthly report types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::decimal;

/// A generated monthly mileage report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: u64,
    pub user: u64,
    pub year: i32,
    pub month: u32,
    #[serde(deserialize_with = "decimal")]
    pub total_km: f64,
    pub trip_count: u32,
    #[serde(default)]
    pub pdf_file: Option<String>,
    #[serde(default)]
    pub excel_file: Option<String>,
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Filters for `GET /reports/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// Response from `POST /reports/generate/`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateReportResponse {
    pub report: Report,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub message: String,
}
