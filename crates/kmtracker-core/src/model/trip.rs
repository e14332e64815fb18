//! Trip types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::decimal;

/// A recorded work trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: u64,
    /// Owning user id.
    pub user: u64,
    pub date: NaiveDate,
    pub start_address: String,
    pub end_address: String,
    #[serde(deserialize_with = "decimal")]
    pub distance_km: f64,
    pub purpose: String,
    /// False when the distance came from route calculation.
    #[serde(default = "default_manual")]
    pub is_manual: bool,
    #[serde(default)]
    pub route_data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_manual() -> bool {
    true
}

/// Body for creating or fully replacing a trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRequest {
    pub date: NaiveDate,
    pub start_address: String,
    pub end_address: String,
    pub distance_km: f64,
    pub purpose: String,
    pub is_manual: bool,
}

/// Body for a partial trip update. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TripPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_manual: Option<bool>,
}

/// Filters for `GET /trips/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TripQuery {
    /// Matches addresses or purpose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_after: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_before: Option<NaiveDate>,
    /// Sort field, e.g. `-date` for newest first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// Totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    #[serde(deserialize_with = "decimal")]
    pub total_km: f64,
    pub trip_count: u32,
    #[serde(default)]
    pub trips: Vec<Trip>,
}

/// Result of `POST /trips/calculate-distance/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceEstimate {
    #[serde(deserialize_with = "decimal")]
    pub distance_km: f64,
    #[serde(default)]
    pub route_data: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trip_accepts_decimal_strings() {
        let trip: Trip = serde_json::from_value(json!({
            "id": 1,
            "user": 7,
            "date": "2025-03-14",
            "start_address": "Mannerheimintie 1, Helsinki",
            "end_address": "Hämeenkatu 10, Tampere",
            "distance_km": "178.40",
            "purpose": "Customer meeting",
            "created_at": "2025-03-14T08:00:00Z",
            "updated_at": "2025-03-14T08:00:00Z"
        }))
        .unwrap();

        assert_eq!(trip.distance_km, 178.4);
        assert!(trip.is_manual);
        assert_eq!(trip.date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    }

    #[test]
    fn query_serializes_only_set_filters() {
        let query = TripQuery {
            ordering: Some("-date".to_string()),
            page: Some(2),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"ordering": "-date", "page": 2})
        );
    }
}
