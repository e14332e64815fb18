//! API data model.
//!
//! These are the request and response bodies exchanged with the backend.
//! The operations themselves live on the HTTP client.

mod account;
mod page;
mod report;
mod trip;

pub use account::{LoginResponse, ProfileUpdate, RegisterRequest, User};
pub use page::Paginated;
pub use report::{GenerateReportResponse, Report, ReportQuery};
pub use trip::{DistanceEstimate, MonthlySummary, Trip, TripPatch, TripQuery, TripRequest};

use crate::error::{Error, InvalidInputError};

/// Validate a calendar month number.
pub fn check_month(month: u32) -> Result<u32, Error> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(InvalidInputError::Month { value: month }.into())
    }
}

/// Deserialize a decimal that the backend may send as a JSON number or a
/// string such as `"12.50"`.
pub(crate) fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimal {
        Number(f64),
        Text(String),
    }

    match Decimal::deserialize(deserializer)? {
        Decimal::Number(n) => Ok(n),
        Decimal::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_bounds() {
        assert!(check_month(1).is_ok());
        assert!(check_month(12).is_ok());
        assert!(check_month(0).is_err());
        assert!(check_month(13).is_err());
    }
}
