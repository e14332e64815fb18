//! Trip endpoints.

use tracing::instrument;

use kmtracker_core::Result;
use kmtracker_core::model::{
    DistanceEstimate, MonthlySummary, Paginated, Trip, TripPatch, TripQuery, TripRequest,
    check_month,
};

use crate::client::ApiClient;
use crate::endpoints::{
    self, CALCULATE_DISTANCE, DistanceRequest, MONTHLY_SUMMARY, MonthParams, TRIPS,
};
use crate::request::ApiRequest;

impl ApiClient {
    /// List trips, one page at a time.
    #[instrument(skip(self))]
    pub async fn list_trips(&self, query: &TripQuery) -> Result<Paginated<Trip>> {
        self.execute(ApiRequest::get(TRIPS).query(query)?).await
    }

    pub async fn get_trip(&self, id: u64) -> Result<Trip> {
        self.execute(ApiRequest::get(endpoints::trip(id))).await
    }

    #[instrument(skip(self, trip))]
    pub async fn create_trip(&self, trip: &TripRequest) -> Result<Trip> {
        self.execute(ApiRequest::post(TRIPS).json(trip)?).await
    }

    /// Replace every field of a trip.
    pub async fn update_trip(&self, id: u64, trip: &TripRequest) -> Result<Trip> {
        self.execute(ApiRequest::put(endpoints::trip(id)).json(trip)?)
            .await
    }

    /// Update only the fields set in `patch`.
    pub async fn patch_trip(&self, id: u64, patch: &TripPatch) -> Result<Trip> {
        self.execute(ApiRequest::patch(endpoints::trip(id)).json(patch)?)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_trip(&self, id: u64) -> Result<()> {
        self.execute(ApiRequest::delete(endpoints::trip(id))).await
    }

    /// Kilometre and trip totals for one month.
    #[instrument(skip(self))]
    pub async fn monthly_summary(&self, year: i32, month: u32) -> Result<MonthlySummary> {
        let params = MonthParams {
            year,
            month: check_month(month)?,
        };
        self.execute(ApiRequest::get(MONTHLY_SUMMARY).query(&params)?)
            .await
    }

    /// Ask the backend to estimate the driving distance between two addresses.
    pub async fn calculate_distance(
        &self,
        start_address: &str,
        end_address: &str,
    ) -> Result<DistanceEstimate> {
        let request = ApiRequest::post(CALCULATE_DISTANCE).json(&DistanceRequest {
            start_address,
            end_address,
        })?;
        self.execute(request).await
    }
}
