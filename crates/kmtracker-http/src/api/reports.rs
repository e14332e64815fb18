//! Monthly report endpoints.

use tracing::{info, instrument};

use kmtracker_core::Result;
use kmtracker_core::error::InvalidInputError;
use kmtracker_core::model::{GenerateReportResponse, Paginated, Report, ReportQuery, check_month};

use crate::client::ApiClient;
use crate::endpoints::{self, GENERATE_REPORT, MonthParams, REPORTS};
use crate::request::ApiRequest;

impl ApiClient {
    #[instrument(skip(self))]
    pub async fn list_reports(&self, query: &ReportQuery) -> Result<Paginated<Report>> {
        if let Some(month) = query.month {
            check_month(month)?;
        }
        self.execute(ApiRequest::get(REPORTS).query(query)?).await
    }

    pub async fn get_report(&self, id: u64) -> Result<Report> {
        self.execute(ApiRequest::get(endpoints::report(id))).await
    }

    /// Generate the report for a month. The PDF is rendered server-side.
    #[instrument(skip(self))]
    pub async fn generate_report(&self, year: i32, month: u32) -> Result<GenerateReportResponse> {
        let params = MonthParams {
            year,
            month: check_month(month)?,
        };

        let response: GenerateReportResponse = self
            .execute(ApiRequest::post(GENERATE_REPORT).json(&params)?)
            .await?;

        info!(report_id = response.report.id, "Report generated");
        Ok(response)
    }

    /// Download the PDF rendered for `report`.
    ///
    /// The file is fetched through the same authenticated pipeline as any
    /// API call, so an expired token is refreshed first.
    #[instrument(skip(self, report), fields(report_id = report.id))]
    pub async fn download_report_pdf(&self, report: &Report) -> Result<Vec<u8>> {
        let link = report
            .pdf_file
            .as_deref()
            .ok_or_else(|| InvalidInputError::Other {
                message: format!("report {} has no PDF", report.id),
            })?;
        let url = self.base_url().resolve(link)?;

        let pdf = self.execute_raw(ApiRequest::get(url)).await?;
        info!(bytes = pdf.len(), "Report PDF downloaded");
        Ok(pdf)
    }
}
