//! Driven port for spreadsheet exports.

use async_trait::async_trait;

use crate::domain::ReportRequest;

use super::ApiError;

/// Spreadsheet download.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportsApi: Send + Sync {
    /// Download the report body.
    async fn download(&self, request: &ReportRequest) -> Result<Vec<u8>, ApiError>;
}
