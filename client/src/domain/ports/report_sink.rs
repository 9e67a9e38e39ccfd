//! Driven port for saving downloaded reports.

use std::path::PathBuf;

use crate::domain::ReportFile;

use super::StorageError;

/// Destination for report files.
#[cfg_attr(test, mockall::automock)]
pub trait ReportSink: Send + Sync {
    /// Store `file` and return where it was written.
    fn save(&self, file: &ReportFile) -> Result<PathBuf, StorageError>;
}
