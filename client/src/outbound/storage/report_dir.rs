//! Downloaded reports written to the configured report directory.

use std::path::{Path, PathBuf};

use cap_std::fs::Dir;
use tracing::info;

use super::atomic_io::{FileAccess, write_atomic};
use super::open_dir;
use crate::domain::ReportFile;
use crate::domain::ports::{ReportSink, StorageError};

/// Saves report files by name into one directory, replacing older copies.
#[derive(Debug)]
pub struct FileReportSink {
    root: PathBuf,
    dir: Dir,
}

impl FileReportSink {
    /// Open (creating when missing) the report directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the directory cannot be
    /// created or opened.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            root: path.to_path_buf(),
            dir: open_dir(path)?,
        })
    }
}

impl ReportSink for FileReportSink {
    fn save(&self, file: &ReportFile) -> Result<PathBuf, StorageError> {
        let name = file_name(&file.file_name);
        write_atomic(&self.dir, &name, &file.bytes, FileAccess::Shared)?;
        let path = self.root.join(&name);
        info!(path = %path.display(), bytes = file.bytes.len(), "report written");
        Ok(path)
    }
}

/// Keep the name inside the directory; logins may contain separators.
fn file_name(raw: &str) -> String {
    let name: String = raw
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    match name.trim() {
        "" | "." | ".." => "report.xlsx".to_owned(),
        trimmed => trimmed.to_owned(),
    }
}
