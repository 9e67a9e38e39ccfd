//! File-backed storage adapters.
//!
//! Both adapters work inside a capability-scoped [`cap_std::fs::Dir`] opened
//! once at start-up and replace files atomically.

mod atomic_io;
mod credential_file;
mod report_dir;

pub use credential_file::{FileCredentialStorage, TOKEN_FILE_NAME};
pub use report_dir::FileReportSink;

use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};

use crate::domain::ports::StorageError;

/// Create `path` when missing and open it as a capability directory.
fn open_dir(path: &Path) -> Result<Dir, StorageError> {
    Dir::create_ambient_dir_all(path, ambient_authority())
        .and_then(|()| Dir::open_ambient_dir(path, ambient_authority()))
        .map_err(|error| StorageError::unavailable(format!("{}: {error}", path.display())))
}
