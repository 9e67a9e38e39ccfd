//! Atomic replacement of a single file inside a directory.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use cap_std::fs::{Dir, OpenOptions};

use crate::domain::ports::StorageError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Who may read a written file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FileAccess {
    /// Default permissions of the process umask.
    Shared,
    /// Readable and writable by the owner only (`0o600` on Unix).
    OwnerOnly,
}

/// Write `contents` to `file_name` through a hidden temp file and rename, so
/// readers never observe a partial file.
///
/// Permissions are fixed when the temp file is created and carried over by
/// the rename.
pub(super) fn write_atomic(
    dir: &Dir,
    file_name: &str,
    contents: &[u8],
    access: FileAccess,
) -> Result<(), StorageError> {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp_name = format!(".{file_name}.tmp.{}.{counter}", std::process::id());

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    if access == FileAccess::OwnerOnly {
        use cap_std::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    #[cfg(not(unix))]
    let _ = access;
    let written = dir.open_with(&tmp_name, &options).and_then(|mut file| {
        file.write_all(contents)?;
        file.sync_all()
    });
    if let Err(error) = written {
        drop(dir.remove_file(&tmp_name));
        return Err(StorageError::io(format!("{tmp_name}: {error}")));
    }

    dir.rename(&tmp_name, dir, file_name).map_err(|error| {
        drop(dir.remove_file(&tmp_name));
        StorageError::io(format!("{file_name}: {error}"))
    })
}
