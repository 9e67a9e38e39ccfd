//! Credential persistence in the state directory.

use std::io::ErrorKind;
use std::path::Path;

use cap_std::fs::Dir;
use tracing::debug;

use super::atomic_io::{FileAccess, write_atomic};
use super::open_dir;
use crate::domain::ports::{CredentialStorage, StorageError};

/// Name of the file holding the raw bearer token.
pub const TOKEN_FILE_NAME: &str = "token";

/// Stores the bearer token as a single file inside the state directory.
#[derive(Debug)]
pub struct FileCredentialStorage {
    dir: Dir,
}

impl FileCredentialStorage {
    /// Open (creating when missing) the state directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the directory cannot be
    /// created or opened.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            dir: open_dir(path)?,
        })
    }
}

impl CredentialStorage for FileCredentialStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match self.dir.read_to_string(TOKEN_FILE_NAME) {
            Ok(raw) => {
                let raw = raw.trim();
                Ok((!raw.is_empty()).then(|| raw.to_owned()))
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StorageError::io(format!("{TOKEN_FILE_NAME}: {error}"))),
        }
    }

    fn save(&self, raw: &str) -> Result<(), StorageError> {
        write_atomic(&self.dir, TOKEN_FILE_NAME, raw.as_bytes(), FileAccess::OwnerOnly)?;
        debug!("credential persisted");
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        match self.dir.remove_file(TOKEN_FILE_NAME) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(StorageError::io(format!("{TOKEN_FILE_NAME}: {error}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the token file lifecycle.
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn state_dir() -> TempDir {
        tempfile::tempdir().expect("tempdir")
    }

    #[rstest]
    fn missing_file_means_no_session(state_dir: TempDir) {
        let storage = FileCredentialStorage::open(state_dir.path()).expect("open");
        assert_eq!(storage.load(), Ok(None));
        assert_eq!(storage.remove(), Ok(()));
    }

    #[rstest]
    fn token_survives_reopening(state_dir: TempDir) {
        let path = state_dir.path().join("nested").join("state");
        FileCredentialStorage::open(&path)
            .expect("open")
            .save("h.p.s")
            .expect("save");

        let reopened = FileCredentialStorage::open(&path).expect("reopen");
        assert_eq!(reopened.load(), Ok(Some("h.p.s".to_owned())));

        reopened.remove().expect("remove");
        assert_eq!(reopened.load(), Ok(None));
    }

    #[cfg(unix)]
    #[rstest]
    fn token_file_is_private_to_the_owner(state_dir: TempDir) {
        use std::os::unix::fs::PermissionsExt;

        let storage = FileCredentialStorage::open(state_dir.path()).expect("open");
        storage.save("h.p.s").expect("save");

        let mode = std::fs::metadata(state_dir.path().join(TOKEN_FILE_NAME))
            .expect("metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[rstest]
    fn blank_file_is_ignored(state_dir: TempDir) {
        let storage = FileCredentialStorage::open(state_dir.path()).expect("open");
        storage.save("\n").expect("save");
        assert_eq!(storage.load(), Ok(None));
    }
}
