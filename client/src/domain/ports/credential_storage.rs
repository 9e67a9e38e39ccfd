//! Driven port for durable credential persistence.
//!
//! Writes are synchronous so the credential store can guarantee the token on
//! disk matches its in-memory state before `set_credential` returns.

use std::sync::Mutex;

use super::StorageError;

/// Durable slot holding the raw bearer token.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStorage: Send + Sync {
    /// Persisted token, if any.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replace the persisted token.
    fn save(&self, raw: &str) -> Result<(), StorageError>;

    /// Forget the persisted token; succeeds when nothing is stored.
    fn remove(&self) -> Result<(), StorageError>;
}

/// Process-local storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStorage {
    slot: Mutex<Option<String>>,
}

impl InMemoryCredentialStorage {
    /// Storage pre-populated with `raw`.
    pub fn with_token(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    fn with_slot<R>(&self, f: impl FnOnce(&mut Option<String>) -> R) -> Result<R, StorageError> {
        let mut guard = self
            .slot
            .lock()
            .map_err(|_| StorageError::io("credential slot lock poisoned"))?;
        Ok(f(&mut guard))
    }
}

impl CredentialStorage for InMemoryCredentialStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        self.with_slot(|slot| slot.clone())
    }

    fn save(&self, raw: &str) -> Result<(), StorageError> {
        self.with_slot(|slot| *slot = Some(raw.to_owned()))
    }

    fn remove(&self) -> Result<(), StorageError> {
        self.with_slot(|slot| *slot = None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_storage_round_trips() {
        let storage = InMemoryCredentialStorage::default();
        assert_eq!(storage.load(), Ok(None));
        storage.save("a.b.c").expect("save");
        assert_eq!(storage.load(), Ok(Some("a.b.c".to_owned())));
        storage.remove().expect("remove");
        storage.remove().expect("second remove is a no-op");
        assert_eq!(storage.load(), Ok(None));
    }
}
