//! Single owner of the session credential.
//!
//! The store is shared by `Arc` between screens and the HTTP adapter. It is
//! the only writer; readers either query the current role or subscribe to
//! changes through a watch channel.

use std::sync::Arc;

use mockable::Clock;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use super::ports::{CredentialStorage, StorageError};
use super::{Claims, Credential, InvalidCredential, Role, Route};

/// Errors raised while changing the credential.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialStoreError {
    /// The token could not be decoded; the store is now unauthenticated.
    #[error(transparent)]
    InvalidCredential(#[from] InvalidCredential),
    /// Durable storage failed; in-memory state was not changed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Holds the current credential and mirrors it to durable storage.
///
/// ## Invariants
/// - The persisted token and the in-memory credential change together.
/// - An undecodable token never remains in memory or on disk.
pub struct CredentialStore {
    storage: Arc<dyn CredentialStorage>,
    clock: Arc<dyn Clock>,
    current: watch::Sender<Option<Credential>>,
}

impl CredentialStore {
    /// Create an empty store; call [`CredentialStore::restore`] to load a
    /// persisted session.
    pub fn new(storage: Arc<dyn CredentialStorage>, clock: Arc<dyn Clock>) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            storage,
            clock,
            current,
        }
    }

    /// Load the persisted token, if any, and apply it.
    ///
    /// A stored token that no longer decodes is removed and the store stays
    /// unauthenticated; that case is logged, not returned.
    pub fn restore(&self) -> Result<Role, StorageError> {
        let Some(raw) = self.storage.load()? else {
            debug!("no persisted credential");
            return Ok(Role::Anonymous);
        };
        match self.set_credential(Some(&raw)) {
            Ok(role) => Ok(role),
            Err(CredentialStoreError::InvalidCredential(error)) => {
                warn!(%error, "discarded undecodable persisted credential");
                Ok(Role::Anonymous)
            }
            Err(CredentialStoreError::Storage(error)) => Err(error),
        }
    }

    /// Replace the credential.
    ///
    /// `None` signs out. A token that fails to decode is treated as `None`
    /// and reported as [`CredentialStoreError::InvalidCredential`]. Signing
    /// out always clears the in-memory credential, even when the persisted
    /// copy cannot be removed.
    pub fn set_credential(&self, raw: Option<&str>) -> Result<Role, CredentialStoreError> {
        let Some(raw) = raw else {
            self.publish(None);
            self.storage.remove()?;
            info!("credential cleared");
            return Ok(Role::Anonymous);
        };

        match Credential::decode(raw) {
            Ok(credential) => {
                self.storage.save(credential.raw())?;
                let claims = credential.claims().clone();
                self.publish(Some(credential));
                info!(
                    user_id = %claims.subject(),
                    role = %claims.role(),
                    "credential set"
                );
                Ok(self.role())
            }
            Err(error) => {
                if let Err(storage_error) = self.storage.remove() {
                    warn!(error = %storage_error, "failed to remove rejected credential");
                }
                self.publish(None);
                warn!(%error, "rejected undecodable credential");
                Err(error.into())
            }
        }
    }

    /// Sign out and return the route to navigate to.
    pub fn clear(&self) -> Result<Route, CredentialStoreError> {
        self.set_credential(None)?;
        Ok(Route::PUBLIC_LANDING)
    }

    /// Role of the current credential; [`Role::Anonymous`] when absent or
    /// expired.
    pub fn role(&self) -> Role {
        let now = self.clock.utc();
        self.current
            .borrow()
            .as_ref()
            .map(Credential::claims)
            .filter(|claims| !claims.is_expired_at(now))
            .map_or(Role::Anonymous, Claims::role)
    }

    /// Claims of the current credential, including expired ones.
    pub fn claims(&self) -> Option<Claims> {
        self.current
            .borrow()
            .as_ref()
            .map(|credential| credential.claims().clone())
    }

    /// Raw token for the `Authorization` header.
    pub fn bearer(&self) -> Option<Zeroizing<String>> {
        self.current
            .borrow()
            .as_ref()
            .map(|credential| Zeroizing::new(credential.raw().to_owned()))
    }

    /// Receive every credential change.
    pub fn subscribe(&self) -> watch::Receiver<Option<Credential>> {
        self.current.subscribe()
    }

    fn publish(&self, credential: Option<Credential>) {
        self.current.send_replace(credential);
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("role", &self.role())
            .finish_non_exhaustive()
    }
}
