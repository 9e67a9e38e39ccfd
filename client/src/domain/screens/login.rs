//! Login form.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::AuthApi;
use crate::domain::{
    CredentialStore, CredentialStoreError, ErrorCode, InvalidCredential, LoginCredentials, Role,
    Route, messages, post_login_route,
};

use super::Transition;

/// Public screen exchanging a login and password for a session.
pub struct LoginScreen {
    auth: Arc<dyn AuthApi>,
    store: Arc<CredentialStore>,
    return_to: Option<Route>,
    error: Option<&'static str>,
}

impl LoginScreen {
    /// `return_to` is the location preserved by the guard, if any.
    pub fn new(auth: Arc<dyn AuthApi>, store: Arc<CredentialStore>, return_to: Option<Route>) -> Self {
        Self {
            auth,
            store,
            return_to,
            error: None,
        }
    }

    /// Inline error under the form.
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Validate, authenticate and store the credential.
    ///
    /// Returns the route to open next; on failure the screen stays with an
    /// inline message and the store is unauthenticated.
    pub async fn submit(&mut self, login: &str, password: &str) -> Transition {
        self.error = None;
        let credentials = match LoginCredentials::try_from_parts(login, password) {
            Ok(credentials) => credentials,
            Err(_) => return self.fail(messages::REQUIRED_CREDENTIALS),
        };

        let grant = match self.auth.issue_token(&credentials).await {
            Ok(grant) => grant,
            Err(error) => {
                warn!(login = credentials.login(), %error, "login failed");
                self.clear_quietly();
                let message = if error.code() == ErrorCode::Unavailable {
                    messages::SERVICE_UNAVAILABLE
                } else {
                    messages::INVALID_LOGIN
                };
                return self.fail(message);
            }
        };

        match self.store.set_credential(Some(grant.access_token())) {
            Ok(Role::Anonymous) => {
                warn!(login = credentials.login(), "issued credential is already expired");
                self.clear_quietly();
                self.fail(messages::INVALID_LOGIN)
            }
            Ok(role) => {
                info!(login = credentials.login(), %role, "signed in");
                Transition::to(post_login_route(role, self.return_to.take()))
            }
            Err(CredentialStoreError::InvalidCredential(InvalidCredential::UnknownRole {
                ..
            })) => self.fail(messages::UNKNOWN_ROLE),
            Err(CredentialStoreError::InvalidCredential(_)) => self.fail(messages::INVALID_LOGIN),
            Err(CredentialStoreError::Storage(error)) => {
                warn!(%error, "could not persist credential");
                self.clear_quietly();
                self.fail(messages::SESSION_STORAGE_FAILED)
            }
        }
    }

    fn clear_quietly(&self) {
        if let Err(error) = self.store.set_credential(None) {
            warn!(%error, "could not clear credential");
        }
    }

    fn fail(&mut self, message: &'static str) -> Transition {
        self.error = Some(message);
        Transition::Stay
    }
}
