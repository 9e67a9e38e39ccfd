//! Admin registration form.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::UsersApi;
use crate::domain::{
    CredentialStore, Notice, NoticeSlot, Registration, RegistrationError, RegistrationForm,
    Route, messages,
};

use super::{Gate, Transition, failure_notice};

/// Creates accounts with zero balances.
pub struct RegisterScreen {
    gate: Gate,
    api: Arc<dyn UsersApi>,
    notice: NoticeSlot,
}

impl RegisterScreen {
    pub fn new(store: Arc<CredentialStore>, api: Arc<dyn UsersApi>) -> Self {
        Self {
            gate: Gate::new(store, Route::Register),
            api,
            notice: NoticeSlot::default(),
        }
    }

    pub fn open(&self) -> Transition {
        match self.gate.check() {
            Ok(_) => Transition::Stay,
            Err(redirect) => redirect,
        }
    }

    /// Validate and submit the form; success returns to the admin panel.
    pub async fn submit(&mut self, form: RegistrationForm) -> Transition {
        if let Err(redirect) = self.gate.check() {
            return redirect;
        }
        let registration = match Registration::try_from(form) {
            Ok(registration) => registration,
            Err(RegistrationError::PasswordMismatch) => {
                self.notice.show(Notice::error(messages::PASSWORDS_DIFFER));
                return Transition::Stay;
            }
            Err(_) => {
                self.notice.show(Notice::error(messages::REQUIRED_FIELDS));
                return Transition::Stay;
            }
        };
        match self.api.create_user(&registration).await {
            Ok(()) => {
                info!(login = registration.login(), "user registered");
                self.notice.show(Notice::success(messages::USER_CREATED));
                Transition::to(Route::Admin)
            }
            Err(error) => {
                warn!(login = registration.login(), %error, "registration failed");
                self.notice
                    .show(failure_notice(&error, messages::USER_CREATE_FAILED));
                Transition::Stay
            }
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.current()
    }
}
