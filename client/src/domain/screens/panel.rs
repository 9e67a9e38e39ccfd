//! Role landing panels.

use std::sync::Arc;

use tracing::warn;

use crate::domain::{CredentialStore, Notice, Route, messages, panel_routes};

use super::{Gate, Transition};

/// Landing panel of the admin, supervisor or user role.
pub struct PanelScreen {
    gate: Gate,
}

impl PanelScreen {
    /// `route` must be one of the landing routes.
    pub fn new(store: Arc<CredentialStore>, route: Route) -> Self {
        Self {
            gate: Gate::new(store, route),
        }
    }

    /// Guard the panel.
    pub fn open(&self) -> Transition {
        match self.gate.check() {
            Ok(_) => Transition::Stay,
            Err(redirect) => redirect,
        }
    }

    /// Routes the current role may open from this panel.
    pub fn links(&self) -> Vec<Route> {
        self.gate.check().map(panel_routes).unwrap_or_default()
    }

    /// Sign out. When the stored token cannot be removed the session is kept
    /// and an error notice is returned.
    pub fn logout(&self) -> Result<Transition, Notice> {
        match self.gate.store().clear() {
            Ok(route) => Ok(Transition::to(route)),
            Err(error) => {
                warn!(%error, "logout could not clear stored credential");
                Err(Notice::error(messages::SESSION_STORAGE_FAILED))
            }
        }
    }
}
