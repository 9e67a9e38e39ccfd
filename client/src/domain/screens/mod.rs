//! Screen controllers.
//!
//! Each screen owns the ports it needs plus the shared [`CredentialStore`],
//! runs the role guard before any request, and reports outcomes through a
//! [`NoticeSlot`] or an inline message. Screens never panic on remote
//! failures; every action leaves the screen usable.

mod login;
mod make_payment;
mod panel;
mod payments;
mod profile;
mod register;
mod reports;
mod users;

use std::sync::Arc;

use pagination::{PageSize, PageSizeError};
use tracing::debug;

use super::ports::ApiError;
use super::{
    CredentialStore, ErrorCode, GuardOutcome, Notice, Role, Route, guard_route, messages,
};

pub use login::LoginScreen;
pub use make_payment::MakePaymentScreen;
pub use panel::PanelScreen;
pub use payments::PaymentsScreen;
pub use profile::{ProfilePorts, ProfileScreen};
pub use register::RegisterScreen;
pub use reports::{ReportChoice, ReportsScreen};
pub use users::UsersScreen;

/// Page sizes offered by cursor-paged screens.
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [5, 10, 20, 50, 100];

/// Validate a page size against [`PAGE_SIZE_OPTIONS`].
pub fn page_size_option(value: usize) -> Result<PageSize, PageSizeError> {
    if PAGE_SIZE_OPTIONS.contains(&value) {
        PageSize::new(value)
    } else {
        Err(PageSizeError)
    }
}

/// What the shell should do after a screen action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Remain on the current screen.
    Stay,
    /// Leave for `to`; `return_to` is the location to resume after login.
    Navigate {
        to: Route,
        return_to: Option<Route>,
    },
}

impl Transition {
    /// Navigate without a preserved location.
    pub const fn to(route: Route) -> Self {
        Self::Navigate {
            to: route,
            return_to: None,
        }
    }
}

impl From<GuardOutcome> for Transition {
    fn from(value: GuardOutcome) -> Self {
        match value {
            GuardOutcome::Allow => Self::Stay,
            GuardOutcome::Redirect { to, return_to } => Self::Navigate { to, return_to },
        }
    }
}

/// Role check bound to one route.
#[derive(Debug, Clone)]
pub(crate) struct Gate {
    store: Arc<CredentialStore>,
    route: Route,
}

impl Gate {
    pub(crate) fn new(store: Arc<CredentialStore>, route: Route) -> Self {
        Self { store, route }
    }

    /// Current role when admitted, otherwise the redirect to follow.
    pub(crate) fn check(&self) -> Result<Role, Transition> {
        let role = self.store.role();
        match guard_route(role, self.route) {
            GuardOutcome::Allow => Ok(role),
            redirect => {
                debug!(route = %self.route, %role, "guard redirected");
                Err(redirect.into())
            }
        }
    }

    pub(crate) fn store(&self) -> &CredentialStore {
        &self.store
    }
}

/// Pick the notice for a failed call, using `fallback` for ordinary failures.
pub(crate) fn failure_notice(error: &ApiError, fallback: &str) -> Notice {
    match error.code() {
        ErrorCode::Unauthorized => Notice::error(messages::SESSION_EXPIRED),
        ErrorCode::Forbidden => Notice::error(messages::ACCESS_DENIED),
        _ => Notice::error(fallback),
    }
}
