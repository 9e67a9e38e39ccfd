//! Route table, role guard and landing routes.
//!
//! Every screen calls [`guard`] before issuing a request. Redirect targets
//! come from one landing table so role changes are handled in one place.

use std::fmt;
use std::str::FromStr;

use super::Role;

/// Client routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Login,
    Admin,
    Users,
    Reports,
    Payments,
    User,
    Profile,
    Register,
    MakePayment,
    Supervisor,
    Restricted,
}

const ADMIN: &[Role] = &[Role::Admin];
const OPERATORS: &[Role] = &[Role::Admin, Role::Supervisor];
const SUPERVISOR: &[Role] = &[Role::Supervisor];
const END_USER: &[Role] = &[Role::User];

impl Route {
    /// Every route, public ones first.
    pub const ALL: [Self; 12] = [
        Self::Root,
        Self::Login,
        Self::Restricted,
        Self::Admin,
        Self::Supervisor,
        Self::User,
        Self::Users,
        Self::Payments,
        Self::Reports,
        Self::Register,
        Self::Profile,
        Self::MakePayment,
    ];

    /// Where an actor goes after signing out.
    pub const PUBLIC_LANDING: Self = Self::Login;

    /// URL path of the route.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::Login => "/login",
            Self::Admin => "/admin",
            Self::Users => "/users",
            Self::Reports => "/reports",
            Self::Payments => "/payments",
            Self::User => "/user",
            Self::Profile => "/profile",
            Self::Register => "/register",
            Self::MakePayment => "/makepayment",
            Self::Supervisor => "/supervisor",
            Self::Restricted => "/restricted",
        }
    }

    /// Roles allowed to open the route; empty for public routes.
    pub const fn required_roles(self) -> &'static [Role] {
        match self {
            Self::Root | Self::Login | Self::Restricted => &[],
            Self::Admin | Self::Register => ADMIN,
            Self::Users | Self::Reports | Self::Payments => OPERATORS,
            Self::Supervisor => SUPERVISOR,
            Self::User | Self::Profile | Self::MakePayment => END_USER,
        }
    }

    /// Whether anyone may open the route.
    pub const fn is_public(self) -> bool {
        self.required_roles().is_empty()
    }

    /// Whether `role` may open the route.
    pub fn admits(self, role: Role) -> bool {
        self.is_public() || self.required_roles().contains(&role)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Error returned for a path outside the route table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route `{0}`")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        Self::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
            .ok_or_else(|| UnknownRoute(trimmed.to_owned()))
    }
}

/// Landing route of a role; unauthenticated actors land on the login page.
pub const fn landing_for(role: Role) -> Route {
    match role {
        Role::Admin => Route::Admin,
        Role::Supervisor => Route::Supervisor,
        Role::User => Route::User,
        Role::Anonymous => Route::Login,
    }
}

/// Result of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// The screen may proceed.
    Allow,
    /// Navigate elsewhere; `return_to` is kept for the post-login hop.
    Redirect {
        to: Route,
        return_to: Option<Route>,
    },
}

impl GuardOutcome {
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decide whether `role` may open `requested` given its required roles.
///
/// # Examples
/// ```
/// use localpay_client::domain::{GuardOutcome, Role, Route, guard};
///
/// assert_eq!(
///     guard(Role::User, Route::Admin, &[Role::Admin]),
///     GuardOutcome::Redirect { to: Route::User, return_to: None },
/// );
/// assert!(guard(Role::Admin, Route::Users, &[Role::Admin, Role::Supervisor]).is_allowed());
/// ```
pub fn guard(role: Role, requested: Route, required: &[Role]) -> GuardOutcome {
    if required.is_empty() {
        return GuardOutcome::Allow;
    }
    if role == Role::Anonymous {
        return GuardOutcome::Redirect {
            to: Route::Login,
            return_to: Some(requested),
        };
    }
    if required.contains(&role) {
        GuardOutcome::Allow
    } else {
        GuardOutcome::Redirect {
            to: landing_for(role),
            return_to: None,
        }
    }
}

/// Guard `route` using its entry in the route table.
pub fn guard_route(role: Role, route: Route) -> GuardOutcome {
    guard(role, route, route.required_roles())
}

/// Where to send an actor right after signing in.
///
/// The preserved location wins when the role may open it; otherwise the
/// role's landing route is used.
pub fn post_login_route(role: Role, return_to: Option<Route>) -> Route {
    match return_to {
        Some(route) if !route.is_public() && route.admits(role) => route,
        _ => landing_for(role),
    }
}

/// Routes a role's panel links to, excluding the panel itself.
pub fn panel_routes(role: Role) -> Vec<Route> {
    let landing = landing_for(role);
    Route::ALL
        .into_iter()
        .filter(|route| !route.is_public() && *route != landing && route.admits(role))
        .collect()
}
