//! Domain primitives, ports and screen controllers.
//!
//! Purpose: model the LocalPay client independently of HTTP and storage.
//! Types validate on construction and document their serialisation
//! contracts; screens talk to the outside world only through [`ports`].
//!
//! Public surface:
//! - Session: [`CredentialStore`], [`Credential`], [`Claims`], [`Role`].
//! - Navigation: [`Route`], [`guard`], [`landing_for`], [`post_login_route`].
//! - Records: [`UserRecord`], [`Payment`] and their request payloads.
//! - Screens: one controller per route under [`screens`].

mod auth;
pub(crate) mod credential;
mod credential_store;
pub mod date;
pub mod error;
mod filters;
pub mod messages;
mod navigation;
mod notice;
mod payment;
pub mod ports;
mod reports;
pub mod screens;
mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::credential::{Claims, Credential, InvalidCredential, Role};
pub use self::credential_store::{CredentialStore, CredentialStoreError};
pub use self::date::{DateError, DateRange};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::filters::{BalanceRange, BalanceRangeError, PaymentFilters, ProfileFilters};
pub use self::navigation::{
    GuardOutcome, Route, UnknownRoute, guard, guard_route, landing_for, panel_routes,
    post_login_route,
};
pub use self::notice::{Notice, NoticeKind, NoticeSlot};
pub use self::payment::{
    NewPayment, NewPaymentError, PayerName, Payment, PaymentStatus, PaymentUpdate,
};
pub use self::reports::{
    REPORTS_FILE_NAME, ReportFile, ReportFlavour, ReportRequest, profile_report_file_name,
};
pub use self::user::{
    AccountRole, BalanceAdjustment, Region, Registration, RegistrationError, RegistrationForm,
    UnknownRegion, UserId, UserRecord, UserUpdate, ZeroAdjustment,
};
