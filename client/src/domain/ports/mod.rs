//! Domain ports for the hexagonal boundary.
//!
//! API ports are async and implemented by the HTTP adapter; storage ports are
//! synchronous and implemented by the file adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod api_error;
mod auth_api;
mod credential_storage;
mod payments_api;
mod report_sink;
mod reports_api;
mod storage_error;
mod users_api;

pub use api_error::ApiError;
#[cfg(test)]
pub use auth_api::MockAuthApi;
pub use auth_api::{AuthApi, FixtureAuthApi, TokenGrant};
#[cfg(test)]
pub use credential_storage::MockCredentialStorage;
pub use credential_storage::{CredentialStorage, InMemoryCredentialStorage};
#[cfg(test)]
pub use payments_api::MockPaymentsApi;
pub use payments_api::PaymentsApi;
#[cfg(test)]
pub use report_sink::MockReportSink;
pub use report_sink::ReportSink;
#[cfg(test)]
pub use reports_api::MockReportsApi;
pub use reports_api::ReportsApi;
pub use storage_error::StorageError;
#[cfg(test)]
pub use users_api::MockUsersApi;
pub use users_api::{FETCH_ALL_PAGE_SIZE, UserList, UsersApi};
