//! Driven port for payment endpoints.
//!
//! List calls take the [`PageRequest`] issued by a cursor pager so the cursor,
//! page size and filters always travel together.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{NewPayment, Payment, PaymentFilters, PaymentUpdate, ProfileFilters};

use super::ApiError;

/// Payment listing and mutation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentsApi: Send + Sync {
    /// One page of `GET /payments`.
    async fn list_payments(
        &self,
        request: &PageRequest<PaymentFilters>,
    ) -> Result<Page<Payment>, ApiError>;

    /// One page of `GET /payments_by_user`.
    async fn payments_by_user(
        &self,
        request: &PageRequest<ProfileFilters>,
    ) -> Result<Page<Payment>, ApiError>;

    /// Change status, annulment flag or comment.
    async fn update_payment(&self, id: i64, update: &PaymentUpdate) -> Result<(), ApiError>;

    /// Pay `money` into subscriber account `ls_abon`.
    async fn create_payment(&self, payment: &NewPayment) -> Result<(), ApiError>;
}
