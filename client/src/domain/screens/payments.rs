//! Operator payments list.

use std::sync::Arc;

use mockable::Clock;
use pagination::{CursorPager, PageRequest, PageSize, Resolution};
use tracing::{debug, info, warn};

use crate::domain::ports::PaymentsApi;
use crate::domain::{
    CredentialStore, DateError, DateRange, NewPayment, Notice, NoticeSlot, Payment,
    PaymentFilters, PaymentUpdate, Role, Route, date, messages,
};

use super::{Gate, Transition, failure_notice};

/// Cursor-paged payments with date, account and payer filters.
///
/// Edits and new payments are limited to admins; supervisors are refused
/// without a request.
pub struct PaymentsScreen {
    gate: Gate,
    api: Arc<dyn PaymentsApi>,
    clock: Arc<dyn Clock>,
    pager: CursorPager<Payment, PaymentFilters>,
    notice: NoticeSlot,
}

impl PaymentsScreen {
    pub fn new(
        store: Arc<CredentialStore>,
        api: Arc<dyn PaymentsApi>,
        clock: Arc<dyn Clock>,
        page_size: PageSize,
    ) -> Self {
        Self {
            gate: Gate::new(store, Route::Payments),
            api,
            clock,
            pager: CursorPager::new(PaymentFilters::default(), page_size),
            notice: NoticeSlot::default(),
        }
    }

    /// Guard the screen and load the first page.
    pub async fn open(&mut self) -> Transition {
        if let Err(redirect) = self.gate.check() {
            return redirect;
        }
        let request = self.pager.load_initial();
        self.fetch(request).await;
        Transition::Stay
    }

    /// Load the following page; a no-op when exhausted.
    pub async fn next_page(&mut self) -> Transition {
        if let Err(redirect) = self.gate.check() {
            return redirect;
        }
        if let Some(request) = self.pager.load_next() {
            self.fetch(request).await;
        }
        Transition::Stay
    }

    /// Load the preceding page; a no-op on the first page.
    pub async fn previous_page(&mut self) -> Transition {
        if let Err(redirect) = self.gate.check() {
            return redirect;
        }
        if let Some(request) = self.pager.load_previous() {
            self.fetch(request).await;
        }
        Transition::Stay
    }

    /// Replace filters from form inputs and restart from the first page.
    ///
    /// Invalid dates block the request and leave the current filters.
    pub async fn apply_filters(
        &mut self,
        start: &str,
        end: &str,
        ls_abon: &str,
        name: &str,
    ) -> Transition {
        if let Err(redirect) = self.gate.check() {
            return redirect;
        }
        let range = match DateRange::from_ui(start, end, date::today(self.clock.as_ref())) {
            Ok(range) => range,
            Err(error) => {
                self.notice.show(date_notice(&error));
                return Transition::Stay;
            }
        };
        let request = self
            .pager
            .set_filters(PaymentFilters::new(range, ls_abon, name));
        self.fetch(request).await;
        Transition::Stay
    }

    /// Change the page size and restart from the first page.
    pub async fn set_page_size(&mut self, page_size: PageSize) -> Transition {
        if let Err(redirect) = self.gate.check() {
            return redirect;
        }
        let request = self.pager.set_page_size(page_size);
        self.fetch(request).await;
        Transition::Stay
    }

    /// Save status, annulment and comment of a payment.
    pub async fn update_payment(&mut self, id: i64, update: &PaymentUpdate) -> Transition {
        if let Err(transition) = self.admin_only() {
            return transition;
        }
        match self.api.update_payment(id, update).await {
            Ok(()) => {
                info!(payment_id = id, "payment updated");
                self.reload_after(Notice::success(messages::PAYMENT_UPDATED))
                    .await;
            }
            Err(error) => {
                warn!(payment_id = id, %error, "payment update failed");
                self.notice
                    .show(failure_notice(&error, messages::PAYMENT_SAVE_FAILED));
            }
        }
        Transition::Stay
    }

    /// Create a payment from form inputs.
    pub async fn create_payment(&mut self, ls_abon: &str, money: &str) -> Transition {
        if let Err(transition) = self.admin_only() {
            return transition;
        }
        let payment = match NewPayment::try_from_parts(ls_abon, money) {
            Ok(payment) => payment,
            Err(_) => {
                self.notice.show(Notice::error(messages::INVALID_PAYMENT));
                return Transition::Stay;
            }
        };
        match self.api.create_payment(&payment).await {
            Ok(()) => {
                info!(ls_abon = payment.ls_abon(), "payment created");
                self.reload_after(Notice::success(messages::PAYMENT_CREATED))
                    .await;
            }
            Err(error) => {
                warn!(ls_abon = payment.ls_abon(), %error, "payment creation failed");
                self.notice
                    .show(failure_notice(&error, messages::PAYMENT_SAVE_FAILED));
            }
        }
        Transition::Stay
    }

    pub fn pager(&self) -> &CursorPager<Payment, PaymentFilters> {
        &self.pager
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.current()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice.dismiss();
    }

    fn admin_only(&mut self) -> Result<(), Transition> {
        match self.gate.check()? {
            Role::Admin => Ok(()),
            role => {
                debug!(%role, "payment mutation refused");
                self.notice.show(Notice::error(messages::ACCESS_DENIED));
                Err(Transition::Stay)
            }
        }
    }

    async fn reload_after(&mut self, notice: Notice) {
        self.notice.show(notice);
        let request = self.pager.load_initial();
        self.fetch(request).await;
    }

    async fn fetch(&mut self, request: PageRequest<PaymentFilters>) {
        let outcome = self.api.list_payments(&request).await;
        match self.pager.resolve(&request, outcome) {
            Resolution::Applied => debug!(
                page = self.pager.page_number(),
                total = self.pager.total(),
                "payments page applied"
            ),
            Resolution::Stale => debug!(generation = request.generation.get(), "stale payments page"),
            Resolution::Failed(error) => {
                warn!(%error, "payments page failed");
                self.notice
                    .show(failure_notice(&error, messages::PAYMENTS_LOAD_FAILED));
            }
        }
    }
}

/// Notice for a rejected date input.
pub(crate) fn date_notice(error: &DateError) -> Notice {
    match error {
        DateError::EndInFuture { .. } => Notice::error(messages::FUTURE_END_DATE),
        DateError::Reversed { .. } => Notice::error(messages::DATE_RANGE_REVERSED),
        DateError::Invalid { .. } => Notice::error(messages::INVALID_DATE),
    }
}
