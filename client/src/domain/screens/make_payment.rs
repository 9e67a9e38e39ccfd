//! End-user payment form.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::{ApiError, PaymentsApi};
use crate::domain::{CredentialStore, NewPayment, Notice, NoticeSlot, Route, messages};

use super::{Gate, Transition, failure_notice};

/// Server detail sent when the balance does not cover the amount.
const NOT_ENOUGH_MONEY_DETAIL: &str = "Not enough money";

/// Pays into a subscriber account from the user's balance.
pub struct MakePaymentScreen {
    gate: Gate,
    api: Arc<dyn PaymentsApi>,
    notice: NoticeSlot,
}

impl MakePaymentScreen {
    pub fn new(store: Arc<CredentialStore>, api: Arc<dyn PaymentsApi>) -> Self {
        Self {
            gate: Gate::new(store, Route::MakePayment),
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

    /// Validate and submit the payment.
    pub async fn submit(&mut self, ls_abon: &str, money: &str) -> Transition {
        if let Err(redirect) = self.gate.check() {
            return redirect;
        }
        let payment = match NewPayment::try_from_parts(ls_abon, money) {
            Ok(payment) => payment,
            Err(error) => {
                warn!(%error, "payment form rejected");
                self.notice.show(Notice::error(messages::INVALID_PAYMENT));
                return Transition::Stay;
            }
        };
        match self.api.create_payment(&payment).await {
            Ok(()) => {
                info!(ls_abon = payment.ls_abon(), money = payment.money(), "payment made");
                self.notice.show(Notice::success(messages::PAYMENT_DONE));
            }
            Err(error) => {
                warn!(ls_abon = payment.ls_abon(), %error, "payment failed");
                self.notice.show(payment_failure(&error));
            }
        }
        Transition::Stay
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.current()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice.dismiss();
    }
}

fn payment_failure(error: &ApiError) -> Notice {
    match error.rejection_detail() {
        Some(detail) if detail.contains(NOT_ENOUGH_MONEY_DETAIL) => {
            Notice::error(messages::NOT_ENOUGH_MONEY)
        }
        _ => failure_notice(error, messages::PAYMENT_FAILED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockPaymentsApi;
    use crate::domain::screens::test_support::store_as;
    use rstest::rstest;

    fn screen(api: MockPaymentsApi) -> MakePaymentScreen {
        MakePaymentScreen::new(store_as(Some("user"), 8), Arc::new(api))
    }

    #[rstest]
    #[case("", "100")]
    #[case("100200", "0")]
    #[case("100200", "abc")]
    #[tokio::test]
    async fn invalid_form_is_refused_locally(#[case] account: &str, #[case] money: &str) {
        let mut api = MockPaymentsApi::new();
        api.expect_create_payment().never();
        let mut screen = screen(api);

        screen.submit(account, money).await;

        assert_eq!(screen.notice().map(Notice::text), Some(messages::INVALID_PAYMENT));
    }

    #[rstest]
    #[case(ApiError::rejected(400_u16, "Not enough money"), messages::NOT_ENOUGH_MONEY)]
    #[case(ApiError::server(500_u16, "boom"), messages::PAYMENT_FAILED)]
    #[case(ApiError::unauthorized("expired"), messages::SESSION_EXPIRED)]
    #[tokio::test]
    async fn failures_pick_a_message(#[case] error: ApiError, #[case] text: &str) {
        let mut api = MockPaymentsApi::new();
        api.expect_create_payment()
            .return_once(move |_| Err(error));
        let mut screen = screen(api);

        screen.submit("100200", "150,50").await;

        assert_eq!(screen.notice().map(Notice::text), Some(text));
    }

    #[rstest]
    #[tokio::test]
    async fn accepted_payment_shows_success() {
        let mut api = MockPaymentsApi::new();
        api.expect_create_payment()
            .withf(|payment| payment.ls_abon() == "100200" && payment.money() == 150.5)
            .times(1)
            .returning(|_| Ok(()));
        let mut screen = screen(api);

        assert_eq!(screen.submit("100200", "150,50").await, Transition::Stay);
        assert_eq!(screen.notice().map(Notice::text), Some(messages::PAYMENT_DONE));
    }

    #[rstest]
    #[tokio::test]
    async fn operators_cannot_open_the_form() {
        let screen = MakePaymentScreen::new(
            store_as(Some("admin"), 1),
            Arc::new(MockPaymentsApi::new()),
        );
        assert_eq!(screen.open(), Transition::to(Route::Admin));
    }
}
