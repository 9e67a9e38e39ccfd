//! Users administration list.
//!
//! The whole collection within the balance bounds is fetched at once and
//! then searched and paged locally.

use std::sync::Arc;

use pagination::{OffsetPager, PageSize};
use tracing::{debug, info, warn};

use crate::domain::ports::{ApiError, FETCH_ALL_PAGE_SIZE, UsersApi};
use crate::domain::{
    BalanceAdjustment, BalanceRange, CredentialStore, Notice, NoticeSlot, Role, Route, UserId,
    UserRecord, UserUpdate, ZeroAdjustment, messages,
};

use super::{Gate, Transition, failure_notice};

/// Offset-paged users list with admin-only mutations.
pub struct UsersScreen {
    gate: Gate,
    api: Arc<dyn UsersApi>,
    balance: BalanceRange,
    search: String,
    pager: OffsetPager<UserRecord>,
    notice: NoticeSlot,
}

impl UsersScreen {
    pub fn new(store: Arc<CredentialStore>, api: Arc<dyn UsersApi>, page_size: PageSize) -> Self {
        Self {
            gate: Gate::new(store, Route::Users),
            api,
            balance: BalanceRange::default(),
            search: String::new(),
            pager: OffsetPager::new(page_size),
            notice: NoticeSlot::default(),
        }
    }

    /// Guard the screen and fetch the collection.
    pub async fn open(&mut self) -> Transition {
        if let Err(redirect) = self.gate.check() {
            return redirect;
        }
        self.refresh().await;
        Transition::Stay
    }

    /// Change the server-side balance bounds and refetch.
    pub async fn set_balance_range(&mut self, balance: BalanceRange) -> Transition {
        if let Err(redirect) = self.gate.check() {
            return redirect;
        }
        self.balance = balance;
        self.refresh().await;
        Transition::Stay
    }

    /// Parse balance bounds from form inputs and refetch.
    ///
    /// Invalid input blocks the request and keeps the current bounds.
    pub async fn apply_balance_inputs(&mut self, min: &str, max: &str) -> Transition {
        if let Err(redirect) = self.gate.check() {
            return redirect;
        }
        match BalanceRange::from_inputs(min, max) {
            Ok(balance) => self.set_balance_range(balance).await,
            Err(error) => {
                debug!(%error, "balance bounds refused");
                self.notice.show(Notice::error(messages::INVALID_BALANCE_RANGE));
                Transition::Stay
            }
        }
    }

    /// Filter the loaded collection locally and return to page 1.
    pub fn search(&mut self, term: &str) {
        self.search = term.trim().to_owned();
        if self.search.is_empty() {
            self.pager.clear_filter();
        } else {
            let needle = self.search.clone();
            self.pager
                .apply_filter(move |user: &UserRecord| user.matches_search(&needle));
        }
    }

    /// Navigate to `page`, clamped to the available pages.
    pub fn set_page(&mut self, page: usize) -> usize {
        self.pager.set_page(page)
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next_page()
    }

    pub fn previous_page(&mut self) -> bool {
        self.pager.previous_page()
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.pager.set_page_size(page_size);
    }

    /// Save edited fields of a user.
    pub async fn update_user(&mut self, id: UserId, update: &UserUpdate) -> Transition {
        if let Err(transition) = self.admin_only() {
            return transition;
        }
        let result = self.api.update_user(id, update).await;
        self.finish_mutation(id, result, messages::USER_UPDATED, |_| {
            messages::USER_UPDATE_FAILED
        })
        .await;
        Transition::Stay
    }

    /// Add `amount` to a user's available balance.
    pub async fn refill(&mut self, id: UserId, amount: u64) -> Transition {
        self.adjust(id, BalanceAdjustment::refill(amount)).await
    }

    /// Write off `amount`; the server refuses amounts above the money spent.
    pub async fn write_off(&mut self, id: UserId, amount: u64) -> Transition {
        self.adjust(id, BalanceAdjustment::write_off(amount)).await
    }

    pub fn pager(&self) -> &OffsetPager<UserRecord> {
        &self.pager
    }

    pub fn balance_range(&self) -> BalanceRange {
        self.balance
    }

    pub fn search_term(&self) -> &str {
        self.search.as_str()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.current()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice.dismiss();
    }

    async fn adjust(
        &mut self,
        id: UserId,
        adjustment: Result<BalanceAdjustment, ZeroAdjustment>,
    ) -> Transition {
        if let Err(transition) = self.admin_only() {
            return transition;
        }
        let Ok(adjustment) = adjustment else {
            self.notice.show(Notice::error(messages::INVALID_AMOUNT));
            return Transition::Stay;
        };
        let (success, fallback) = match adjustment {
            BalanceAdjustment::Refill(_) => (messages::BALANCE_REFILLED, messages::USER_UPDATE_FAILED),
            BalanceAdjustment::WriteOff(_) => {
                (messages::BALANCE_WRITTEN_OFF, messages::WRITE_OFF_EXCEEDS_SPENT)
            }
        };
        let result = self.api.adjust_balance(id, adjustment).await;
        self.finish_mutation(id, result, success, |error| match (adjustment, error) {
            (BalanceAdjustment::WriteOff(_), ApiError::Rejected { status: 400, .. }) => fallback,
            _ => messages::USER_UPDATE_FAILED,
        })
        .await;
        Transition::Stay
    }

    fn admin_only(&mut self) -> Result<(), Transition> {
        match self.gate.check()? {
            Role::Admin => Ok(()),
            role => {
                debug!(%role, "user mutation refused");
                self.notice.show(Notice::error(messages::ACCESS_DENIED));
                Err(Transition::Stay)
            }
        }
    }

    async fn finish_mutation(
        &mut self,
        id: UserId,
        result: Result<(), ApiError>,
        success: &'static str,
        failure: impl FnOnce(&ApiError) -> &'static str,
    ) {
        match result {
            Ok(()) => {
                info!(user_id = %id, "user mutated");
                self.notice.show(Notice::success(success));
                self.refresh().await;
            }
            Err(error) => {
                warn!(user_id = %id, %error, "user mutation failed");
                let fallback = failure(&error);
                self.notice.show(failure_notice(&error, fallback));
            }
        }
    }

    async fn refresh(&mut self) {
        match self.api.list_users(&self.balance, FETCH_ALL_PAGE_SIZE).await {
            Ok(list) => {
                debug!(count = list.users.len(), total = list.total, "users loaded");
                self.pager.load_all(list.users);
            }
            Err(error) => {
                warn!(%error, "users load failed");
                self.notice
                    .show(failure_notice(&error, messages::USERS_LOAD_FAILED));
            }
        }
    }
}
