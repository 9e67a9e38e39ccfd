//! End-user profile: own record, payment history and personal reports.

use std::sync::Arc;

use mockable::Clock;
use pagination::{CursorPager, PageRequest, PageSize, Resolution};
use tracing::{debug, info, warn};

use crate::domain::ports::{PaymentsApi, ReportSink, ReportsApi, UsersApi};
use crate::domain::{
    CredentialStore, DateRange, Notice, NoticeSlot, Payment, ProfileFilters, ReportFile,
    ReportFlavour, ReportRequest, Route, UserRecord, date, messages, profile_report_file_name,
};

use super::payments::date_notice;
use super::{Gate, Transition, failure_notice};

/// Ports used by the profile screen.
pub struct ProfilePorts {
    pub users: Arc<dyn UsersApi>,
    pub payments: Arc<dyn PaymentsApi>,
    pub reports: Arc<dyn ReportsApi>,
    pub sink: Arc<dyn ReportSink>,
}

/// Signed-in user's own record and payment history.
pub struct ProfileScreen {
    gate: Gate,
    ports: ProfilePorts,
    clock: Arc<dyn Clock>,
    user: Option<UserRecord>,
    pager: CursorPager<Payment, ProfileFilters>,
    notice: NoticeSlot,
}

impl ProfileScreen {
    pub fn new(
        store: Arc<CredentialStore>,
        ports: ProfilePorts,
        clock: Arc<dyn Clock>,
        page_size: PageSize,
    ) -> Self {
        Self {
            gate: Gate::new(store, Route::Profile),
            ports,
            clock,
            user: None,
            pager: CursorPager::new(ProfileFilters::default(), page_size),
            notice: NoticeSlot::default(),
        }
    }

    /// Guard the screen, load the actor's record, then the first page of
    /// their payments.
    pub async fn open(&mut self) -> Transition {
        if let Err(redirect) = self.gate.check() {
            return redirect;
        }
        let Some(claims) = self.gate.store().claims() else {
            return Transition::to(Route::Login);
        };
        match self.ports.users.user_by_id(claims.subject()).await {
            Ok(user) => {
                debug!(user_id = %user.id, "profile loaded");
                let filters = ProfileFilters {
                    login: user.login.clone(),
                    range: self.pager.filters().range,
                };
                self.user = Some(user);
                let request = self.pager.set_filters(filters);
                self.fetch(request).await;
            }
            Err(error) => {
                warn!(user_id = %claims.subject(), %error, "profile load failed");
                self.notice
                    .show(failure_notice(&error, messages::PROFILE_LOAD_FAILED));
            }
        }
        Transition::Stay
    }

    pub async fn next_page(&mut self) -> Transition {
        if let Err(redirect) = self.gate.check() {
            return redirect;
        }
        if self.user.is_some() {
            if let Some(request) = self.pager.load_next() {
                self.fetch(request).await;
            }
        }
        Transition::Stay
    }

    pub async fn previous_page(&mut self) -> Transition {
        if let Err(redirect) = self.gate.check() {
            return redirect;
        }
        if self.user.is_some() {
            if let Some(request) = self.pager.load_previous() {
                self.fetch(request).await;
            }
        }
        Transition::Stay
    }

    /// Restrict the history to a date range.
    ///
    /// Before the record has loaded the range is only remembered; `open`
    /// fetches with it.
    pub async fn apply_dates(&mut self, start: &str, end: &str) -> Transition {
        if let Err(redirect) = self.gate.check() {
            return redirect;
        }
        let range = match self.parse_range(start, end) {
            Some(range) => range,
            None => return Transition::Stay,
        };
        let filters = ProfileFilters {
            login: self.pager.filters().login.clone(),
            range,
        };
        let request = self.pager.set_filters(filters);
        if self.user.is_some() {
            self.fetch(request).await;
        }
        Transition::Stay
    }

    pub async fn set_page_size(&mut self, page_size: PageSize) -> Transition {
        if let Err(redirect) = self.gate.check() {
            return redirect;
        }
        let request = self.pager.set_page_size(page_size);
        if self.user.is_some() {
            self.fetch(request).await;
        }
        Transition::Stay
    }

    /// Download a personal report for the active date range and save it.
    pub async fn download_report(&mut self, flavour: ReportFlavour) -> Transition {
        if let Err(redirect) = self.gate.check() {
            return redirect;
        }
        let Some(login) = self.user.as_ref().map(|user| user.login.clone()) else {
            self.notice.show(Notice::error(messages::PROFILE_LOAD_FAILED));
            return Transition::Stay;
        };
        let request = ReportRequest::SingleUser {
            login: login.clone(),
            range: self.pager.filters().range,
            flavour,
        };
        let bytes = match self.ports.reports.download(&request).await {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(%login, %error, "report download failed");
                self.notice
                    .show(failure_notice(&error, messages::REPORT_FAILED));
                return Transition::Stay;
            }
        };
        let file = ReportFile {
            file_name: profile_report_file_name(flavour, &login),
            bytes,
        };
        match self.ports.sink.save(&file) {
            Ok(path) => {
                info!(path = %path.display(), "report saved");
                self.notice.show(Notice::success(format!(
                    "{}: {}",
                    messages::REPORT_SAVED,
                    path.display()
                )));
            }
            Err(error) => {
                warn!(%error, "report could not be written");
                self.notice.show(Notice::error(messages::REPORT_FAILED));
            }
        }
        Transition::Stay
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    pub fn pager(&self) -> &CursorPager<Payment, ProfileFilters> {
        &self.pager
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.current()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice.dismiss();
    }

    fn parse_range(&mut self, start: &str, end: &str) -> Option<DateRange> {
        match DateRange::from_ui(start, end, date::today(self.clock.as_ref())) {
            Ok(range) => Some(range),
            Err(error) => {
                self.notice.show(date_notice(&error));
                None
            }
        }
    }

    async fn fetch(&mut self, request: PageRequest<ProfileFilters>) {
        let outcome = self.ports.payments.payments_by_user(&request).await;
        match self.pager.resolve(&request, outcome) {
            Resolution::Applied => debug!(page = self.pager.page_number(), "history page applied"),
            Resolution::Stale => debug!(generation = request.generation.get(), "stale history page"),
            Resolution::Failed(error) => {
                warn!(%error, "history page failed");
                self.notice
                    .show(failure_notice(&error, messages::PAYMENTS_LOAD_FAILED));
            }
        }
    }
}
