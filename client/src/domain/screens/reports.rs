//! Operator report downloads.

use std::sync::Arc;

use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{FETCH_ALL_PAGE_SIZE, ReportSink, ReportsApi, UsersApi};
use crate::domain::{
    BalanceRange, CredentialStore, DateRange, Notice, NoticeSlot, REPORTS_FILE_NAME, Region,
    ReportFile, ReportFlavour, ReportRequest, Route, date, messages,
};

use super::payments::date_notice;
use super::{Gate, Transition, failure_notice};

/// Report kind chosen on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportChoice {
    SingleUser { login: String, flavour: ReportFlavour },
    AllUsersPayments { region: Option<Region> },
    AllUsersInfo,
}

/// Spreadsheet exports for admins and supervisors.
pub struct ReportsScreen {
    gate: Gate,
    users: Arc<dyn UsersApi>,
    reports: Arc<dyn ReportsApi>,
    sink: Arc<dyn ReportSink>,
    clock: Arc<dyn Clock>,
    logins: Vec<String>,
    notice: NoticeSlot,
}

impl ReportsScreen {
    pub fn new(
        store: Arc<CredentialStore>,
        users: Arc<dyn UsersApi>,
        reports: Arc<dyn ReportsApi>,
        sink: Arc<dyn ReportSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            gate: Gate::new(store, Route::Reports),
            users,
            reports,
            sink,
            clock,
            logins: Vec::new(),
            notice: NoticeSlot::default(),
        }
    }

    /// Guard the screen and load logins for suggestions.
    pub async fn open(&mut self) -> Transition {
        if let Err(redirect) = self.gate.check() {
            return redirect;
        }
        match self
            .users
            .list_users(&BalanceRange::default(), FETCH_ALL_PAGE_SIZE)
            .await
        {
            Ok(list) => self.logins = list.users.into_iter().map(|user| user.login).collect(),
            Err(error) => {
                warn!(%error, "login suggestions unavailable");
                self.notice
                    .show(failure_notice(&error, messages::USERS_LOAD_FAILED));
            }
        }
        Transition::Stay
    }

    /// Logins containing `fragment`, case-insensitively.
    pub fn suggestions(&self, fragment: &str) -> Vec<&str> {
        let needle = fragment.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.logins
            .iter()
            .filter(|login| login.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    /// Validate the form, download the report and save it as `Отчет.xlsx`.
    pub async fn download(&mut self, choice: ReportChoice, start: &str, end: &str) -> Transition {
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
        let request = match choice {
            ReportChoice::SingleUser { login, flavour } => {
                let login = login.trim();
                if login.is_empty() {
                    self.notice
                        .show(Notice::error(messages::REPORT_LOGIN_REQUIRED));
                    return Transition::Stay;
                }
                ReportRequest::SingleUser {
                    login: login.to_owned(),
                    range,
                    flavour,
                }
            }
            ReportChoice::AllUsersPayments { region } => {
                ReportRequest::AllUsersPayments { range, region }
            }
            ReportChoice::AllUsersInfo => ReportRequest::AllUsersInfo,
        };

        let bytes = match self.reports.download(&request).await {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(path = request.path(), %error, "report download failed");
                self.notice
                    .show(failure_notice(&error, messages::REPORT_FAILED));
                return Transition::Stay;
            }
        };
        let file = ReportFile {
            file_name: REPORTS_FILE_NAME.to_owned(),
            bytes,
        };
        match self.sink.save(&file) {
            Ok(path) => {
                info!(report = request.path(), path = %path.display(), "report saved");
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

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.current()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice.dismiss();
    }
}
