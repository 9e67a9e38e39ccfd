//! Command dispatch onto screen controllers.
//!
//! Every command builds the screen it targets, lets the screen run its role
//! guard, performs one action and renders what the screen shows afterwards.

use std::sync::Arc;

use mockable::Clock;
use pagination::PageSize;
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::{AuthApi, PaymentsApi, ReportSink, ReportsApi, UsersApi};
use crate::domain::screens::{
    LoginScreen, MakePaymentScreen, PAGE_SIZE_OPTIONS, PanelScreen, PaymentsScreen, ProfilePorts,
    ProfileScreen, RegisterScreen, ReportChoice, ReportsScreen, Transition, UsersScreen,
    page_size_option,
};
use crate::domain::{
    CredentialStore, GuardOutcome, Notice, PaymentStatus, PaymentUpdate, RegistrationForm, Route,
    UserId, UserUpdate, guard_route, landing_for,
};

use super::args::{
    Command, PaymentsArgs, ProfileArgs, RegisterArgs, ReportArgs, ReportKind, UpdatePaymentArgs,
    UpdateUserArgs, UsersArgs,
};
use super::render;

/// Driven adapters the shell hands to screens.
#[derive(Clone)]
pub struct Ports {
    pub auth: Arc<dyn AuthApi>,
    pub users: Arc<dyn UsersApi>,
    pub payments: Arc<dyn PaymentsApi>,
    pub reports: Arc<dyn ReportsApi>,
    pub sink: Arc<dyn ReportSink>,
}

/// Lines to print for one command and whether it failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    pub lines: Vec<String>,
    pub failed: bool,
}

impl Output {
    fn failure(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            failed: true,
        }
    }

    /// The guard sent the actor elsewhere; nothing was performed.
    fn redirected(transition: Transition) -> Self {
        let mut output = Self {
            lines: Vec::new(),
            failed: true,
        };
        output.push_transition(transition);
        output
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn extend(&mut self, lines: impl IntoIterator<Item = String>) {
        self.lines.extend(lines);
    }

    fn push_notice(&mut self, notice: Option<&Notice>) {
        if let Some(notice) = notice {
            self.failed |= notice.is_error();
            self.lines.push(render::notice(notice));
        }
    }

    fn push_transition(&mut self, transition: Transition) {
        if let Some(line) = render::transition(transition) {
            self.lines.push(line);
        }
    }
}

/// Runs parsed commands against the session in `store`.
pub struct Shell {
    store: Arc<CredentialStore>,
    ports: Ports,
    clock: Arc<dyn Clock>,
    page_size: PageSize,
}

impl Shell {
    /// `page_size` applies when a command does not pick its own.
    pub fn new(
        store: Arc<CredentialStore>,
        ports: Ports,
        clock: Arc<dyn Clock>,
        page_size: PageSize,
    ) -> Self {
        Self {
            store,
            ports,
            clock,
            page_size,
        }
    }

    /// Execute one command.
    pub async fn run(&self, command: Command) -> Output {
        debug!(role = %self.store.role(), command = command.name(), "running command");
        match command {
            Command::Login {
                login,
                password,
                return_to,
            } => self.login(&login, Zeroizing::new(password), return_to).await,
            Command::Logout => self.logout(),
            Command::Whoami => self.whoami(),
            Command::Open { route } => self.open(route),
            Command::Payments(args) => self.payments(args).await,
            Command::CreatePayment { ls_abon, money } => {
                self.create_payment(&ls_abon, &money).await
            }
            Command::UpdatePayment(args) => self.update_payment(args).await,
            Command::Users(args) => self.users(args).await,
            Command::UpdateUser(args) => self.update_user(args).await,
            Command::Refill { id, amount } => self.adjust_balance(id, amount, true).await,
            Command::WriteOff { id, amount } => self.adjust_balance(id, amount, false).await,
            Command::Register(args) => self.register(args).await,
            Command::Profile(args) => self.profile(args).await,
            Command::Pay { ls_abon, money } => self.pay(&ls_abon, &money).await,
            Command::Report(args) => self.report(args).await,
            Command::Suggest { fragment } => self.suggest(&fragment).await,
        }
    }

    async fn login(
        &self,
        login: &str,
        password: Zeroizing<String>,
        return_to: Option<Route>,
    ) -> Output {
        let mut screen = LoginScreen::new(self.ports.auth.clone(), self.store.clone(), return_to);
        let transition = screen.submit(login, password.as_str()).await;
        if let Some(message) = screen.error() {
            return Output::failure(format!("error: {message}"));
        }
        let mut output = Output::default();
        output.push(format!("signed in as {}", self.store.role()));
        output.push_transition(transition);
        output
    }

    fn logout(&self) -> Output {
        let panel = PanelScreen::new(self.store.clone(), landing_for(self.store.role()));
        match panel.logout() {
            Ok(transition) => {
                let mut output = Output::default();
                output.push("signed out");
                output.push_transition(transition);
                output
            }
            Err(notice) => Output::failure(render::notice(&notice)),
        }
    }

    fn whoami(&self) -> Output {
        let role = self.store.role();
        let panel = PanelScreen::new(self.store.clone(), landing_for(role));
        let mut output = Output::default();
        output.push(format!("role: {role}"));
        if let Some(claims) = self.store.claims() {
            output.push(format!("user id: {}", claims.subject()));
            if let Some(expiry) = claims.expires_at() {
                output.push(format!("expires: {}", expiry.to_rfc3339()));
            }
        }
        output.push(format!("landing: {}", landing_for(role)));
        output.extend(panel.links().into_iter().map(|route| format!("  {route}")));
        output
    }

    fn open(&self, route: Route) -> Output {
        match guard_route(self.store.role(), route) {
            GuardOutcome::Allow => Output {
                lines: vec![format!("allowed: {route}")],
                failed: false,
            },
            redirect => Output::redirected(redirect.into()),
        }
    }

    fn page_size(&self, requested: Option<usize>) -> Result<PageSize, Output> {
        requested.map_or(Ok(self.page_size), |size| {
            page_size_option(size).map_err(|_| {
                Output::failure(format!(
                    "error: page size must be one of {PAGE_SIZE_OPTIONS:?}"
                ))
            })
        })
    }

    fn payments_screen(&self, page_size: PageSize) -> PaymentsScreen {
        PaymentsScreen::new(
            self.store.clone(),
            self.ports.payments.clone(),
            self.clock.clone(),
            page_size,
        )
    }

    async fn payments(&self, args: PaymentsArgs) -> Output {
        let page_size = match self.page_size(args.page_size) {
            Ok(size) => size,
            Err(output) => return output,
        };
        let mut screen = self.payments_screen(page_size);
        let transition = screen
            .apply_filters(&args.dates.start, &args.dates.end, &args.ls_abon, &args.name)
            .await;
        if transition != Transition::Stay {
            return Output::redirected(transition);
        }
        for _ in 1..args.page {
            if screen.notice().is_some() || !screen.pager().has_next() {
                break;
            }
            let transition = screen.next_page().await;
            if transition != Transition::Stay {
                return Output::redirected(transition);
            }
        }
        let mut output = Output::default();
        output.push_notice(screen.notice());
        if !output.failed {
            output.extend(render::payments(screen.pager()));
        }
        output
    }

    async fn create_payment(&self, ls_abon: &str, money: &str) -> Output {
        let mut screen = self.payments_screen(self.page_size);
        let transition = screen.create_payment(ls_abon, money).await;
        self.notice_only(transition, screen.notice())
    }

    async fn update_payment(&self, args: UpdatePaymentArgs) -> Output {
        let update = PaymentUpdate {
            payment_status: PaymentStatus::from(args.status),
            annulment: args.annulled,
            comment: args.comment,
        };
        let mut screen = self.payments_screen(self.page_size);
        let transition = screen.update_payment(args.id, &update).await;
        self.notice_only(transition, screen.notice())
    }

    async fn users(&self, args: UsersArgs) -> Output {
        let page_size = match self.page_size(args.page_size) {
            Ok(size) => size,
            Err(output) => return output,
        };
        let mut screen = UsersScreen::new(self.store.clone(), self.ports.users.clone(), page_size);
        let transition = screen
            .apply_balance_inputs(&args.min_balance, &args.max_balance)
            .await;
        if transition != Transition::Stay {
            return Output::redirected(transition);
        }
        screen.search(&args.search);
        screen.set_page(args.page);
        let mut output = Output::default();
        output.push_notice(screen.notice());
        if !output.failed {
            output.extend(render::users(screen.pager()));
        }
        output
    }

    async fn update_user(&self, args: UpdateUserArgs) -> Output {
        let update = UserUpdate {
            name: args.name,
            surname: args.surname,
            login: args.login,
            role: args.role.map(Into::into),
            access_to_payments: args.access_to_payments,
            is_active: args.active,
            region: args.region,
            comment: args.comment,
            planup_id: args.planup_id,
            ..UserUpdate::default()
        };
        if update.is_empty() {
            return Output::failure("error: nothing to update");
        }
        let mut screen = self.users_screen();
        let transition = screen.update_user(UserId::new(args.id), &update).await;
        self.notice_only(transition, screen.notice())
    }

    async fn adjust_balance(&self, id: i64, amount: u64, refill: bool) -> Output {
        let mut screen = self.users_screen();
        let transition = if refill {
            screen.refill(UserId::new(id), amount).await
        } else {
            screen.write_off(UserId::new(id), amount).await
        };
        self.notice_only(transition, screen.notice())
    }

    fn users_screen(&self) -> UsersScreen {
        UsersScreen::new(self.store.clone(), self.ports.users.clone(), self.page_size)
    }

    async fn register(&self, args: RegisterArgs) -> Output {
        let mut screen = RegisterScreen::new(self.store.clone(), self.ports.users.clone());
        let transition = screen.open();
        if transition != Transition::Stay {
            return Output::redirected(transition);
        }
        let form = RegistrationForm {
            name: args.name,
            surname: args.surname,
            login: args.login,
            password: Zeroizing::new(args.password),
            password_confirmation: Zeroizing::new(args.confirm_password),
            role: args.role.into(),
            access_to_payments: args.access_to_payments,
            is_active: !args.inactive,
            region: args.region,
            comment: args.comment,
            planup_id: args.planup_id,
        };
        let transition = screen.submit(form).await;
        let mut output = Output::default();
        output.push_notice(screen.notice());
        if !output.failed {
            output.push_transition(transition);
        }
        output
    }

    async fn profile(&self, args: ProfileArgs) -> Output {
        let page_size = match self.page_size(args.page_size) {
            Ok(size) => size,
            Err(output) => return output,
        };
        let ports = ProfilePorts {
            users: self.ports.users.clone(),
            payments: self.ports.payments.clone(),
            reports: self.ports.reports.clone(),
            sink: self.ports.sink.clone(),
        };
        let mut screen = ProfileScreen::new(self.store.clone(), ports, self.clock.clone(), page_size);
        let mut transition = screen.open().await;
        let dated = !(args.dates.start.trim().is_empty() && args.dates.end.trim().is_empty());
        if transition == Transition::Stay && dated {
            transition = screen.apply_dates(&args.dates.start, &args.dates.end).await;
        }
        for _ in 1..args.page {
            if transition != Transition::Stay
                || screen.notice().is_some()
                || !screen.pager().has_next()
            {
                break;
            }
            transition = screen.next_page().await;
        }
        if transition != Transition::Stay {
            return Output::redirected(transition);
        }

        let mut output = Output::default();
        if let Some(user) = screen.user() {
            output.extend(render::profile(user));
        }
        if screen.notice().is_none() {
            output.extend(render::payments(screen.pager()));
        }
        if let Some(flavour) = args.report {
            let transition = screen.download_report(flavour.into()).await;
            output.push_transition(transition);
        }
        output.push_notice(screen.notice());
        output
    }

    async fn pay(&self, ls_abon: &str, money: &str) -> Output {
        let mut screen = MakePaymentScreen::new(self.store.clone(), self.ports.payments.clone());
        let transition = screen.open();
        if transition != Transition::Stay {
            return Output::redirected(transition);
        }
        let transition = screen.submit(ls_abon, money).await;
        self.notice_only(transition, screen.notice())
    }

    fn reports_screen(&self) -> ReportsScreen {
        ReportsScreen::new(
            self.store.clone(),
            self.ports.users.clone(),
            self.ports.reports.clone(),
            self.ports.sink.clone(),
            self.clock.clone(),
        )
    }

    async fn report(&self, args: ReportArgs) -> Output {
        let choice = match args.kind {
            ReportKind::Single { login, flavour } => ReportChoice::SingleUser {
                login,
                flavour: flavour.into(),
            },
            ReportKind::AllPayments { region } => ReportChoice::AllUsersPayments { region },
            ReportKind::UsersInfo => ReportChoice::AllUsersInfo,
        };
        let mut screen = self.reports_screen();
        let transition = screen
            .download(choice, &args.dates.start, &args.dates.end)
            .await;
        self.notice_only(transition, screen.notice())
    }

    async fn suggest(&self, fragment: &str) -> Output {
        let mut screen = self.reports_screen();
        let transition = screen.open().await;
        if transition != Transition::Stay {
            return Output::redirected(transition);
        }
        let mut output = Output::default();
        output.push_notice(screen.notice());
        output.extend(
            screen
                .suggestions(fragment)
                .into_iter()
                .map(str::to_owned),
        );
        output
    }

    fn notice_only(&self, transition: Transition, notice: Option<&Notice>) -> Output {
        if transition != Transition::Stay {
            return Output::redirected(transition);
        }
        let mut output = Output::default();
        output.push_notice(notice);
        output
    }
}
