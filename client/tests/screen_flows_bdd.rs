//! Behaviour tests driving the command shell against an in-process server.

use std::cell::RefCell;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use localpay_client::domain::ports::{
    ApiError, FixtureAuthApi, InMemoryCredentialStorage, PaymentsApi, ReportsApi, UserList,
    UsersApi,
};
use localpay_client::domain::{
    AccountRole, BalanceAdjustment, BalanceRange, CredentialStore, NewPayment, Payment,
    PaymentFilters, PaymentStatus, PaymentUpdate, ProfileFilters, REPORTS_FILE_NAME, Region,
    Registration, ReportRequest, UserId, UserRecord, UserUpdate,
};
use localpay_client::inbound::cli::{
    Command, DateArgs, Output, PaymentsArgs, Ports, ReportArgs, ReportKind, Shell,
};
use localpay_client::outbound::storage::FileReportSink;
use pagination::{Cursor, Page, PageRequest, PageSize};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;
use tokio::runtime::{Builder, Runtime};

mod support;

use support::{MutableClock, token};

#[derive(Default)]
struct FakeServer {
    users: Mutex<Vec<UserRecord>>,
    payments: Mutex<Vec<Payment>>,
}

impl FakeServer {
    fn balance_of(&self, id: i64) -> Option<i64> {
        self.users
            .lock()
            .expect("users mutex")
            .iter()
            .find(|user| user.id == UserId::new(id))
            .map(|user| user.available_balance)
    }

    fn find_user(&self, predicate: impl Fn(&UserRecord) -> bool) -> Result<UserRecord, ApiError> {
        self.users
            .lock()
            .expect("users mutex")
            .iter()
            .find(|user| predicate(user))
            .cloned()
            .ok_or_else(|| ApiError::not_found("User not found"))
    }

    fn page_of<F>(&self, request: &PageRequest<F>) -> Page<Payment> {
        let payments = self.payments.lock().expect("payments mutex");
        let offset = request
            .cursor
            .as_ref()
            .map_or(0, |cursor| cursor.as_str().parse::<usize>().expect("offset"));
        let end = (offset + request.page_size.get()).min(payments.len());
        let next = (end < payments.len()).then(|| Cursor::new(end.to_string()).expect("cursor"));
        let items = payments.get(offset..end).unwrap_or(&[]).to_vec();
        Page::new(items, payments.len() as u64, next)
    }
}

#[async_trait]
impl UsersApi for FakeServer {
    async fn list_users(
        &self,
        _balance: &BalanceRange,
        _per_page: usize,
    ) -> Result<UserList, ApiError> {
        let users = self.users.lock().expect("users mutex").clone();
        let total = users.len() as u64;
        Ok(UserList { users, total })
    }

    async fn user_by_id(&self, id: UserId) -> Result<UserRecord, ApiError> {
        self.find_user(|user| user.id == id)
    }

    async fn update_user(&self, _id: UserId, _update: &UserUpdate) -> Result<(), ApiError> {
        Ok(())
    }

    async fn adjust_balance(
        &self,
        id: UserId,
        adjustment: BalanceAdjustment,
    ) -> Result<(), ApiError> {
        let mut users = self.users.lock().expect("users mutex");
        let user = users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| ApiError::not_found("User not found"))?;
        let amount = i64::try_from(adjustment.amount()).expect("amount fits");
        match adjustment {
            BalanceAdjustment::Refill(_) => user.available_balance += amount,
            BalanceAdjustment::WriteOff(_) => user.spent_money -= amount,
        }
        Ok(())
    }

    async fn create_user(&self, _registration: &Registration) -> Result<(), ApiError> {
        Ok(())
    }
}

#[async_trait]
impl PaymentsApi for FakeServer {
    async fn list_payments(
        &self,
        request: &PageRequest<PaymentFilters>,
    ) -> Result<Page<Payment>, ApiError> {
        Ok(self.page_of(request))
    }

    async fn payments_by_user(
        &self,
        request: &PageRequest<ProfileFilters>,
    ) -> Result<Page<Payment>, ApiError> {
        Ok(self.page_of(request))
    }

    async fn update_payment(&self, _id: i64, _update: &PaymentUpdate) -> Result<(), ApiError> {
        Ok(())
    }

    async fn create_payment(&self, _payment: &NewPayment) -> Result<(), ApiError> {
        Ok(())
    }
}

#[async_trait]
impl ReportsApi for FakeServer {
    async fn download(&self, _request: &ReportRequest) -> Result<Vec<u8>, ApiError> {
        Ok(b"PK\x03\x04".to_vec())
    }
}

fn payment(id: i64) -> Payment {
    Payment {
        id,
        payment_number: None,
        payment_date: None,
        payment_accept: None,
        ls_abon: format!("{:06}", 100_000 + id),
        money: 100.0,
        payment_status: PaymentStatus::Completed,
        user_id: Some(UserId::new(1)),
        annulment: false,
        document_number: None,
        comment: None,
        updated_at: None,
        full_name: Some("Айбек Садыков".to_owned()),
    }
}

fn user(id: i64, balance: i64) -> UserRecord {
    UserRecord {
        id: UserId::new(id),
        name: "Нурлан".to_owned(),
        surname: "Асанов".to_owned(),
        login: format!("user{id}"),
        role: AccountRole::User,
        access_to_payments: true,
        is_active: true,
        available_balance: balance,
        spent_money: 0,
        region: Region::Naryn,
        comment: None,
        planup_id: None,
        date_reg: None,
    }
}

struct FlowWorld {
    runtime: Runtime,
    server: Arc<FakeServer>,
    auth: RefCell<FixtureAuthApi>,
    store: Arc<CredentialStore>,
    reports: TempDir,
    output: RefCell<Option<Output>>,
}

impl FlowWorld {
    fn new() -> Self {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        let store = Arc::new(CredentialStore::new(
            Arc::new(InMemoryCredentialStorage::default()),
            Arc::new(MutableClock::new()),
        ));
        Self {
            runtime,
            server: Arc::new(FakeServer::default()),
            auth: RefCell::new(FixtureAuthApi::new("nobody", "-", token(0, "user", None))),
            store,
            reports: TempDir::new().expect("report dir"),
            output: RefCell::new(None),
        }
    }

    fn run(&self, command: Command) {
        let sink = FileReportSink::open(self.reports.path()).expect("report sink");
        let ports = Ports {
            auth: Arc::new(self.auth.borrow().clone()),
            users: self.server.clone(),
            payments: self.server.clone(),
            reports: self.server.clone(),
            sink: Arc::new(sink),
        };
        let shell = Shell::new(
            self.store.clone(),
            ports,
            Arc::new(MutableClock::new()),
            PageSize::DEFAULT,
        );
        let output = self.runtime.block_on(shell.run(command));
        *self.output.borrow_mut() = Some(output);
    }

    fn output(&self) -> Output {
        self.output.borrow().clone().expect("a command has run")
    }
}

#[fixture]
fn world() -> FlowWorld {
    FlowWorld::new()
}

#[given("the server accepts {login} with password {password} as a {role}")]
fn the_server_accepts(world: &FlowWorld, login: String, password: String, role: String) {
    *world.auth.borrow_mut() = FixtureAuthApi::new(&login, &password, token(7, &role, None));
}

#[given("a signed-in {role}")]
fn a_signed_in_actor(world: &FlowWorld, role: String) {
    world
        .store
        .set_credential(Some(&token(1, &role, None)))
        .expect("valid token");
}

#[given("the server holds {count} payments")]
fn the_server_holds_payments(world: &FlowWorld, count: i64) {
    *world.server.payments.lock().expect("payments mutex") = (1..=count).map(payment).collect();
}

#[given("the server holds user {id} with balance {balance}")]
fn the_server_holds_user(world: &FlowWorld, id: i64, balance: i64) {
    world
        .server
        .users
        .lock()
        .expect("users mutex")
        .push(user(id, balance));
}

#[when("{login} signs in with password {password} returning to {route}")]
fn signs_in(world: &FlowWorld, login: String, password: String, route: String) {
    world.run(Command::Login {
        login,
        password,
        return_to: Some(route.parse().expect("known route")),
    });
}

#[when("payments page {page} is listed with {size} per page")]
fn payments_page_is_listed(world: &FlowWorld, page: usize, size: usize) {
    world.run(Command::Payments(PaymentsArgs {
        dates: DateArgs::default(),
        ls_abon: String::new(),
        name: String::new(),
        page_size: Some(size),
        page,
    }));
}

#[when("user {id} is refilled by {amount}")]
fn user_is_refilled(world: &FlowWorld, id: i64, amount: u64) {
    world.run(Command::Refill { id, amount });
}

#[when("the users info report is downloaded")]
fn the_users_info_report_is_downloaded(world: &FlowWorld) {
    world.run(Command::Report(ReportArgs {
        kind: ReportKind::UsersInfo,
        dates: DateArgs::default(),
    }));
}

#[then("the command succeeds")]
fn the_command_succeeds(world: &FlowWorld) {
    let output = world.output();
    assert!(!output.failed, "unexpected failure: {:?}", output.lines);
}

#[then("the command fails")]
fn the_command_fails(world: &FlowWorld) {
    assert!(world.output().failed);
}

#[then("the shell navigates to {route}")]
fn the_shell_navigates_to(world: &FlowWorld, route: String) {
    let expected = format!("-> {route}");
    assert_eq!(world.output().lines.last(), Some(&expected));
}

#[then("the listing shows page {page} with {shown} of {total} payments")]
fn the_listing_shows(world: &FlowWorld, page: usize, shown: usize, total: u64) {
    let output = world.output();
    assert_eq!(
        output.lines.first(),
        Some(&format!("page {page} | {shown} shown | {total} total"))
    );
    assert_eq!(output.lines.len(), shown + 1);
}

#[then("user {id} has balance {balance}")]
fn user_has_balance(world: &FlowWorld, id: i64, balance: i64) {
    assert_eq!(world.server.balance_of(id), Some(balance));
}

#[then("the report file exists")]
fn the_report_file_exists(world: &FlowWorld) {
    let path = world.reports.path().join(REPORTS_FILE_NAME);
    assert_eq!(std::fs::read(path).expect("report written"), b"PK\x03\x04");
}

#[scenario(path = "tests/features/screen_flows.feature")]
fn screen_flow_scenarios(world: FlowWorld) {
    drop(world);
}
