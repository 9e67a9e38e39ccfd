//! Behaviour tests for credential decoding, expiry and the route guard.

use std::cell::RefCell;
use std::sync::Arc;

use localpay_client::domain::ports::{CredentialStorage, InMemoryCredentialStorage};
use localpay_client::domain::{CredentialStore, GuardOutcome, Route, guard_route};
use mockable::Clock;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

mod support;

use support::{MutableClock, token};

struct SessionWorld {
    storage: Arc<InMemoryCredentialStorage>,
    clock: Arc<MutableClock>,
    store: CredentialStore,
    stored: RefCell<Option<String>>,
}

impl SessionWorld {
    fn new() -> Self {
        let storage = Arc::new(InMemoryCredentialStorage::default());
        let clock = Arc::new(MutableClock::new());
        let store = CredentialStore::new(storage.clone(), clock.clone());
        Self {
            storage,
            clock,
            store,
            stored: RefCell::new(None),
        }
    }

    fn guard(&self, path: &str) -> GuardOutcome {
        let route: Route = path.parse().expect("known route");
        guard_route(self.store.role(), route)
    }
}

#[fixture]
fn world() -> SessionWorld {
    SessionWorld::new()
}

#[given("an empty session store")]
fn an_empty_session_store(world: &SessionWorld) {
    assert_eq!(world.storage.load().expect("load"), None);
}

#[given("a session store whose storage holds {raw}")]
fn storage_holds(world: &SessionWorld, raw: String) {
    world.storage.save(&raw).expect("save");
}

#[when("a token for role {role} and user {id} expiring in {seconds} seconds is stored")]
fn a_token_is_stored(world: &SessionWorld, role: String, id: i64, seconds: i64) {
    let expiry = world.clock.utc().timestamp() + seconds;
    let raw = token(id, &role, Some(expiry));
    world.store.set_credential(Some(&raw)).expect("valid token");
    *world.stored.borrow_mut() = Some(raw);
}

#[when("the clock advances {seconds} seconds")]
fn the_clock_advances(world: &SessionWorld, seconds: i64) {
    world.clock.advance_seconds(seconds);
}

#[when("the session is restored")]
fn the_session_is_restored(world: &SessionWorld) {
    world.store.restore().expect("restore");
}

#[then("the role is {role}")]
fn the_role_is(world: &SessionWorld, role: String) {
    assert_eq!(world.store.role().as_str(), role);
}

#[then("opening {path} is allowed")]
fn opening_is_allowed(world: &SessionWorld, path: String) {
    assert_eq!(world.guard(&path), GuardOutcome::Allow);
}

#[then("opening {path} sends the actor to {target}")]
fn opening_redirects(world: &SessionWorld, path: String, target: String) {
    let expected: Route = target.parse().expect("known route");
    assert_eq!(
        world.guard(&path),
        GuardOutcome::Redirect {
            to: expected,
            return_to: None
        }
    );
}

#[then("opening {path} asks for login returning to {resume}")]
fn opening_asks_for_login(world: &SessionWorld, path: String, resume: String) {
    let resume: Route = resume.parse().expect("known route");
    assert_eq!(
        world.guard(&path),
        GuardOutcome::Redirect {
            to: Route::Login,
            return_to: Some(resume)
        }
    );
}

#[then("the stored token is kept")]
fn the_stored_token_is_kept(world: &SessionWorld) {
    let stored = world.stored.borrow().clone();
    assert_eq!(world.storage.load().expect("load"), stored);
    assert!(world.store.claims().is_some());
}

#[then("the storage is empty")]
fn the_storage_is_empty(world: &SessionWorld) {
    assert_eq!(world.storage.load().expect("load"), None);
    assert!(world.store.claims().is_none());
}

#[scenario(path = "tests/features/session_guard.feature")]
fn session_guard_scenarios(world: SessionWorld) {
    drop(world);
}
