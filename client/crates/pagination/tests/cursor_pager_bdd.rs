//! Behaviour tests for cursor pager navigation and stale-response handling.

use std::cell::{Cell, RefCell};

use pagination::{Cursor, CursorPager, Page, PageRequest, PageSize, Resolution};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

type Pager = CursorPager<u32, u32>;

/// Items `0..total` filtered to `>= from`, paged by numeric offset cursors.
struct PagerWorld {
    total: Cell<u32>,
    pager: RefCell<Option<Pager>>,
    pending: RefCell<Vec<PageRequest<u32>>>,
}

impl PagerWorld {
    fn new() -> Self {
        Self {
            total: Cell::new(0),
            pager: RefCell::new(None),
            pending: RefCell::new(Vec::new()),
        }
    }

    fn with_pager<R>(&self, f: impl FnOnce(&mut Pager) -> R) -> R {
        let mut slot = self.pager.borrow_mut();
        f(slot.as_mut().expect("pager configured"))
    }

    fn serve(&self, request: &PageRequest<u32>) -> Page<u32> {
        let matching: Vec<u32> = (0..self.total.get())
            .filter(|item| *item >= request.filters)
            .collect();
        let offset = request
            .cursor
            .as_ref()
            .map_or(0, |cursor| cursor.as_str().parse::<usize>().expect("offset"));
        let end = (offset + request.page_size.get()).min(matching.len());
        let next = (end < matching.len())
            .then(|| Cursor::new(end.to_string()).expect("cursor"));
        let items = matching.get(offset..end).unwrap_or(&[]).to_vec();
        Page::new(items, matching.len() as u64, next)
    }

    fn complete(&self, request: &PageRequest<u32>) -> Resolution<()> {
        let page = self.serve(request);
        self.with_pager(|pager| pager.resolve(request, Ok(page)))
    }

    fn run(&self, issue: impl FnOnce(&mut Pager) -> Option<PageRequest<u32>>) {
        let request = self.with_pager(issue).expect("request issued");
        assert!(self.complete(&request).is_applied());
    }
}

#[fixture]
fn world() -> PagerWorld {
    PagerWorld::new()
}

#[given("a collection of {total} items served {size} per page")]
fn a_collection(world: &PagerWorld, total: u32, size: usize) {
    world.total.set(total);
    let page_size = PageSize::new(size).expect("page size");
    *world.pager.borrow_mut() = Some(CursorPager::new(0, page_size));
}

#[when("the first page is loaded")]
fn the_first_page_is_loaded(world: &PagerWorld) {
    world.run(|pager| Some(pager.load_initial()));
}

#[when("the next page is loaded {times} times")]
fn the_next_page_is_loaded(world: &PagerWorld, times: usize) {
    for _ in 0..times {
        world.run(Pager::load_next);
    }
}

#[when("the previous page is loaded {times} times")]
fn the_previous_page_is_loaded(world: &PagerWorld, times: usize) {
    for _ in 0..times {
        world.run(Pager::load_previous);
    }
}

#[when("the first page is requested but not yet answered")]
fn the_first_page_is_requested(world: &PagerWorld) {
    let request = world.with_pager(Pager::load_initial);
    world.pending.borrow_mut().push(request);
}

#[when("the filter is changed to items from {from}")]
fn the_filter_is_changed(world: &PagerWorld, from: u32) {
    let request = world.with_pager(|pager| pager.set_filters(from));
    world.pending.borrow_mut().push(request);
}

#[when("the newer request completes before the older one")]
fn newer_completes_first(world: &PagerWorld) {
    let pending: Vec<_> = world.pending.borrow_mut().drain(..).collect();
    let mut outcomes = Vec::new();
    for request in pending.iter().rev() {
        outcomes.push(world.complete(request));
    }
    assert_eq!(outcomes, vec![Resolution::Applied, Resolution::Stale]);
}

#[then("the history holds only the first-page sentinel")]
fn history_is_reset(world: &PagerWorld) {
    world.with_pager(|pager| {
        assert_eq!(pager.history().entries(), &[None]);
        assert!(!pager.has_previous());
    });
}

#[then("the first item shown is {expected}")]
fn first_item_shown(world: &PagerWorld, expected: u32) {
    world.with_pager(|pager| assert_eq!(pager.items().first(), Some(&expected)));
}

#[then("requesting the next page issues nothing")]
fn next_issues_nothing(world: &PagerWorld) {
    world.with_pager(|pager| assert!(pager.load_next().is_none()));
}

#[then("requesting the previous page issues nothing")]
fn previous_issues_nothing(world: &PagerWorld) {
    world.with_pager(|pager| assert!(pager.load_previous().is_none()));
}

#[scenario(
    path = "tests/features/cursor_pager.feature",
    name = "Walking forward and back returns to the first page"
)]
fn walking_forward_and_back(world: PagerWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/cursor_pager.feature",
    name = "A filter change made while a request is in flight wins"
)]
fn filter_change_in_flight(world: PagerWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/cursor_pager.feature",
    name = "An exhausted pager ignores further next requests"
)]
fn exhausted_pager(world: PagerWorld) {
    drop(world);
}
