//! Page state controller with simulated loading transitions.
//!
//! The controller owns a fixed collection, the page size and the current
//! page. Every navigation request flips the published state into a loading
//! phase immediately and applies the new page once the configured latency
//! has elapsed. Requests that arrive while a transition is in flight are
//! ignored.

use super::layout::{as_target, PageLayout};
use super::state::PageState;
use crate::config::Config;
use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use std::collections::BTreeMap;
use std::future::IntoFuture;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// Simulated fetch latency between a request and the page update
pub const DEFAULT_TRANSITION_DELAY: Duration = Duration::from_millis(500);

/// Number of pages skipped by a jump intent
pub const JUMP_PAGES: i64 = 5;

/// How a navigation request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransitionOutcome {
    /// The delay elapsed and the new page became visible
    Applied { page: usize, page_size: usize },
    /// The request was dropped without touching the state
    Ignored,
    /// The controller was torn down before the delay elapsed
    Discarded,
}

/// Handle to a navigation request.
///
/// Awaiting it resolves once the transition has been applied or discarded.
/// Dropping it does not cancel the transition.
#[derive(Debug)]
pub struct Transition {
    inner: TransitionInner,
}

#[derive(Debug)]
enum TransitionInner {
    Resolved(TransitionOutcome),
    Pending(JoinHandle<TransitionOutcome>),
}

impl Transition {
    fn resolved(outcome: TransitionOutcome) -> Self {
        Self {
            inner: TransitionInner::Resolved(outcome),
        }
    }

    fn pending(handle: JoinHandle<TransitionOutcome>) -> Self {
        Self {
            inner: TransitionInner::Pending(handle),
        }
    }

    /// Whether the request was rejected up front
    pub fn is_ignored(&self) -> bool {
        matches!(
            self.inner,
            TransitionInner::Resolved(TransitionOutcome::Ignored)
        )
    }

    /// Wait for the transition to settle
    pub async fn finished(self) -> TransitionOutcome {
        match self.inner {
            TransitionInner::Resolved(outcome) => outcome,
            // An aborted completion task means the controller went away.
            TransitionInner::Pending(handle) => handle.await.unwrap_or(TransitionOutcome::Discarded),
        }
    }
}

impl IntoFuture for Transition {
    type Output = TransitionOutcome;
    type IntoFuture = BoxFuture<'static, TransitionOutcome>;

    fn into_future(self) -> Self::IntoFuture {
        self.finished().boxed()
    }
}

/// Counters for navigation requests seen by a controller
#[derive(Debug, Clone, Default, Serialize)]
pub struct NavigationStats {
    /// Requests that started a transition
    pub accepted: u64,
    /// Requests dropped because a transition was running or nothing can be paged
    pub ignored: u64,
    /// Accepted requests by intent
    pub patterns: BTreeMap<&'static str, u64>,
}

impl NavigationStats {
    fn record(&mut self, pattern: &'static str) {
        self.accepted += 1;
        *self.patterns.entry(pattern).or_insert(0) += 1;
    }
}

/// Owner of the page state for one collection.
///
/// The state is published through a watch channel; renderers call
/// [`PageController::subscribe`] to be woken on every change. Navigation
/// methods spawn the completion on the current tokio runtime and must be
/// called from within one.
#[derive(Debug)]
pub struct PageController<T> {
    items: Arc<[T]>,
    delay: Duration,
    state: Arc<watch::Sender<PageState>>,
    /// Set under the state lock on teardown; completions check it under the same lock
    disposed: Arc<AtomicBool>,
    pending: Option<AbortHandle>,
    stats: NavigationStats,
}

impl<T> PageController<T> {
    /// Create a controller with the default transition delay
    #[cfg(test)]
    pub fn new(items: impl Into<Arc<[T]>>, page_size: usize) -> Self {
        Self::with_delay(items, page_size, DEFAULT_TRANSITION_DELAY)
    }

    /// Create a controller with a custom transition delay
    pub fn with_delay(items: impl Into<Arc<[T]>>, page_size: usize, delay: Duration) -> Self {
        let items = items.into();
        let layout = PageLayout::new(items.len(), page_size);
        let (state, _) = watch::channel(PageState::settled(layout, 1));

        debug!(
            total_items = layout.total_items(),
            page_size = layout.page_size(),
            total_pages = layout.total_pages(),
            "Page controller initialized"
        );

        Self {
            items,
            delay,
            state: Arc::new(state),
            disposed: Arc::new(AtomicBool::new(false)),
            pending: None,
            stats: NavigationStats::default(),
        }
    }

    /// Create a controller using the page size and delay from configuration
    pub fn from_config(items: impl Into<Arc<[T]>>, config: &Config) -> Self {
        Self::with_delay(items, config.page_size, config.transition_delay())
    }

    /// Current state
    pub fn snapshot(&self) -> PageState {
        *self.state.borrow()
    }

    /// Receiver that is notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<PageState> {
        self.state.subscribe()
    }

    pub fn stats(&self) -> &NavigationStats {
        &self.stats
    }

    /// Items on the current page
    pub fn visible_slice(&self) -> &[T] {
        let range = self.snapshot().item_range();
        &self.items[range]
    }

    /// Request a transition to `target`, clamped into the valid page range
    pub fn request_page(&mut self, target: i64) -> Transition {
        self.navigate("goto", target)
    }

    /// Request a new page size.
    ///
    /// The current page is kept when it still exists and otherwise clamped
    /// to the new last page.
    pub fn request_page_size_change(&mut self, new_size: usize) -> Transition {
        let current = self.snapshot();
        let layout = PageLayout::new(current.total_items, new_size);
        let page = current.current_page.min(layout.total_pages()).max(1);
        self.begin("page_size", layout, page)
    }

    pub fn next_page(&mut self) -> Transition {
        let current = as_target(self.snapshot().current_page);
        self.navigate("next", current.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> Transition {
        let current = as_target(self.snapshot().current_page);
        self.navigate("previous", current.saturating_sub(1))
    }

    pub fn first_page(&mut self) -> Transition {
        self.navigate("first", 1)
    }

    pub fn last_page(&mut self) -> Transition {
        let last = as_target(self.snapshot().total_pages);
        self.navigate("last", last)
    }

    /// Move `delta` pages forward (or backward when negative)
    pub fn jump(&mut self, delta: i64) -> Transition {
        let current = as_target(self.snapshot().current_page);
        self.navigate("jump", current.saturating_add(delta))
    }

    /// Tear the controller down, discarding any pending transition
    pub fn dispose(self) {}

    fn navigate(&mut self, pattern: &'static str, target: i64) -> Transition {
        let layout = self.snapshot().layout();
        let page = layout.clamp_page(target);
        self.begin(pattern, layout, page)
    }

    fn begin(&mut self, pattern: &'static str, layout: PageLayout, page: usize) -> Transition {
        let current = self.snapshot();

        if current.is_loading {
            self.stats.ignored += 1;
            debug!(pattern, page, "Ignoring navigation request during transition");
            return Transition::resolved(TransitionOutcome::Ignored);
        }

        if current.is_empty() {
            self.stats.ignored += 1;
            debug!(pattern, "Ignoring navigation request on empty collection");
            return Transition::resolved(TransitionOutcome::Ignored);
        }

        self.stats.record(pattern);
        self.state.send_modify(|state| state.is_loading = true);
        debug!(
            pattern,
            from = current.current_page,
            to = page,
            page_size = layout.page_size(),
            "Page transition started"
        );

        let deadline = Instant::now() + self.delay;
        let state = Arc::downgrade(&self.state);
        let disposed = Arc::clone(&self.disposed);
        let handle = tokio::spawn(async move {
            sleep_until(deadline).await;

            let applied = state
                .upgrade()
                .is_some_and(|state| apply_settled(&state, &disposed, PageState::settled(layout, page)));
            if !applied {
                debug!(page, "Page controller gone, discarding transition");
                return TransitionOutcome::Discarded;
            }
            debug!(page, page_size = layout.page_size(), "Page transition applied");

            TransitionOutcome::Applied {
                page,
                page_size: layout.page_size(),
            }
        });

        self.pending = Some(handle.abort_handle());
        Transition::pending(handle)
    }
}

/// Publish `settled` unless the controller has been torn down
fn apply_settled(state: &watch::Sender<PageState>, disposed: &AtomicBool, settled: PageState) -> bool {
    state.send_if_modified(|current| {
        if disposed.load(Ordering::Acquire) {
            return false;
        }
        *current = settled;
        true
    })
}

impl<T> Drop for PageController<T> {
    fn drop(&mut self) {
        // Taking the state lock orders teardown against an in-flight completion.
        self.state.send_if_modified(|_| {
            self.disposed.store(true, Ordering::Release);
            false
        });
        if let Some(pending) = self.pending.take() {
            if !pending.is_finished() {
                debug!("Discarding pending page transition");
            }
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(len: usize) -> Vec<usize> {
        (0..len).collect()
    }

    async fn settle() {
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_state() {
        let controller = PageController::new(numbers(50), 8);
        let state = controller.snapshot();

        assert_eq!(state.current_page, 1);
        assert_eq!(state.total_pages, 7);
        assert!(!state.is_loading);
        assert_eq!(controller.visible_slice(), &[0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_range_request_clamps_to_last_page() {
        let mut controller = PageController::new(numbers(50), 8);

        let transition = controller.request_page(10);
        assert!(controller.snapshot().is_loading);

        let outcome = transition.await;
        assert_eq!(outcome, TransitionOutcome::Applied { page: 7, page_size: 8 });
        assert_eq!(controller.snapshot().current_page, 7);
        assert_eq!(controller.visible_slice(), &[48, 49]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_negative_request_clamps_to_first_page() {
        let mut controller = PageController::new(numbers(50), 8);
        controller.request_page(4).await;

        controller.request_page(-12).await;
        assert_eq!(controller.snapshot().current_page, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_state_flips_together_after_delay() {
        let mut controller = PageController::new(numbers(50), 8);

        let transition = controller.request_page(3);
        settle().await;
        tokio::time::advance(Duration::from_millis(499)).await;
        settle().await;

        let state = controller.snapshot();
        assert!(state.is_loading);
        assert_eq!(state.current_page, 1);
        assert_eq!(controller.visible_slice(), &[0, 1, 2, 3, 4, 5, 6, 7]);

        tokio::time::advance(Duration::from_millis(1)).await;
        let outcome = transition.await;
        assert_eq!(outcome, TransitionOutcome::Applied { page: 3, page_size: 8 });

        let state = controller.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.current_page, 3);
        assert_eq!(controller.visible_slice(), &[16, 17, 18, 19, 20, 21, 22, 23]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_loading_then_settled() {
        let mut controller = PageController::new(numbers(20), 5);
        let mut rx = controller.subscribe();

        let transition = controller.request_page(2);
        rx.changed().await.unwrap();
        {
            let state = rx.borrow_and_update();
            assert!(state.is_loading);
            assert_eq!(state.current_page, 1);
        }

        rx.changed().await.unwrap();
        let state = *rx.borrow_and_update();
        assert!(!state.is_loading);
        assert_eq!(state.current_page, 2);

        transition.await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_requesting_current_page_is_idempotent() {
        let mut controller = PageController::new(numbers(50), 8);
        controller.request_page(4).await;

        let transition = controller.request_page(4);
        assert!(controller.snapshot().is_loading);
        transition.await;

        let state = controller.snapshot();
        assert_eq!(state.current_page, 4);
        assert!(!state.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_boundary_requests_still_transition() {
        let mut controller = PageController::new(numbers(50), 8);

        let transition = controller.previous_page();
        assert!(!transition.is_ignored());
        assert!(controller.snapshot().is_loading);
        assert_eq!(transition.await, TransitionOutcome::Applied { page: 1, page_size: 8 });

        controller.last_page().await;
        assert_eq!(controller.snapshot().current_page, 7);

        controller.next_page().await;
        assert_eq!(controller.snapshot().current_page, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_relative_navigation() {
        let mut controller = PageController::new(numbers(100), 5);

        controller.next_page().await;
        assert_eq!(controller.snapshot().current_page, 2);

        controller.jump(JUMP_PAGES).await;
        assert_eq!(controller.snapshot().current_page, 7);

        controller.previous_page().await;
        assert_eq!(controller.snapshot().current_page, 6);

        controller.jump(-JUMP_PAGES * 4).await;
        assert_eq!(controller.snapshot().current_page, 1);

        controller.last_page().await;
        assert_eq!(controller.snapshot().current_page, 20);

        controller.first_page().await;
        assert_eq!(controller.snapshot().current_page, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_size_growth_clamps_current_page() {
        let mut controller = PageController::new(numbers(100), 10);
        controller.request_page(5).await;

        let transition = controller.request_page_size_change(25);
        let during = controller.snapshot();
        assert!(during.is_loading);
        assert_eq!(during.page_size, 10);
        assert_eq!(during.current_page, 5);
        assert_eq!(controller.visible_slice().len(), 10);

        assert_eq!(
            transition.await,
            TransitionOutcome::Applied { page: 4, page_size: 25 }
        );

        let state = controller.snapshot();
        assert_eq!(state.page_size, 25);
        assert_eq!(state.total_pages, 4);
        assert_eq!(state.current_page, 4);
        assert_eq!(controller.visible_slice().first(), Some(&75));
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_size_shrink_keeps_current_page() {
        let mut controller = PageController::new(numbers(100), 25);
        controller.request_page(2).await;

        controller.request_page_size_change(10).await;

        let state = controller.snapshot();
        assert_eq!(state.total_pages, 10);
        assert_eq!(state.current_page, 2);
        assert_eq!(controller.visible_slice(), &[10, 11, 12, 13, 14, 15, 16, 17, 18, 19]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_page_size_is_raised_to_one() {
        let mut controller = PageController::new(numbers(3), 2);
        controller.request_page_size_change(0).await;

        let state = controller.snapshot();
        assert_eq!(state.page_size, 1);
        assert_eq!(state.total_pages, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_collection_ignores_navigation() {
        let mut controller: PageController<usize> = PageController::new(Vec::new(), 8);
        let state = controller.snapshot();
        assert_eq!(state.total_pages, 0);
        assert!(controller.visible_slice().is_empty());

        let transition = controller.request_page(3);
        assert!(transition.is_ignored());
        assert!(!controller.snapshot().is_loading);
        assert_eq!(transition.await, TransitionOutcome::Ignored);

        assert!(controller.next_page().is_ignored());
        assert!(controller.request_page_size_change(4).is_ignored());
        assert_eq!(controller.snapshot(), state);
    }

    #[tokio::test(start_paused = true)]
    async fn test_requests_during_transition_are_ignored() {
        let mut controller = PageController::new(numbers(50), 8);

        let first = controller.request_page(3);
        let second = controller.request_page(5);
        assert!(second.is_ignored());
        assert!(controller.request_page_size_change(4).is_ignored());

        assert_eq!(first.await, TransitionOutcome::Applied { page: 3, page_size: 8 });
        assert_eq!(controller.snapshot().current_page, 3);
        assert_eq!(controller.snapshot().page_size, 8);

        let stats = controller.stats();
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.ignored, 2);
        assert_eq!(stats.patterns.get("goto"), Some(&1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_discards_pending_transition() {
        let mut controller = PageController::new(numbers(50), 8);
        let rx = controller.subscribe();

        let transition = controller.request_page(4);
        controller.dispose();

        assert_eq!(transition.await, TransitionOutcome::Discarded);
        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;

        let state = *rx.borrow();
        assert!(state.is_loading);
        assert_eq!(state.current_page, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_after_teardown_leaves_state_untouched() {
        let controller = PageController::new(numbers(50), 8);
        let state = Arc::clone(&controller.state);
        let disposed = Arc::clone(&controller.disposed);
        let rx = state.subscribe();
        let layout = PageLayout::new(50, 8);

        assert!(apply_settled(&state, &disposed, PageState::settled(layout, 2)));
        assert_eq!(rx.borrow().current_page, 2);

        // A completion that already holds the state when teardown runs
        drop(controller);
        assert!(!apply_settled(&state, &disposed, PageState::settled(layout, 5)));

        let after = *rx.borrow();
        assert_eq!(after.current_page, 2);
        assert!(!after.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_still_goes_through_loading() {
        let mut controller = PageController::with_delay(numbers(10), 3, Duration::ZERO);

        let transition = controller.request_page(2);
        assert!(controller.snapshot().is_loading);
        transition.await;
        assert_eq!(controller.snapshot().current_page, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_independent_controllers() {
        let mut a = PageController::new(numbers(30), 10);
        let b = PageController::new(numbers(30), 10);

        a.request_page(3).await;
        assert_eq!(a.snapshot().current_page, 3);
        assert_eq!(b.snapshot().current_page, 1);
    }
}
