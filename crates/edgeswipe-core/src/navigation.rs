#![forbid(unsafe_code)]

//! Bounded category navigation.
//!
//! [`NavigationController`] owns the active category index and is the only
//! place it changes. Every change goes through
//! [`switch_to`](NavigationController::switch_to), which bounds-checks the
//! target, clears the near-edge hints, notifies the host and scrolls the
//! content pane back to the top.
//!
//! # Invariants
//!
//! 1. `active_index < item_count` whenever `item_count > 0`.
//! 2. With zero items every switch is rejected and `active_index` is 0.
//! 3. `on_switch` fires exactly once per accepted switch and never for a
//!    rejected one.
//! 4. A hint is only shown when switching in its direction is possible.

use std::time::Duration;

use web_time::Instant;

use crate::container::{ScrollBehavior, ScrollContainer};
use crate::swipe::{Step, SwipeDirection};
use crate::throttle::Throttle;

/// Default interval between near-edge hint evaluations.
pub const DEFAULT_SCROLL_HINT_INTERVAL: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// NavigationState
// ---------------------------------------------------------------------------

/// Active position within an ordered list of categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NavigationState {
    active_index: usize,
    item_count: usize,
}

impl NavigationState {
    /// Create a state, clamping `active_index` into `0..item_count`.
    #[must_use]
    pub fn new(active_index: usize, item_count: usize) -> Self {
        Self {
            active_index: active_index.min(item_count.saturating_sub(1)),
            item_count,
        }
    }

    #[inline]
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active_index
    }

    #[inline]
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    /// Whether `index` addresses an existing item.
    #[inline]
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        index < self.item_count
    }

    /// Index reached by `step`, if it stays in range.
    #[must_use]
    pub fn target(&self, step: Step) -> Option<usize> {
        step.apply(self.active_index).filter(|&i| self.contains(i))
    }
}

// ---------------------------------------------------------------------------
// NavigationController
// ---------------------------------------------------------------------------

/// Owns the active index and the near-edge hint flags.
pub struct NavigationController<C> {
    state: NavigationState,
    container: Option<C>,
    show_top_hint: bool,
    show_bottom_hint: bool,
    hint_throttle: Throttle,
    edge_tolerance: f64,
    on_switch: Option<Box<dyn FnMut(usize)>>,
}

impl<C> std::fmt::Debug for NavigationController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("state", &self.state)
            .field("bound", &self.container.is_some())
            .field("show_top_hint", &self.show_top_hint)
            .field("show_bottom_hint", &self.show_bottom_hint)
            .finish_non_exhaustive()
    }
}

impl<C: ScrollContainer> NavigationController<C> {
    /// Create a controller over `item_count` items starting at `initial`.
    ///
    /// `initial` is clamped to the last item.
    #[must_use]
    pub fn new(initial: usize, item_count: usize) -> Self {
        Self {
            state: NavigationState::new(initial, item_count),
            container: None,
            show_top_hint: false,
            show_bottom_hint: false,
            hint_throttle: Throttle::new(DEFAULT_SCROLL_HINT_INTERVAL),
            edge_tolerance: crate::edge::DEFAULT_EDGE_TOLERANCE,
            on_switch: None,
        }
    }

    /// Set the interval between hint evaluations.
    #[must_use]
    pub fn with_hint_interval(mut self, interval: Duration) -> Self {
        self.set_hint_interval(interval);
        self
    }

    /// Set the edge tolerance used by hint evaluation.
    #[must_use]
    pub fn with_edge_tolerance(mut self, tolerance: f64) -> Self {
        self.set_edge_tolerance(tolerance);
        self
    }

    pub fn set_hint_interval(&mut self, interval: Duration) {
        self.hint_throttle.set_interval(interval);
    }

    pub fn set_edge_tolerance(&mut self, tolerance: f64) {
        self.edge_tolerance = tolerance;
    }

    pub fn bind_container(&mut self, container: C) {
        self.container = Some(container);
    }

    pub fn unbind_container(&mut self) -> Option<C> {
        self.container.take()
    }

    #[must_use]
    pub fn container(&self) -> Option<&C> {
        self.container.as_ref()
    }

    /// Register the callback invoked with the new index after each switch.
    pub fn set_on_switch(&mut self, f: impl FnMut(usize) + 'static) {
        self.on_switch = Some(Box::new(f));
    }

    /// Make `new_index` the active category.
    ///
    /// Returns `false` and changes nothing when `new_index` is out of range.
    /// Switching to the already-active index is accepted and re-runs the
    /// side effects.
    pub fn switch_to(&mut self, new_index: usize) -> bool {
        let _span = tracing::debug_span!("switch_to", index = new_index).entered();
        if !self.state.contains(new_index) {
            tracing::debug!(
                index = new_index,
                item_count = self.state.item_count,
                "switch rejected: index out of range"
            );
            return false;
        }

        let from = self.state.active_index;
        self.state.active_index = new_index;
        self.show_top_hint = false;
        self.show_bottom_hint = false;
        tracing::debug!(from, index = new_index, "switched category");

        if let Some(on_switch) = self.on_switch.as_mut() {
            on_switch(new_index);
        }
        if let Some(container) = self.container.as_ref() {
            container.scroll_to(0.0, ScrollBehavior::Smooth);
        }
        true
    }

    /// Apply a relative step. Steps off either end are dropped.
    pub fn step(&mut self, step: Step) -> bool {
        match step.apply(self.state.active_index) {
            Some(index) => self.switch_to(index),
            None => {
                tracing::debug!(?step, "switch rejected: already at the first item");
                false
            }
        }
    }

    /// Apply the navigation policy for a recognized swipe.
    pub fn navigate(&mut self, direction: SwipeDirection) -> bool {
        self.step(direction.step())
    }

    /// Re-evaluate the near-edge hints from the bound container.
    ///
    /// Throttled; returns whether the evaluation ran.
    pub fn on_scroll(&mut self, now: Instant) -> bool {
        let Some(container) = self.container.as_ref() else {
            return false;
        };
        if !self.hint_throttle.try_acquire(now) {
            tracing::trace!("scroll hint update throttled");
            return false;
        }

        let metrics = container.metrics();
        let show_top =
            metrics.at_top(self.edge_tolerance) && self.state.target(Step::Previous).is_some();
        let show_bottom =
            metrics.at_bottom(self.edge_tolerance) && self.state.target(Step::Next).is_some();
        if show_top != self.show_top_hint || show_bottom != self.show_bottom_hint {
            tracing::trace!(show_top, show_bottom, "near-edge hints changed");
        }
        self.show_top_hint = show_top;
        self.show_bottom_hint = show_bottom;
        true
    }

    /// Whether the "switch to previous" hint is showing.
    #[inline]
    #[must_use]
    pub fn show_top_hint(&self) -> bool {
        self.show_top_hint
    }

    /// Whether the "switch to next" hint is showing.
    #[inline]
    #[must_use]
    pub fn show_bottom_hint(&self) -> bool {
        self.show_bottom_hint
    }

    /// Index the top hint would switch to, while it is showing.
    #[must_use]
    pub fn top_hint_target(&self) -> Option<usize> {
        self.show_top_hint
            .then(|| self.state.target(Step::Previous))
            .flatten()
    }

    /// Index the bottom hint would switch to, while it is showing.
    #[must_use]
    pub fn bottom_hint_target(&self) -> Option<usize> {
        self.show_bottom_hint
            .then(|| self.state.target(Step::Next))
            .flatten()
    }

    /// Replace the item count, clamping the active index.
    ///
    /// Does not notify `on_switch`; the host changed the list itself.
    pub fn set_item_count(&mut self, item_count: usize) {
        let before = self.state.active_index;
        self.state = NavigationState::new(before, item_count);
        self.show_top_hint = false;
        self.show_bottom_hint = false;
        if self.state.active_index != before {
            tracing::debug!(
                from = before,
                index = self.state.active_index,
                item_count,
                "active index clamped to new item count"
            );
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> NavigationState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.state.active_index
    }

    #[inline]
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.state.item_count
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
