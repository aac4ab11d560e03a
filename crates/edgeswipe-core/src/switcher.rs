#![forbid(unsafe_code)]

//! One recognizer and one controller over a shared content pane.
//!
//! [`SwipeSwitcher`] is the entry point a host wires to its event loop. It
//! forwards touch input to the [`GestureRecognizer`], routes recognized swipes
//! through the [`Step`](crate::swipe::Step) policy into the
//! [`NavigationController`], and gates near-edge hint updates on the
//! re-entrancy lock.
//!
//! # Usage
//!
//! ```
//! use edgeswipe_core::{
//!     ScrollBehavior, ScrollContainer, ScrollMetrics, SwipeConfig, SwipeSwitcher, TouchPoint,
//! };
//! use std::time::Duration;
//! use web_time::Instant;
//!
//! #[derive(Clone)]
//! struct Pane;
//!
//! impl ScrollContainer for Pane {
//!     fn metrics(&self) -> ScrollMetrics {
//!         ScrollMetrics::new(0.0, 2000.0, 600.0)
//!     }
//!     fn scroll_to(&self, _offset: f64, _behavior: ScrollBehavior) {}
//! }
//!
//! let mut switcher = SwipeSwitcher::new(SwipeConfig::default(), 2, 4);
//! switcher.bind_container(Pane);
//!
//! let t = Instant::now();
//! switcher.on_touch_start(TouchPoint::new(100.0, 100.0), t);
//! let switched = switcher.on_touch_end(
//!     Some(TouchPoint::new(100.0, 200.0)),
//!     t + Duration::from_millis(80),
//! );
//! // Pulling down at the top reveals the previous category.
//! assert_eq!(switched, Some(1));
//! ```

use web_time::Instant;

use crate::config::SwipeConfig;
use crate::container::ScrollContainer;
use crate::event::{TouchInput, TouchPoint};
use crate::gesture::{GestureRecognizer, PreventDefault};
use crate::navigation::{NavigationController, NavigationState};
use crate::swipe::SwipeDirection;

/// Swipe-driven category switcher.
#[derive(Debug)]
pub struct SwipeSwitcher<C> {
    recognizer: GestureRecognizer<C>,
    navigation: NavigationController<C>,
}

impl<C: ScrollContainer + Clone> SwipeSwitcher<C> {
    /// Create a switcher over `item_count` categories, starting at `initial`.
    #[must_use]
    pub fn new(config: SwipeConfig, initial: usize, item_count: usize) -> Self {
        let navigation = NavigationController::new(initial, item_count)
            .with_hint_interval(config.scroll_hint_interval())
            .with_edge_tolerance(config.edge_tolerance);
        Self {
            recognizer: GestureRecognizer::new(config),
            navigation,
        }
    }

    /// Bind the content pane to both the recognizer and the controller.
    pub fn bind_container(&mut self, container: C) {
        self.recognizer.bind_container(container.clone());
        self.navigation.bind_container(container);
    }

    /// Unbind the content pane. A touch session in progress is dropped.
    pub fn unbind_container(&mut self) -> Option<C> {
        self.recognizer.unbind_container();
        self.navigation.unbind_container()
    }

    /// Register the callback invoked with each recognized swipe direction.
    ///
    /// Fires before the controller applies the step, including for swipes
    /// the controller then drops at either end of the list.
    pub fn set_on_navigate(&mut self, f: impl FnMut(SwipeDirection) + 'static) {
        self.recognizer.set_on_navigate(f);
    }

    /// Register the callback invoked with the new index after each switch.
    pub fn set_on_switch(&mut self, f: impl FnMut(usize) + 'static) {
        self.navigation.set_on_switch(f);
    }

    // --- Touch input ---

    pub fn on_touch_start(&mut self, point: TouchPoint, now: Instant) -> bool {
        self.recognizer.on_touch_start(point, now)
    }

    pub fn on_touch_move(
        &mut self,
        point: TouchPoint,
        now: Instant,
        prevent: &mut impl PreventDefault,
    ) -> bool {
        self.recognizer.on_touch_move(point, now, prevent)
    }

    /// Finish the touch session. Returns the new active index if it switched.
    pub fn on_touch_end(&mut self, point: Option<TouchPoint>, now: Instant) -> Option<usize> {
        let direction = self.recognizer.on_touch_end(point, now)?;
        self.apply(direction)
    }

    pub fn on_touch_cancel(&mut self) {
        self.recognizer.on_touch_cancel();
    }

    /// Dispatch a touch input. Returns the new active index if it switched.
    pub fn process(
        &mut self,
        input: &TouchInput,
        now: Instant,
        prevent: &mut impl PreventDefault,
    ) -> Option<usize> {
        let direction = self.recognizer.process(input, now, prevent)?;
        self.apply(direction)
    }

    fn apply(&mut self, direction: SwipeDirection) -> Option<usize> {
        self.navigation
            .navigate(direction)
            .then(|| self.navigation.active_index())
    }

    // --- Other input ---

    /// Sidebar tap on `index`.
    pub fn select(&mut self, index: usize) -> bool {
        self.navigation.switch_to(index)
    }

    /// Content pane scrolled. Hint evaluation is skipped while the
    /// re-entrancy lock is held. Returns whether hints were re-evaluated.
    pub fn on_scroll(&mut self, now: Instant) -> bool {
        if self.recognizer.is_navigating(now) {
            tracing::trace!("scroll hint update skipped: navigating");
            return false;
        }
        self.navigation.on_scroll(now)
    }

    /// Resolve elapsed deadlines. Returns true if the settle scroll fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.recognizer.tick(now)
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.recognizer.next_deadline()
    }

    // --- State ---

    #[must_use]
    pub fn is_navigating(&self, now: Instant) -> bool {
        self.recognizer.is_navigating(now)
    }

    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.recognizer.is_tracking()
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.navigation.active_index()
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.navigation.item_count()
    }

    #[must_use]
    pub fn state(&self) -> NavigationState {
        self.navigation.state()
    }

    /// Replace the number of categories, clamping the active index.
    pub fn set_item_count(&mut self, item_count: usize) {
        self.navigation.set_item_count(item_count);
    }

    #[must_use]
    pub fn config(&self) -> &SwipeConfig {
        self.recognizer.config()
    }

    /// Apply a new configuration to both components.
    pub fn set_config(&mut self, config: SwipeConfig) {
        self.navigation.set_hint_interval(config.scroll_hint_interval());
        self.navigation.set_edge_tolerance(config.edge_tolerance);
        self.recognizer.set_config(config);
    }

    #[must_use]
    pub fn recognizer(&self) -> &GestureRecognizer<C> {
        &self.recognizer
    }

    #[must_use]
    pub fn navigation(&self) -> &NavigationController<C> {
        &self.navigation
    }

    /// Drop any touch session and pending deadlines.
    pub fn reset(&mut self) {
        self.recognizer.reset();
    }
}
