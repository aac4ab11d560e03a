#![forbid(unsafe_code)]

//! Swipe recognition: turns one touch contact into at most one navigation intent.
//!
//! [`GestureRecognizer`] is a stateful processor over a single
//! [`TouchSession`]. It is fed touch start/move/end events and the current
//! time, and reports a [`SwipeDirection`] when a completed touch sequence is a
//! valid swipe for the edge the content pane was at when the finger landed.
//!
//! # State Machine
//!
//! ```text
//!            start @ Top/Bottom              end (valid)
//!   Idle ─────────────────────────▶ Tracking ───────────▶ Idle + lock + settle
//!    ▲  start @ None (rejected)        │ move (throttled)
//!    └──────────────── end / cancel ◀──┘
//! ```
//!
//! # Invariants
//!
//! 1. A session only exists if the bound container was at an edge when it
//!    started. A rejected start never produces a swipe.
//! 2. At most one swipe is reported per session; the session is cleared by
//!    every end or cancel, valid or not.
//! 3. `Down` is only reported for sessions that started at `Top`, `Up` only for
//!    sessions that started at `Bottom`. Horizontal swipes are not edge-gated.
//! 4. While the re-entrancy lock is held, ends never report a swipe.
//! 5. Moves never report a swipe; they only update the session and may ask the
//!    platform to suppress native scrolling.
//!
//! # Failure Modes
//!
//! - No bound container at start: the session is not created (fail closed).
//! - Non-finite touch coordinates: the start is rejected, or the move/end
//!   point is ignored.
//! - Deadlines overflowing `Instant`: the delay collapses to zero.

use std::time::Duration;

use web_time::Instant;

use crate::config::{Axes, SwipeConfig};
use crate::container::{ScrollBehavior, ScrollContainer};
use crate::edge::EdgeState;
use crate::event::{TouchInput, TouchPhase, TouchPoint};
use crate::swipe::{SwipeDirection, SwipeResult};
use crate::throttle::Throttle;

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Capability handed in with each touch-move to cancel native scrolling.
///
/// Implemented for any `FnMut()`, so a closure calling the platform's
/// `preventDefault` (or flipping a test flag) can be passed directly.
pub trait PreventDefault {
    fn prevent_default(&mut self);
}

impl<F: FnMut()> PreventDefault for F {
    fn prevent_default(&mut self) {
        self();
    }
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// The live touch contact being tracked.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchSession {
    /// Where the finger landed.
    pub start: TouchPoint,
    /// Last recorded position.
    pub current: TouchPoint,
    /// Edge the container was at when the finger landed. Never `None`.
    pub edge_at_start: EdgeState,
    /// Monotonic identifier, for log correlation.
    pub session_id: u64,
    /// Time of the last move that passed the throttle.
    pub last_processed_at: Option<Instant>,
}

impl TouchSession {
    /// Displacement as `(start.x - current.x, start.y - current.y)`.
    #[must_use]
    pub fn displacement(&self) -> (f64, f64) {
        self.start.delta_from(self.current)
    }
}

/// Travel must strictly exceed the threshold. A NaN threshold never clears.
fn clears_threshold(config: &SwipeConfig, distance: f64) -> bool {
    distance > config.threshold
}

fn deadline(now: Instant, delay: Duration) -> Instant {
    now.checked_add(delay).unwrap_or(now)
}

// ---------------------------------------------------------------------------
// GestureRecognizer
// ---------------------------------------------------------------------------

/// Edge-aware swipe recognizer bound to one scroll container.
///
/// Call the `on_touch_*` handlers (or [`process`](GestureRecognizer::process))
/// for each touch event, and [`tick`](GestureRecognizer::tick) whenever a
/// pending deadline ([`next_deadline`](GestureRecognizer::next_deadline)) may
/// have passed.
pub struct GestureRecognizer<C> {
    config: SwipeConfig,
    axes: Axes,
    container: Option<C>,

    // Touch tracking
    session: Option<TouchSession>,
    next_session_id: u64,
    move_throttle: Throttle,

    // Post-swipe timers
    navigating_until: Option<Instant>,
    settle_at: Option<Instant>,

    on_navigate: Option<Box<dyn FnMut(SwipeDirection)>>,
}

impl<C> std::fmt::Debug for GestureRecognizer<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureRecognizer")
            .field("bound", &self.container.is_some())
            .field("session", &self.session)
            .field("navigating_until", &self.navigating_until)
            .field("settle_at", &self.settle_at)
            .finish_non_exhaustive()
    }
}

impl<C: ScrollContainer> GestureRecognizer<C> {
    /// Create an unbound recognizer with the given configuration.
    #[must_use]
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            axes: config.axes(),
            move_throttle: Throttle::new(config.throttle_interval()),
            config,
            container: None,
            session: None,
            next_session_id: 1,
            navigating_until: None,
            settle_at: None,
            on_navigate: None,
        }
    }

    /// Bind the scroll container that edge queries and settle scrolls use.
    pub fn bind_container(&mut self, container: C) {
        self.container = Some(container);
    }

    /// Unbind the container. A session in progress is dropped.
    pub fn unbind_container(&mut self) -> Option<C> {
        self.session = None;
        self.container.take()
    }

    /// The bound container, if any.
    #[must_use]
    pub fn container(&self) -> Option<&C> {
        self.container.as_ref()
    }

    /// Register the callback invoked once per valid swipe.
    pub fn set_on_navigate(&mut self, f: impl FnMut(SwipeDirection) + 'static) {
        self.on_navigate = Some(Box::new(f));
    }

    /// Dispatch a touch input to the matching handler.
    ///
    /// Only the first contact is read. Returns the swipe direction when an
    /// `End` completes a valid swipe.
    pub fn process(
        &mut self,
        input: &TouchInput,
        now: Instant,
        prevent: &mut impl PreventDefault,
    ) -> Option<SwipeDirection> {
        match input.phase {
            TouchPhase::Start => {
                match input.primary() {
                    Some(point) => {
                        self.on_touch_start(point, now);
                    }
                    None => {
                        tracing::debug!("touch start without contacts; session cleared");
                        self.session = None;
                    }
                }
                None
            }
            TouchPhase::Move => {
                if let Some(point) = input.primary() {
                    self.on_touch_move(point, now, prevent);
                }
                None
            }
            TouchPhase::End => self.on_touch_end(input.primary(), now),
            TouchPhase::Cancel => {
                self.on_touch_cancel();
                None
            }
        }
    }

    /// Begin a session if the bound container is at an edge.
    ///
    /// Returns whether a session was started. Any previous session is
    /// replaced.
    pub fn on_touch_start(&mut self, point: TouchPoint, now: Instant) -> bool {
        let _span = tracing::debug_span!("touch_start", x = point.x, y = point.y).entered();
        self.session = None;

        if !point.is_finite() {
            tracing::debug!("touch start rejected: non-finite coordinates");
            return false;
        }
        let Some(container) = self.container.as_ref() else {
            tracing::debug!("touch start rejected: no container bound");
            return false;
        };
        let edge = container.metrics().edge(self.config.edge_tolerance);
        if !edge.is_edge() {
            tracing::debug!(?edge, "touch start rejected: container not at an edge");
            return false;
        }

        let session_id = self.next_session_id;
        self.next_session_id = self.next_session_id.wrapping_add(1);
        self.move_throttle.reset();
        self.session = Some(TouchSession {
            start: point,
            current: point,
            edge_at_start: edge,
            session_id,
            last_processed_at: None,
        });
        tracing::debug!(session_id, ?edge, at = ?now, "touch session started");
        true
    }

    /// Track finger movement, rate-limited by the move throttle.
    ///
    /// Calls `prevent` once travel along an enabled axis exceeds the threshold,
    /// so the pane does not scroll under the gesture. The start edge is not
    /// consulted here; it only decides navigation at release.
    /// Returns whether the move was processed.
    pub fn on_touch_move(
        &mut self,
        point: TouchPoint,
        now: Instant,
        prevent: &mut impl PreventDefault,
    ) -> bool {
        let Some(session) = self.session.as_mut() else {
            tracing::trace!("touch move ignored: no active session");
            return false;
        };
        if !point.is_finite() {
            tracing::trace!(session_id = session.session_id, "touch move ignored: non-finite");
            return false;
        }
        if !self.move_throttle.try_acquire(now) {
            tracing::trace!(session_id = session.session_id, "touch move throttled");
            return false;
        }

        session.current = point;
        session.last_processed_at = Some(now);
        let (dx, dy) = session.displacement();
        tracing::trace!(session_id = session.session_id, dx, dy, "touch move");

        if !self.config.prevent_scroll {
            return true;
        }
        let Some(swipe) = SwipeResult::classify(dx, dy) else {
            return true;
        };
        if self.axes.allows_axis(swipe.is_horizontal)
            && clears_threshold(&self.config, swipe.distance)
        {
            tracing::trace!(
                session_id = session.session_id,
                direction = %swipe.direction,
                "suppressing native scroll"
            );
            prevent.prevent_default();
        }
        true
    }

    /// Finish the session and report a swipe if it is valid.
    ///
    /// `point` is the release position (if the platform reports one); it is
    /// recorded as the final current coordinate because throttling may have
    /// dropped the last moves. The session is cleared whatever the outcome.
    pub fn on_touch_end(&mut self, point: Option<TouchPoint>, now: Instant) -> Option<SwipeDirection> {
        let Some(mut session) = self.session.take() else {
            tracing::trace!("touch end ignored: no active session");
            return None;
        };
        let _span = tracing::debug_span!("touch_end", session_id = session.session_id).entered();

        if let Some(point) = point.filter(|p| p.is_finite()) {
            session.current = point;
        }

        if self.is_navigating(now) {
            tracing::debug!("swipe dropped: navigation lock held");
            return None;
        }

        let (dx, dy) = session.displacement();
        let Some(swipe) = SwipeResult::classify(dx, dy) else {
            tracing::debug!(dx, dy, "no swipe: no movement");
            return None;
        };
        if !self.axes.allows_axis(swipe.is_horizontal) {
            tracing::debug!(direction = %swipe.direction, "no swipe: axis disabled");
            return None;
        }
        if !clears_threshold(&self.config, swipe.distance) {
            tracing::debug!(
                direction = %swipe.direction,
                distance = swipe.distance,
                threshold = self.config.threshold,
                "no swipe: below threshold"
            );
            return None;
        }
        if !swipe.direction.allowed_from(session.edge_at_start) {
            tracing::debug!(
                direction = %swipe.direction,
                edge = ?session.edge_at_start,
                "no swipe: direction does not pull away from the start edge"
            );
            return None;
        }

        // Lock before dispatch so a callback that re-enters sees it held.
        self.navigating_until = Some(deadline(now, self.config.navigation_lock()));
        self.settle_at = Some(deadline(now, self.config.settle_delay()));
        tracing::debug!(
            direction = %swipe.direction,
            distance = swipe.distance,
            edge = ?session.edge_at_start,
            "swipe recognized"
        );
        if let Some(on_navigate) = self.on_navigate.as_mut() {
            on_navigate(swipe.direction);
        }
        Some(swipe.direction)
    }

    /// Abandon the session without evaluating it.
    pub fn on_touch_cancel(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!(session_id = session.session_id, "touch session cancelled");
        }
    }

    /// Resolve deadlines that have passed at `now`.
    ///
    /// Fires the pending settle scroll-to-top and releases an expired
    /// re-entrancy lock. Returns true if the settle scroll fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.navigating_until.is_some_and(|until| now >= until) {
            self.navigating_until = None;
            tracing::trace!("navigation lock released");
        }

        let Some(at) = self.settle_at else {
            return false;
        };
        if now < at {
            return false;
        }
        self.settle_at = None;
        match self.container.as_ref() {
            Some(container) => {
                container.scroll_to(0.0, ScrollBehavior::Instant);
                tracing::debug!("settle delay elapsed; scrolled to top");
                true
            }
            None => {
                tracing::debug!("settle delay elapsed without a container");
                false
            }
        }
    }

    /// Earliest pending deadline, for scheduling the next [`tick`](Self::tick).
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.navigating_until, self.settle_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Whether the re-entrancy lock is held at `now`.
    #[must_use]
    pub fn is_navigating(&self, now: Instant) -> bool {
        self.navigating_until.is_some_and(|until| now < until)
    }

    /// Whether a touch session is active.
    #[inline]
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&TouchSession> {
        self.session.as_ref()
    }

    /// Drop the session and all pending timers. The container stays bound.
    pub fn reset(&mut self) {
        self.session = None;
        self.navigating_until = None;
        self.settle_at = None;
        self.move_throttle.reset();
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// Update the configuration. Applies to the next event.
    pub fn set_config(&mut self, config: SwipeConfig) {
        self.axes = config.axes();
        self.move_throttle.set_interval(config.throttle_interval());
        self.config = config;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::container::testing::FakePane;

    const MS_5: Duration = Duration::from_millis(5);
    const MS_20: Duration = Duration::from_millis(20);
    const MS_50: Duration = Duration::from_millis(50);
    const MS_100: Duration = Duration::from_millis(100);
    const MS_400: Duration = Duration::from_millis(400);

    fn pt(x: f64, y: f64) -> TouchPoint {
        TouchPoint::new(x, y)
    }

    fn recognizer(pane: &FakePane) -> GestureRecognizer<FakePane> {
        let mut gr = GestureRecognizer::new(SwipeConfig::default());
        gr.bind_container(pane.clone());
        gr
    }

    fn no_prevent() -> impl FnMut() {
        || {}
    }

    /// Start at `from`, one move to `to`, release at `to`.
    fn swipe(
        gr: &mut GestureRecognizer<FakePane>,
        t: Instant,
        from: TouchPoint,
        to: TouchPoint,
    ) -> Option<SwipeDirection> {
        gr.on_touch_start(from, t);
        gr.on_touch_move(to, t + MS_20, &mut no_prevent());
        gr.on_touch_end(Some(to), t + MS_50)
    }

    // --- Start ---

    #[test]
    fn start_at_edge_creates_session() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        assert!(gr.on_touch_start(pt(10.0, 20.0), Instant::now()));

        let session = gr.session().expect("session");
        assert_eq!(session.edge_at_start, EdgeState::Top);
        assert_eq!(session.start, pt(10.0, 20.0));
        assert_eq!(session.current, session.start);
        assert_eq!(session.last_processed_at, None);
    }

    #[test]
    fn start_mid_scroll_is_rejected() {
        let pane = FakePane::mid_scroll();
        let mut gr = recognizer(&pane);
        assert!(!gr.on_touch_start(pt(10.0, 20.0), Instant::now()));
        assert!(!gr.is_tracking());
    }

    #[test]
    fn start_without_container_fails_closed() {
        let mut gr: GestureRecognizer<FakePane> = GestureRecognizer::new(SwipeConfig::default());
        let t = Instant::now();
        assert!(!gr.on_touch_start(pt(10.0, 20.0), t));
        assert_eq!(gr.on_touch_end(Some(pt(10.0, 200.0)), t + MS_50), None);
    }

    #[test]
    fn start_with_non_finite_point_is_rejected() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        assert!(!gr.on_touch_start(pt(f64::NAN, 0.0), Instant::now()));
    }

    #[test]
    fn session_ids_increase() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        let t = Instant::now();
        gr.on_touch_start(pt(0.0, 0.0), t);
        let first = gr.session().map(|s| s.session_id);
        gr.on_touch_cancel();
        gr.on_touch_start(pt(0.0, 0.0), t + MS_5);
        let second = gr.session().map(|s| s.session_id);
        assert!(second > first);
    }

    // --- End: edge gating ---

    #[test]
    fn pull_down_at_top_is_down() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        let dir = swipe(&mut gr, Instant::now(), pt(100.0, 100.0), pt(100.0, 180.0));
        assert_eq!(dir, Some(SwipeDirection::Down));
        assert!(!gr.is_tracking());
    }

    #[test]
    fn push_up_at_top_is_rejected() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        let dir = swipe(&mut gr, Instant::now(), pt(100.0, 180.0), pt(100.0, 100.0));
        assert_eq!(dir, None);
        assert!(!gr.is_tracking());
    }

    #[test]
    fn push_up_at_bottom_is_up() {
        let pane = FakePane::at_bottom();
        let mut gr = recognizer(&pane);
        let dir = swipe(&mut gr, Instant::now(), pt(100.0, 300.0), pt(100.0, 200.0));
        assert_eq!(dir, Some(SwipeDirection::Up));
    }

    #[test]
    fn pull_down_at_bottom_is_rejected() {
        let pane = FakePane::at_bottom();
        let mut gr = recognizer(&pane);
        let dir = swipe(&mut gr, Instant::now(), pt(100.0, 200.0), pt(100.0, 300.0));
        assert_eq!(dir, None);
    }

    #[test]
    fn horizontal_swipes_ignore_edge() {
        let pane = FakePane::at_bottom();
        let mut gr = recognizer(&pane);
        let t = Instant::now();
        assert_eq!(
            swipe(&mut gr, t, pt(200.0, 100.0), pt(100.0, 110.0)),
            Some(SwipeDirection::Left)
        );
        gr.reset();
        assert_eq!(
            swipe(&mut gr, t + Duration::from_secs(1), pt(100.0, 100.0), pt(200.0, 90.0)),
            Some(SwipeDirection::Right)
        );
    }

    #[test]
    fn edge_is_sampled_at_start_only() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        let t = Instant::now();
        gr.on_touch_start(pt(100.0, 100.0), t);
        // Pane scrolls away under the finger; the start edge still governs.
        pane.set_offset(700.0);
        assert_eq!(
            gr.on_touch_end(Some(pt(100.0, 200.0)), t + MS_50),
            Some(SwipeDirection::Down)
        );
    }

    // --- End: threshold and axes ---

    #[test]
    fn threshold_is_exclusive() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        let t = Instant::now();
        assert_eq!(swipe(&mut gr, t, pt(0.0, 0.0), pt(0.0, 50.0)), None);
        assert_eq!(
            swipe(&mut gr, t + Duration::from_secs(1), pt(0.0, 0.0), pt(0.0, 50.5)),
            Some(SwipeDirection::Down)
        );
    }

    #[test]
    fn disabled_axis_never_swipes() {
        let pane = FakePane::at_top();
        let mut gr = GestureRecognizer::new(SwipeConfig {
            enable_horizontal: false,
            ..SwipeConfig::default()
        });
        gr.bind_container(pane.clone());
        let t = Instant::now();
        assert_eq!(swipe(&mut gr, t, pt(300.0, 0.0), pt(100.0, 0.0)), None);
        assert_eq!(
            swipe(&mut gr, t + Duration::from_secs(1), pt(0.0, 0.0), pt(0.0, 90.0)),
            Some(SwipeDirection::Down)
        );
    }

    #[test]
    fn end_uses_release_point() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        let t = Instant::now();
        gr.on_touch_start(pt(0.0, 0.0), t);
        // Only a small move was processed; the release point carries the swipe.
        gr.on_touch_move(pt(0.0, 10.0), t + MS_5, &mut no_prevent());
        assert_eq!(
            gr.on_touch_end(Some(pt(0.0, 120.0)), t + MS_20),
            Some(SwipeDirection::Down)
        );
    }

    #[test]
    fn end_without_point_uses_last_move() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        let t = Instant::now();
        gr.on_touch_start(pt(0.0, 0.0), t);
        gr.on_touch_move(pt(0.0, 90.0), t + MS_5, &mut no_prevent());
        assert_eq!(gr.on_touch_end(None, t + MS_20), Some(SwipeDirection::Down));
    }

    #[test]
    fn second_end_is_noop() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        let t = Instant::now();
        swipe(&mut gr, t, pt(0.0, 0.0), pt(0.0, 90.0));
        assert_eq!(gr.on_touch_end(Some(pt(0.0, 300.0)), t + MS_100), None);
    }

    #[test]
    fn cancel_clears_without_swipe() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        let t = Instant::now();
        gr.on_touch_start(pt(0.0, 0.0), t);
        gr.on_touch_move(pt(0.0, 90.0), t + MS_5, &mut no_prevent());
        gr.on_touch_cancel();
        assert_eq!(gr.on_touch_end(None, t + MS_20), None);
    }

    // --- Moves ---

    #[test]
    fn moves_without_session_are_ignored() {
        let pane = FakePane::mid_scroll();
        let mut gr = recognizer(&pane);
        let t = Instant::now();
        gr.on_touch_start(pt(0.0, 0.0), t);
        let mut prevented = false;
        assert!(!gr.on_touch_move(pt(0.0, 300.0), t + MS_20, &mut || prevented = true));
        assert!(!prevented);
    }

    #[test]
    fn moves_are_throttled() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        let t = Instant::now();
        gr.on_touch_start(pt(0.0, 0.0), t);

        let processed = (0..100u64)
            .filter(|i| {
                gr.on_touch_move(
                    pt(0.0, *i as f64),
                    t + Duration::from_micros(i * 150),
                    &mut no_prevent(),
                )
            })
            .count();
        assert_eq!(processed, 1);
        assert_eq!(gr.session().map(|s| s.current), Some(pt(0.0, 0.0)));
    }

    #[test]
    fn move_past_threshold_in_valid_direction_prevents_scroll() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        let t = Instant::now();
        gr.on_touch_start(pt(0.0, 0.0), t);

        let mut prevented = 0;
        gr.on_touch_move(pt(0.0, 30.0), t + MS_20, &mut || prevented += 1);
        assert_eq!(prevented, 0, "below threshold");
        gr.on_touch_move(pt(0.0, 80.0), t + MS_50, &mut || prevented += 1);
        assert_eq!(prevented, 1);
    }

    #[test]
    fn suppression_ignores_start_edge() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        let t = Instant::now();
        gr.on_touch_start(pt(0.0, 200.0), t);
        let mut prevented = false;
        // Up at the top cannot navigate, but it is over threshold on an enabled axis.
        gr.on_touch_move(pt(0.0, 120.0), t + MS_20, &mut || prevented = true);
        assert!(prevented);
        assert_eq!(gr.on_touch_end(Some(pt(0.0, 120.0)), t + MS_50), None);
    }

    #[test]
    fn suppression_needs_enabled_axis() {
        let pane = FakePane::at_top();
        let mut gr = GestureRecognizer::new(SwipeConfig {
            enable_horizontal: false,
            ..SwipeConfig::default()
        });
        gr.bind_container(pane.clone());
        let t = Instant::now();
        gr.on_touch_start(pt(200.0, 200.0), t);
        let mut prevented = false;
        gr.on_touch_move(pt(100.0, 210.0), t + MS_20, &mut || prevented = true);
        assert!(!prevented);
    }

    #[test]
    fn nan_threshold_never_navigates_or_suppresses() {
        let pane = FakePane::at_top();
        let mut gr = GestureRecognizer::new(SwipeConfig {
            threshold: f64::NAN,
            ..SwipeConfig::default()
        });
        gr.bind_container(pane.clone());
        let t = Instant::now();
        gr.on_touch_start(pt(0.0, 100.0), t);
        let mut prevented = false;
        gr.on_touch_move(pt(0.0, 300.0), t + MS_20, &mut || prevented = true);
        assert!(!prevented);
        assert_eq!(gr.on_touch_end(Some(pt(0.0, 400.0)), t + MS_50), None);
        assert!(!gr.is_navigating(t + MS_50));
    }

    #[test]
    fn prevent_scroll_can_be_disabled() {
        let pane = FakePane::at_top();
        let mut gr = GestureRecognizer::new(SwipeConfig {
            prevent_scroll: false,
            ..SwipeConfig::default()
        });
        gr.bind_container(pane.clone());
        let t = Instant::now();
        gr.on_touch_start(pt(0.0, 0.0), t);
        let mut prevented = false;
        assert!(gr.on_touch_move(pt(0.0, 200.0), t + MS_20, &mut || prevented = true));
        assert!(!prevented);
    }

    #[test]
    fn moves_never_navigate() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        gr.set_on_navigate(move |_| *counter.borrow_mut() += 1);

        let t = Instant::now();
        gr.on_touch_start(pt(0.0, 0.0), t);
        for i in 1..10u64 {
            gr.on_touch_move(pt(0.0, (i * 40) as f64), t + MS_20 * i as u32, &mut no_prevent());
        }
        assert_eq!(*calls.borrow(), 0);
        gr.on_touch_end(None, t + Duration::from_secs(1));
        assert_eq!(*calls.borrow(), 1);
    }

    // --- Lock and settle ---

    #[test]
    fn callback_receives_direction() {
        let pane = FakePane::at_bottom();
        let mut gr = recognizer(&pane);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        gr.set_on_navigate(move |d| sink.borrow_mut().push(d));

        swipe(&mut gr, Instant::now(), pt(0.0, 300.0), pt(0.0, 100.0));
        assert_eq!(*seen.borrow(), vec![SwipeDirection::Up]);
    }

    #[test]
    fn lock_drops_rapid_second_swipe() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        let t = Instant::now();
        assert!(swipe(&mut gr, t, pt(0.0, 0.0), pt(0.0, 90.0)).is_some());
        assert!(gr.is_navigating(t + MS_100));
        assert_eq!(swipe(&mut gr, t + MS_100, pt(0.0, 0.0), pt(0.0, 90.0)), None);
        assert!(!gr.is_navigating(t + MS_400));
        assert!(swipe(&mut gr, t + MS_400, pt(0.0, 0.0), pt(0.0, 90.0)).is_some());
    }

    #[test]
    fn settle_scroll_fires_after_delay() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        let t = Instant::now();
        swipe(&mut gr, t, pt(0.0, 0.0), pt(0.0, 90.0));
        let end = t + MS_50;
        assert_eq!(gr.next_deadline(), Some(end + MS_100));

        assert!(!gr.tick(end + MS_50));
        assert!(pane.scrolls().is_empty());
        assert!(gr.tick(end + MS_100));
        assert_eq!(pane.scrolls(), vec![(0.0, ScrollBehavior::Instant)]);
        // Fires once.
        assert!(!gr.tick(end + MS_400));
        assert_eq!(pane.scrolls().len(), 1);
        assert_eq!(gr.next_deadline(), None);
    }

    #[test]
    fn rejected_swipe_schedules_nothing() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        swipe(&mut gr, Instant::now(), pt(0.0, 90.0), pt(0.0, 0.0));
        assert_eq!(gr.next_deadline(), None);
    }

    // --- Dispatch ---

    #[test]
    fn process_reads_first_contact() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        let t = Instant::now();
        let start = TouchInput {
            phase: TouchPhase::Start,
            touches: vec![pt(0.0, 0.0), pt(500.0, 500.0)],
        };
        gr.process(&start, t, &mut no_prevent());
        assert_eq!(gr.session().map(|s| s.start), Some(pt(0.0, 0.0)));

        let end = TouchInput::single(TouchPhase::End, 0.0, 75.0);
        assert_eq!(gr.process(&end, t + MS_50, &mut no_prevent()), Some(SwipeDirection::Down));
    }

    #[test]
    fn process_start_without_contacts_clears_session() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        let t = Instant::now();
        gr.on_touch_start(pt(0.0, 0.0), t);
        let empty = TouchInput {
            phase: TouchPhase::Start,
            touches: vec![],
        };
        gr.process(&empty, t + MS_5, &mut no_prevent());
        assert!(!gr.is_tracking());
    }

    #[test]
    fn unbind_drops_session() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        gr.on_touch_start(pt(0.0, 0.0), Instant::now());
        assert!(gr.unbind_container().is_some());
        assert!(!gr.is_tracking());
        assert!(gr.container().is_none());
    }

    #[test]
    fn set_config_applies_new_threshold() {
        let pane = FakePane::at_top();
        let mut gr = recognizer(&pane);
        gr.set_config(SwipeConfig {
            threshold: 150.0,
            ..SwipeConfig::default()
        });
        assert_eq!(gr.config().threshold, 150.0);
        assert_eq!(swipe(&mut gr, Instant::now(), pt(0.0, 0.0), pt(0.0, 120.0)), None);
    }
}
