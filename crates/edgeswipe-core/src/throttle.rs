#![forbid(unsafe_code)]

//! Time-window rate limiting for high-frequency input.
//!
//! Touch-move events arrive far faster than a content pane needs to react to
//! them. [`Throttle`] admits at most one call per interval and drops the rest;
//! [`Throttled`] binds a throttle to the function it guards.
//!
//! # Design
//!
//! The throttle uses a "first wins" strategy:
//! - The first call always executes.
//! - Any call within `interval` of the previous *executed* call is dropped.
//! - Dropped calls are not queued and no trailing call is scheduled.
//!
//! Only executed calls move the window, so a steady stream of events faster
//! than the interval still executes once per interval.
//!
//! # Usage
//!
//! ```
//! use edgeswipe_core::throttle::Throttled;
//! use std::time::Duration;
//! use web_time::Instant;
//!
//! let mut hits = 0;
//! let mut bump = Throttled::new(|n: u32| hits += n, Duration::from_millis(16));
//! let t = Instant::now();
//!
//! assert!(bump.call(t, 1).is_some());
//! assert!(bump.call(t + Duration::from_millis(5), 1).is_none());
//! assert!(bump.call(t + Duration::from_millis(16), 1).is_some());
//! drop(bump);
//! assert_eq!(hits, 2);
//! ```

use std::time::Duration;

use web_time::Instant;

/// Admits at most one call per interval.
///
/// # Thread Safety
///
/// `Throttle` is plain data. It is meant to be owned by a single event
/// processing loop.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last_executed: Option<Instant>,
}

impl Throttle {
    /// Create a throttle that admits one call per `interval`.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_executed: None,
        }
    }

    /// Whether a call at `now` would execute. Does not consume the window.
    #[must_use]
    pub fn is_ready(&self, now: Instant) -> bool {
        match self.last_executed {
            None => true,
            // A clock that steps backwards saturates to zero and is dropped.
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    /// Admit a call at `now`, recording it as executed.
    ///
    /// Returns `false` if the call falls inside the current window.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        if self.is_ready(now) {
            self.last_executed = Some(now);
            true
        } else {
            false
        }
    }

    /// Time of the last executed call, if any.
    #[inline]
    #[must_use]
    pub fn last_executed(&self) -> Option<Instant> {
        self.last_executed
    }

    /// The configured interval.
    #[inline]
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the interval. The current window is kept.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Forget the last executed call so the next one runs immediately.
    pub fn reset(&mut self) {
        self.last_executed = None;
    }
}

/// A function wrapped in a [`Throttle`].
///
/// [`call`](Throttled::call) returns `Some` with the function's result when the
/// call executed and `None` when it was dropped.
pub struct Throttled<F> {
    throttle: Throttle,
    f: F,
}

impl<F> std::fmt::Debug for Throttled<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttled")
            .field("throttle", &self.throttle)
            .finish_non_exhaustive()
    }
}

impl<F> Throttled<F> {
    /// Wrap `f` so that it executes at most once per `interval`.
    #[must_use]
    pub const fn new(f: F, interval: Duration) -> Self {
        Self {
            throttle: Throttle::new(interval),
            f,
        }
    }

    /// Invoke the wrapped function unless the call falls inside the window.
    pub fn call<A, R>(&mut self, now: Instant, arg: A) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        if self.throttle.try_acquire(now) {
            Some((self.f)(arg))
        } else {
            tracing::trace!(interval = ?self.throttle.interval(), "throttled call dropped");
            None
        }
    }

    /// The underlying gate.
    #[inline]
    #[must_use]
    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    /// Mutable access to the underlying gate.
    #[inline]
    pub fn throttle_mut(&mut self) -> &mut Throttle {
        &mut self.throttle
    }

    /// Unwrap the guarded function.
    pub fn into_inner(self) -> F {
        self.f
    }
}
