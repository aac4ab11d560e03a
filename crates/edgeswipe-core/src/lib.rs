#![forbid(unsafe_code)]

//! Core: edge-aware swipe recognition and bounded category navigation.
//!
//! # Role in edgeswipe
//! `edgeswipe-core` turns raw touch input on a scrollable content pane into
//! category switches. A swipe only counts when the pane is already scrolled to
//! the edge the finger is pulling away from, so ordinary scrolling never
//! changes the category.
//!
//! # Primary responsibilities
//! - **Throttle**: time-window rate limiting for high-frequency touch moves.
//! - **Edge detection**: classify a container's scroll position as top, bottom,
//!   or neither.
//! - **GestureRecognizer**: per-contact state machine that raises at most one
//!   navigation intent per touch sequence.
//! - **NavigationController**: owns the active index and applies bounds-checked
//!   transitions.
//! - **SwipeSwitcher**: wires the recognizer to the controller over one shared
//!   container.
//!
//! # Time
//! Nothing here sleeps or spawns. Every handler takes the current
//! [`Instant`](web_time::Instant); pending delays (settle scroll, re-entrancy
//! lock) are deadlines that [`SwipeSwitcher::tick`](switcher::SwipeSwitcher::tick)
//! resolves. This keeps the state machines deterministic under test and usable
//! from a browser event loop.

pub mod config;
pub mod container;
pub mod edge;
pub mod event;
pub mod gesture;
pub mod navigation;
pub mod swipe;
pub mod switcher;
pub mod throttle;

pub use config::{Axes, SwipeConfig};
pub use container::{ScrollBehavior, ScrollContainer};
pub use edge::{EdgeState, ScrollMetrics, detect_edge};
pub use event::{TouchInput, TouchPhase, TouchPoint};
pub use gesture::{GestureRecognizer, PreventDefault};
pub use navigation::{NavigationController, NavigationState};
pub use swipe::{Step, SwipeDirection, SwipeResult};
pub use switcher::SwipeSwitcher;
pub use throttle::{Throttle, Throttled};
