#![forbid(unsafe_code)]

//! The scrollable content pane as seen by the core.
//!
//! The core never owns layout. It needs two capabilities from the pane that
//! holds the active category's content: read its scroll geometry, and ask it
//! to scroll. [`ScrollContainer`] is that seam.
//!
//! Implementations are expected to behave like DOM element references: cheap
//! to clone, with every clone addressing the same pane. That is why
//! [`scroll_to`](ScrollContainer::scroll_to) takes `&self`. The recognizer and
//! the navigation controller each hold a clone of one bound container.

use std::rc::Rc;

use crate::edge::ScrollMetrics;

/// How a programmatic scroll should be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollBehavior {
    /// Jump straight to the target offset.
    #[default]
    Instant,
    /// Animate towards the target offset.
    Smooth,
}

/// A scrollable pane the core can query and scroll.
pub trait ScrollContainer {
    /// Current scroll geometry.
    fn metrics(&self) -> ScrollMetrics;

    /// Scroll to `offset` pixels from the top.
    fn scroll_to(&self, offset: f64, behavior: ScrollBehavior);
}

impl<T: ScrollContainer + ?Sized> ScrollContainer for &T {
    fn metrics(&self) -> ScrollMetrics {
        (**self).metrics()
    }

    fn scroll_to(&self, offset: f64, behavior: ScrollBehavior) {
        (**self).scroll_to(offset, behavior);
    }
}

impl<T: ScrollContainer + ?Sized> ScrollContainer for Rc<T> {
    fn metrics(&self) -> ScrollMetrics {
        (**self).metrics()
    }

    fn scroll_to(&self, offset: f64, behavior: ScrollBehavior) {
        (**self).scroll_to(offset, behavior);
    }
}

impl<T: ScrollContainer + ?Sized> ScrollContainer for Box<T> {
    fn metrics(&self) -> ScrollMetrics {
        (**self).metrics()
    }

    fn scroll_to(&self, offset: f64, behavior: ScrollBehavior) {
        (**self).scroll_to(offset, behavior);
    }
}
