//! Simulated scrollable content pane.

use std::cell::RefCell;
use std::rc::Rc;

use edgeswipe_core::{ScrollBehavior, ScrollContainer, ScrollMetrics};

#[derive(Debug)]
struct PaneState {
    metrics: ScrollMetrics,
    programmatic_scrolls: usize,
}

/// Shared handle to one simulated pane. Clones address the same pane.
///
/// Programmatic scrolls land immediately, smooth or not; the replay has no
/// animation frames to spread them over.
#[derive(Debug, Clone)]
pub struct SimPane(Rc<RefCell<PaneState>>);

impl SimPane {
    #[must_use]
    pub fn new(viewport_size: f64, content_size: f64) -> Self {
        Self(Rc::new(RefCell::new(PaneState {
            metrics: ScrollMetrics::new(0.0, content_size, viewport_size),
            programmatic_scrolls: 0,
        })))
    }

    /// Swap in new content and reset to the top.
    pub fn load(&self, content_size: f64) {
        let mut state = self.0.borrow_mut();
        state.metrics.content_size = content_size;
        state.metrics.scroll_offset = 0.0;
    }

    /// User scroll to `offset`, clamped to the scrollable range.
    pub fn user_scroll(&self, offset: f64) -> f64 {
        let mut state = self.0.borrow_mut();
        let clamped = offset.clamp(0.0, state.metrics.max_scroll_offset());
        state.metrics.scroll_offset = clamped;
        clamped
    }

    pub fn scroll_to_bottom(&self) -> f64 {
        let max = self.0.borrow().metrics.max_scroll_offset();
        self.user_scroll(max)
    }

    #[must_use]
    pub fn offset(&self) -> f64 {
        self.0.borrow().metrics.scroll_offset
    }

    /// Number of scrolls requested by the switcher.
    #[must_use]
    pub fn programmatic_scrolls(&self) -> usize {
        self.0.borrow().programmatic_scrolls
    }
}

impl ScrollContainer for SimPane {
    fn metrics(&self) -> ScrollMetrics {
        self.0.borrow().metrics
    }

    fn scroll_to(&self, offset: f64, behavior: ScrollBehavior) {
        let landed = self.user_scroll(offset);
        self.0.borrow_mut().programmatic_scrolls += 1;
        tracing::trace!(offset = landed, ?behavior, "pane scrolled");
    }
}
