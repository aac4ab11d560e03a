#![forbid(unsafe_code)]

//! Scroll-edge detection for scrollable containers.
//!
//! [`detect_edge`] classifies a container's scroll position as being at its
//! top edge, its bottom edge, or neither. The gesture recognizer calls it once
//! per touch start; an edge-less start never produces a swipe.
//!
//! # Invariants
//!
//! 1. `Top` is checked before `Bottom`: a container whose content fits inside
//!    its viewport is at both edges and resolves to `Top`.
//! 2. Negative or non-finite inputs resolve to `None`.
//! 3. The function is pure; [`ScrollMetrics`] is a plain snapshot.

/// Default slack, in pixels, when comparing a scroll offset to an edge.
pub const DEFAULT_EDGE_TOLERANCE: f64 = 1.0;

/// Which edge of its scroll range a container currently sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum EdgeState {
    /// Scrolled to (or within tolerance of) the very top.
    Top,
    /// Scrolled to (or within tolerance of) the very bottom.
    Bottom,
    /// Somewhere in between.
    #[default]
    None,
}

impl EdgeState {
    /// Returns true for `Top` or `Bottom`.
    #[must_use]
    pub const fn is_edge(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Snapshot of a scrollable container's vertical geometry, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top (`scrollTop`).
    pub scroll_offset: f64,
    /// Total height of the scrollable content (`scrollHeight`).
    pub content_size: f64,
    /// Visible height of the container (`clientHeight`).
    pub viewport_size: f64,
}

impl ScrollMetrics {
    /// Create a metrics snapshot.
    #[must_use]
    pub const fn new(scroll_offset: f64, content_size: f64, viewport_size: f64) -> Self {
        Self {
            scroll_offset,
            content_size,
            viewport_size,
        }
    }

    /// Whether every field is finite and non-negative.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        [self.scroll_offset, self.content_size, self.viewport_size]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }

    /// Whether the offset is within `tolerance` of the top.
    #[must_use]
    pub fn at_top(&self, tolerance: f64) -> bool {
        self.is_well_formed() && self.scroll_offset <= tolerance
    }

    /// Whether the offset is within `tolerance` of the bottom.
    #[must_use]
    pub fn at_bottom(&self, tolerance: f64) -> bool {
        self.is_well_formed() && self.remaining_below() <= tolerance
    }

    /// Content left below the viewport. Negative when the content is shorter
    /// than the viewport.
    #[must_use]
    pub fn remaining_below(&self) -> f64 {
        self.content_size - (self.scroll_offset + self.viewport_size)
    }

    /// Largest offset the container can scroll to.
    #[must_use]
    pub fn max_scroll_offset(&self) -> f64 {
        (self.content_size - self.viewport_size).max(0.0)
    }

    /// Classify this snapshot. See [`detect_edge`].
    #[must_use]
    pub fn edge(&self, tolerance: f64) -> EdgeState {
        detect_edge(
            self.scroll_offset,
            self.content_size,
            self.viewport_size,
            tolerance,
        )
    }
}

/// Classify a scroll position as `Top`, `Bottom`, or `None`.
///
/// ```
/// use edgeswipe_core::edge::{EdgeState, detect_edge};
///
/// assert_eq!(detect_edge(0.0, 2000.0, 600.0, 1.0), EdgeState::Top);
/// assert_eq!(detect_edge(1400.0, 2000.0, 600.0, 1.0), EdgeState::Bottom);
/// assert_eq!(detect_edge(700.0, 2000.0, 600.0, 1.0), EdgeState::None);
/// ```
#[must_use]
pub fn detect_edge(
    scroll_offset: f64,
    content_size: f64,
    viewport_size: f64,
    tolerance: f64,
) -> EdgeState {
    let metrics = ScrollMetrics::new(scroll_offset, content_size, viewport_size);
    if !metrics.is_well_formed() || !tolerance.is_finite() || tolerance < 0.0 {
        return EdgeState::None;
    }
    if metrics.scroll_offset <= tolerance {
        EdgeState::Top
    } else if metrics.remaining_below() <= tolerance {
        EdgeState::Bottom
    } else {
        EdgeState::None
    }
}
