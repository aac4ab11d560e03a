#![forbid(unsafe_code)]

//! Swipe intents and the direction-to-index policy.
//!
//! # Sign convention
//!
//! Displacement is measured as `start - current`, so a finger dragged towards
//! the left of the screen yields a positive `dx` and is a `Left` swipe, and a
//! finger dragged upwards yields a positive `dy` and is an `Up` swipe.
//!
//! # Navigation policy
//!
//! [`Step`] is the single place where a direction becomes an index change:
//!
//! | Direction       | Step       | Index change |
//! |-----------------|------------|--------------|
//! | `Left`, `Up`    | `Next`     | `+1`         |
//! | `Right`, `Down` | `Previous` | `-1`         |
//!
//! Swiping up at the bottom of a category reveals the one after it; pulling
//! down at the top reveals the one before it.

use crate::edge::EdgeState;

// ---------------------------------------------------------------------------
// SwipeDirection
// ---------------------------------------------------------------------------

/// Cardinal direction of a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    /// Returns true for horizontal directions.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// The index step this direction maps to.
    #[must_use]
    pub const fn step(self) -> Step {
        match self {
            Self::Left | Self::Up => Step::Next,
            Self::Right | Self::Down => Step::Previous,
        }
    }

    /// Whether a swipe in this direction may start from `edge`.
    ///
    /// `Down` pulls away from the top edge and `Up` from the bottom edge.
    /// Horizontal swipes are not gated by the vertical scroll position.
    #[must_use]
    pub const fn allowed_from(self, edge: EdgeState) -> bool {
        match self {
            Self::Down => matches!(edge, EdgeState::Top),
            Self::Up => matches!(edge, EdgeState::Bottom),
            Self::Left | Self::Right => true,
        }
    }

    /// Lowercase name, as used in logs and recorded traces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl std::fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// Relative move through the ordered category list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Next,
    Previous,
}

impl Step {
    /// Apply the step to `index`. `None` when stepping before the first item.
    ///
    /// The upper bound is checked by the navigation controller, which knows
    /// the item count.
    #[must_use]
    pub const fn apply(self, index: usize) -> Option<usize> {
        match self {
            Self::Next => index.checked_add(1),
            Self::Previous => index.checked_sub(1),
        }
    }
}

impl From<SwipeDirection> for Step {
    fn from(direction: SwipeDirection) -> Self {
        direction.step()
    }
}

// ---------------------------------------------------------------------------
// SwipeResult
// ---------------------------------------------------------------------------

/// Classification of one completed touch sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeResult {
    pub direction: SwipeDirection,
    pub is_horizontal: bool,
    /// Magnitude along the dominant axis (always >= 0.0).
    pub distance: f64,
}

impl SwipeResult {
    /// Classify a `start - current` displacement.
    ///
    /// The horizontal axis wins only when `|dx| > |dy|`; ties are vertical.
    /// Returns `None` for zero movement on the dominant axis or non-finite
    /// input.
    #[must_use]
    pub fn classify(dx: f64, dy: f64) -> Option<Self> {
        if !dx.is_finite() || !dy.is_finite() {
            return None;
        }
        let is_horizontal = dx.abs() > dy.abs();
        let (delta, positive, negative) = if is_horizontal {
            (dx, SwipeDirection::Left, SwipeDirection::Right)
        } else {
            (dy, SwipeDirection::Up, SwipeDirection::Down)
        };
        let direction = if delta > 0.0 {
            positive
        } else if delta < 0.0 {
            negative
        } else {
            return None;
        };
        Some(Self {
            direction,
            is_horizontal,
            distance: delta.abs(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
