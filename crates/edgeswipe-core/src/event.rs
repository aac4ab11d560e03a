#![forbid(unsafe_code)]

//! Normalized touch input.
//!
//! Browser touch events carry a list of active contacts. The recognizer only
//! models a single contact, so [`TouchInput::primary`] picks the first point
//! and the rest are ignored.

/// A touch contact position in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Displacement from `other` to `self`, as `(self.x - other.x, self.y - other.y)`.
    #[must_use]
    pub fn delta_from(self, other: Self) -> (f64, f64) {
        (self.x - other.x, self.y - other.y)
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for TouchPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// One touch event: its phase and the contacts it reports.
///
/// For `End` the list holds the released contacts (`changedTouches`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct TouchInput {
    pub phase: TouchPhase,
    #[cfg_attr(feature = "config", serde(default))]
    pub touches: Vec<TouchPoint>,
}

impl TouchInput {
    /// Create a single-contact input.
    #[must_use]
    pub fn single(phase: TouchPhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            touches: vec![TouchPoint::new(x, y)],
        }
    }

    /// The first reported contact, if any.
    #[must_use]
    pub fn primary(&self) -> Option<TouchPoint> {
        self.touches.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_from_is_current_minus_origin() {
        let start = TouchPoint::new(100.0, 200.0);
        let now = TouchPoint::new(40.0, 280.0);
        assert_eq!(now.delta_from(start), (-60.0, 80.0));
    }

    #[test]
    fn primary_reads_first_contact_only() {
        let input = TouchInput {
            phase: TouchPhase::Move,
            touches: vec![TouchPoint::new(1.0, 2.0), TouchPoint::new(9.0, 9.0)],
        };
        assert_eq!(input.primary(), Some(TouchPoint::new(1.0, 2.0)));

        let empty = TouchInput {
            phase: TouchPhase::End,
            touches: vec![],
        };
        assert_eq!(empty.primary(), None);
    }

    #[test]
    fn non_finite_points_are_flagged() {
        assert!(TouchPoint::new(0.0, 0.0).is_finite());
        assert!(!TouchPoint::new(f64::NAN, 0.0).is_finite());
        assert!(!TouchPoint::from((0.0, f64::INFINITY)).is_finite());
    }

    #[cfg(feature = "config")]
    #[test]
    fn touch_input_json_shape() {
        let input: TouchInput =
            serde_json::from_str(r#"{"phase":"start","touches":[{"x":5.0,"y":3.5}]}"#)
                .expect("valid touch json");
        assert_eq!(input, TouchInput::single(TouchPhase::Start, 5.0, 3.5));

        let cancel: TouchInput = serde_json::from_str(r#"{"phase":"cancel"}"#).expect("cancel");
        assert!(cancel.touches.is_empty());
    }
}
