//! Timed touch scripts.
//!
//! A script is a JSON document listing steps in time order:
//!
//! ```json
//! {
//!   "name": "pull to previous",
//!   "steps": [
//!     { "at_ms": 0,   "action": "scroll_to_top" },
//!     { "at_ms": 100, "action": "swipe", "from": { "x": 200, "y": 300 }, "to": { "x": 200, "y": 480 } },
//!     { "at_ms": 400, "action": "touch", "phase": "start", "touches": [{ "x": 10, "y": 10 }] },
//!     { "at_ms": 900, "action": "tap", "index": 2 }
//!   ]
//! }
//! ```

use std::path::Path;

use edgeswipe_core::{TouchInput, TouchPhase, TouchPoint};
use serde::{Deserialize, Serialize};

use crate::error::{DemoError, Result};

const BUILTIN: &str = include_str!("../scripts/demo.json");

/// Latest time any step may end at: one day of replay.
pub const MAX_SCRIPT_MS: u64 = 24 * 60 * 60 * 1000;
/// Most intermediate moves a single swipe may expand to.
pub const MAX_SWIPE_MOVES: u32 = 1000;

fn default_swipe_ms() -> u64 {
    120
}

fn default_swipe_moves() -> u32 {
    6
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub name: Option<String>,
    pub steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Offset from the start of the replay.
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// One raw touch event.
    Touch(TouchInput),
    /// A complete start/move/end gesture spread over `duration_ms`.
    Swipe {
        from: TouchPoint,
        to: TouchPoint,
        #[serde(default = "default_swipe_ms")]
        duration_ms: u64,
        #[serde(default = "default_swipe_moves")]
        moves: u32,
    },
    /// User scroll to an absolute offset.
    Scroll { offset: f64 },
    ScrollToTop,
    ScrollToBottom,
    /// Sidebar tap.
    Tap { index: usize },
    /// Let time pass.
    Wait,
}

impl Action {
    /// Time the action occupies after its start.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        match self {
            Self::Swipe { duration_ms, .. } => *duration_ms,
            _ => 0,
        }
    }
}

/// Expand a swipe into timestamped touch inputs, offsets relative to its start.
#[must_use]
pub fn expand_swipe(
    from: TouchPoint,
    to: TouchPoint,
    duration_ms: u64,
    moves: u32,
) -> Vec<(u64, TouchInput)> {
    let mut out = Vec::with_capacity(moves.min(MAX_SWIPE_MOVES) as usize + 2);
    out.push((0, TouchInput::single(TouchPhase::Start, from.x, from.y)));
    let segments = u64::from(moves) + 1;
    for k in 1..=u64::from(moves) {
        let frac = k as f64 / segments as f64;
        let x = from.x + (to.x - from.x) * frac;
        let y = from.y + (to.y - from.y) * frac;
        // k < segments, so the quotient never exceeds duration_ms.
        let at = u128::from(duration_ms) * u128::from(k) / u128::from(segments);
        let at = u64::try_from(at).unwrap_or(duration_ms);
        out.push((at, TouchInput::single(TouchPhase::Move, x, y)));
    }
    out.push((duration_ms, TouchInput::single(TouchPhase::End, to.x, to.y)));
    out
}

impl Script {
    /// The script replayed when none is given.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let script: Self = serde_json::from_str(s)?;
        script.check()?;
        Ok(script)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DemoError::MissingScript {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Steps must not start before the previous one has finished.
    pub fn check(&self) -> Result<()> {
        let mut busy_until = 0u64;
        for (i, step) in self.steps.iter().enumerate() {
            if step.at_ms < busy_until {
                return Err(DemoError::script(
                    i,
                    format!(
                        "starts at {} ms, before the previous step ends at {} ms",
                        step.at_ms, busy_until
                    ),
                ));
            }
            if let Action::Swipe { from, to, moves, .. } = &step.action {
                if !(from.is_finite() && to.is_finite()) {
                    return Err(DemoError::script(i, "swipe coordinates must be finite"));
                }
                if *moves > MAX_SWIPE_MOVES {
                    return Err(DemoError::script(
                        i,
                        format!("swipe has {moves} moves, at most {MAX_SWIPE_MOVES} allowed"),
                    ));
                }
            }
            busy_until = step.at_ms.saturating_add(step.action.duration_ms());
            if busy_until > MAX_SCRIPT_MS {
                return Err(DemoError::script(
                    i,
                    format!("ends at {busy_until} ms, past the {MAX_SCRIPT_MS} ms limit"),
                ));
            }
        }
        Ok(())
    }

    /// Time at which the last step ends.
    #[must_use]
    pub fn end_ms(&self) -> u64 {
        self.steps
            .last()
            .map_or(0, |s| s.at_ms.saturating_add(s.action.duration_ms()))
    }
}
