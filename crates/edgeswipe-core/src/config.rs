#![forbid(unsafe_code)]

//! Tunable parameters for swipe recognition and navigation.
//!
//! [`SwipeConfig`] gathers every threshold and delay in one struct that can be
//! loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # edgeswipe.toml
//! threshold = 64.0
//! enable_horizontal = false
//! settle_delay_ms = 120
//! ```
//!
//! ```rust,ignore
//! let config = SwipeConfig::from_toml_file("edgeswipe.toml")?;
//! let config = SwipeConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! Every field is optional in a file; missing fields take the values from
//! [`SwipeConfig::default`]. Loaders reject configs that fail
//! [`validate`](SwipeConfig::validate).

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use bitflags::bitflags;

use crate::edge::DEFAULT_EDGE_TOLERANCE;
use crate::swipe::SwipeDirection;

/// Longest accepted move-throttle interval.
const MAX_THROTTLE_INTERVAL_MS: u64 = 1000;

bitflags! {
    /// Swipe axes the recognizer reacts to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Axes: u8 {
        /// Left/right swipes.
        const HORIZONTAL = 0b01;
        /// Up/down swipes.
        const VERTICAL   = 0b10;
    }
}

impl Axes {
    /// Whether swipes in `direction` are enabled.
    #[must_use]
    pub fn allows(self, direction: SwipeDirection) -> bool {
        if direction.is_horizontal() {
            self.contains(Self::HORIZONTAL)
        } else {
            self.contains(Self::VERTICAL)
        }
    }

    /// Whether the axis named by `is_horizontal` is enabled.
    #[must_use]
    pub fn allows_axis(self, is_horizontal: bool) -> bool {
        if is_horizontal {
            self.contains(Self::HORIZONTAL)
        } else {
            self.contains(Self::VERTICAL)
        }
    }
}

// ---------------------------------------------------------------------------
// SwipeConfig
// ---------------------------------------------------------------------------

/// Thresholds, delays, and axis switches for the swipe switcher.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SwipeConfig {
    /// Minimum travel (pixels) along the dominant axis for a swipe (default: 50).
    pub threshold: f64,
    /// Window for rate-limiting touch-move processing (default: 16ms).
    pub throttle_interval_ms: u64,
    /// Delay before the post-switch scroll-to-top (default: 100ms).
    pub settle_delay_ms: u64,
    /// Re-entrancy lock held after a swipe navigates (default: 300ms).
    pub navigation_lock_ms: u64,
    /// React to left/right swipes (default: true).
    pub enable_horizontal: bool,
    /// React to up/down swipes (default: true).
    pub enable_vertical: bool,
    /// Slack (pixels) when testing whether the pane is at an edge (default: 1).
    pub edge_tolerance: f64,
    /// Suppress native scrolling once a move passes the threshold (default: true).
    pub prevent_scroll: bool,
    /// Window for rate-limiting near-edge hint updates on scroll (default: 100ms).
    pub scroll_hint_interval_ms: u64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold: 50.0,
            throttle_interval_ms: 16,
            settle_delay_ms: 100,
            navigation_lock_ms: 300,
            enable_horizontal: true,
            enable_vertical: true,
            edge_tolerance: DEFAULT_EDGE_TOLERANCE,
            prevent_scroll: true,
            scroll_hint_interval_ms: 100,
        }
    }
}

impl SwipeConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, SwipeConfigError> {
        let config: Self = toml::from_str(s).map_err(SwipeConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SwipeConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SwipeConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, SwipeConfigError> {
        let config: Self = serde_json::from_str(s).map_err(SwipeConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SwipeConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SwipeConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load from a file, picking the format from its extension
    /// (`.json` is JSON, anything else TOML).
    #[cfg(feature = "config")]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SwipeConfigError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_file(path)
        } else {
            Self::from_toml_file(path)
        }
    }

    /// Serialize to a pretty TOML string.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.threshold.is_finite() || self.threshold < 0.0 {
            errors.push(format!(
                "threshold must be finite and >= 0, got {}",
                self.threshold
            ));
        }

        if !self.edge_tolerance.is_finite() || self.edge_tolerance < 0.0 {
            errors.push(format!(
                "edge_tolerance must be finite and >= 0, got {}",
                self.edge_tolerance
            ));
        }

        if self.throttle_interval_ms > MAX_THROTTLE_INTERVAL_MS {
            errors.push(format!(
                "throttle_interval_ms must be <= {MAX_THROTTLE_INTERVAL_MS}, got {}",
                self.throttle_interval_ms
            ));
        }

        if !self.enable_horizontal && !self.enable_vertical {
            errors.push("at least one of enable_horizontal/enable_vertical must be true".into());
        }

        errors
    }

    /// Return `self` if valid, the collected errors otherwise.
    pub fn validated(self) -> Result<Self, SwipeConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(SwipeConfigError::Validation(errors))
        }
    }

    /// Enabled swipe axes.
    #[must_use]
    pub fn axes(&self) -> Axes {
        let mut axes = Axes::empty();
        axes.set(Axes::HORIZONTAL, self.enable_horizontal);
        axes.set(Axes::VERTICAL, self.enable_vertical);
        axes
    }

    /// Move-throttle window.
    #[must_use]
    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_interval_ms)
    }

    /// Delay before the post-switch scroll-to-top.
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Re-entrancy lock duration.
    #[must_use]
    pub fn navigation_lock(&self) -> Duration {
        Duration::from_millis(self.navigation_lock_ms)
    }

    /// Scroll-hint throttle window.
    #[must_use]
    pub fn scroll_hint_interval(&self) -> Duration {
        Duration::from_millis(self.scroll_hint_interval_ms)
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a swipe configuration.
#[derive(Debug)]
pub enum SwipeConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for SwipeConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for SwipeConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
