#![forbid(unsafe_code)]

//! Headless driver for the edge swipe switcher.
//!
//! Scripts of timed touches, scrolls and taps are replayed on a virtual clock
//! against a simulated content pane; each switch prints the resulting view.

pub mod cli;
pub mod data;
pub mod error;
pub mod pane;
pub mod replay;
pub mod script;

pub use cli::run_from_env;
pub use error::{DemoError, Result};
