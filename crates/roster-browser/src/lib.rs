//! Headless browser sessions for JavaScript-rendered sites.
//!
//! Provides the tab-level primitives the roster scanner drives, a
//! session/launcher abstraction so callers can inject the browser, and a
//! chromiumoxide-backed implementation.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod actions;
pub mod engine;
pub mod error;

pub use actions::{origin_of, BrowserActions, BrowserLauncher, BrowserSession, ElementSnapshot};
pub use engine::{ChromiumLauncher, ChromiumSession};
pub use error::{BrowserError, Result};
