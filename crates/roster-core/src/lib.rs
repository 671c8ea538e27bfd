//! Roster Core - Foundation crate for roster discovery.
//!
//! This crate provides the shared data model, error handling and
//! configuration management that the browser and scanner crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Request, athlete and result types
//!
//! # Example
//!
//! ```rust
//! use roster_core::{AppConfig, RosterRequest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! let request = RosterRequest::new("https://example.edu", "Basketball", "Mens")?;
//! assert_eq!(request.sport(), "basketball");
//! assert!(config.browser.headless);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, BrowserConfig, ScanningConfig};
pub use error::{ConfigError, ConfigResult, Result, RosterError};
pub use types::{
    AthleteEntry, Gender, ProfileDocument, ProfileReport, RosterFailure, RosterReport,
    RosterRequest, RosterResult, HOMEPAGE_UNAVAILABLE, NO_ROSTER_FOUND,
};
