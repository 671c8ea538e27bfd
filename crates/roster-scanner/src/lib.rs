//! Roster Scanner - Team roster discovery on college-athletics websites.
//!
//! Given a school's athletics base URL, a sport and a gender, the scanner
//! probes known site-builder URL conventions for the team roster, extracts
//! `(name, profile link)` pairs with a cascade of layout selectors, and
//! falls back to scanning the home page for a roster link. Individual
//! athlete profiles can be captured as sanitized HTML fragments.
//!
//! # Example
//!
//! ```rust,ignore
//! use roster_scanner::resolve_roster;
//!
//! let roster = resolve_roster("https://gobearcats.com", "basketball", "mens").await;
//! match roster.error_message() {
//!     Some(reason) => eprintln!("lookup failed: {reason}"),
//!     None => println!("{} athletes", roster.athletes().len()),
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod cascade;
pub mod discovery;
pub mod error;
pub mod extractor;
pub mod links;
pub mod page;
pub mod paths;
pub mod profile;
pub mod resolver;
mod session;

pub use cascade::{first_hit, non_empty};
pub use discovery::{discover_roster_link, find_roster_link};
pub use error::{Result, ScanError};
pub use extractor::{collect_athletes, dedup_athletes, SelectorCascade, ROSTER_SELECTORS};
pub use links::resolve_href;
pub use page::PageController;
pub use paths::{candidate_paths, candidate_paths_for, Season};
pub use profile::{
    collapse_inter_tag_whitespace, sanitize_profile_html, ProfileExtractor, STRIPPED_TAGS,
};
pub use resolver::RosterResolver;

use roster_browser::ChromiumLauncher;
use roster_core::{AppConfig, ProfileDocument, RosterResult};

fn load_config() -> AppConfig {
    AppConfig::load_with_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    })
}

/// Resolve a roster with a local Chromium and the user's configuration.
pub async fn resolve_roster(base_url: &str, sport: &str, gender: &str) -> RosterResult {
    let config = load_config();
    let launcher = ChromiumLauncher::new(config.browser.clone());
    RosterResolver::with_config(launcher, config)
        .resolve_input(base_url, sport, gender)
        .await
}

/// Capture a sanitized profile with a local Chromium and the user's configuration.
pub async fn extract_profile(player_url: &str) -> Option<ProfileDocument> {
    let config = load_config();
    let launcher = ChromiumLauncher::new(config.browser.clone());
    ProfileExtractor::with_config(launcher, config)
        .extract(player_url)
        .await
}
