//! Configuration management for roster discovery.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration.
///
/// This is loaded from `~/.config/roster-scout/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Headless browser settings
    pub browser: BrowserConfig,
    /// Roster probing and settle-delay settings
    pub scanning: ScanningConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, falling back to defaults if missing.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `ROSTER_HEADLESS`: Override browser headless mode (true/false)
    /// - `ROSTER_NAVIGATION_TIMEOUT_SECS`: Override per-navigation timeout
    /// - `ROSTER_LAZY_LOAD_DELAY_MS`: Override the post-scroll render wait
    /// - `ROSTER_CHROME_PATH`: Use a specific Chrome/Chromium executable
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup. Unparseable values are ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("ROSTER_HEADLESS") {
            if let Ok(headless) = val.parse() {
                self.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Some(val) = lookup("ROSTER_NAVIGATION_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.browser.navigation_timeout_secs = secs;
                tracing::debug!("Override browser.navigation_timeout_secs from env: {}", secs);
            }
        }

        if let Some(val) = lookup("ROSTER_LAZY_LOAD_DELAY_MS") {
            if let Ok(ms) = val.parse() {
                self.scanning.lazy_load_delay_ms = ms;
                tracing::debug!("Override scanning.lazy_load_delay_ms from env: {}", ms);
            }
        }

        if let Some(val) = lookup("ROSTER_CHROME_PATH") {
            if !val.trim().is_empty() {
                tracing::debug!("Override browser.chrome_executable from env: {}", val);
                self.browser.chrome_executable = Some(PathBuf::from(val));
            }
        }
    }

    /// Reject values that would make every navigation fail immediately.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.browser.navigation_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "browser.navigation_timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.browser.window_width == 0 || self.browser.window_height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "browser.window_width/window_height".to_string(),
                reason: "window dimensions must be non-zero".to_string(),
            });
        }
        Ok(())
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/roster-scout/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "roster-scout", "roster-scout")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Headless browser settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Per-navigation timeout in seconds
    pub navigation_timeout_secs: u64,
    /// User agent override; the browser default is used when unset
    pub user_agent: Option<String>,
    /// Explicit Chrome/Chromium executable; auto-detected when unset
    pub chrome_executable: Option<PathBuf>,
}

impl BrowserConfig {
    /// Navigation timeout as a `Duration`.
    #[must_use]
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            navigation_timeout_secs: 30,
            user_agent: None,
            chrome_executable: None,
        }
    }
}

/// Settle delays and probing behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanningConfig {
    /// Wait after each interstitial click, in milliseconds
    pub interstitial_settle_ms: u64,
    /// Wait after the lazy-load scroll, in milliseconds
    pub lazy_load_delay_ms: u64,
    /// Vertical scroll distance used to trigger lazy rendering
    pub scroll_distance_px: u32,
    /// Wait before capturing a profile page, in milliseconds
    pub profile_settle_ms: u64,
    /// Number of season-qualified path variants (current season first)
    pub season_count: u32,
}

impl ScanningConfig {
    /// Interstitial settle delay as a `Duration`.
    #[must_use]
    pub fn interstitial_settle(&self) -> Duration {
        Duration::from_millis(self.interstitial_settle_ms)
    }

    /// Lazy-load delay as a `Duration`.
    #[must_use]
    pub fn lazy_load_delay(&self) -> Duration {
        Duration::from_millis(self.lazy_load_delay_ms)
    }

    /// Profile settle delay as a `Duration`.
    #[must_use]
    pub fn profile_settle(&self) -> Duration {
        Duration::from_millis(self.profile_settle_ms)
    }

    /// Zero-delay settings for tests and offline fixtures.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            interstitial_settle_ms: 0,
            lazy_load_delay_ms: 0,
            profile_settle_ms: 0,
            ..Self::default()
        }
    }
}

impl Default for ScanningConfig {
    fn default() -> Self {
        Self {
            interstitial_settle_ms: 2000,
            lazy_load_delay_ms: 6000,
            scroll_distance_px: 3000,
            profile_settle_ms: 3000,
            season_count: 2,
        }
    }
}
