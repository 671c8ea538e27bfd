//! Page controller: the navigation contract every stage of discovery uses.
//!
//! Wraps one browser tab with navigation under a timeout, interstitial
//! dismissal, a lazy-load nudge, and a not-found classifier. Only
//! `navigate` reports failure; the other operations absorb their own errors.

use regex::Regex;
use roster_browser::{BrowserActions, BrowserError};
use roster_core::ScanningConfig;
use std::sync::OnceLock;
use std::time::Duration;

/// Clickable controls inspected for consent and cookie overlays.
const INTERSTITIAL_CONTROLS: &str = r#"button, [role="button"]"#;

/// Control labels that dismiss an overlay.
const INTERSTITIAL_VOCABULARY: [&str; 7] = [
    "accept",
    "agree",
    "got it",
    "ok",
    "close",
    "continue",
    "allow all",
];

const NOT_FOUND_MARKERS: [&str; 2] = ["not found", "404"];

fn vocabulary_patterns() -> &'static [(&'static str, Regex)] {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        INTERSTITIAL_VOCABULARY
            .iter()
            .map(|word| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(word));
                (*word, Regex::new(&pattern).expect("valid regex"))
            })
            .collect()
    })
}

/// Whether a control's label contains the given dismissal word, in any case.
#[must_use]
pub fn matches_interstitial_label(label: &str, word: &str) -> bool {
    vocabulary_patterns()
        .iter()
        .find(|(candidate, _)| *candidate == word)
        .is_some_and(|(_, pattern)| pattern.is_match(label))
}

/// Whether page text reads like a missing-page response.
#[must_use]
pub fn looks_not_found(text: &str) -> bool {
    let lowered = text.to_lowercase();
    NOT_FOUND_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

/// Navigation contract over a single tab.
pub struct PageController<'a, P: BrowserActions> {
    page: &'a P,
    navigation_timeout: Duration,
    scanning: &'a ScanningConfig,
}

impl<'a, P: BrowserActions> PageController<'a, P> {
    pub fn new(page: &'a P, navigation_timeout: Duration, scanning: &'a ScanningConfig) -> Self {
        Self {
            page,
            navigation_timeout,
            scanning,
        }
    }

    /// The underlying tab.
    pub fn page(&self) -> &'a P {
        self.page
    }

    /// Load `url` and wait for the DOM to be parsed.
    ///
    /// Errors mean "this location failed"; callers decide whether that is fatal.
    pub async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        tracing::debug!("Navigating to {}", url);
        self.page.navigate(url, self.navigation_timeout).await
    }

    /// Click every visible consent/cookie control and wait after each click.
    ///
    /// Returns the number of controls clicked. Never fails.
    pub async fn dismiss_interstitials(&self) -> usize {
        let mut clicked = 0;
        for (word, pattern) in vocabulary_patterns() {
            clicked += self.dismiss_matching(word, pattern).await;
        }
        clicked
    }

    /// Click the visible controls labelled with one vocabulary word.
    ///
    /// Controls are re-queried after every click. `rank` is the position of
    /// the next unhandled match: it stays put when the clicked control went
    /// away and advances otherwise. Attempts are bounded by the number of
    /// controls first seen.
    async fn dismiss_matching(&self, word: &str, pattern: &Regex) -> usize {
        let mut clicked = 0;
        let mut rank = 0;
        let mut attempts = 0;
        let mut budget = None;
        let mut matched_before_click = None;

        loop {
            let controls = match self.page.query_all(INTERSTITIAL_CONTROLS).await {
                Ok(controls) => controls,
                Err(e) => {
                    tracing::debug!("Interstitial scan for '{}' failed: {}", word, e);
                    break;
                }
            };
            let matches: Vec<usize> = controls
                .iter()
                .enumerate()
                .filter(|(_, control)| control.visible && pattern.is_match(&control.text))
                .map(|(index, _)| index)
                .collect();

            if let Some(before) = matched_before_click.take() {
                if matches.len() >= before {
                    rank += 1;
                }
            }

            let limit = *budget.get_or_insert(controls.len());
            if attempts >= limit || rank >= matches.len() {
                break;
            }
            attempts += 1;

            let index = matches[rank];
            let label = controls[index].text.trim();
            match self.page.click(INTERSTITIAL_CONTROLS, index).await {
                Ok(()) => {
                    tracing::debug!("Dismissed interstitial '{}'", label);
                    clicked += 1;
                    matched_before_click = Some(matches.len());
                    tokio::time::sleep(self.scanning.interstitial_settle()).await;
                }
                Err(e) => {
                    tracing::debug!("Could not click '{}': {}", label, e);
                    rank += 1;
                }
            }
        }

        clicked
    }

    /// Scroll far down and wait so deferred content can render.
    pub async fn trigger_lazy_load(&self) {
        let distance = i64::from(self.scanning.scroll_distance_px);
        if let Err(e) = self.page.scroll_by(0, distance).await {
            tracing::debug!("Lazy-load scroll failed: {}", e);
        }
        tokio::time::sleep(self.scanning.lazy_load_delay()).await;
    }

    /// Heuristic missing-page check on the title, then the body text.
    pub async fn is_not_found(&self) -> bool {
        let title = self.page.title().await.unwrap_or_default();
        if looks_not_found(&title) {
            return true;
        }
        let body = self.page.body_text().await.unwrap_or_default();
        looks_not_found(&body)
    }
}
