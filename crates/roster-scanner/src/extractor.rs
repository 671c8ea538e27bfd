//! Selector cascade over known roster layouts.
//!
//! Patterns run from most specific to most generic. The first pattern that
//! yields at least one valid athlete wins; generic patterns such as "any
//! link in a table row" also catch navigation and schedule links, so they
//! are only consulted when nothing more specific matched.

use crate::cascade::{first_hit, non_empty};
use crate::links::resolve_href;
use roster_browser::{BrowserActions, ElementSnapshot};
use roster_core::AthleteEntry;
use std::collections::HashSet;

/// Roster layouts in priority order.
pub const ROSTER_SELECTORS: [&str; 6] = [
    r#"a[aria-label*="View Full Bio"]"#,
    ".sidearm-roster-player-name a",
    ".roster__player a",
    ".player-card a",
    "table tr a",
    r#"a[href*="bio"]"#,
];

/// Ordered structural patterns for roster links.
#[derive(Debug, Clone)]
pub struct SelectorCascade {
    selectors: Vec<String>,
}

impl Default for SelectorCascade {
    fn default() -> Self {
        Self::new(ROSTER_SELECTORS)
    }
}

impl SelectorCascade {
    /// Cascade over custom selectors, tried in the order given.
    pub fn new<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selectors: selectors.into_iter().map(Into::into).collect(),
        }
    }

    /// Selectors in evaluation order.
    pub fn selectors(&self) -> &[String] {
        &self.selectors
    }

    /// Athletes from the first pattern with results, or an empty list.
    pub async fn extract<P: BrowserActions>(&self, page: &P, base_url: &str) -> Vec<AthleteEntry> {
        first_hit(&self.selectors, |selector| {
            Self::try_pattern(page, selector, base_url)
        })
        .await
        .unwrap_or_default()
    }

    async fn try_pattern<P: BrowserActions>(
        page: &P,
        selector: &str,
        base_url: &str,
    ) -> Option<Vec<AthleteEntry>> {
        let matches = match page.query_all(selector).await {
            Ok(matches) => matches,
            Err(e) => {
                tracing::debug!("Selector '{}' unusable, skipping: {}", selector, e);
                return None;
            }
        };

        let athletes = non_empty(collect_athletes(&matches, base_url))?;
        tracing::info!(
            "Selector '{}' matched {} athletes",
            selector,
            athletes.len()
        );
        Some(athletes)
    }
}

/// Turn link snapshots into valid, de-duplicated athletes in page order.
pub fn collect_athletes(links: &[ElementSnapshot], base_url: &str) -> Vec<AthleteEntry> {
    dedup_athletes(links.iter().map(|link| AthleteEntry {
        name: link.text.trim().to_string(),
        player_bio_url: resolve_href(link.href.as_deref(), base_url),
    }))
}

/// Drop invalid entries and repeats of the same `(name, url)` pair.
///
/// The first occurrence of each pair is kept, in input order.
pub fn dedup_athletes(entries: impl IntoIterator<Item = AthleteEntry>) -> Vec<AthleteEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(AthleteEntry::is_valid)
        .filter(|entry| {
            let (name, url) = entry.dedup_key();
            seen.insert((name.to_owned(), url.to_owned()))
        })
        .collect()
}
