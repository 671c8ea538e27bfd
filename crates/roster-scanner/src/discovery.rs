//! Last-resort roster link discovery on a site's home page.

use crate::links::resolve_href;
use roster_browser::{origin_of, BrowserActions, ElementSnapshot};

const ROSTER_WORD: &str = "roster";
const STAFF_WORDS: [&str; 2] = ["coach", "staff"];

fn mentions_roster_for(haystack: &str, sport: &str) -> bool {
    haystack.contains(ROSTER_WORD) && haystack.contains(sport)
}

/// Anchor text names a team roster rather than a staff directory.
fn text_matches(anchor: &ElementSnapshot, sport: &str) -> bool {
    let text = anchor.text.to_lowercase();
    mentions_roster_for(&text, sport) && !STAFF_WORDS.iter().any(|word| text.contains(word))
}

fn href_matches(anchor: &ElementSnapshot, sport: &str) -> bool {
    anchor
        .href
        .as_deref()
        .is_some_and(|href| mentions_roster_for(&href.to_lowercase(), sport))
}

/// Pick the most plausible roster link among a page's anchors.
///
/// Visible text is checked first across all anchors; hrefs are only
/// consulted when no anchor text qualifies. Anchors without an href never
/// qualify. The winning href is resolved against `base_url`.
#[must_use]
pub fn find_roster_link(anchors: &[ElementSnapshot], sport: &str, base_url: &str) -> Option<String> {
    let sport = sport.trim().to_lowercase();
    let linked = || {
        anchors
            .iter()
            .filter(|anchor| anchor.href.as_deref().is_some_and(|h| !h.trim().is_empty()))
    };

    linked()
        .find(|anchor| text_matches(anchor, &sport))
        .or_else(|| linked().find(|anchor| href_matches(anchor, &sport)))
        .map(|anchor| resolve_href(anchor.href.as_deref(), base_url))
}

/// Scan the loaded page's anchors for a roster link.
///
/// Relative links resolve against the origin of the page actually loaded,
/// which may differ from `fallback_base` after redirects.
pub async fn discover_roster_link<P: BrowserActions>(
    page: &P,
    sport: &str,
    fallback_base: &str,
) -> Option<String> {
    let anchors = match page.query_all("a").await {
        Ok(anchors) => anchors,
        Err(e) => {
            tracing::warn!("Could not list home page links: {}", e);
            return None;
        }
    };

    let base = match page.current_url().await {
        Ok(url) => origin_of(&url).unwrap_or_else(|_| fallback_base.to_string()),
        Err(_) => fallback_base.to_string(),
    };

    let link = find_roster_link(&anchors, sport, &base);
    match &link {
        Some(url) => tracing::info!("Discovered roster link {}", url),
        None => tracing::debug!("No roster link among {} anchors", anchors.len()),
    }
    link
}
