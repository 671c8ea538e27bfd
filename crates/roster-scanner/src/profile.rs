//! Athlete profile capture and sanitization.
//!
//! A profile page is loaded in its own browser session, reduced to its main
//! content subtree, and stripped of every element that carries no readable
//! content (scripts, media, navigation chrome, forms).

use crate::page::PageController;
use crate::session::{guarded, release};
use regex::Regex;
use roster_browser::{BrowserActions, BrowserLauncher};
use roster_core::{AppConfig, ProfileDocument, ProfileReport};
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::OnceLock;

/// Elements removed from profile documents, contents included.
pub const STRIPPED_TAGS: [&str; 17] = [
    "script", "style", "iframe", "svg", "path", "noscript", "link", "meta", "object", "embed",
    "form", "footer", "header", "canvas", "picture", "source", "nav",
];

/// Main-content containers, tried in order. `body` always matches.
const MAIN_CONTENT_SELECTORS: [&str; 7] = [
    "main",
    r#"[role="main"]"#,
    "article",
    "#main-content",
    ".main-content",
    "#content",
    "body",
];

fn inter_tag_whitespace() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r">\s+<").expect("valid regex"))
}

/// Remove whitespace that sits strictly between a `>` and the next `<`.
#[must_use]
pub fn collapse_inter_tag_whitespace(html: &str) -> String {
    inter_tag_whitespace().replace_all(html, "><").into_owned()
}

fn main_content_root(document: &Html) -> Option<ElementRef<'_>> {
    MAIN_CONTENT_SELECTORS.iter().find_map(|selector| {
        let selector = Selector::parse(selector).ok()?;
        document.select(&selector).next()
    })
}

/// Reduce a full HTML document to a sanitized main-content fragment.
///
/// Returns `None` when the document has no usable content root.
#[must_use]
pub fn sanitize_profile_html(document: &str) -> Option<String> {
    let mut html = Html::parse_document(document);
    let root = main_content_root(&html)?.id();

    let mut stripped = Vec::new();
    let mut texts = Vec::new();
    for node in html.tree.get(root)?.descendants() {
        match node.value() {
            Node::Element(element) if STRIPPED_TAGS.contains(&element.name()) => {
                stripped.push(node.id());
            }
            Node::Text(_) => texts.push(node.id()),
            _ => {}
        }
    }

    for id in stripped {
        if let Some(mut node) = html.tree.get_mut(id) {
            node.detach();
        }
    }

    for id in texts {
        if let Some(mut node) = html.tree.get_mut(id) {
            if let Node::Text(text) = node.value() {
                let trimmed = text.text.trim().to_string();
                text.text = trimmed.as_str().into();
            }
        }
    }

    let fragment = ElementRef::wrap(html.tree.get(root)?)?.html();
    Some(collapse_inter_tag_whitespace(&fragment))
}

/// Captures sanitized athlete profiles.
pub struct ProfileExtractor<L: BrowserLauncher> {
    launcher: L,
    config: AppConfig,
}

impl<L: BrowserLauncher> ProfileExtractor<L> {
    #[must_use]
    pub fn new(launcher: L) -> Self {
        Self::with_config(launcher, AppConfig::default())
    }

    #[must_use]
    pub fn with_config(launcher: L, config: AppConfig) -> Self {
        Self { launcher, config }
    }

    /// Load a profile page and return its sanitized main content.
    ///
    /// Any failure (bad URL, launch error, navigation error) yields `None`.
    pub async fn extract(&self, player_url: &str) -> Option<ProfileDocument> {
        if let Err(e) = url::Url::parse(player_url) {
            tracing::warn!("Rejected profile URL {}: {}", player_url, e);
            return None;
        }

        let session = match self.launcher.launch().await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Could not start browser for {}: {}", player_url, e);
                return None;
            }
        };
        let outcome = guarded(self.capture(&session, player_url)).await;
        release(session).await;

        outcome.flatten().map(ProfileDocument::new)
    }

    /// Extract and wrap the outcome with the requested URL.
    pub async fn report(&self, player_url: &str) -> ProfileReport {
        ProfileReport {
            player_url: player_url.to_string(),
            profile_html: self.extract(player_url).await,
        }
    }

    async fn capture<P: BrowserActions>(&self, page: &P, player_url: &str) -> Option<String> {
        let controller = PageController::new(
            page,
            self.config.browser.navigation_timeout(),
            &self.config.scanning,
        );

        if let Err(e) = controller.navigate(player_url).await {
            tracing::warn!("Could not load profile {}: {}", player_url, e);
            return None;
        }
        controller.dismiss_interstitials().await;
        tokio::time::sleep(self.config.scanning.profile_settle()).await;

        let document = match page.content().await {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Could not read profile {}: {}", player_url, e);
                return None;
            }
        };

        let fragment = sanitize_profile_html(&document);
        if fragment.is_none() {
            tracing::debug!("No content root in profile {}", player_url);
        }
        fragment
    }
}
