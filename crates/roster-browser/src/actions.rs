use crate::error::{BrowserError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What an element looked like at query time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ElementSnapshot {
    /// Rendered text (`innerText`)
    pub text: String,
    /// Raw `href` attribute, unresolved
    pub href: Option<String>,
    /// Whether the element occupies space and is not hidden by style
    pub visible: bool,
}

/// Primitive operations on a single browser tab.
#[async_trait::async_trait]
pub trait BrowserActions: Send + Sync {
    /// Navigate to a URL and return once the DOM has been parsed.
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<()>;

    /// URL of the document currently loaded
    async fn current_url(&self) -> Result<String>;

    /// Document title
    async fn title(&self) -> Result<String>;

    /// Visible text of the document body
    async fn body_text(&self) -> Result<String>;

    /// Serialized HTML of the whole document
    async fn content(&self) -> Result<String>;

    /// Snapshot every element matching a CSS selector, in document order.
    async fn query_all(&self, selector: &str) -> Result<Vec<ElementSnapshot>>;

    /// Click the `index`-th element matching a CSS selector.
    async fn click(&self, selector: &str, index: usize) -> Result<()>;

    /// Scroll the viewport by the given offsets
    async fn scroll_by(&self, dx: i64, dy: i64) -> Result<()>;
}

/// A browser instance plus one tab, owned by a single top-level call.
#[async_trait::async_trait]
pub trait BrowserSession: BrowserActions + Sized {
    /// Close the tab and shut the browser down.
    async fn close(self) -> Result<()>;
}

/// Capability to open fresh browser sessions.
#[async_trait::async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// Session type produced by this launcher
    type Session: BrowserSession;

    /// Launch a browser and open one blank tab.
    async fn launch(&self) -> Result<Self::Session>;
}

/// Scheme, host and port of a URL, e.g. `https://example.edu`.
pub fn origin_of(url: &str) -> Result<String> {
    let url = url::Url::parse(url)
        .map_err(|e| BrowserError::NavigationError(format!("Invalid URL: {}", e)))?;

    if url.host_str().is_none() {
        return Err(BrowserError::NavigationError("No host in URL".to_string()));
    }

    Ok(url.origin().ascii_serialization())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_of() {
        assert_eq!(
            origin_of("https://gobearcats.com/sports/mens-basketball/roster").unwrap(),
            "https://gobearcats.com"
        );
        assert_eq!(
            origin_of("http://athletics.example.edu:8080/path?x=1").unwrap(),
            "http://athletics.example.edu:8080"
        );
    }

    #[test]
    fn test_origin_of_invalid() {
        assert!(origin_of("not-a-url").is_err());
        assert!(origin_of("data:text/html,<p>x</p>").is_err());
    }
}
