//! In-memory athletics site for exercising the scanner without a browser.

use async_trait::async_trait;
use roster_browser::{
    BrowserActions, BrowserError, BrowserLauncher, BrowserSession, ElementSnapshot, Result,
};
use roster_core::{AppConfig, ScanningConfig};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

pub const BASE: &str = "https://example.edu";

/// Selector the page controller uses to find overlay controls.
#[allow(dead_code)]
pub const CONTROLS: &str = r#"button, [role="button"]"#;

/// Absolute URL on the fake site.
#[allow(dead_code)]
pub fn at(path: &str) -> String {
    format!("{BASE}{path}")
}

/// Default settings with every settle delay zeroed.
#[allow(dead_code)]
pub fn fast_config() -> AppConfig {
    AppConfig {
        scanning: ScanningConfig::immediate(),
        ..AppConfig::default()
    }
}

fn normalize(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[derive(Debug, Clone, Default)]
pub struct FakePage {
    pub title: String,
    pub body: String,
    pub html: String,
    pub elements: HashMap<String, Vec<ElementSnapshot>>,
    pub invalid_selectors: HashSet<String>,
    /// Selectors whose first `n` queries fail
    pub flaky_selectors: HashMap<String, usize>,
    /// Labels of elements that disappear once clicked
    pub removed_on_click: HashSet<String>,
}

#[allow(dead_code)]
impl FakePage {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            body: format!("Welcome to {title}"),
            ..Self::default()
        }
    }

    pub fn not_found() -> Self {
        Self {
            title: "Page Not Found".to_string(),
            body: "Error 404: the page you requested does not exist".to_string(),
            ..Self::default()
        }
    }

    /// Visible links matching `selector`, as `(text, href)` pairs.
    pub fn with_links(self, selector: &str, links: &[(&str, &str)]) -> Self {
        let snapshots = links
            .iter()
            .map(|(text, href)| ElementSnapshot {
                text: (*text).to_string(),
                href: Some((*href).to_string()),
                visible: true,
            })
            .collect();
        self.with_elements(selector, snapshots)
    }

    pub fn with_elements(mut self, selector: &str, elements: Vec<ElementSnapshot>) -> Self {
        self.elements.insert(selector.to_string(), elements);
        self
    }

    pub fn with_html(mut self, html: &str) -> Self {
        self.html = html.to_string();
        self
    }

    pub fn with_invalid_selector(mut self, selector: &str) -> Self {
        self.invalid_selectors.insert(selector.to_string());
        self
    }

    pub fn with_flaky_selector(mut self, selector: &str, failures: usize) -> Self {
        self.flaky_selectors.insert(selector.to_string(), failures);
        self
    }

    /// Clicking an element with this label removes it from the page.
    pub fn removed_on_click(mut self, label: &str) -> Self {
        self.removed_on_click.insert(label.to_string());
        self
    }
}

/// Everything the fake browser was asked to do.
#[derive(Debug, Default)]
pub struct Log {
    pub launches: usize,
    pub closes: usize,
    pub navigations: Vec<String>,
    /// `(page url, selector)` pairs
    pub queries: Vec<(String, String)>,
    /// `(selector, index)` pairs
    pub clicks: Vec<(String, usize)>,
    /// Text of each clicked element
    pub clicked_labels: Vec<String>,
    /// Page URL of each scroll
    pub scrolls: Vec<String>,
    /// Scrolls and queries in the order they happened
    pub timeline: Vec<String>,
}

#[allow(dead_code)]
impl Log {
    /// Selectors queried while `url` was loaded.
    pub fn selectors_on(&self, url: &str) -> Vec<String> {
        self.queries
            .iter()
            .filter(|(page, _)| page == url)
            .map(|(_, selector)| selector.clone())
            .collect()
    }

    /// Whether `url` was scrolled before `selector` was first queried on it.
    pub fn scrolled_before(&self, url: &str, selector: &str) -> bool {
        let position = |entry: String| self.timeline.iter().position(|e| *e == entry);
        match (
            position(format!("scroll {url}")),
            position(format!("query {url} {selector}")),
        ) {
            (Some(scroll), Some(query)) => scroll < query,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct SiteData {
    pages: HashMap<String, FakePage>,
    failing: HashSet<String>,
    panic_on: Option<String>,
    launch_fails: bool,
}

/// A launcher serving fixed pages and recording every interaction.
#[derive(Debug, Clone, Default)]
pub struct FakeSite {
    data: SiteData,
    log: Arc<Mutex<Log>>,
}

#[allow(dead_code)]
impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, page: FakePage) -> Self {
        self.data.pages.insert(normalize(url), page);
        self
    }

    /// Navigation to `url` fails as if the host were unreachable.
    pub fn failing(mut self, url: &str) -> Self {
        self.data.failing.insert(normalize(url));
        self
    }

    /// Navigation to `url` panics.
    pub fn panic_on(mut self, url: &str) -> Self {
        self.data.panic_on = Some(normalize(url));
        self
    }

    pub fn launch_fails(mut self) -> Self {
        self.data.launch_fails = true;
        self
    }

    /// Shared handle on the interaction log.
    pub fn log(&self) -> Arc<Mutex<Log>> {
        Arc::clone(&self.log)
    }
}

#[async_trait]
impl BrowserLauncher for FakeSite {
    type Session = FakeTab;

    async fn launch(&self) -> Result<FakeTab> {
        self.log.lock().unwrap().launches += 1;
        if self.data.launch_fails {
            return Err(BrowserError::ChromiumError(
                "no Chrome executable found".to_string(),
            ));
        }
        Ok(FakeTab {
            site: self.data.clone(),
            current: Mutex::new(None),
            removed: Mutex::new(HashSet::new()),
            failed_queries: Mutex::new(HashMap::new()),
            log: Arc::clone(&self.log),
        })
    }
}

pub struct FakeTab {
    site: SiteData,
    current: Mutex<Option<String>>,
    /// `(page url, label)` of elements removed by clicks
    removed: Mutex<HashSet<(String, String)>>,
    /// Failures served so far per `(page url, selector)`
    failed_queries: Mutex<HashMap<(String, String), usize>>,
    log: Arc<Mutex<Log>>,
}

impl FakeTab {
    fn log(&self) -> MutexGuard<'_, Log> {
        self.log.lock().unwrap()
    }

    fn current_url_now(&self) -> String {
        self.current
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| "about:blank".to_string())
    }

    fn current_page(&self) -> FakePage {
        let url = self.current_url_now();
        if url == "about:blank" {
            return FakePage::default();
        }
        let mut page = self
            .site
            .pages
            .get(&url)
            .cloned()
            .unwrap_or_else(FakePage::not_found);

        let removed = self.removed.lock().unwrap();
        for elements in page.elements.values_mut() {
            elements.retain(|element| !removed.contains(&(url.clone(), element.text.clone())));
        }
        page
    }

    /// Serve one of the configured initial failures for `selector`, if any remain.
    fn take_flaky_failure(&self, url: &str, page: &FakePage, selector: &str) -> bool {
        let Some(&failures) = page.flaky_selectors.get(selector) else {
            return false;
        };
        let mut served = self.failed_queries.lock().unwrap();
        let count = served
            .entry((url.to_string(), selector.to_string()))
            .or_insert(0);
        if *count < failures {
            *count += 1;
            true
        } else {
            false
        }
    }
}

#[async_trait]
impl BrowserActions for FakeTab {
    async fn navigate(&self, url: &str, _timeout: Duration) -> Result<()> {
        let url = normalize(url);
        self.log().navigations.push(url.clone());

        if self.site.panic_on.as_deref() == Some(url.as_str()) {
            panic!("renderer crashed on {url}");
        }
        if self.site.failing.contains(&url) {
            return Err(BrowserError::NavigationError(format!(
                "net::ERR_NAME_NOT_RESOLVED at {url}"
            )));
        }

        *self.current.lock().unwrap() = Some(url);
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.current_url_now())
    }

    async fn title(&self) -> Result<String> {
        Ok(self.current_page().title)
    }

    async fn body_text(&self) -> Result<String> {
        Ok(self.current_page().body)
    }

    async fn content(&self) -> Result<String> {
        Ok(self.current_page().html)
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<ElementSnapshot>> {
        let url = self.current_url_now();
        {
            let mut log = self.log();
            log.timeline.push(format!("query {url} {selector}"));
            log.queries.push((url.clone(), selector.to_string()));
        }

        let page = self.current_page();
        if self.take_flaky_failure(&url, &page, selector) {
            return Err(BrowserError::QueryFailed(format!(
                "'{selector}' detached during query"
            )));
        }
        if page.invalid_selectors.contains(selector) {
            return Err(BrowserError::QueryFailed(format!(
                "'{selector}' is not a valid selector"
            )));
        }
        Ok(page.elements.get(selector).cloned().unwrap_or_default())
    }

    async fn click(&self, selector: &str, index: usize) -> Result<()> {
        let page = self.current_page();
        let Some(element) = page.elements.get(selector).and_then(|e| e.get(index)) else {
            return Err(BrowserError::SelectorNotFound(selector.to_string()));
        };

        {
            let mut log = self.log();
            log.clicks.push((selector.to_string(), index));
            log.clicked_labels.push(element.text.clone());
        }
        if page.removed_on_click.contains(&element.text) {
            self.removed
                .lock()
                .unwrap()
                .insert((self.current_url_now(), element.text.clone()));
        }
        Ok(())
    }

    async fn scroll_by(&self, _dx: i64, _dy: i64) -> Result<()> {
        let url = self.current_url_now();
        let mut log = self.log();
        log.timeline.push(format!("scroll {url}"));
        log.scrolls.push(url);
        Ok(())
    }
}

#[async_trait]
impl BrowserSession for FakeTab {
    async fn close(self) -> Result<()> {
        self.log().closes += 1;
        Ok(())
    }
}
