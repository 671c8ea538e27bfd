use crate::actions::{BrowserActions, BrowserLauncher, BrowserSession, ElementSnapshot};
use crate::error::{BrowserError, Result};
use chromiumoxide::browser::{Browser, BrowserConfig as ChromeConfig};
use chromiumoxide::cdp::browser_protocol::page::NavigateParams;
use chromiumoxide::page::Page;
use futures::stream::StreamExt;
use roster_core::BrowserConfig;
use serde::Deserialize;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Interval between `document.readyState` checks while a navigation settles.
const READY_STATE_POLL: Duration = Duration::from_millis(100);

/// Snapshots matching elements as a JSON string; `%SELECTOR%` is a JSON string literal.
const QUERY_ALL_JS: &str = r"(() => JSON.stringify(
    Array.from(document.querySelectorAll(%SELECTOR%)).map((el) => {
        const rect = el.getBoundingClientRect();
        const style = window.getComputedStyle(el);
        return {
            text: el.innerText || '',
            href: el.getAttribute('href'),
            visible: rect.width > 0 && rect.height > 0
                && style.visibility !== 'hidden' && style.display !== 'none',
        };
    })
))()";

const READY_PROBE_JS: &str =
    "JSON.stringify({ state: document.readyState, origin: performance.timeOrigin })";

#[derive(Debug, Deserialize)]
struct ReadyProbe {
    state: String,
    origin: f64,
}

/// Launches headless Chromium sessions.
#[derive(Debug, Clone, Default)]
pub struct ChromiumLauncher {
    config: BrowserConfig,
}

impl ChromiumLauncher {
    /// Create a launcher with specific browser settings
    #[must_use]
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    fn chrome_config(&self) -> Result<ChromeConfig> {
        let mut builder = ChromeConfig::builder()
            .no_sandbox()
            .window_size(self.config.window_width, self.config.window_height)
            .request_timeout(self.config.navigation_timeout())
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-notifications");

        if !self.config.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &self.config.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        if let Some(user_agent) = &self.config.user_agent {
            builder = builder.arg(format!("--user-agent={user_agent}"));
        }

        builder.build().map_err(BrowserError::ChromiumError)
    }
}

#[async_trait::async_trait]
impl BrowserLauncher for ChromiumLauncher {
    type Session = ChromiumSession;

    async fn launch(&self) -> Result<ChromiumSession> {
        let (browser, mut handler) = Browser::launch(self.chrome_config()?)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler error: {:?}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(BrowserError::ChromiumError(format!(
                    "failed to open tab: {e}"
                )));
            }
        };

        tracing::debug!("Browser session launched");
        Ok(ChromiumSession {
            browser,
            handler,
            page,
        })
    }
}

/// One Chromium process with a single tab.
///
/// Dropping the session aborts the event handler, and chromiumoxide kills the
/// child process when the `Browser` is dropped, so a session never outlives
/// its owner even when `close` is skipped.
pub struct ChromiumSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
}

impl ChromiumSession {
    async fn evaluate_string(&self, expression: &str) -> Result<String> {
        self.page
            .evaluate(expression)
            .await
            .map_err(|e| BrowserError::ScriptError(e.to_string()))?
            .into_value::<String>()
            .map_err(|e| BrowserError::ScriptError(e.to_string()))
    }

    async fn ready_probe(&self) -> Option<ReadyProbe> {
        let json = self.evaluate_string(READY_PROBE_JS).await.ok()?;
        serde_json::from_str(&json).ok()
    }

    /// Issue the navigation and wait for the new document to leave `loading`.
    ///
    /// A fresh document is recognized by a changed `performance.timeOrigin`.
    async fn navigate_until_parsed(&self, url: &str) -> Result<()> {
        let previous_origin = self.ready_probe().await.map(|probe| probe.origin);

        let response = self
            .page
            .execute(NavigateParams::new(url))
            .await
            .map_err(|e| BrowserError::NavigationError(format!("{url}: {e}")))?;

        if let Some(error_text) = &response.result.error_text {
            return Err(BrowserError::NavigationError(format!(
                "{url}: {error_text}"
            )));
        }

        loop {
            if let Some(probe) = self.ready_probe().await {
                #[allow(clippy::float_cmp)]
                let fresh = previous_origin != Some(probe.origin);
                if fresh && probe.state != "loading" {
                    return Ok(());
                }
            }
            tokio::time::sleep(READY_STATE_POLL).await;
        }
    }
}

#[async_trait::async_trait]
impl BrowserActions for ChromiumSession {
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<()> {
        tokio::time::timeout(timeout, self.navigate_until_parsed(url))
            .await
            .map_err(|_| BrowserError::Timeout(format!("{url} did not load within {timeout:?}")))?
    }

    async fn current_url(&self) -> Result<String> {
        let url = self
            .page
            .url()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(url.unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn title(&self) -> Result<String> {
        let title = self
            .page
            .get_title()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(title.unwrap_or_default())
    }

    async fn body_text(&self) -> Result<String> {
        self.evaluate_string("document.body ? document.body.innerText : ''")
            .await
    }

    async fn content(&self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<ElementSnapshot>> {
        let literal = serde_json::to_string(selector)
            .map_err(|e| BrowserError::QueryFailed(format!("{selector}: {e}")))?;
        let script = QUERY_ALL_JS.replace("%SELECTOR%", &literal);

        let json = self
            .evaluate_string(&script)
            .await
            .map_err(|e| BrowserError::QueryFailed(format!("{selector}: {e}")))?;

        serde_json::from_str(&json)
            .map_err(|e| BrowserError::QueryFailed(format!("{selector}: {e}")))
    }

    async fn click(&self, selector: &str, index: usize) -> Result<()> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| BrowserError::QueryFailed(format!("{selector}: {e}")))?;

        let element = elements
            .get(index)
            .ok_or_else(|| BrowserError::SelectorNotFound(format!("{selector} [{index}]")))?;

        element
            .click()
            .await
            .map_err(|e| BrowserError::ChromiumError(format!("click {selector} [{index}]: {e}")))?;
        Ok(())
    }

    async fn scroll_by(&self, dx: i64, dy: i64) -> Result<()> {
        self.page
            .evaluate(format!("window.scrollBy({dx}, {dy})"))
            .await
            .map_err(|e| BrowserError::ScriptError(e.to_string()))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl BrowserSession for ChromiumSession {
    async fn close(mut self) -> Result<()> {
        if let Err(e) = self.page.clone().close().await {
            tracing::debug!("Failed to close tab: {}", e);
        }
        self.browser
            .close()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        if let Err(e) = self.browser.wait().await {
            tracing::debug!("Browser process did not exit cleanly: {}", e);
        }
        tracing::debug!("Browser session closed");
        Ok(())
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}
