//! Headless-browser page rendering.
//!
//! Rendering is modeled as a scoped resource: every [`PageRenderer::render`]
//! call launches a fresh hardened Chrome session, navigates, waits a fixed
//! settle delay for client-side rendering, snapshots the DOM, and tears the
//! session down on every exit path. The trait seam lets tests substitute a
//! fake renderer and exercise the rest of the pipeline without a browser.
//!
//! The settle wait is a fixed upper bound rather than a readiness poll; that
//! tradeoff (simplicity over robustness) is part of the observable contract.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as LaunchConfig};
use futures::StreamExt;
use tracing::{debug, info};

use crate::{DoclensError, Result};

/// Browser session configuration.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Fixed wait after navigation for client-side rendering to complete.
    pub settle_delay: Duration,
    pub window_width: u32,
    pub window_height: u32,
    /// Browser-like User-Agent presented to the target site.
    pub user_agent: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_secs(15),
            window_width: 1920,
            window_height: 1080,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
        }
    }
}

/// Automation-detection countermeasures passed at launch.
const HARDENING_ARGS: &[&str] =
    &["--disable-gpu", "--disable-dev-shm-usage", "--disable-blink-features=AutomationControlled"];

/// Hides the webdriver flag from scripts that probe for automation.
const WEBDRIVER_SHIM: &str = "Object.defineProperty(navigator, 'webdriver', {get: () => undefined})";

/// Turns a URL into rendered HTML.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, url: &str) -> Result<String>;
}

/// Production renderer backed by a per-call headless Chrome session.
pub struct HeadlessBrowser {
    config: BrowserConfig,
}

impl HeadlessBrowser {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    async fn snapshot(&self, browser: &Browser, url: &str) -> Result<String> {
        let page = browser.new_page("about:blank").await.map_err(scrape_err)?;
        page.set_user_agent(self.config.user_agent.as_str())
            .await
            .map_err(scrape_err)?;

        page.goto(url).await.map_err(scrape_err)?;
        page.evaluate(WEBDRIVER_SHIM).await.map_err(scrape_err)?;

        debug!(delay_secs = self.config.settle_delay.as_secs(), "waiting for client-side rendering");
        tokio::time::sleep(self.config.settle_delay).await;

        page.content().await.map_err(scrape_err)
    }
}

#[async_trait]
impl PageRenderer for HeadlessBrowser {
    async fn render(&self, url: &str) -> Result<String> {
        let launch = LaunchConfig::builder()
            .no_sandbox()
            .window_size(self.config.window_width, self.config.window_height)
            .args(HARDENING_ARGS.to_vec())
            .build()
            .map_err(DoclensError::Scrape)?;

        info!(url, "launching browser session");
        let (mut browser, mut handler) = Browser::launch(launch).await.map_err(scrape_err)?;
        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let outcome = self.snapshot(&browser, url).await;

        // Teardown happens on every path before the outcome is surfaced.
        if let Err(error) = browser.close().await {
            debug!(%error, "browser close failed");
        }
        let _ = browser.wait().await;
        events.abort();

        outcome
    }
}

fn scrape_err(e: chromiumoxide::error::CdpError) -> DoclensError {
    DoclensError::Scrape(e.to_string())
}
