//! Headless Chrome driver backed by chromiumoxide.
//!
//! Requires the `browser` feature flag.

use crate::config::BrowserConfig;
use crate::model::ScraperError;
use crate::scraper::traits::BrowserDriver;

use async_trait::async_trait;
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

pub struct ChromiumDriver {
    page: Mutex<Page>,
    browser: Mutex<Browser>,
    _handler: JoinHandle<()>,
}

impl ChromiumDriver {
    /// Launches a headless browser with one blank page.
    pub async fn launch(cfg: &BrowserConfig) -> Result<Self, ScraperError> {
        let mut builder = chromiumoxide::BrowserConfig::builder()
            .arg("--disable-gpu")
            .arg("--no-first-run")
            .arg("--disable-dev-shm-usage");
        if let Some(path) = &cfg.chrome_path {
            builder = builder.chrome_executable(path);
        }
        let browser_config = builder
            .build()
            .map_err(|e| ScraperError::Browser(format!("browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScraperError::Browser(format!("launch: {}", e)))?;

        let handler_task = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScraperError::Browser(format!("new page: {}", e)))?;

        Ok(Self {
            page: Mutex::new(page),
            browser: Mutex::new(browser),
            _handler: handler_task,
        })
    }
}

fn browser_err(action: &str, e: impl std::fmt::Display) -> ScraperError {
    ScraperError::Browser(format!("{}: {}", action, e))
}

#[async_trait]
impl BrowserDriver for ChromiumDriver {
    async fn goto(&self, url: &str) -> Result<(), ScraperError> {
        let page = self.page.lock().await;
        page.goto(url).await.map_err(|e| browser_err("goto", e))?;
        Ok(())
    }

    async fn click_xpath(&self, xpath: &str) -> Result<(), ScraperError> {
        let page = self.page.lock().await;
        let element = page
            .find_xpath(xpath)
            .await
            .map_err(|e| browser_err(xpath, e))?;
        element.click().await.map_err(|e| browser_err("click", e))?;
        Ok(())
    }

    async fn fill(&self, selector: &str, text: &str) -> Result<(), ScraperError> {
        let clear_js = format!(
            "document.querySelector('{}').value = ''",
            selector.replace('\'', "\\'")
        );
        let page = self.page.lock().await;
        page.evaluate(clear_js)
            .await
            .map_err(|e| browser_err(selector, e))?;

        let element = page
            .find_element(selector)
            .await
            .map_err(|e| browser_err(selector, e))?;
        element.click().await.map_err(|e| browser_err("focus", e))?;
        element.type_str(text).await.map_err(|e| browser_err("type", e))?;
        Ok(())
    }

    async fn press_enter(&self, selector: &str) -> Result<(), ScraperError> {
        let page = self.page.lock().await;
        let element = page
            .find_element(selector)
            .await
            .map_err(|e| browser_err(selector, e))?;
        element.press_key("Enter").await.map_err(|e| browser_err("enter", e))?;
        Ok(())
    }

    async fn content(&self) -> Result<String, ScraperError> {
        let page = self.page.lock().await;
        page.content().await.map_err(|e| browser_err("content", e))
    }

    async fn close(&self) -> Result<(), ScraperError> {
        let mut browser = self.browser.lock().await;
        browser.close().await.map_err(|e| browser_err("close", e))?;
        Ok(())
    }
}
