//! Trends comparison scraped from a rendered explore page.
//!
//! All timing lives here: the page is driven with fixed waits and the
//! accessible data table is read once everything has rendered.

use crate::config::BrowserConfig;
use crate::model::ScraperError;
use crate::parser::TrendsTableParser;
use crate::scraper::traits::BrowserDriver;
use crate::utils::{encode_spaces, split_keywords};

use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

pub struct RenderedTrendsScraper {
    cfg: BrowserConfig,
    parser: TrendsTableParser,
}

impl RenderedTrendsScraper {
    pub fn new(cfg: &BrowserConfig) -> Result<Self, ScraperError> {
        Ok(Self {
            cfg: cfg.clone(),
            parser: TrendsTableParser::new()?,
        })
    }

    /// Explore URL for the first term; the rest are added through the UI.
    pub fn explore_url(&self, first_term: &str) -> String {
        format!(
            "{}?date={}&geo={}&gprop={}&hl={}&q={}",
            self.cfg.base_url,
            encode_spaces(&self.cfg.timeframe),
            self.cfg.geo,
            self.cfg.gprop,
            self.cfg.lang,
            encode_spaces(first_term)
        )
    }

    /// Scrapes `(date, interest)` display rows for comma-separated `queries`.
    ///
    /// The driver is always closed afterwards. Any failure yields no rows.
    pub async fn scrape(&self, driver: &dyn BrowserDriver, queries: &str) -> Vec<(String, String)> {
        let terms = split_keywords(queries);
        if terms.is_empty() {
            return Vec::new();
        }

        let rows = match self.drive(driver, &terms).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("❌ Could not parse the trends table: {}", e);
                Vec::new()
            }
        };

        if let Err(e) = driver.close().await {
            warn!("Browser close failed: {}", e);
        }
        rows
    }

    async fn drive(&self, driver: &dyn BrowserDriver, terms: &[String]) -> Result<Vec<(String, String)>, ScraperError> {
        let url = self.explore_url(&terms[0]);
        info!("🕷️ Opening trends URL: {}", url);
        driver.goto(&url).await?;
        self.wait(self.cfg.page_load_ms).await;

        for term in &terms[1..] {
            if let Err(e) = self.add_term(driver, term).await {
                warn!("Could not add comparison term '{}': {}", term, e);
            }
        }

        let html = driver.content().await?;
        let rows = self.parser.parse(&html)?;
        info!("🕷️ Found {} rows", rows.len());
        Ok(rows)
    }

    async fn add_term(&self, driver: &dyn BrowserDriver, term: &str) -> Result<(), ScraperError> {
        let xpath = format!("//span[contains(text(), \"{}\")]", self.cfg.add_term_label);
        driver.click_xpath(&xpath).await?;
        self.wait(self.cfg.add_term_ms).await;

        driver.fill(&self.cfg.term_input_selector, term).await?;
        self.wait(self.cfg.typing_ms).await;

        driver.press_enter(&self.cfg.term_input_selector).await?;
        self.wait(self.cfg.submit_ms).await;
        Ok(())
    }

    async fn wait(&self, ms: u64) {
        if ms > 0 {
            sleep(Duration::from_millis(ms)).await;
        }
    }
}
