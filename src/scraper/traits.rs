use crate::model::{ProductMetadata, ScraperError, TimeSeries};

/// Interest-over-time source. Failures degrade to an empty table.
#[async_trait::async_trait]
pub trait TrendsSource: Send + Sync {
    async fn fetch(&self, keywords: &[String], timeframe: &str, region: &str) -> TimeSeries;
}

/// Retail search source. Result order is significant; failures degrade to no results.
#[async_trait::async_trait]
pub trait RetailSearch: Send + Sync {
    async fn search(&self, query: &str, strict_filter: bool) -> Vec<ProductMetadata>;
}

/// Minimal browser surface the rendered-page scraper needs.
#[async_trait::async_trait]
pub trait BrowserDriver: Send + Sync {
    async fn goto(&self, url: &str) -> Result<(), ScraperError>;
    async fn click_xpath(&self, xpath: &str) -> Result<(), ScraperError>;
    /// Clears the input matching `selector` and types `text` into it.
    async fn fill(&self, selector: &str, text: &str) -> Result<(), ScraperError>;
    async fn press_enter(&self, selector: &str) -> Result<(), ScraperError>;
    /// Current page HTML.
    async fn content(&self) -> Result<String, ScraperError>;
    async fn close(&self) -> Result<(), ScraperError>;
}
