// Retail search over HTTP
use crate::config::RetailConfig;
use crate::matcher::filter_candidates;
use crate::model::{ProductMetadata, ScraperError};
use crate::parser::{Parser, ZapParser};
use crate::scraper::traits::RetailSearch;

use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

pub struct ZapClient {
    client: Client,
    base_url: String,
    politeness_delay: Duration,
    parser: ZapParser,
}

impl ZapClient {
    pub fn new(cfg: &RetailConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: cfg.base_url.clone(),
            politeness_delay: Duration::from_millis(cfg.politeness_delay_ms),
            parser: ZapParser::new()?,
        })
    }

    /// Fetches the raw search page for `query`.
    pub async fn fetch_page(&self, query: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("keyword", query)])
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        response.text().await.map_err(map_request_error)
    }

    /// Fetches, parses and optionally filters candidates, surfacing errors.
    pub async fn try_search(&self, query: &str, strict_filter: bool) -> Result<Vec<ProductMetadata>, ScraperError> {
        let html = self.fetch_page(query).await?;
        let products = self.parser.parse(&html)?;

        if !self.politeness_delay.is_zero() {
            sleep(self.politeness_delay).await;
        }

        if strict_filter {
            Ok(filter_candidates(query, products))
        } else {
            Ok(products)
        }
    }
}

#[async_trait::async_trait]
impl RetailSearch for ZapClient {
    async fn search(&self, query: &str, strict_filter: bool) -> Vec<ProductMetadata> {
        match self.try_search(query, strict_filter).await {
            Ok(products) => {
                info!("🔍 '{}': {} candidates", query, products.len());
                products
            }
            Err(e) => {
                warn!("❌ Retail search for '{}' failed: {}", query, e);
                Vec::new()
            }
        }
    }
}

pub(crate) fn map_request_error(e: reqwest::Error) -> ScraperError {
    if e.is_timeout() {
        ScraperError::Timeout
    } else {
        ScraperError::Http(e)
    }
}
