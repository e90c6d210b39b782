use crate::analyzer::LifecycleAnalyzer;
use crate::matcher::first_match;
use crate::model::{LifecycleMap, LifecycleResult, ProductMetadata, TimeSeries};
use crate::scraper::{RetailSearch, TrendsSource};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq)]
pub enum InvalidRequest {
    #[error("no products were entered")]
    NoKeywords,
}

/// One lifecycle analysis as requested by the user.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub keywords: Vec<String>,
    pub timeframe: String,
    pub region: String,
    pub threshold: f64,
}

/// Everything the presentation layer shows for one tracked product.
#[derive(Debug, Clone)]
pub struct ProductReport {
    pub name: String,
    /// True when the table carries a column for this product.
    pub has_series: bool,
    pub lifecycle: Option<LifecycleResult>,
    pub metadata: Option<ProductMetadata>,
}

#[derive(Debug, Clone)]
pub struct LifecycleReport {
    pub table: TimeSeries,
    pub threshold: f64,
    pub lifecycles: LifecycleMap,
    pub products: Vec<ProductReport>,
}

impl LifecycleReport {
    /// False when the trends source returned nothing at all.
    pub fn has_data(&self) -> bool {
        !self.table.is_empty()
    }
}

pub struct Assembler<'a> {
    retail: &'a dyn RetailSearch,
    strict_filter: bool,
    analyzer: LifecycleAnalyzer,
}

impl<'a> Assembler<'a> {
    pub fn new(retail: &'a dyn RetailSearch, strict_filter: bool, analyzer: LifecycleAnalyzer) -> Self {
        Self {
            retail,
            strict_filter,
            analyzer,
        }
    }

    /// First retail candidate whose title matches `name`.
    pub async fn find_metadata(&self, name: &str) -> Option<ProductMetadata> {
        let candidates = self.retail.search(name, self.strict_filter).await;
        first_match(name, &candidates).cloned()
    }

    /// Fetch, analyze and assemble: the whole lifecycle pipeline.
    pub async fn analyze(
        &self,
        trends: &dyn TrendsSource,
        request: &AnalysisRequest,
    ) -> Result<LifecycleReport, InvalidRequest> {
        if request.keywords.is_empty() {
            return Err(InvalidRequest::NoKeywords);
        }
        let table = trends
            .fetch(&request.keywords, &request.timeframe, &request.region)
            .await;
        Ok(self.assemble(&request.keywords, table, request.threshold).await)
    }

    /// Runs the analyzer over `table` and looks up metadata per keyword, in order.
    ///
    /// An empty table short-circuits: no lookups, no per-product entries.
    pub async fn assemble(&self, keywords: &[String], table: TimeSeries, threshold: f64) -> LifecycleReport {
        let lifecycles = self.analyzer.analyze(&table, threshold);
        let mut products = Vec::new();

        if table.is_empty() {
            info!("📭 No trends data for {:?}", keywords);
        } else {
            for name in keywords {
                let metadata = self.find_metadata(name).await;
                products.push(ProductReport {
                    name: name.clone(),
                    has_series: table.column(name).is_some(),
                    lifecycle: lifecycles.get(name).cloned().flatten(),
                    metadata,
                });
            }
        }

        LifecycleReport {
            table,
            threshold,
            lifecycles,
            products,
        }
    }
}
