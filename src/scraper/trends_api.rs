//! Interest-over-time client for the Google Trends web API.
//!
//! Two round trips: `explore` hands out a token for the TIMESERIES widget,
//! then `widgetdata/multiline` returns the timeline for that token.

use crate::config::TrendsConfig;
use crate::model::{ScraperError, TimeSeries};
use crate::scraper::fetcher::map_request_error;
use crate::scraper::traits::TrendsSource;
use crate::utils::unix_to_date;

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

const TIMESERIES_WIDGET: &str = "TIMESERIES";

#[derive(Debug, Deserialize)]
struct ExploreResponse {
    widgets: Vec<Widget>,
}

#[derive(Debug, Deserialize)]
struct Widget {
    id: String,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    request: Value,
}

#[derive(Debug, Deserialize)]
struct MultilineResponse {
    default: Timeline,
}

#[derive(Debug, Deserialize)]
struct Timeline {
    #[serde(rename = "timelineData", default)]
    timeline_data: Vec<TimelinePoint>,
}

#[derive(Debug, Deserialize)]
struct TimelinePoint {
    time: String,
    // `isPartial` is never read, so it never becomes a column
    #[serde(default)]
    value: Vec<f64>,
}

pub struct TrendsApiClient {
    client: Client,
    cfg: TrendsConfig,
}

impl TrendsApiClient {
    pub fn new(cfg: &TrendsConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            cfg: cfg.clone(),
        })
    }

    pub async fn try_fetch(
        &self,
        keywords: &[String],
        timeframe: &str,
        region: &str,
    ) -> Result<TimeSeries, ScraperError> {
        if keywords.is_empty() {
            return Ok(TimeSeries::empty());
        }

        self.warm_up_cookies().await;

        let (request, token) = self.explore(keywords, timeframe, region).await?;
        let body = self
            .get_text(
                "/trends/api/widgetdata/multiline",
                &[
                    ("req", request.to_string()),
                    ("token", token),
                    ("tz", self.cfg.tz.to_string()),
                ],
            )
            .await?;

        parse_timeline(keywords, &body)
    }

    // best-effort: sets the session cookie the API expects
    async fn warm_up_cookies(&self) {
        let geo = self.cfg.hl.rsplit('-').next().unwrap_or("US");
        let url = format!("{}/?geo={}", self.cfg.base_url, geo);
        if let Err(e) = self.client.get(&url).send().await {
            debug!("cookie warm-up failed: {}", e);
        }
    }

    async fn explore(
        &self,
        keywords: &[String],
        timeframe: &str,
        region: &str,
    ) -> Result<(Value, String), ScraperError> {
        let req = explore_request(keywords, timeframe, region);
        let body = self
            .get_text(
                "/trends/api/explore",
                &[
                    ("hl", self.cfg.hl.clone()),
                    ("tz", self.cfg.tz.to_string()),
                    ("req", req.to_string()),
                ],
            )
            .await?;

        let explore: ExploreResponse = decode("explore", &body)?;
        let widget = explore
            .widgets
            .into_iter()
            .find(|w| w.id == TIMESERIES_WIDGET)
            .ok_or_else(|| invalid("explore", "no TIMESERIES widget"))?;
        let token = widget
            .token
            .ok_or_else(|| invalid("explore", "TIMESERIES widget has no token"))?;
        Ok((widget.request, token))
    }

    async fn get_text(&self, path: &str, params: &[(&str, String)]) -> Result<String, ScraperError> {
        let url = format!("{}{}", self.cfg.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }
        response.text().await.map_err(map_request_error)
    }
}

#[async_trait::async_trait]
impl TrendsSource for TrendsApiClient {
    async fn fetch(&self, keywords: &[String], timeframe: &str, region: &str) -> TimeSeries {
        info!("📈 Fetching trends for {:?} ({}, geo='{}')", keywords, timeframe, region);
        match self.try_fetch(keywords, timeframe, region).await {
            Ok(table) => {
                info!("📈 {} rows x {} series", table.len(), table.columns().len());
                table
            }
            Err(e) => {
                warn!("❌ Trends fetch failed: {}", e);
                TimeSeries::empty()
            }
        }
    }
}

fn explore_request(keywords: &[String], timeframe: &str, region: &str) -> Value {
    let items: Vec<Value> = keywords
        .iter()
        .map(|kw| json!({ "keyword": kw, "time": timeframe, "geo": region }))
        .collect();
    json!({ "comparisonItem": items, "category": 0, "property": "" })
}

/// Drops the anti-JSON-hijacking prefix (`)]}'`) in front of the payload.
fn strip_json_prefix(body: &str) -> &str {
    body.find('{').map(|i| &body[i..]).unwrap_or(body)
}

fn decode<T: serde::de::DeserializeOwned>(context: &str, body: &str) -> Result<T, ScraperError> {
    serde_json::from_str(strip_json_prefix(body)).map_err(|e| invalid(context, &e.to_string()))
}

fn invalid(context: &str, reason: &str) -> ScraperError {
    ScraperError::InvalidResponse {
        context: context.to_string(),
        reason: reason.to_string(),
    }
}

/// Decodes a multiline payload into one column per keyword.
///
/// Points whose timestamp does not parse, or that repeat an earlier day, are
/// dropped; a point missing a keyword's value counts as zero.
pub fn parse_timeline(keywords: &[String], body: &str) -> Result<TimeSeries, ScraperError> {
    let response: MultilineResponse = decode("multiline", body)?;

    let mut dates: Vec<NaiveDate> = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); keywords.len()];
    for point in response.default.timeline_data {
        let Some(date) = point.time.parse::<i64>().ok().and_then(unix_to_date) else {
            debug!("skipping point with time {:?}", point.time);
            continue;
        };
        if dates.last().is_some_and(|last| *last >= date) {
            debug!("skipping out-of-order point {}", date);
            continue;
        }
        dates.push(date);
        for (i, column) in columns.iter_mut().enumerate() {
            column.push(point.value.get(i).copied().unwrap_or(0.0));
        }
    }

    let mut table = TimeSeries::new(dates)?;
    for (keyword, values) in keywords.iter().zip(columns) {
        table.add_column(keyword.as_str(), values)?;
    }
    Ok(table)
}
