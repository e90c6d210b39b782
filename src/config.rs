use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrendsConfig {
    pub base_url: String,
    pub hl: String,
    pub tz: i32,
    pub geo: String,
    pub timeframe: String,
    pub timeout_secs: u64,
}

impl Default for TrendsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://trends.google.com".into(),
            hl: "en-US".into(),
            tz: 360,
            geo: "US".into(),
            timeframe: "today 5-y".into(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetailConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub strict_filter: bool,
    /// Fixed pause after each search page.
    pub politeness_delay_ms: u64,
}

impl Default for RetailConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.zap.co.il/search.aspx".into(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/111.0.0.0 Safari/537.36"
                .into(),
            timeout_secs: 15,
            strict_filter: true,
            politeness_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub base_url: String,
    pub geo: String,
    pub gprop: String,
    pub lang: String,
    pub timeframe: String,
    pub add_term_label: String,
    pub term_input_selector: String,
    pub chrome_path: Option<String>,
    pub page_load_ms: u64,
    pub add_term_ms: u64,
    pub typing_ms: u64,
    pub submit_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            base_url: "https://trends.google.com/trends/explore".into(),
            geo: "IL".into(),
            gprop: "froogle".into(),
            lang: "iw".into(),
            timeframe: "today 5-y".into(),
            add_term_label: "הוסף מונח להשוואה".into(),
            term_input_selector: "#input-99".into(),
            chrome_path: None,
            page_load_ms: 5000,
            add_term_ms: 2000,
            typing_ms: 1000,
            submit_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    pub threshold: f64,
    pub window: usize,
    pub min_periods: usize,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            threshold: 20.0,
            window: 3,
            min_periods: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DurationLabels {
    pub years: String,
    pub months: String,
    pub days: String,
}

impl Default for DurationLabels {
    fn default() -> Self {
        Self {
            years: "years".into(),
            months: "months".into(),
            days: "days".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub date_format: String,
    pub duration_labels: DurationLabels,
    pub max_stars: u32,
    pub sparkline_width: usize,
    pub show_table: bool,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            date_format: "%d/%m/%Y".into(),
            duration_labels: DurationLabels::default(),
            max_stars: 5,
            sparkline_width: 60,
            show_table: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub trends: TrendsConfig,
    pub retail: RetailConfig,
    pub browser: BrowserConfig,
    pub lifecycle: LifecycleConfig,
    pub presentation: PresentationConfig,
}

pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content).map_err(|source| ConfigError::Json {
        path: path.display().to_string(),
        source,
    })
}

pub fn parse_config(content: &str) -> Result<AppConfig, serde_json::Error> {
    serde_json::from_str(content)
}

/// Maps a UI timeframe label to the trends timeframe code.
/// Unknown labels are passed through unchanged.
pub fn timeframe_code(label: &str) -> &str {
    match label {
        "Last 5 Years" => "today 5-y",
        "Last 12 Months" => "today 12-m",
        "Last 3 Months" => "today 3-m",
        "Last 1 Month" => "today 1-m",
        other => other,
    }
}

/// Maps a region preset to its code; "worldwide" is the empty code.
pub fn region_code(label: &str) -> &str {
    match label.to_ascii_lowercase().as_str() {
        "worldwide" | "world" | "" => "",
        "us" => "US",
        "il" => "IL",
        "gb" | "uk" => "GB",
        _ => label,
    }
}
