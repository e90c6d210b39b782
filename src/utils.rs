// Utility functions
use chrono::{DateTime, NaiveDate};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d.%m.%Y", "%b %d, %Y", "%B %d, %Y", "%d %b %Y", "%d %B %Y"];

/// Parses a date as shown on a trends page, if possible.
///
/// Weekly ranges such as `Sep 4 – 10, 2022` resolve to their first day.
pub fn parse_display_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
    {
        return Some(date);
    }

    let (start, _) = text.split_once('–').or_else(|| text.split_once(" - "))?;
    let year = text.rsplit(|c: char| !c.is_ascii_digit()).find(|s| s.len() == 4)?;
    let start = start.trim();
    parse_display_date(start).or_else(|| parse_display_date(&format!("{}, {}", start, year)))
}

/// Parses an interest cell; `<1` counts as zero.
pub fn parse_interest(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.starts_with('<') {
        return Some(0.0);
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Converts unix seconds to a UTC calendar day.
pub fn unix_to_date(secs: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive())
}

/// Splits a comma-separated product list, dropping blanks and repeats.
pub fn split_keywords(text: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for term in text.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !keywords.iter().any(|k| k == term) {
            keywords.push(term.to_string());
        }
    }
    keywords
}

/// Encodes spaces as `%20` for the explore URL.
pub fn encode_spaces(text: &str) -> String {
    text.replace(' ', "%20")
}
