use crate::model::{TableError, TimeSeries};
use crate::utils::{parse_display_date, parse_interest};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Turns scraped `(date, interest)` display rows into a one-column table.
///
/// Rows that do not parse are skipped. The result is sorted by date and a
/// repeated date keeps its first row.
pub fn rows_to_table(entity: &str, rows: &[(String, String)]) -> Result<TimeSeries, TableError> {
    let mut points: Vec<(NaiveDate, f64)> = Vec::with_capacity(rows.len());
    for (date_text, interest_text) in rows {
        match (parse_display_date(date_text), parse_interest(interest_text)) {
            (Some(date), Some(value)) => points.push((date, value)),
            _ => debug!("skipping row ({:?}, {:?})", date_text, interest_text),
        }
    }

    if points.is_empty() && !rows.is_empty() {
        warn!(
            "⚠️ None of the {} scraped rows for '{}' could be read (first date cell: {:?})",
            rows.len(),
            entity,
            rows[0].0
        );
    }

    // stable sort keeps the first of duplicate dates in front
    points.sort_by_key(|(date, _)| *date);
    points.dedup_by_key(|(date, _)| *date);

    let (dates, values): (Vec<_>, Vec<_>) = points.into_iter().unzip();
    TimeSeries::new(dates)?.with_column(entity, values)
}
