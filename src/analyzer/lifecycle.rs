use crate::analyzer::smoothing::moving_average;
use crate::config::LifecycleConfig;
use crate::model::{LifecycleMap, LifecycleResult, TimeSeries};
use chrono::NaiveDate;
use tracing::debug;

/// Smoothing parameters for the lifecycle search.
///
/// The default averages whatever samples a leading window has. Setting
/// `min_periods = window` gives the strict rolling mean instead, where the
/// first `window - 1` points carry no smoothed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleOptions {
    pub window: usize,
    /// Minimum samples a window needs to produce a smoothed point.
    pub min_periods: usize,
}

impl Default for LifecycleOptions {
    fn default() -> Self {
        Self {
            window: 3,
            min_periods: 1,
        }
    }
}

impl From<&LifecycleConfig> for LifecycleOptions {
    fn from(cfg: &LifecycleConfig) -> Self {
        Self {
            window: cfg.window,
            min_periods: cfg.min_periods,
        }
    }
}

/// Computes the lifecycle of every column with the default window of 3.
pub fn compute_lifecycle(table: &TimeSeries, threshold: f64) -> LifecycleMap {
    compute_lifecycle_with(table, threshold, &LifecycleOptions::default())
}

pub fn compute_lifecycle_with(
    table: &TimeSeries,
    threshold: f64,
    options: &LifecycleOptions,
) -> LifecycleMap {
    table
        .columns()
        .iter()
        .map(|col| {
            let result = analyze_series(table.dates(), &col.values, threshold, options);
            debug!("lifecycle for '{}': {:?}", col.name, result);
            (col.name.clone(), result)
        })
        .collect()
}

/// Finds the smoothed peak and the first point at or after it that is
/// strictly below `threshold`.
///
/// Ties on the peak resolve to the earliest date. Returns `None` when the
/// smoothed series is empty or never drops below `threshold` after the peak.
pub fn analyze_series(
    dates: &[NaiveDate],
    values: &[f64],
    threshold: f64,
    options: &LifecycleOptions,
) -> Option<LifecycleResult> {
    let smoothed: Vec<(NaiveDate, f64)> = dates
        .iter()
        .copied()
        .zip(moving_average(values, options.window, options.min_periods))
        .filter_map(|(date, value)| value.map(|v| (date, v)))
        .collect();

    let mut peak: Option<usize> = None;
    for (i, &(_, value)) in smoothed.iter().enumerate() {
        match peak {
            Some(p) if value <= smoothed[p].1 => {}
            _ => peak = Some(i),
        }
    }
    let peak = peak?;
    let (peak_date, peak_value) = smoothed[peak];

    let &(decline_date, _) = smoothed[peak..].iter().find(|(_, v)| *v < threshold)?;

    Some(LifecycleResult {
        peak_date,
        peak_value,
        decline_date,
        duration: decline_date - peak_date,
    })
}

/// Stateful wrapper carrying the configured smoothing options.
#[derive(Debug, Clone, Default)]
pub struct LifecycleAnalyzer {
    options: LifecycleOptions,
}

impl LifecycleAnalyzer {
    pub fn new(options: LifecycleOptions) -> Self {
        Self { options }
    }

    pub fn analyze(&self, table: &TimeSeries, threshold: f64) -> LifecycleMap {
        compute_lifecycle_with(table, threshold, &self.options)
    }
}
