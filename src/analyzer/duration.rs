use crate::config::DurationLabels;
use chrono::Duration;

const DAYS_PER_YEAR: i64 = 365;
const DAYS_PER_MONTH: i64 = 30;

/// Fixed civil breakdown of an elapsed time: 365-day years, 30-day months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationBreakdown {
    pub years: i64,
    pub months: i64,
    pub days: i64,
}

impl DurationBreakdown {
    /// Only whole days count; negative durations are treated as zero.
    pub fn from_duration(duration: Duration) -> Self {
        let total = duration.num_days().max(0);
        let rem = total % DAYS_PER_YEAR;
        Self {
            years: total / DAYS_PER_YEAR,
            months: rem / DAYS_PER_MONTH,
            days: rem % DAYS_PER_MONTH,
        }
    }
}

/// Formats as `"<y> years, <m> months, <d> days"`.
pub fn format_duration(duration: Duration) -> String {
    format_duration_with(duration, &DurationLabels::default())
}

pub fn format_duration_with(duration: Duration, labels: &DurationLabels) -> String {
    let b = DurationBreakdown::from_duration(duration);
    format!(
        "{} {}, {} {}, {} {}",
        b.years, labels.years, b.months, labels.months, b.days, labels.days
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_hundred_days() {
        assert_eq!(format_duration(Duration::days(400)), "1 years, 1 months, 5 days");
    }

    #[test]
    fn zero_days() {
        assert_eq!(format_duration(Duration::zero()), "0 years, 0 months, 0 days");
    }

    #[test]
    fn fractional_days_are_truncated() {
        let d = Duration::days(29) + Duration::hours(23);
        assert_eq!(format_duration(d), "0 years, 0 months, 29 days");
    }

    #[test]
    fn exact_year_and_month_boundaries() {
        assert_eq!(format_duration(Duration::days(365)), "1 years, 0 months, 0 days");
        assert_eq!(format_duration(Duration::days(364)), "0 years, 12 months, 4 days");
        assert_eq!(format_duration(Duration::days(730 + 60)), "2 years, 2 months, 0 days");
    }

    #[test]
    fn custom_labels() {
        let labels = DurationLabels {
            years: "שנים".into(),
            months: "חודשים".into(),
            days: "ימים".into(),
        };
        assert_eq!(
            format_duration_with(Duration::days(35), &labels),
            "0 שנים, 1 חודשים, 5 ימים"
        );
    }

    #[test]
    fn negative_duration_clamps_to_zero() {
        assert_eq!(
            DurationBreakdown::from_duration(Duration::days(-3)),
            DurationBreakdown { years: 0, months: 0, days: 0 }
        );
    }
}
