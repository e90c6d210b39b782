// presenter/render.rs

use crate::analyzer::format_duration_with;
use crate::config::PresentationConfig;
use crate::model::{ProductMetadata, TimeSeries};
use crate::presenter::assembler::LifecycleReport;
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use std::fmt::Write;

const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Converts a 0-5 rating into full, half and empty stars.
pub fn rating_to_stars(rating: Option<f64>, max_stars: u32) -> String {
    let Some(rating) = rating else {
        return "not rated".to_string();
    };
    let rating = rating.max(0.0);
    let full = (rating.floor() as u32).min(max_stars);
    let half = full < max_stars && rating - rating.floor() >= 0.5;
    let empty = max_stars - full - u32::from(half);

    let mut stars = "★".repeat(full as usize);
    if half {
        stars.push('½');
    }
    stars.push_str(&"☆".repeat(empty as usize));
    stars
}

/// One-line chart of `values`, bucket-averaged down to at most `width` cells.
pub fn sparkline(values: &[f64], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }
    let buckets: Vec<f64> = if values.len() <= width {
        values.to_vec()
    } else {
        (0..width)
            .map(|b| {
                let start = b * values.len() / width;
                let end = ((b + 1) * values.len() / width).max(start + 1);
                let chunk = &values[start..end];
                chunk.iter().sum::<f64>() / chunk.len() as f64
            })
            .collect()
    };

    let max = buckets.iter().copied().fold(0.0_f64, f64::max);
    let top = (SPARK_CHARS.len() - 1) as f64;
    buckets
        .iter()
        .map(|v| {
            let level = if max > 0.0 { (v / max * top).round().clamp(0.0, top) } else { 0.0 };
            SPARK_CHARS[level as usize]
        })
        .collect()
}

/// Plain-text renderer; all styling comes from the explicit config.
pub struct Renderer {
    cfg: PresentationConfig,
}

impl Renderer {
    pub fn new(mut cfg: PresentationConfig) -> Self {
        if StrftimeItems::new(&cfg.date_format).any(|item| matches!(item, Item::Error)) {
            tracing::warn!("Invalid date format '{}', using {}", cfg.date_format, DEFAULT_DATE_FORMAT);
            cfg.date_format = DEFAULT_DATE_FORMAT.to_string();
        }
        Self { cfg }
    }

    fn date(&self, date: NaiveDate) -> String {
        date.format(&self.cfg.date_format).to_string()
    }

    /// Date column followed by one column per series.
    pub fn table(&self, table: &TimeSeries) -> String {
        let mut out = String::from("date");
        for name in table.column_names() {
            let _ = write!(out, " | {}", name);
        }
        out.push('\n');
        for (row, date) in table.dates().iter().enumerate() {
            out.push_str(&date.format("%Y-%m-%d").to_string());
            for col in table.columns() {
                let _ = write!(out, " | {}", col.values[row]);
            }
            out.push('\n');
        }
        out
    }

    /// One sparkline per series, labelled.
    pub fn trends_chart(&self, table: &TimeSeries) -> String {
        let mut out = String::new();
        for col in table.columns() {
            let _ = writeln!(out, "{:<24} {}", col.name, sparkline(&col.values, self.cfg.sparkline_width));
        }
        out
    }

    pub fn product(&self, product: &ProductMetadata) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", product.full_title);
        if let Some(url) = &product.image_url {
            let _ = writeln!(out, "  Image: {}", url);
        }
        let reviews = product
            .rating_count
            .map(|n| format!("{} reviews", n))
            .unwrap_or_else(|| "no reviews".to_string());
        let _ = writeln!(
            out,
            "  Rating: {} ({})",
            rating_to_stars(product.rating, self.cfg.max_stars),
            reviews
        );
        let _ = writeln!(
            out,
            "  Price range: {}",
            product.price_range.as_deref().unwrap_or("not available")
        );
        let _ = writeln!(out, "  Stores: {}", product.stores);
        if !product.params.is_empty() {
            let params: Vec<String> = product.params.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
            let _ = writeln!(out, "  Specs: {}", params.join(", "));
        }
        out
    }

    pub fn scraped_rows(&self, rows: &[(String, String)]) -> String {
        let mut out = String::from("date | interest\n");
        for (date, interest) in rows {
            let _ = writeln!(out, "{} | {}", date, interest);
        }
        out
    }

    pub fn lifecycle(&self, report: &LifecycleReport) -> String {
        if !report.has_data() {
            return "No data found for the entered products.\n".to_string();
        }

        let mut out = String::from("Trends comparison\n");
        out.push_str(&self.trends_chart(&report.table));
        out.push_str("\nProduct lifecycle per product:\n");

        for product in &report.products {
            let _ = writeln!(out, "### {}", product.name);
            if let Some(meta) = &product.metadata {
                let _ = writeln!(out, "Full name: {}", meta.full_title);
                if let Some(url) = &meta.image_url {
                    let _ = writeln!(out, "Image: {}", url);
                }
            }
            if !product.has_series {
                out.push_str("No interest data was returned for this product.\n---\n");
                continue;
            }
            if let Some(values) = report.table.column(&product.name) {
                let _ = writeln!(out, "{}", sparkline(values, self.cfg.sparkline_width));
            }
            match &product.lifecycle {
                None => {
                    let _ = writeln!(
                        out,
                        "No date found where interest fell below {}.",
                        report.threshold
                    );
                }
                Some(res) => {
                    let _ = writeln!(
                        out,
                        "Peak: {}  |  Below {}: {}",
                        self.date(res.peak_date),
                        report.threshold,
                        self.date(res.decline_date)
                    );
                    let _ = writeln!(
                        out,
                        "Lifecycle (peak to significant decline): {}",
                        format_duration_with(res.duration, &self.cfg.duration_labels)
                    );
                }
            }
            out.push_str("---\n");
        }

        if self.cfg.show_table {
            out.push_str("\nRaw data\n");
            out.push_str(&self.table(&report.table));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::compute_lifecycle;
    use crate::presenter::assembler::ProductReport;
    use chrono::Duration;

    #[test]
    fn stars_with_half() {
        assert_eq!(rating_to_stars(Some(3.5), 5), "★★★½☆");
        assert_eq!(rating_to_stars(Some(4.0), 5), "★★★★☆");
        assert_eq!(rating_to_stars(Some(5.0), 5), "★★★★★");
        assert_eq!(rating_to_stars(Some(0.4), 5), "☆☆☆☆☆");
        assert_eq!(rating_to_stars(None, 5), "not rated");
    }

    #[test]
    fn stars_never_exceed_max() {
        assert_eq!(rating_to_stars(Some(7.5), 5), "★★★★★");
    }

    #[test]
    fn sparkline_scales_to_max() {
        assert_eq!(sparkline(&[0.0, 50.0, 100.0], 10), "▁▅█");
        assert_eq!(sparkline(&[0.0, 0.0], 10), "▁▁");
        assert_eq!(sparkline(&[], 10), "");
    }

    #[test]
    fn sparkline_downsamples() {
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        assert_eq!(sparkline(&values, 20).chars().count(), 20);
    }

    #[test]
    fn invalid_date_format_falls_back() {
        let cfg = PresentationConfig {
            date_format: "%Q".into(),
            ..Default::default()
        };
        let renderer = Renderer::new(cfg);
        assert_eq!(renderer.date(NaiveDate::from_ymd_opt(2024, 2, 3).unwrap()), "03/02/2024");
    }

    fn report() -> LifecycleReport {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let table = TimeSeries::new((0..7).map(|i| start + Duration::days(i)).collect())
            .unwrap()
            .with_column("phone", vec![10.0, 12.0, 14.0, 30.0, 28.0, 15.0, 8.0])
            .unwrap()
            .with_column("tablet", vec![50.0; 7])
            .unwrap();
        let lifecycles = compute_lifecycle(&table, 20.0);
        let products = ["phone", "tablet"]
            .iter()
            .map(|name| ProductReport {
                name: name.to_string(),
                has_series: true,
                lifecycle: lifecycles[*name].clone(),
                metadata: None,
            })
            .collect();
        LifecycleReport {
            table,
            threshold: 20.0,
            lifecycles,
            products,
        }
    }

    #[test]
    fn lifecycle_text_per_product() {
        let text = Renderer::new(PresentationConfig::default()).lifecycle(&report());
        assert!(text.contains("Peak: 06/01/2024  |  Below 20: 07/01/2024"));
        assert!(text.contains("Lifecycle (peak to significant decline): 0 years, 0 months, 1 days"));
        assert!(text.contains("No date found where interest fell below 20."));
        assert!(text.contains("Raw data"));
    }

    #[test]
    fn product_without_series_skips_lifecycle_lines() {
        let mut report = report();
        report.products.push(ProductReport {
            name: "watch".into(),
            has_series: false,
            lifecycle: None,
            metadata: None,
        });
        let text = Renderer::new(PresentationConfig::default()).lifecycle(&report);
        let watch = text.split("### watch").nth(1).unwrap();
        assert!(watch.contains("No interest data was returned for this product."));
        assert!(!watch.contains("No date found"));
    }

    #[test]
    fn no_data_message() {
        let mut report = report();
        report.table = TimeSeries::empty();
        let text = Renderer::new(PresentationConfig::default()).lifecycle(&report);
        assert_eq!(text, "No data found for the entered products.\n");
    }

    #[test]
    fn product_lines() {
        let product = ProductMetadata {
            full_title: "Apple iPhone 12".into(),
            rating: Some(4.5),
            rating_count: Some(12),
            stores: "8 stores".into(),
            params: vec![
                ("Storage".into(), "128GB".into()),
                ("Camera".into(), "12MP".into()),
            ],
            ..Default::default()
        };
        let text = Renderer::new(PresentationConfig::default()).product(&product);
        assert!(text.contains("Rating: ★★★★½ (12 reviews)"));
        assert!(text.contains("Price range: not available"));
        assert!(text.contains("Specs: Storage: 128GB, Camera: 12MP"));
    }
}
