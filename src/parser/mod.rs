// Page-shape translations: one module per external page.

pub mod trends_table;
pub mod zap_parser;

use crate::model::ParserError;
use scraper::{ElementRef, Selector};

pub use trends_table::TrendsTableParser;
pub use zap_parser::{Parser, ZapParser};

pub(crate) fn selector(css: &str) -> Result<Selector, ParserError> {
    Selector::parse(css).map_err(|e| ParserError::HtmlParseError(format!("{}: {}", css, e)))
}

/// Text nodes trimmed and joined with `sep`, blanks dropped.
pub(crate) fn joined_text(element: ElementRef<'_>, sep: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}
