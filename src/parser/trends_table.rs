use crate::model::ParserError;
use crate::parser::{joined_text, selector};
use scraper::{Html, Selector};

const TABLE_LABEL: &str = "A tabular representation of the data in the chart.";

/// Reads the accessible data table a rendered trends chart carries.
pub struct TrendsTableParser {
    table: Selector,
    row: Selector,
    cell: Selector,
}

impl TrendsTableParser {
    pub fn new() -> Result<Self, ParserError> {
        Ok(Self {
            table: selector(&format!("div[aria-label=\"{}\"] table", TABLE_LABEL))?,
            row: selector("tr")?,
            cell: selector("td")?,
        })
    }

    /// Returns `(date, interest)` display strings, header row excluded.
    /// Rows with fewer than two cells are skipped.
    pub fn parse(&self, html: &str) -> Result<Vec<(String, String)>, ParserError> {
        let document = Html::parse_document(html);
        let table = document
            .select(&self.table)
            .next()
            .ok_or_else(|| ParserError::MissingField("trends data table".into()))?;

        Ok(table
            .select(&self.row)
            .skip(1)
            .filter_map(|row| {
                let mut cells = row.select(&self.cell);
                let date = cells.next()?;
                let interest = cells.next()?;
                Some((joined_text(date, " "), joined_text(interest, " ")))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
<div aria-label="A tabular representation of the data in the chart." style="display:none">
  <table>
    <tr><th>Date</th><th>iphone 12 pro</th></tr>
    <tr><td>Sep 4, 2022</td><td>35</td></tr>
    <tr><td>Sep 11, 2022</td><td> 40 </td></tr>
    <tr><td>only one cell</td></tr>
    <tr><td>Sep 18, 2022</td><td>&lt;1</td><td>extra</td></tr>
  </table>
</div>
</body></html>
"#;

    #[test]
    fn reads_rows_after_header() {
        let rows = TrendsTableParser::new().unwrap().parse(PAGE).unwrap();
        assert_eq!(
            rows,
            vec![
                ("Sep 4, 2022".to_string(), "35".to_string()),
                ("Sep 11, 2022".to_string(), "40".to_string()),
                ("Sep 18, 2022".to_string(), "<1".to_string()),
            ]
        );
    }

    #[test]
    fn missing_table_is_an_error() {
        let err = TrendsTableParser::new().unwrap().parse("<div>loading</div>").unwrap_err();
        assert!(matches!(err, ParserError::MissingField(_)));
    }
}
