// Zap search-results page parsing
use crate::model::{ParserError, ProductMetadata};
use crate::parser::{joined_text, selector};
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

pub trait Parser {
    fn parse(&self, html: &str) -> Result<Vec<ProductMetadata>, ParserError>;
}

const IMAGE_ATTRS: [&str; 3] = ["data-src", "data-original", "src"];

/// Translates the retail search page into [`ProductMetadata`] records.
pub struct ZapParser {
    results: Selector,
    block: Selector,
    title: Selector,
    brand: Selector,
    image: Selector,
    param_row: Selector,
    param_value: Selector,
    price: Selector,
    span: Selector,
    stores: Selector,
    rating_stars: Selector,
    rating_count: Selector,
    rating_re: Regex,
    count_re: Regex,
}

impl ZapParser {
    pub fn new() -> Result<Self, ParserError> {
        Ok(Self {
            results: selector("div#divSearchResults")?,
            block: selector("div.withModelRow")?,
            title: selector("a.ModelTitle")?,
            brand: selector("span.brand")?,
            image: selector("a.ModelPic img")?,
            param_row: selector("div.param-wrapper div.ParamRow")?,
            param_value: selector("div.ParamValue")?,
            price: selector("div.price-wrapper")?,
            span: selector("span")?,
            stores: selector("div.Stores")?,
            rating_stars: selector("div.rate-wrap div.RatingStars")?,
            rating_count: selector("div.rate-wrap div.RateNum")?,
            rating_re: regex(r"([\d.]+)\s+מתוך 5")?,
            count_re: regex(r"(\d+)\s*חוות\s*דעת")?,
        })
    }

    fn parse_block(&self, block: ElementRef<'_>) -> Option<ProductMetadata> {
        let title_node = block.select(&self.title).next()?;
        let full_title = joined_text(title_node, " ");
        let brand = title_node
            .select(&self.brand)
            .next()
            .map(|b| joined_text(b, ""))
            .unwrap_or_default();

        let image_url = block.select(&self.image).next().and_then(|img| {
            IMAGE_ATTRS
                .iter()
                .find_map(|attr| img.value().attr(attr))
                .map(str::to_string)
        });

        let mut params: Vec<(String, String)> = Vec::new();
        for row in block.select(&self.param_row) {
            let label = first_child_text(row).replace(':', "").trim().to_string();
            let value = row
                .select(&self.param_value)
                .next()
                .map(|v| joined_text(v, ""))
                .unwrap_or_default();
            let value = value.trim_end_matches(',').to_string();
            // a repeated label keeps its first position, last value wins
            match params.iter_mut().find(|(l, _)| *l == label) {
                Some(entry) => entry.1 = value,
                None => params.push((label, value)),
            }
        }

        let price_range = block.select(&self.price).next().map(|wrapper| {
            wrapper
                .select(&self.span)
                .next()
                .map(|s| joined_text(s, ""))
                .unwrap_or_default()
        });

        let stores = block
            .select(&self.stores)
            .next()
            .map(|s| joined_text(s, ""))
            .unwrap_or_default();

        let rating = block
            .select(&self.rating_stars)
            .next()
            .and_then(|stars| stars.value().attr("title"))
            .and_then(|title| self.rating_re.captures(title))
            .and_then(|caps| caps[1].parse::<f64>().ok());

        let rating_count = block
            .select(&self.rating_count)
            .next()
            .map(|n| joined_text(n, ""))
            .and_then(|text| {
                self.count_re
                    .captures(&text)
                    .and_then(|caps| caps[1].parse::<u32>().ok())
            });

        Some(ProductMetadata {
            model_id: block.value().attr("data-model-id").unwrap_or("").trim().to_string(),
            brand,
            full_title,
            image_url,
            params,
            price_range,
            stores,
            rating,
            rating_count,
        })
    }
}

impl Parser for ZapParser {
    fn parse(&self, html: &str) -> Result<Vec<ProductMetadata>, ParserError> {
        let document = Html::parse_document(html);

        let results = document
            .select(&self.results)
            .next()
            .ok_or_else(|| ParserError::MissingField("div#divSearchResults".into()))?;

        Ok(results
            .select(&self.block)
            .filter_map(|block| self.parse_block(block))
            .collect())
    }
}

fn regex(pattern: &str) -> Result<Regex, ParserError> {
    Regex::new(pattern).map_err(|e| ParserError::HtmlParseError(e.to_string()))
}

/// Text of the first child node, whether it is a bare text node or an element.
fn first_child_text(element: ElementRef<'_>) -> String {
    let Some(node) = element.children().next() else {
        return String::new();
    };
    match node.value() {
        Node::Text(text) => text.to_string(),
        Node::Element(_) => ElementRef::wrap(node)
            .map(|e| e.text().collect())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
<div id="divSearchResults">
  <div class="withModelRow" data-model-id=" 1092345 ">
    <a class="ModelPic" href="/model.aspx?modelid=1092345">
      <img data-src="https://img.zap.co.il/pic/1.jpg" src="/placeholder.gif">
    </a>
    <a class="ModelTitle" href="/model.aspx?modelid=1092345">
      <span class="brand">Apple</span>
      iPhone 12 Pro 128GB
    </a>
    <div class="param-wrapper">
      <div class="ParamRow">גודל מסך: <div class="ParamValue">6.1 אינץ',</div></div>
      <div class="ParamRow">נפח אחסון: <div class="ParamValue">128GB</div></div>
    </div>
    <div class="price-wrapper"><span>3,299 - 4,150 ₪</span></div>
    <div class="Stores"> 12 חנויות </div>
    <div class="rate-wrap">
      <div class="RatingStars" title="4.5 מתוך 5 כוכבים"></div>
      <div class="RateNum">(37 חוות דעת)</div>
    </div>
  </div>
  <div class="withModelRow" data-model-id="1092346">
    <a class="ModelPic"><img data-original="https://img.zap.co.il/pic/2.jpg"></a>
    <a class="ModelTitle"><span class="brand">Apple</span> iPhone 12 Pro Max</a>
  </div>
  <div class="withModelRow" data-model-id="999">
    <div class="Stores">no title here</div>
  </div>
</div>
</body></html>
"#;

    #[test]
    fn parses_full_product_block() {
        let products = ZapParser::new().unwrap().parse(PAGE).unwrap();
        assert_eq!(products.len(), 2);

        let p = &products[0];
        assert_eq!(p.model_id, "1092345");
        assert_eq!(p.brand, "Apple");
        assert_eq!(p.full_title, "Apple iPhone 12 Pro 128GB");
        assert_eq!(p.image_url.as_deref(), Some("https://img.zap.co.il/pic/1.jpg"));
        assert_eq!(
            p.params,
            vec![
                ("גודל מסך".to_string(), "6.1 אינץ'".to_string()),
                ("נפח אחסון".to_string(), "128GB".to_string()),
            ]
        );
        assert_eq!(p.price_range.as_deref(), Some("3,299 - 4,150 ₪"));
        assert_eq!(p.stores, "12 חנויות");
        assert_eq!(p.rating, Some(4.5));
        assert_eq!(p.rating_count, Some(37));
    }

    #[test]
    fn params_keep_page_order() {
        let page = r#"
<div id="divSearchResults">
  <div class="withModelRow" data-model-id="1">
    <a class="ModelTitle">Phone X</a>
    <div class="param-wrapper">
      <div class="ParamRow">Storage: <div class="ParamValue">256GB</div></div>
      <div class="ParamRow">Camera: <div class="ParamValue">48MP</div></div>
      <div class="ParamRow">Storage: <div class="ParamValue">512GB</div></div>
    </div>
  </div>
</div>"#;
        let products = ZapParser::new().unwrap().parse(page).unwrap();
        assert_eq!(
            products[0].params,
            vec![
                ("Storage".to_string(), "512GB".to_string()),
                ("Camera".to_string(), "48MP".to_string()),
            ]
        );
    }

    #[test]
    fn optional_fields_fall_back() {
        let products = ZapParser::new().unwrap().parse(PAGE).unwrap();
        let p = &products[1];
        assert_eq!(p.full_title, "Apple iPhone 12 Pro Max");
        assert_eq!(p.image_url.as_deref(), Some("https://img.zap.co.il/pic/2.jpg"));
        assert!(p.params.is_empty());
        assert_eq!(p.price_range, None);
        assert_eq!(p.stores, "");
        assert_eq!(p.rating, None);
        assert_eq!(p.rating_count, None);
    }

    #[test]
    fn missing_results_container_is_an_error() {
        let err = ZapParser::new().unwrap().parse("<html><body>captcha</body></html>").unwrap_err();
        assert!(matches!(err, ParserError::MissingField(_)));
    }

    #[test]
    fn empty_results_container_gives_no_products() {
        let html = r#"<div id="divSearchResults"></div>"#;
        assert!(ZapParser::new().unwrap().parse(html).unwrap().is_empty());
    }
}
