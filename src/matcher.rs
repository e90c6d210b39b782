// Title matching for retail candidates
use crate::model::ProductMetadata;

const VARIANT_TOKEN: &str = "max";

/// True when `title` names the queried product.
///
/// The query must be a case-insensitive substring of the title, and titles
/// containing "max" are rejected unless the query contains it too.
pub fn title_matches(query: &str, title: &str) -> bool {
    let query = query.trim().to_lowercase();
    let title = title.to_lowercase();
    if !title.contains(&query) {
        return false;
    }
    !(title.contains(VARIANT_TOKEN) && !query.contains(VARIANT_TOKEN))
}

/// Keeps only candidates whose title matches `query`, preserving order.
pub fn filter_candidates(query: &str, candidates: Vec<ProductMetadata>) -> Vec<ProductMetadata> {
    candidates
        .into_iter()
        .filter(|c| title_matches(query, &c.full_title))
        .collect()
}

/// First candidate whose title matches `query`.
pub fn first_match<'a>(query: &str, candidates: &'a [ProductMetadata]) -> Option<&'a ProductMetadata> {
    candidates.iter().find(|c| title_matches(query, &c.full_title))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(title: &str) -> ProductMetadata {
        ProductMetadata {
            full_title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn base_query_rejects_max_variant() {
        assert!(!title_matches("iphone 12", "iPhone 12 Pro Max"));
        assert!(title_matches("iphone 12", "iPhone 12"));
    }

    #[test]
    fn max_query_accepts_max_variant() {
        assert!(title_matches("iphone 12 pro max", "iPhone 12 Pro Max"));
    }

    #[test]
    fn query_must_be_substring() {
        assert!(!title_matches("iphone 13", "Apple iPhone 12 Pro"));
        assert!(title_matches("IPHONE 12 PRO", "Apple iPhone 12 Pro 128GB"));
    }

    #[test]
    fn first_surviving_candidate_wins() {
        let candidates = vec![
            product("Samsung Galaxy S21"),
            product("Apple iPhone 12 Pro Max 256GB"),
            product("Apple iPhone 12 Pro 128GB"),
            product("Apple iPhone 12 Pro 256GB"),
        ];
        let found = first_match("iphone 12 pro", &candidates).unwrap();
        assert_eq!(found.full_title, "Apple iPhone 12 Pro 128GB");
        assert!(first_match("pixel 7", &candidates).is_none());
        assert!(first_match("pixel 7", &[]).is_none());
    }

    #[test]
    fn filter_preserves_order() {
        let candidates = vec![product("iPhone 12 mini"), product("iPhone 12 Max"), product("iPhone 12")];
        let titles: Vec<_> = filter_candidates("iphone 12", candidates)
            .into_iter()
            .map(|c| c.full_title)
            .collect();
        assert_eq!(titles, vec!["iPhone 12 mini", "iPhone 12"]);
    }
}
