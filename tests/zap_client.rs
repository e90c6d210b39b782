//! Integration tests for `ZapClient` against a local `wiremock` server.

use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use techpulse::config::RetailConfig;
use techpulse::scraper::{RetailSearch, ZapClient};

const RESULTS_PAGE: &str = r#"
<div id="divSearchResults">
  <div class="withModelRow" data-model-id="1">
    <a class="ModelTitle"><span class="brand">Apple</span> iPhone 12 Pro Max</a>
  </div>
  <div class="withModelRow" data-model-id="2">
    <a class="ModelTitle"><span class="brand">Apple</span> iPhone 12 Pro</a>
    <div class="price-wrapper"><span>3,299 ₪</span></div>
  </div>
  <div class="withModelRow" data-model-id="3">
    <a class="ModelTitle"><span class="brand">Samsung</span> Galaxy S21</a>
  </div>
</div>"#;

fn client(server: &MockServer) -> ZapClient {
    let cfg = RetailConfig {
        base_url: format!("{}/search.aspx", server.uri()),
        timeout_secs: 5,
        politeness_delay_ms: 0,
        ..Default::default()
    };
    ZapClient::new(&cfg).expect("failed to build test ZapClient")
}

async fn serve_results(server: &MockServer, query: &str) {
    Mock::given(method("GET"))
        .and(query_param("keyword", query))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESULTS_PAGE))
        .mount(server)
        .await;
}

#[tokio::test]
async fn strict_search_keeps_exact_title_matches_only() {
    let server = MockServer::start().await;
    serve_results(&server, "iphone 12 pro").await;

    let results = client(&server).search("iphone 12 pro", true).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].model_id, "2");
    assert_eq!(results[0].price_range.as_deref(), Some("3,299 ₪"));
}

#[tokio::test]
async fn loose_search_returns_every_candidate_in_page_order() {
    let server = MockServer::start().await;
    serve_results(&server, "iphone").await;

    let results = client(&server).search("iphone", false).await;

    let ids: Vec<&str> = results.iter().map(|p| p.model_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn max_query_accepts_max_variant() {
    let server = MockServer::start().await;
    serve_results(&server, "iphone 12 pro max").await;

    let results = client(&server).search("iphone 12 pro max", true).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].full_title, "Apple iPhone 12 Pro Max");
}

#[tokio::test]
async fn server_error_degrades_to_no_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert!(client(&server).search("iphone 12", true).await.is_empty());
}

#[tokio::test]
async fn changed_layout_degrades_to_no_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>new layout</body></html>"))
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(client.search("iphone 12", true).await.is_empty());
    assert!(client.try_search("iphone 12", true).await.is_err());
}
