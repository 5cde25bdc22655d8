//! Integration tests for `SheetsClient` publishing using wiremock HTTP mocks.

use etsy_stats_core::{aggregate, ListingRecord, SearchQueryAnalytics, SearchTermObservation};
use etsy_stats_sheets::{SheetsClient, SheetsError};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn test_client(base_url: &str, max_retries: u32) -> SheetsClient {
    SheetsClient::with_base_url("sheet-1", "test-token", 5, max_retries, base_url)
        .expect("client construction should not fail")
        .with_backoff_base_ms(0)
}

fn tabs(titles: &[&str]) -> Value {
    json!({
        "sheets": titles
            .iter()
            .map(|t| json!({ "properties": { "title": t } }))
            .collect::<Vec<_>>()
    })
}

async fn mount_tab_list(server: &MockServer, titles: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1"))
        .and(query_param("fields", "sheets.properties.title"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tabs(titles)))
        .mount(server)
        .await;
}

async fn mount_clear_and_update(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path_regex(r"^/v4/spreadsheets/sheet-1/values/.+:clear$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(server)
        .await;
    Mock::given(method("PUT"))
        .and(path_regex(r"^/v4/spreadsheets/sheet-1/values/.+"))
        .and(query_param("valueInputOption", "USER_ENTERED"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "updatedRows": 1 })))
        .mount(server)
        .await;
}

async fn requests_with(server: &MockServer, verb: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.as_str() == verb)
        .collect()
}

fn analytics_row(query: &str) -> SearchQueryAnalytics {
    SearchQueryAnalytics {
        search_query: query.to_owned(),
        impressions: "1,200".to_owned(),
        position: "4.1".to_owned(),
        visits: "30".to_owned(),
        conversion_rate: "2.5".to_owned(),
        revenue: "45.00".to_owned(),
        listings: "3".to_owned(),
    }
}

#[tokio::test]
async fn list_tab_titles_returns_titles_in_order() {
    let server = MockServer::start().await;
    mount_tab_list(&server, &["Sheet1", "Shop - Stats"]).await;

    let titles = test_client(&server.uri(), 0).list_tab_titles().await.unwrap();

    assert_eq!(titles, vec!["Sheet1", "Shop - Stats"]);
}

#[tokio::test]
async fn publish_creates_missing_tab_then_clears_and_writes() {
    let server = MockServer::start().await;
    mount_tab_list(&server, &["Sheet1"]).await;
    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sheet-1:batchUpdate"))
        .and(body_json(json!({
            "requests": [{ "addSheet": { "properties": { "title": "Shop - Analytics" } } }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "replies": [{}] })))
        .expect(1)
        .mount(&server)
        .await;
    mount_clear_and_update(&server).await;

    let client = test_client(&server.uri(), 0);
    client
        .publish_search_analytics("Shop", &[analytics_row("metal sign"), analytics_row("garage")])
        .await
        .unwrap();

    let posts = requests_with(&server, "POST").await;
    assert_eq!(posts.len(), 2, "add tab then clear");
    assert!(posts[0].url.path().ends_with(":batchUpdate"));
    assert!(posts[1].url.path().ends_with("A1:ZZ:clear"));

    let puts = requests_with(&server, "PUT").await;
    assert_eq!(puts.len(), 1);
    let body: Value = puts[0].body_json().unwrap();
    assert_eq!(body["range"], json!("'Shop - Analytics'!A1:G3"));
    assert_eq!(body["majorDimension"], json!("ROWS"));
    assert_eq!(body["values"][0][0], json!("Search Query"));
    assert_eq!(body["values"][1][0], json!("metal sign"));
    assert_eq!(body["values"][2][0], json!("garage"));
}

#[tokio::test]
async fn publish_reuses_existing_tab() {
    let server = MockServer::start().await;
    mount_tab_list(&server, &["Shop - Analytics"]).await;
    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sheet-1:batchUpdate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_clear_and_update(&server).await;

    test_client(&server.uri(), 0)
        .publish_search_analytics("Shop", &[])
        .await
        .unwrap();

    let puts = requests_with(&server, "PUT").await;
    let body: Value = puts[0].body_json().unwrap();
    assert_eq!(body["values"].as_array().map(Vec::len), Some(1), "header only");
}

#[tokio::test]
async fn publish_statistic_writes_three_tabs() {
    let server = MockServer::start().await;
    mount_tab_list(&server, &["MetalHomeLab - Stats", "MetalHomeLab - Search Terms", "MetalHomeLab - Tags"])
        .await;
    mount_clear_and_update(&server).await;

    let mut record = ListingRecord::new("1", "https://www.etsy.com/listing/1");
    record.search_terms = vec![SearchTermObservation { name: "shoes".to_owned(), visits: 10 }];
    record.tags = vec!["leather".to_owned()];
    let statistic = aggregate(vec![record], Vec::new());

    test_client(&server.uri(), 0)
        .publish_statistic("MetalHomeLab", &statistic)
        .await
        .unwrap();

    let ranges: Vec<String> = requests_with(&server, "PUT")
        .await
        .iter()
        .map(|r| r.body_json::<Value>().unwrap()["range"].as_str().unwrap_or_default().to_owned())
        .collect();
    assert_eq!(
        ranges,
        vec![
            "'MetalHomeLab - Stats'!A1:V2",
            "'MetalHomeLab - Search Terms'!A1:B2",
            "'MetalHomeLab - Tags'!A1:B2",
        ]
    );
}

#[tokio::test]
async fn transient_server_error_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_tab_list(&server, &["Sheet1"]).await;

    let titles = test_client(&server.uri(), 2).list_tab_titles().await.unwrap();

    assert_eq!(titles, vec!["Sheet1"]);
}

#[tokio::test]
async fn rate_limit_exhausts_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;

    let err = test_client(&server.uri(), 2).list_tab_titles().await.unwrap_err();

    assert!(matches!(err, SheetsError::Api { status: 429, .. }));
}

#[tokio::test]
async fn client_error_is_not_retried_and_carries_api_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "The caller does not have permission" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server.uri(), 3).list_tab_titles().await.unwrap_err();

    match err {
        SheetsError::Api { status, message, operation } => {
            assert_eq!(status, 403);
            assert_eq!(operation, "list tabs");
            assert_eq!(message, "The caller does not have permission");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
