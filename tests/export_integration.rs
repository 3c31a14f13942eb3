//! Integration tests for the export direction
//!
//! Runs `cli::run(Mode::Export, ..)` against a mock store and checks the
//! files and reports it produces.

use kibana_io::cli::{self, Mode, TransferOptions};
use kibana_io::etl::Outcome;
use kibana_io::kibana::documents::DocumentType;
use serde_json::{Value, json};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn options(server: &MockServer, dir: &TempDir) -> TransferOptions {
    TransferOptions::new(Url::parse(&server.uri()).unwrap(), dir.path())
}

async fn mount_search(server: &MockServer, doc_type: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/.kibana/{}/_search", doc_type)))
        .and(query_param("size", "5000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_export_search_documents() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_search(
        &server,
        "search",
        json!({"hits": {"total": 2, "hits": [
            {"_id": "a", "_source": {"k": 1}},
            {"_id": "b", "_source": {"k": 2}}
        ]}}),
    )
    .await;

    let report = cli::run(Mode::Export, &options(&server, &dir)).await;

    assert_eq!(report.exit_code(), 0);
    assert!(report.fatal.is_none());

    let search = report.get(DocumentType::Search).unwrap();
    assert_eq!(search.to_string(), "[OK] Exported 2 search");

    let a = std::fs::read_to_string(dir.path().join("search/a.json")).unwrap();
    let b = std::fs::read_to_string(dir.path().join("search/b.json")).unwrap();
    assert_eq!(a, "{\n  \"k\": 1\n}");
    assert_eq!(b, "{\n  \"k\": 2\n}");
}

#[tokio::test]
async fn test_not_found_types_are_skipped_without_directory() {
    // Unmatched requests get a 404 from the mock store
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let report = cli::run(Mode::Export, &options(&server, &dir)).await;

    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.types.len(), 4);
    for type_report in &report.types {
        assert_eq!(type_report.outcome, Outcome::Skipped);
        assert!(!dir.path().join(type_report.doc_type.as_str()).exists());
    }
    assert_eq!(
        report.get(DocumentType::IndexPattern).unwrap().to_string(),
        "[WARN] Documents \"index-pattern\" not found, skipping"
    );
}

#[tokio::test]
async fn test_export_order() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let report = cli::run(Mode::Export, &options(&server, &dir)).await;

    let order: Vec<DocumentType> = report.types.iter().map(|r| r.doc_type).collect();
    assert_eq!(
        order,
        vec![
            DocumentType::Dashboard,
            DocumentType::Visualization,
            DocumentType::Search,
            DocumentType::IndexPattern,
        ]
    );
}

#[tokio::test]
async fn test_reported_total_beyond_page_size() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_search(
        &server,
        "dashboard",
        json!({"hits": {"total": {"value": 6000, "relation": "eq"}, "hits": [
            {"_id": "d1", "_source": {"title": "One"}},
            {"_id": "d2", "_source": {"title": "Two"}}
        ]}}),
    )
    .await;

    let report = cli::run(Mode::Export, &options(&server, &dir)).await;

    // Informational only, the run still succeeds
    assert_eq!(report.exit_code(), 0);
    let dashboard = report.get(DocumentType::Dashboard).unwrap();
    assert!(!dashboard.is_complete());
    assert!(dashboard.outcome.failures().is_empty());
    assert_eq!(
        dashboard.to_string(),
        "[ERR] Exported only (2/6000) dashboard(-s/-es)"
    );
    assert!(dir.path().join("dashboard/d1.json").exists());
    assert!(dir.path().join("dashboard/d2.json").exists());
}

#[tokio::test]
async fn test_empty_type_creates_directory() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_search(
        &server,
        "visualization",
        json!({"hits": {"total": 0, "hits": []}}),
    )
    .await;

    let report = cli::run(Mode::Export, &options(&server, &dir)).await;

    assert_eq!(
        report.get(DocumentType::Visualization).unwrap().to_string(),
        "[OK] Exported 0 visualization"
    );
    assert!(dir.path().join("visualization").is_dir());
}

#[tokio::test]
async fn test_unexpected_status_aborts_the_run() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/.kibana/visualization/_search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&server)
        .await;
    // Types after the failing one are never requested
    Mock::given(method("GET"))
        .and(path("/.kibana/search/_search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let report = cli::run(Mode::Export, &options(&server, &dir)).await;

    assert_eq!(report.exit_code(), 1);
    assert_eq!(report.types.len(), 1);
    assert_eq!(report.types[0].doc_type, DocumentType::Dashboard);

    let fatal = report.fatal.unwrap().to_string();
    assert_eq!(
        fatal,
        "Failed to create dump \"visualization\", code=503 text=unavailable"
    );
    assert!(!dir.path().join("visualization").exists());
}

#[tokio::test]
async fn test_custom_index() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/kibana-archive/index-pattern/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": {"total": 1, "hits": [{"_id": "logs-*", "_source": {"title": "logs-*"}}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = options(&server, &dir).with_index("kibana-archive");
    let report = cli::run(Mode::Export, &options).await;

    assert_eq!(
        report.get(DocumentType::IndexPattern).unwrap().to_string(),
        "[OK] Exported 1 index-pattern"
    );
    assert!(dir.path().join("index-pattern/logs-*.json").exists());
}
