//! End-to-end tests for the HTTP analysis endpoint.
//!
//! These tests verify the full request path:
//! - Batch analysis against a wiremock upstream
//! - Request validation and the JSON error envelope
//! - CORS preflight handling
//! - Persistence, lookup by id, and failure of the store
//! - Status counters

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use redirect_audit::error_handling::DatabaseError;
use redirect_audit::storage::{NewAnalysisRecord, StoredAnalysis};
use redirect_audit::AnalysisStore;

use helpers::{spawn_app, test_config, test_store};

/// Upstream with `/start` -> 301 -> `/mid` -> 200.
async fn start_upstream() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/start"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/mid"))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/mid"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

/// Upstream with `/hop/0` -> `/hop/1` -> ... -> `/hop/{hops}` (200).
async fn start_hop_chain(hops: usize) -> MockServer {
    let server = MockServer::start().await;
    for i in 0..hops {
        Mock::given(method("HEAD"))
            .and(path(format!("/hop/{i}")))
            .respond_with(
                ResponseTemplate::new(301).insert_header("Location", format!("/hop/{}", i + 1)),
            )
            .mount(&server)
            .await;
    }
    Mock::given(method("HEAD"))
        .and(path(format!("/hop/{hops}")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

/// Posts one URL and returns the single analysis.
async fn analyze_one(base: &str, body: Value) -> Value {
    let response: Value = reqwest::Client::new()
        .post(format!("{base}/"))
        .json(&body)
        .send()
        .await
        .expect("request should succeed")
        .json()
        .await
        .expect("JSON body");
    assert_eq!(response["success"], true);
    response["data"]["analyses"][0].clone()
}

fn issue_types(analysis: &Value) -> Vec<String> {
    analysis["issues"]
        .as_array()
        .expect("issues array")
        .iter()
        .filter_map(|i| i["type"].as_str().map(str::to_string))
        .collect()
}

/// Store whose writes always fail.
struct FailingStore;

#[async_trait]
impl AnalysisStore for FailingStore {
    async fn store(&self, _record: &NewAnalysisRecord<'_>) -> Result<i64, DatabaseError> {
        Err(DatabaseError::FileCreationError("disk full".to_string()))
    }

    async fn fetch(&self, _id: i64) -> Result<Option<StoredAnalysis>, DatabaseError> {
        Ok(None)
    }
}

#[tokio::test]
async fn test_post_analyzes_batch_and_stores_it() {
    let upstream = start_upstream().await;
    let dir = TempDir::new().expect("Failed to create temp directory");
    let config = test_config(&dir);
    let base = spawn_app(&config, test_store(&config).await).await;
    let client = reqwest::Client::new();

    let start = format!("{}/start", upstream.uri());
    let response = client
        .post(format!("{base}/"))
        .json(&json!({ "urls": [start], "maxRedirects": 5 }))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("JSON body");

    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Analyzed 1 URL");
    assert_eq!(
        body["data"]["summary"],
        json!({
            "totalUrls": 1,
            "urlsWithRedirects": 1,
            "urlsWithChains": 0,
            "urlsWithLoops": 0,
            "avgChainLength": 1,
            "totalIssues": 1
        })
    );

    let analysis = &body["data"]["analyses"][0];
    assert_eq!(analysis["startUrl"], start);
    assert_eq!(analysis["finalUrl"], format!("{}/mid", upstream.uri()));
    assert_eq!(analysis["chainLength"], 1);
    assert_eq!(analysis["hasLoop"], false);
    assert_eq!(analysis["chain"][0]["statusCode"], 301);
    assert_eq!(analysis["chain"][0]["location"], "/mid");
    assert_eq!(analysis["issues"][0]["type"], "single_redirect");
    assert_eq!(analysis["issues"][0]["severity"], "low");

    let id = body["data"]["analysisId"]
        .as_i64()
        .expect("analysisId should be set");

    let stored: Value = client
        .get(format!("{base}/analyses/{id}"))
        .send()
        .await
        .expect("lookup should succeed")
        .json()
        .await
        .expect("JSON body");
    assert_eq!(stored["success"], true);
    assert_eq!(stored["data"]["id"], id);
    assert_eq!(stored["data"]["analyzedUrls"], json!([start]));
    assert_eq!(stored["data"]["analyses"], body["data"]["analyses"]);
    assert_eq!(stored["data"]["summary"], body["data"]["summary"]);
}

#[tokio::test]
async fn test_results_preserve_input_order() {
    let upstream = start_upstream().await;
    let dir = TempDir::new().expect("Failed to create temp directory");
    let config = test_config(&dir);
    let base = spawn_app(&config, test_store(&config).await).await;

    let urls = vec![
        format!("{}/mid", upstream.uri()),
        format!("{}/start", upstream.uri()),
        "not a url".to_string(),
    ];
    let body: Value = reqwest::Client::new()
        .post(format!("{base}/"))
        .json(&json!({ "urls": urls }))
        .send()
        .await
        .expect("request should succeed")
        .json()
        .await
        .expect("JSON body");

    let analyses = body["data"]["analyses"].as_array().expect("analyses array");
    assert_eq!(analyses.len(), 3);
    for (analysis, url) in analyses.iter().zip(&urls) {
        assert_eq!(analysis["startUrl"], url.as_str());
    }
    assert_eq!(analyses[2]["issues"][0]["type"], "fetch_error");
    assert_eq!(body["message"], "Analyzed 3 URLs");
}

#[tokio::test]
async fn test_invalid_bodies_return_400_envelope() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let config = test_config(&dir);
    let base = spawn_app(&config, test_store(&config).await).await;
    let client = reqwest::Client::new();

    for body in [r#"{}"#, r#"{"urls": []}"#, "not json"] {
        let response = client
            .post(format!("{base}/"))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), 400, "body {body:?}");
        let envelope: Value = response.json().await.expect("JSON body");
        assert_eq!(envelope["success"], false);
        assert!(envelope["error"].is_string());
    }

    let empty: Value = client
        .post(format!("{base}/"))
        .json(&json!({ "urls": [] }))
        .send()
        .await
        .expect("request should succeed")
        .json()
        .await
        .expect("JSON body");
    assert_eq!(
        empty["error"],
        "URLs array is required and must not be empty"
    );
}

#[tokio::test]
async fn test_cors_preflight() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let config = test_config(&dir);
    let base = spawn_app(&config, test_store(&config).await).await;

    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{base}/"))
        .header("Origin", "https://app.example")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type, apikey")
        .send()
        .await
        .expect("preflight should succeed");

    assert_eq!(response.status(), 200);
    let headers = response.headers();
    assert_eq!(
        headers
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let allowed = headers
        .get("access-control-allow-headers")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_lowercase();
    for header in ["authorization", "x-client-info", "apikey", "content-type"] {
        assert!(allowed.contains(header), "missing {header} in {allowed}");
    }

    // The CORS layer answers any OPTIONS request, with or without preflight headers
    for target in [format!("{base}/"), format!("{base}/status")] {
        let plain = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, &target)
            .send()
            .await
            .expect("OPTIONS should succeed");
        assert_eq!(plain.status(), 200, "OPTIONS {target}");
        let methods = plain
            .headers()
            .get("access-control-allow-methods")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_uppercase();
        for method in ["GET", "POST", "OPTIONS"] {
            assert!(methods.contains(method), "missing {method} in {methods}");
        }
    }
}

#[tokio::test]
async fn test_unknown_analysis_is_404() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let config = test_config(&dir);
    let base = spawn_app(&config, test_store(&config).await).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/analyses/9999"))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("JSON body");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Analysis 9999 not found");
}

#[tokio::test]
async fn test_malformed_analysis_id_is_400_envelope() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let config = test_config(&dir);
    let base = spawn_app(&config, test_store(&config).await).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/analyses/abc"))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("JSON body");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid analysis id: abc");
}

#[tokio::test]
async fn test_store_failure_still_returns_results() {
    let upstream = start_upstream().await;
    let dir = TempDir::new().expect("Failed to create temp directory");
    let config = test_config(&dir);
    let base = spawn_app(&config, Arc::new(FailingStore)).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/"))
        .json(&json!({ "urls": [format!("{}/start", upstream.uri())] }))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("JSON body");
    assert_eq!(body["success"], true);
    assert!(body["data"]["analysisId"].is_null());
    assert_eq!(body["data"]["analyses"].as_array().map(Vec::len), Some(1));

    let status: Value = client
        .get(format!("{base}/status"))
        .send()
        .await
        .expect("status should succeed")
        .json()
        .await
        .expect("JSON body");
    assert_eq!(status["batches"], 1);
    assert_eq!(status["urlsAnalyzed"], 1);
    assert_eq!(status["persistenceFailures"], 1);
    assert_eq!(status["totalIssues"], 1);
    assert!(status["uptimeSeconds"].is_number());
    assert!(status.get("urls_analyzed").is_none());
    assert_eq!(status["issues"]["single_redirect"], 1);
    assert_eq!(status["issues"]["redirect_loop"], 0);
}

#[tokio::test]
async fn test_zero_max_redirects_is_raised_to_one() {
    let upstream = start_upstream().await;
    let dir = TempDir::new().expect("Failed to create temp directory");
    let config = test_config(&dir);
    let base = spawn_app(&config, test_store(&config).await).await;

    let analysis = analyze_one(
        &base,
        json!({ "urls": [format!("{}/start", upstream.uri())], "maxRedirects": 0 }),
    )
    .await;

    assert_eq!(analysis["chain"].as_array().map(Vec::len), Some(1));
    assert_eq!(analysis["finalUrl"], format!("{}/mid", upstream.uri()));
    let types = issue_types(&analysis);
    assert_eq!(
        types.iter().filter(|t| *t == "max_redirects_exceeded").count(),
        1,
        "issues: {types:?}"
    );
}

#[tokio::test]
async fn test_large_max_redirects_is_capped_at_fifty() {
    let upstream = start_hop_chain(60).await;
    let dir = TempDir::new().expect("Failed to create temp directory");
    let config = test_config(&dir);
    let base = spawn_app(&config, test_store(&config).await).await;

    let analysis = analyze_one(
        &base,
        json!({ "urls": [format!("{}/hop/0", upstream.uri())], "maxRedirects": 1000 }),
    )
    .await;

    let requests = upstream.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 50);
    assert_eq!(analysis["chain"].as_array().map(Vec::len), Some(50));
    assert_eq!(analysis["finalUrl"], format!("{}/hop/50", upstream.uri()));
    assert!(issue_types(&analysis).contains(&"max_redirects_exceeded".to_string()));
}

#[tokio::test]
async fn test_omitted_max_redirects_defaults_to_ten() {
    let upstream = start_hop_chain(12).await;
    let dir = TempDir::new().expect("Failed to create temp directory");
    let config = test_config(&dir);
    let base = spawn_app(&config, test_store(&config).await).await;

    let analysis = analyze_one(
        &base,
        json!({ "urls": [format!("{}/hop/0", upstream.uri())] }),
    )
    .await;

    let requests = upstream.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 10);
    assert_eq!(analysis["chain"].as_array().map(Vec::len), Some(10));
    assert_eq!(analysis["finalUrl"], format!("{}/hop/10", upstream.uri()));
    assert!(issue_types(&analysis).contains(&"max_redirects_exceeded".to_string()));
}
