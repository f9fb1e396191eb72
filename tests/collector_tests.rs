/// Integration tests for the log collector service: ingestion validation,
/// query filtering, ordering, and truncation.
use arc_swap::ArcSwap;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tracelink::config::{Config, Role};
use tracelink::server::build_app;

async fn spawn_app(role: Role, config: Config) -> SocketAddr {
    let config = Arc::new(ArcSwap::from_pointee(config));
    let metrics_handle = Arc::new(tracelink::metrics::init_metrics());
    let app = build_app(role, config, metrics_handle);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn record_body(service: &str, level: &str, message: &str, timestamp: &str) -> Value {
    json!({
        "service": service,
        "level": level,
        "message": message,
        "timestamp": timestamp,
        "requestId": "test-request",
    })
}

async fn ingest(client: &reqwest::Client, addr: SocketAddr, body: &Value) {
    let response = client
        .post(format!("http://{addr}/log-ingest"))
        .json(body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_ingest_then_query_returns_record() {
    let addr = spawn_app(Role::Collector, Config::default()).await;
    let client = reqwest::Client::new();

    let body = record_body("sender", "info", "hello", "2026-01-01T00:00:00Z");
    let response = client
        .post(format!("http://{addr}/log-ingest"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let ack: Value = response.json().await.unwrap();
    assert_eq!(ack["success"], true);

    let result: Value = client
        .get(format!("http://{addr}/log-query"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(result["total"], 1);
    assert_eq!(result["filtered"], false);
    assert_eq!(result["logs"][0]["message"], "hello");
    assert_eq!(result["logs"][0]["requestId"], "test-request");
}

#[tokio::test]
async fn test_ingest_rejects_missing_message() {
    let addr = spawn_app(Role::Collector, Config::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/log-ingest"))
        .json(&json!({
            "service": "sender",
            "level": "info",
            "timestamp": "2026-01-01T00:00:00Z",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("message"));
}

#[tokio::test]
async fn test_ingest_rejects_unknown_service() {
    let addr = spawn_app(Role::Collector, Config::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/log-ingest"))
        .json(&record_body("gateway", "info", "hi", "2026-01-01T00:00:00Z"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_query_filters_by_service_and_level() {
    let addr = spawn_app(Role::Collector, Config::default()).await;
    let client = reqwest::Client::new();

    ingest(
        &client,
        addr,
        &record_body("receiver", "info", "a", "2026-01-01T00:00:00Z"),
    )
    .await;
    ingest(
        &client,
        addr,
        &record_body("receiver", "error", "b", "2026-01-01T00:00:01Z"),
    )
    .await;
    ingest(
        &client,
        addr,
        &record_body("sender", "error", "c", "2026-01-01T00:00:02Z"),
    )
    .await;

    let by_service: Value = client
        .get(format!("http://{addr}/log-query?service=receiver"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_service["total"], 2);
    assert!(by_service["logs"]
        .as_array()
        .unwrap()
        .iter()
        .all(|log| log["service"] == "receiver"));
    assert_eq!(by_service["filtered"], true);

    let by_level: Value = client
        .get(format!("http://{addr}/log-query?level=error"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_level["total"], 2);

    let combined: Value = client
        .get(format!("http://{addr}/log-query?service=receiver&level=error"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(combined["total"], 1);
    assert_eq!(combined["logs"][0]["message"], "b");
}

#[tokio::test]
async fn test_query_sorts_newest_first() {
    let addr = spawn_app(Role::Collector, Config::default()).await;
    let client = reqwest::Client::new();

    ingest(
        &client,
        addr,
        &record_body("sender", "info", "t2", "2026-01-01T00:00:02Z"),
    )
    .await;
    ingest(
        &client,
        addr,
        &record_body("sender", "info", "t1", "2026-01-01T00:00:01Z"),
    )
    .await;
    ingest(
        &client,
        addr,
        &record_body("sender", "info", "t3", "2026-01-01T00:00:03Z"),
    )
    .await;

    let result: Value = client
        .get(format!("http://{addr}/log-query"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let messages: Vec<&str> = result["logs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|log| log["message"].as_str().unwrap())
        .collect();
    assert_eq!(messages, vec!["t3", "t2", "t1"]);
}

#[tokio::test]
async fn test_query_limit_truncates_and_reports_total() {
    let addr = spawn_app(Role::Collector, Config::default()).await;
    let client = reqwest::Client::new();

    for i in 0..5 {
        ingest(
            &client,
            addr,
            &record_body(
                "sender",
                "info",
                &format!("m{i}"),
                &format!("2026-01-01T00:00:0{i}Z"),
            ),
        )
        .await;
    }

    let result: Value = client
        .get(format!("http://{addr}/log-query?limit=2"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(result["logs"].as_array().unwrap().len(), 2);
    assert_eq!(result["total"], 5);
    assert_eq!(result["filtered"], true);
}

#[tokio::test]
async fn test_health_reports_role() {
    let addr = spawn_app(Role::Collector, Config::default()).await;

    let body: Value = reqwest::get(format!("http://{addr}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["role"], "collector");
}
