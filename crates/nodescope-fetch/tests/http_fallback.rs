use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use nodescope_core::{FetchOutcome, MonitorConfig};
use nodescope_fetch::http_fetcher;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

async fn spawn_service(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn closed_port() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn config(origin: &str, service_url: Option<String>) -> MonitorConfig {
    MonitorConfig {
        origin: origin.to_string(),
        service_url,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_same_origin_500s_fall_back_to_settings_service() {
    let app = Router::new()
        .route(
            "/api/v1/metrics/nodes",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route("/api/v1/nodes", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route(
            "/settings/api/v1/nodes",
            get(|| async {
                Json(json!([
                    {"node_name": "edge-1", "internal_ip": "10.1.0.5", "cpu_usage": "7.25", "mem_usage": 31},
                    {"node_name": "edge-2", "storage_total": 2048, "used_storage": "1024"}
                ]))
            }),
        );
    let base = spawn_service(app).await;

    let fetcher = http_fetcher(&config(&base, Some(format!("{}/settings/", base)))).unwrap();
    let outcome = fetcher.poll_once().await;

    assert!(outcome.success);
    assert_eq!(outcome.error, None);
    assert_eq!(outcome.nodes.len(), 2);
    assert_eq!(outcome.nodes[0].internal_ip, "10.1.0.5");
    assert_eq!(outcome.nodes[0].cpu_usage, 7.25);
    assert_eq!(outcome.nodes[1].total_storage, 2048.0);
    assert_eq!(outcome.nodes[1].storage_usage, 1024.0);
}

#[tokio::test]
async fn test_all_candidates_fail_reports_settings_service_status() {
    let app = Router::new()
        .route(
            "/api/v1/metrics/nodes",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route("/settings/api/v1/nodes", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
    let base = spawn_service(app).await;

    let fetcher = http_fetcher(&config(&base, Some(format!("{}/settings", base)))).unwrap();
    let outcome = fetcher.poll_once().await;

    assert_eq!(outcome, FetchOutcome::failed("HTTP 503"));
}

#[tokio::test]
async fn test_unparseable_body_moves_to_next_candidate() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/api/v1/metrics/nodes", get(|| async { "<html>proxy error</html>" }))
        .route(
            "/api/v1/nodes",
            get(|State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Json(json!({"nodes": [{"node_name": "n1"}], "count": 1}))
            }),
        )
        .with_state(Arc::clone(&hits));
    let base = spawn_service(app).await;

    let fetcher = http_fetcher(&config(&base, None)).unwrap();
    let outcome = fetcher.poll_once().await;

    assert!(outcome.success);
    assert_eq!(outcome.nodes[0].name, "n1");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unreachable_origin_without_service_reports_transport_error() {
    let base = closed_port().await;

    let fetcher = http_fetcher(&config(&base, None)).unwrap();
    let outcome = fetcher.poll_once().await;

    assert!(!outcome.success);
    assert!(outcome.nodes.is_empty());
    let error = outcome.error.unwrap();
    assert!(error.starts_with("Request failed:"), "unexpected error: {}", error);
}

#[tokio::test]
async fn test_shape_error_surfaces_from_real_response() {
    let app = Router::new().route(
        "/api/v1/metrics/nodes",
        get(|| async { Json::<Value>(json!({"data": {"nodes": []}})) }),
    );
    let base = spawn_service(app).await;

    let fetcher = http_fetcher(&config(&base, None)).unwrap();
    let outcome = fetcher.poll_once().await;

    assert_eq!(
        outcome,
        FetchOutcome::failed("Unexpected response shape from nodes API")
    );
}
