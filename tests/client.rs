use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use link_expander::client::{ClientConfig, ExpanderClient, RewriteQueue};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Stand-in expansion service with a fixed mapping.
struct StubService {
    endpoint: String,
    requests: Arc<AtomicUsize>,
}

async fn start_stub() -> StubService {
    let requests = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/", get(stub_expand))
        .with_state(requests.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubService {
        endpoint: format!("http://{}", addr),
        requests,
    }
}

async fn stub_expand(
    State(requests): State<Arc<AtomicUsize>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    requests.fetch_add(1, Ordering::SeqCst);
    let link = params.get("shorturl").cloned().unwrap_or_default();

    let expanded = match link.as_str() {
        "https://t.co/outer" => "https://bit.ly/inner",
        "https://bit.ly/inner" => "https://example.com/article",
        "https://t.co/loop" => "https://t.co/loop",
        "https://t.co/empty" => return Json(json!({ "original_url": link })).into_response(),
        "https://t.co/fail" => {
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "boom" })))
                .into_response();
        }
        _ => link.as_str(),
    }
    .to_string();

    Json(json!({ "original_url": link, "expanded_url": expanded })).into_response()
}

fn client(stub: &StubService) -> ExpanderClient {
    ExpanderClient::new(ClientConfig::new(&stub.endpoint))
}

#[tokio::test]
async fn test_nested_short_links_expanded() {
    let stub = start_stub().await;

    let expanded = client(&stub).expand("https://t.co/outer").await;

    assert_eq!(expanded, "https://example.com/article");
    assert_eq!(stub.requests.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_nesting_depth_is_bounded() {
    let stub = start_stub().await;

    let expanded = client(&stub).expand("https://t.co/loop").await;

    assert_eq!(expanded, "https://t.co/loop");
    assert_eq!(stub.requests.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_error_status_falls_back_to_input() {
    let stub = start_stub().await;

    let expanded = client(&stub).expand("https://t.co/fail").await;

    assert_eq!(expanded, "https://t.co/fail");
    assert_eq!(stub.requests.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_expanded_url_falls_back_to_input() {
    let stub = start_stub().await;

    let expanded = client(&stub).expand("https://t.co/empty").await;

    assert_eq!(expanded, "https://t.co/empty");
}

#[tokio::test]
async fn test_embedded_short_link_is_expanded() {
    let stub = start_stub().await;

    let target = client(&stub)
        .extract_target("https://www.youtube.com/redirect?q=https%3A%2F%2Ft.co%2Fouter")
        .await;

    assert_eq!(target.as_deref(), Some("https://example.com/article"));
}

#[tokio::test]
async fn test_set_endpoint_redirects_requests() {
    let stub = start_stub().await;
    let mut client = ExpanderClient::new(ClientConfig::new("http://127.0.0.1:1"));

    assert_eq!(client.expand("https://t.co/outer").await, "https://t.co/outer");

    client.set_endpoint(&stub.endpoint);
    assert_eq!(
        client.expand("https://t.co/outer").await,
        "https://example.com/article"
    );
}

#[tokio::test]
async fn test_rewrite_queue_emits_rewritten_links() {
    let stub = start_stub().await;
    let (queue, mut rewrites, worker) =
        RewriteQueue::spawn(client(&stub), Duration::from_millis(20));

    queue.enqueue("https://t.co/outer", "see t.co/outer").await;
    drop(queue);

    let rewrite = rewrites.recv().await.unwrap();
    assert_eq!(rewrite.original, "https://t.co/outer");
    assert_eq!(rewrite.target, "https://example.com/article");
    assert_eq!(rewrite.text, "see example.com/article");

    assert!(rewrites.recv().await.is_none());
    worker.await.unwrap();
}
