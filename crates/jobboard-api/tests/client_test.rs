//! Integration tests for the API client against a local mock service.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use serde_json::{Value, json};

use jobboard_api::{ApiClient, ApiErrorKind, Method};

async fn echo_auth(headers: HeaderMap) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    Json(json!({ "authorization": auth }))
}

async fn echo_body(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Json(json!({ "received": body, "content_type": content_type }))
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(3)).await;
    Json(json!({ "late": true }))
}

fn router() -> Router {
    Router::new()
        .route("/api/whoami", get(echo_auth))
        .route("/api/echo", post(echo_body).put(echo_body))
        .route("/api/items", get(|| async { Json(json!([1, 2, 3])) }))
        .route(
            "/api/items/1",
            axum::routing::delete(|| async { StatusCode::NO_CONTENT }),
        )
        .route(
            "/api/private",
            get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "no" }))) }),
        )
        .route("/api/html", get(|| async { "<html>not json</html>" }))
        .route("/api/slow", get(slow))
}

async fn spawn_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router()).await.unwrap();
    });
    addr
}

async fn client() -> ApiClient {
    let addr = spawn_server().await;
    ApiClient::with_timeout(&format!("http://{addr}/api"), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_bearer_header_attached_when_token_present() {
    let client = client().await;
    let body: Value = client.get("/whoami", Some("abc.def.ghi")).await.unwrap();
    assert_eq!(body["authorization"], "Bearer abc.def.ghi");
}

#[tokio::test]
async fn test_bearer_header_omitted_for_empty_token() {
    let client = client().await;

    let body: Value = client.get("whoami", Some("")).await.unwrap();
    assert!(body["authorization"].is_null());

    let body: Value = client.get("whoami", None).await.unwrap();
    assert!(body["authorization"].is_null());
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let client = client().await;
    let body: Value = client
        .post("/echo", &json!({ "email": "a@b.c" }), None)
        .await
        .unwrap();
    assert_eq!(body["received"]["email"], "a@b.c");
    assert_eq!(body["content_type"], "application/json");
}

#[tokio::test]
async fn test_put_and_delete() {
    let client = client().await;

    let body: Value = client
        .put("/echo", &json!({ "title": "Rust dev" }), Some("t"))
        .await
        .unwrap();
    assert_eq!(body["received"]["title"], "Rust dev");

    client.delete::<()>("/items/1", Some("t")).await.unwrap();
}

#[tokio::test]
async fn test_raw_request_reports_any_status() {
    let client = client().await;
    let raw = client
        .request(Method::GET, "/private", None::<&()>, None)
        .await
        .unwrap();
    assert_eq!(raw.status, 401);
    assert!(!raw.is_success());
    assert!(raw.body.contains("no"));
}

#[tokio::test]
async fn test_absolute_url_bypasses_base() {
    let addr = spawn_server().await;
    let client =
        ApiClient::with_timeout("http://unused.invalid/api", Duration::from_secs(5)).unwrap();
    let items: Vec<u32> = client
        .get(&format!("http://{addr}/api/items"), None)
        .await
        .unwrap();
    assert_eq!(items, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_typed_get_reports_status_error() {
    let client = client().await;
    let err = client.get::<Value>("/missing", None).await.unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::Status);
    assert_eq!(err.status(), Some(404));
}

// The lenient helpers deliberately turn non-2xx into the default value
// instead of an error; callers have to check for it.
#[tokio::test]
async fn test_get_json_returns_default_on_404() {
    let client = client().await;
    let items: Vec<u32> = client.get_json("/missing", None).await.unwrap();
    assert!(items.is_empty());

    let profile: Option<Value> = client.get_json("/private", None).await.unwrap();
    assert!(profile.is_none());
}

#[tokio::test]
async fn test_post_json_returns_default_on_non_success() {
    let client = client().await;
    let out: Option<Value> = client
        .post_json("/items", &json!({}), None)
        .await
        .unwrap();
    assert!(out.is_none());
}

#[tokio::test]
async fn test_get_json_decodes_success() {
    let client = client().await;
    let items: Vec<u32> = client.get_json("/items", None).await.unwrap();
    assert_eq!(items, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_get_json_fails_on_undecodable_success() {
    let client = client().await;
    let err = client.get_json::<Vec<u32>>("/html", None).await.unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::Decode);
}

#[tokio::test]
async fn test_timeout_is_distinct_failure() {
    let addr = spawn_server().await;
    let client =
        ApiClient::with_timeout(&format!("http://{addr}/api"), Duration::from_millis(200)).unwrap();

    let err = client.get::<Value>("/slow", None).await.unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::Timeout);
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        ApiClient::with_timeout(&format!("http://{addr}/api"), Duration::from_secs(5)).unwrap();
    let err = client.get_json::<Vec<u32>>("/items", None).await.unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::Network);
    assert!(err.is_transport());
}
