use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Host};
use serde_json::Value;
use tower::ServiceExt;

// admin:changeme
const AUTH: &str = "Basic YWRtaW46Y2hhbmdlbWU=";

fn router() -> axum::Router {
    app("admin", "changeme")
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::ACCEPT, "application/json")
        .header(http::header::AUTHORIZATION, AUTH)
        .body(body.to_string())
        .unwrap()
}

const NODE1: &str =
    r#"{"host":{"hostgroup_id":"5","name":"node1","mac":"aa:bb:cc:dd:ee:ff","build":true}}"#;

// --- auth ---

#[tokio::test]
async fn missing_credentials_returns_401() {
    let resp = router()
        .oneshot(Request::builder().uri("/api/status").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = body_json(resp).await;
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn wrong_credentials_returns_401() {
    let resp = router()
        .oneshot(
            Request::builder()
                .uri("/api/hosts")
                .header(http::header::AUTHORIZATION, "Basic d3Jvbmc6d3Jvbmc=")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- status ---

#[tokio::test]
async fn status_returns_object() {
    let resp = router().oneshot(request("GET", "/api/status", "")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["result"], "ok");
}

// --- list ---

#[tokio::test]
async fn list_hosts_empty() {
    let resp = router().oneshot(request("GET", "/api/hosts", "")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["total"], 0);
    assert!(body["results"].as_array().unwrap().is_empty());
}

// --- create ---

#[tokio::test]
async fn create_host_returns_201() {
    let resp = router().oneshot(request("POST", "/api/hosts", NODE1)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let host: Host = body_json(resp).await;
    assert_eq!(host.id, 1);
    assert_eq!(host.name, "node1");
    assert_eq!(host.mac, "aa:bb:cc:dd:ee:ff");
    assert_eq!(host.hostgroup_id, 5);
    assert!(host.build);
}

#[tokio::test]
async fn create_host_bad_hostgroup_returns_422() {
    let resp = router()
        .oneshot(request(
            "POST",
            "/api/hosts",
            r#"{"host":{"hostgroup_id":"five","name":"n","mac":"m"}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_host_malformed_json_returns_422() {
    let resp = router()
        .oneshot(request("POST", "/api/hosts", r#"{"name":"node1"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_host_duplicate_name_returns_422() {
    let app = router();
    let resp = app.clone().oneshot(request("POST", "/api/hosts", NODE1)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app.oneshot(request("POST", "/api/hosts", NODE1)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_host_not_found() {
    let resp = router().oneshot(request("GET", "/api/hosts/999", "")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_host_bad_id_returns_400() {
    let resp = router()
        .oneshot(request("GET", "/api/hosts/not-a-number", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- delete ---

#[tokio::test]
async fn delete_host_not_found() {
    let resp = router().oneshot(request("DELETE", "/api/hosts/999", "")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_bytes(resp).await;
    assert!(!body.is_empty());
}

#[tokio::test]
async fn create_then_delete_then_get() {
    let app = router();

    let resp = app.clone().oneshot(request("POST", "/api/hosts", NODE1)).await.unwrap();
    let created: Host = body_json(resp).await;

    let resp = app
        .clone()
        .oneshot(request("DELETE", &format!("/api/hosts/{}", created.id), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted: Host = body_json(resp).await;
    assert_eq!(deleted, created);

    let resp = app
        .clone()
        .oneshot(request("GET", &format!("/api/hosts/{}", created.id), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app.oneshot(request("GET", "/api/hosts", "")).await.unwrap();
    let body: Value = body_json(resp).await;
    assert_eq!(body["total"], 0);
}
