use std::collections::BTreeMap;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use http_body_util::BodyExt;
use keyauth::{
    Config, KeyStore, build_app,
    models::{api_key::ApiKey, timestamp::ZERO_TIME},
};
use tower::ServiceExt;

fn spawn_app() -> Router {
    build_app(KeyStore::seeded(), &Config::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn list_keys(app: &Router, uri: &str) -> Vec<ApiKey> {
    let response = send(app, "GET", uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn ids(keys: &[ApiKey]) -> Vec<i64> {
    keys.iter().map(|key| key.id).collect()
}

#[tokio::test]
async fn test_list_api_keys() {
    let app = spawn_app();

    let keys = list_keys(&app, "/api/apikey/").await;

    assert_eq!(ids(&keys), vec![1, 2, 3, 4, 5, 6, 7]);
    for key in &keys {
        assert!((17..=20).contains(&key.user_id));
        assert_eq!(key.content.len(), 10);
        assert_eq!(key.content, format!("{:04}-xx-yy", key.id));
    }
}

#[tokio::test]
async fn test_unset_timestamps_serialize_as_zero_time() {
    let app = spawn_app();

    let body = body_json(send(&app, "GET", "/api/apikey/1/", None).await).await;

    assert_eq!(body["api_key"], "0001-xx-yy");
    assert_eq!(body["time_created"], ZERO_TIME);
    assert_eq!(body["time_last_used"], ZERO_TIME);
    assert_eq!(body["time_archived"], ZERO_TIME);
}

#[tokio::test]
async fn test_list_filtered_by_user() {
    let app = spawn_app();

    assert_eq!(ids(&list_keys(&app, "/api/apikey/?user_id=17").await), vec![1, 2, 6]);
    assert_eq!(ids(&list_keys(&app, "/api/apikey/?user_id=20").await), vec![4, 5]);
    assert!(list_keys(&app, "/api/apikey/?user_id=99").await.is_empty());
}

#[tokio::test]
async fn test_list_with_non_numeric_user_id_is_unfiltered() {
    let app = spawn_app();

    assert_eq!(list_keys(&app, "/api/apikey/?user_id=abc").await.len(), 7);
    assert_eq!(list_keys(&app, "/api/apikey/?user_id=").await.len(), 7);
}

#[tokio::test]
async fn test_create_api_key() {
    let app = spawn_app();

    let response = send(
        &app,
        "POST",
        "/api/apikey/",
        Some(r#"{"id": 1, "user_id": 42, "api_key": "forged"}"#),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: ApiKey = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(created.id, 8);
    assert_eq!(created.user_id, 42);
    assert_eq!(created.content, "0008-xx-yy");
    assert!(created.created_at.is_some());
    assert!(created.last_used_at.is_none());

    let fetched = body_json(send(&app, "GET", "/api/apikey/8/", None).await).await;
    assert_eq!(fetched["user_id"], 42);
    assert_eq!(list_keys(&app, "/api/apikey/").await.len(), 8);
}

#[tokio::test]
async fn test_create_ignores_content_type() {
    let app = spawn_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/apikey/")
                .body(Body::from(r#"{"user_id": 5}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_with_malformed_payload_is_server_error() {
    let app = spawn_app();

    let response = send(&app, "POST", "/api/apikey/", Some("{not json")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "malformed_payload");

    let response = send(&app, "POST", "/api/apikey/", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(list_keys(&app, "/api/apikey/").await.len(), 7);
}

#[tokio::test]
async fn test_get_api_key() {
    let app = spawn_app();

    let response = send(&app, "GET", "/api/apikey/4/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let key: ApiKey = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(key.id, 4);
    assert_eq!(key.user_id, 20);
}

#[tokio::test]
async fn test_get_missing_api_key() {
    let app = spawn_app();

    let response = send(&app, "GET", "/api/apikey/9999/", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "404 api key not found");
}

#[tokio::test]
async fn test_non_integer_id_is_bad_request() {
    let app = spawn_app();

    for (method, uri) in [
        ("GET", "/api/apikey/abc/"),
        ("DELETE", "/api/apikey/abc/"),
        ("PATCH", "/api/apikey/abc/archive/"),
    ] {
        let response = send(&app, method, uri, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method} {uri}");
    }
}

#[tokio::test]
async fn test_delete_api_key() {
    let app = spawn_app();

    let response = send(&app, "DELETE", "/api/apikey/3/", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());

    assert_eq!(ids(&list_keys(&app, "/api/apikey/").await), vec![1, 2, 4, 5, 6, 7]);

    let response = send(&app, "GET", "/api/apikey/3/", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "DELETE", "/api/apikey/3/", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_archive_api_key() {
    let app = spawn_app();
    let before: ApiKey =
        serde_json::from_slice(&body_bytes(send(&app, "GET", "/api/apikey/2/", None).await).await)
            .unwrap();

    let response = send(&app, "PATCH", "/api/apikey/2/archive/", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());

    let first: ApiKey =
        serde_json::from_slice(&body_bytes(send(&app, "GET", "/api/apikey/2/", None).await).await)
            .unwrap();
    assert!(first.archived_at.is_some());
    assert_eq!(
        ApiKey {
            archived_at: None,
            ..first.clone()
        },
        before
    );

    let response = send(&app, "PATCH", "/api/apikey/2/archive/", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let second: ApiKey =
        serde_json::from_slice(&body_bytes(send(&app, "GET", "/api/apikey/2/", None).await).await)
            .unwrap();
    assert!(second.archived_at >= first.archived_at);

    let response = send(&app, "PATCH", "/api/apikey/9999/archive/", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_authenticate_api_key() {
    let app = spawn_app();

    let response = send(
        &app,
        "POST",
        "/api/apikey/authenticate/",
        Some(r#"{"api_key": "0005-xx-yy"}"#),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let key: ApiKey =
        serde_json::from_slice(&body_bytes(send(&app, "GET", "/api/apikey/5/", None).await).await)
            .unwrap();
    assert!(key.last_used_at.is_some());
    assert!(key.archived_at.is_none());
}

#[tokio::test]
async fn test_authenticate_unknown_or_malformed() {
    let app = spawn_app();

    let response = send(
        &app,
        "POST",
        "/api/apikey/authenticate/",
        Some(r#"{"api_key": "0099-xx-yy"}"#),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"]["message"],
        "404 api key not found"
    );

    let response = send(&app, "POST", "/api/apikey/authenticate/", Some("[")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "POST", "/api/apikey/authenticate/", Some("{}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app();

    let response = send(&app, "GET", "/health/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!({ "message": "OK", "failures": [] }));
}

#[tokio::test]
async fn test_get_endpoints() {
    let app = spawn_app();

    let response = send(&app, "GET", "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let endpoints: BTreeMap<String, Vec<String>> =
        serde_json::from_slice(&body_bytes(response).await).unwrap();

    let expected: BTreeMap<String, Vec<String>> = [
        ("/", vec!["GET"]),
        ("/health/", vec!["GET"]),
        ("/api/apikey/", vec!["GET", "POST", "OPTIONS"]),
        ("/api/apikey/{id}/", vec!["GET", "DELETE", "OPTIONS"]),
        ("/api/apikey/{id}/archive/", vec!["PATCH", "OPTIONS"]),
        ("/api/apikey/authenticate/", vec!["POST", "OPTIONS"]),
    ]
    .into_iter()
    .map(|(path, methods)| {
        (
            path.to_string(),
            methods.into_iter().map(String::from).collect(),
        )
    })
    .collect();

    assert_eq!(endpoints, expected);
}

#[tokio::test]
async fn test_options_returns_empty_success() {
    let app = spawn_app();

    for uri in [
        "/api/apikey/",
        "/api/apikey/1/",
        "/api/apikey/1/archive/",
        "/api/apikey/authenticate/",
    ] {
        let response = send(&app, "OPTIONS", uri, None).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert!(body_bytes(response).await.is_empty());
    }

    // A bare OPTIONS on archive must not archive anything.
    let key: ApiKey =
        serde_json::from_slice(&body_bytes(send(&app, "GET", "/api/apikey/1/", None).await).await)
            .unwrap();
    assert!(key.archived_at.is_none());
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = spawn_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/apikey/1/archive/")
                .header("Origin", "http://example.com")
                .header("Access-Control-Request-Method", "PATCH")
                .header("Access-Control-Request-Headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
    let allowed_methods = response.headers()["access-control-allow-methods"]
        .to_str()
        .unwrap()
        .to_string();
    assert!(allowed_methods.contains("PATCH"));
}

#[tokio::test]
async fn test_cors_can_be_disabled() {
    let config = Config {
        cors_enabled: false,
        ..Config::default()
    };
    let app = build_app(KeyStore::seeded(), &config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health/")
                .header("Origin", "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.headers().contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_empty_store() {
    let app = build_app(KeyStore::new(), &Config::default());

    assert!(list_keys(&app, "/api/apikey/").await.is_empty());

    let response = send(&app, "POST", "/api/apikey/", Some(r#"{"user_id": 1}"#)).await;
    let created: ApiKey = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.content, "0001-xx-yy");
}
