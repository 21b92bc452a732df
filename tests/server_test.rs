//! Router tests for the JSON HTTP surface, backed by a mock recipe API.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use recipefinder::cache::ManualClock;
use recipefinder::data::RecipeClient;
use recipefinder::server;
use recipefinder::service::RecipeService;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_for(upstream: &MockServer) -> Router {
    let service = RecipeService::with_clock(
        RecipeClient::with_base_url(upstream.uri(), "test-key"),
        Arc::new(ManualClock::new(0)),
        Duration::from_millis(60_000),
    );
    server::router(Arc::new(service))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_search_returns_results_object() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recipes/complexSearch"))
        .and(query_param("query", "pasta"))
        .and(query_param("cuisine", "Italian"))
        .and(query_param("apiKey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 1, "title": "Spaghetti", "image": "https://img/1.jpg"}]
        })))
        .mount(&upstream)
        .await;
    let app = app_for(&upstream);

    let (status, body) = get(&app, "/recipes?query=pasta&cuisine=Italian").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"results": [{"id": 1, "title": "Spaghetti", "image": "https://img/1.jpg"}]})
    );
}

#[tokio::test]
async fn test_repeated_search_hits_upstream_once() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recipes/complexSearch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&upstream)
        .await;
    let app = app_for(&upstream);

    let (first, _) = get(&app, "/recipes?query=soup&maxReadyTime=20").await;
    let (second, body) = get(&app, "/recipes?maxReadyTime=20&query=soup").await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(body, json!({"results": []}));
}

#[tokio::test]
async fn test_repeated_query_key_uses_last_value() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recipes/complexSearch"))
        .and(query_param("query", "b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 2, "title": "Bibimbap"}]
        })))
        .expect(1)
        .mount(&upstream)
        .await;
    let app = app_for(&upstream);

    let (status, body) = get(&app, "/recipes?query=a&query=b").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"results": [{"id": 2, "title": "Bibimbap"}]}));
}

#[tokio::test]
async fn test_search_ignores_unknown_query_keys() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recipes/complexSearch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&upstream)
        .await;
    let app = app_for(&upstream);

    let (status, body) = get(&app, "/recipes?query=soup&page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"results": []}));
    let requests = upstream.received_requests().await.unwrap();
    assert!(requests[0].url.query_pairs().all(|(k, _)| k != "page"));
}

#[tokio::test]
async fn test_search_without_criteria_is_bad_request() {
    let upstream = MockServer::start().await;
    let app = app_for(&upstream);

    let (status, body) = get(&app, "/recipes").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("results").is_none());
    assert!(body["error"].as_str().unwrap().contains("Enter a search term"));
}

#[tokio::test]
async fn test_search_upstream_failure_is_bad_gateway() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstream)
        .await;
    let app = app_for(&upstream);

    let (status, body) = get(&app, "/recipes?query=pasta").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.get("results").is_none());
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to fetch recipes"));
}

#[tokio::test]
async fn test_recipe_detail_returns_recipe_object() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recipes/42/information"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "title": "Chili",
            "readyInMinutes": 45,
            "servings": 4,
            "extendedIngredients": [{"id": 1, "original": "1 lb beef"}]
        })))
        .mount(&upstream)
        .await;
    let app = app_for(&upstream);

    let (status, body) = get(&app, "/recipes/42").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recipe"]["title"], "Chili");
    assert_eq!(body["recipe"]["readyInMinutes"], 45);
    assert_eq!(body["recipe"]["extendedIngredients"][0]["original"], "1 lb beef");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_recipe_detail_bad_id_is_bad_request() {
    let upstream = MockServer::start().await;
    let app = app_for(&upstream);

    let (status, body) = get(&app, "/recipes/not-a-number").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid recipe id: 'not-a-number'"}));
}

#[tokio::test]
async fn test_cuisines_lists_form_options() {
    let upstream = MockServer::start().await;
    let app = app_for(&upstream);

    let (status, body) = get(&app, "/cuisines").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"cuisines": ["Italian", "Mexican", "Chinese", "Indian", "American"]})
    );
}

#[tokio::test]
async fn test_health_is_ok() {
    let upstream = MockServer::start().await;
    let app = app_for(&upstream);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
}
