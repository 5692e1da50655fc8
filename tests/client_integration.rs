//! Integration tests for [`ApiClient`] against a stand-in for the remote
//! PHP endpoint.
//!
//! The mock API records the query string of every request it receives, so
//! the tests can check both the decoded result and what went over the wire.

use actress_catalog::client::{ApiClient, ApiError, ProfileSource};
use actress_catalog::listing::ListingQuery;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type Requests = Arc<Mutex<Vec<HashMap<String, String>>>>;

fn profile_json(id: &str, name: &str, featured: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "slug": name.to_lowercase().replace(' ', "-"),
        "image": format!("/img/{}.jpg", id),
        "bio": "Actress.",
        "birthDate": "2-Jan-1990",
        "birthPlace": "Madrid",
        "height": "1.70 m",
        "featured": featured
    })
}

async fn mock_api(
    State(requests): State<Requests>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    requests.lock().unwrap().push(params.clone());

    let action = params.get("action").map(String::as_str).unwrap_or("");
    let body = match action {
        "all" => json!({
            "success": true,
            "data": [profile_json("1", "Ana Torres", true), profile_json("2", "Berta Gil", false)],
            "count": 2
        }),
        "featured" => json!({ "success": true, "data": [profile_json("1", "Ana Torres", true)] }),
        "by-id" => match params.get("id").map(String::as_str) {
            Some("1") => json!({ "success": true, "data": profile_json("1", "Ana Torres", true) }),
            _ => json!({ "success": false }),
        },
        "by-slug" => match params.get("slug").map(String::as_str) {
            Some("ana-torres") => {
                json!({ "success": true, "data": profile_json("1", "Ana Torres", true) })
            }
            _ => json!({ "success": false, "error": "profile withdrawn" }),
        },
        "search" => json!({ "success": true, "data": [profile_json("2", "Berta Gil", false)] }),
        "filter" => json!({
            "success": true,
            "data": [profile_json("3", "Clara Paz", true)],
            "count": 25
        }),
        _ => json!({ "success": false, "error": "unknown action" }),
    };
    Json(body)
}

async fn failing_api(State(status): State<StatusCode>) -> Response {
    (status, "upstream exploded").into_response()
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{}/api-actriz.php", addr)
}

async fn setup() -> (ApiClient, Requests) {
    let requests: Requests = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/api-actriz.php", get(mock_api))
        .with_state(requests.clone());
    let endpoint = spawn(app).await;
    (ApiClient::new(&endpoint).unwrap(), requests)
}

fn single_request(requests: &Requests) -> HashMap<String, String> {
    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests[0].clone()
}

#[tokio::test]
async fn test_all_returns_profiles() {
    let (client, requests) = setup().await;
    let profiles = client.all().await.unwrap();

    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].name, "Ana Torres");
    assert_eq!(profiles[0].birth_date, "2-Jan-1990");
    assert!(profiles[0].featured);

    let params = single_request(&requests);
    assert_eq!(params.get("action").unwrap(), "all");
    assert_eq!(params.len(), 1);
}

#[tokio::test]
async fn test_featured() {
    let (client, requests) = setup().await;
    let profiles = client.featured().await.unwrap();
    assert!(profiles.iter().all(|p| p.featured));
    assert_eq!(single_request(&requests).get("action").unwrap(), "featured");
}

#[tokio::test]
async fn test_by_id_sends_id() {
    let (client, requests) = setup().await;
    let profile = client.by_id("1").await.unwrap();
    assert_eq!(profile.slug, "ana-torres");

    let params = single_request(&requests);
    assert_eq!(params.get("action").unwrap(), "by-id");
    assert_eq!(params.get("id").unwrap(), "1");
}

#[tokio::test]
async fn test_by_id_failure_without_message_uses_default() {
    let (client, _) = setup().await;
    let err = client.by_id("404").await.unwrap_err();
    assert!(matches!(err, ApiError::Api(_)));
    assert_eq!(err.to_string(), "no profile found with id: 404");
}

#[tokio::test]
async fn test_by_slug_failure_carries_server_message() {
    let (client, requests) = setup().await;
    let err = client.by_slug("gone").await.unwrap_err();
    assert_eq!(err.to_string(), "profile withdrawn");

    let params = single_request(&requests);
    assert_eq!(params.get("action").unwrap(), "by-slug");
    assert_eq!(params.get("slug").unwrap(), "gone");
}

#[tokio::test]
async fn test_search_encodes_query() {
    let (client, requests) = setup().await;
    let profiles = client.search("gil & co").await.unwrap();
    assert_eq!(profiles.len(), 1);

    let params = single_request(&requests);
    assert_eq!(params.get("action").unwrap(), "search");
    assert_eq!(params.get("q").unwrap(), "gil & co");
}

#[tokio::test]
async fn test_filter_uses_count_for_pagination() {
    let (client, requests) = setup().await;
    let query = ListingQuery {
        order_by: Some("name-desc".parse().unwrap()),
        featured: true,
        search: None,
        page: 2,
        per_page: 12,
    };
    let page = client.filter(&query).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total, 25);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.page, 2);

    let params = single_request(&requests);
    assert_eq!(params.get("action").unwrap(), "filter");
    assert_eq!(params.get("orderBy").unwrap(), "name-desc");
    assert_eq!(params.get("featured").unwrap(), "true");
    assert_eq!(params.get("page").unwrap(), "2");
    assert_eq!(params.get("per_page").unwrap(), "12");
    assert!(!params.contains_key("order"));
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let app = Router::new()
        .route("/api-actriz.php", get(failing_api))
        .with_state(StatusCode::SERVICE_UNAVAILABLE);
    let client = ApiClient::new(&spawn(app).await).unwrap();

    let err = client.all().await.unwrap_err();
    match err {
        ApiError::Status { status, .. } => assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE),
        other => panic!("expected status error, got {:?}", other),
    }

    let err = client.featured().await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP 503 while fetching featured profiles");
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&format!("http://{}/api-actriz.php", addr)).unwrap();
    let err = client.all().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
