use std::path::Path;
use std::sync::Arc;

use axum::{body::Bytes, http::StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use title_recommender::{
    catalog::{artifact::write_bundle, CatalogStore},
    models::{CatalogBundle, CatalogEntry},
    routes::{create_router, AppState},
    services::RecommendationService,
};

fn entry(title: &str, content_type: &str, release_year: &str) -> CatalogEntry {
    CatalogEntry {
        content_type: content_type.to_string(),
        release_year: release_year.to_string(),
        ..CatalogEntry::titled(title)
    }
}

/// Twelve titles; row 0 ("Stranger Things") is most similar to rows 1..=11 in order
fn netflix_bundle() -> CatalogBundle {
    let catalog = vec![
        entry("Stranger Things", "TV Show", "2016"),
        entry("Dark", "TV Show", "2017"),
        entry("Narcos", "TV Show", "2015"),
        entry("The OA", "TV Show", "2016"),
        entry("Black Mirror", "TV Show", "2011"),
        entry("Mindhunter", "TV Show", "2017"),
        entry("Ozark", "TV Show", "2017"),
        entry("The Umbrella Academy", "TV Show", "2019"),
        entry("Locke & Key", "TV Show", "2020"),
        entry("The Haunting of Hill House", "TV Show", "2018"),
        entry("Russian Doll", "TV Show", "2019"),
        entry("Warrior Nun", "TV Show", "2020"),
    ];
    let n = catalog.len();
    let similarity = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i == j {
                        1.0
                    } else {
                        0.9 - 0.05 * (i + j) as f64 / 2.0
                    }
                })
                .collect()
        })
        .collect();

    CatalogBundle {
        similarity,
        indices: catalog
            .iter()
            .enumerate()
            .map(|(row, e)| (e.title.replace(' ', "").to_lowercase(), row))
            .collect(),
        catalog,
    }
}

fn server_for_artifact(path: &Path) -> TestServer {
    let store = Arc::new(CatalogStore::from_path(path));
    let state = AppState::new(RecommendationService::new(store));
    TestServer::new(create_router(state)).unwrap()
}

fn create_test_server() -> (TestServer, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json.zst");
    write_bundle(&path, &netflix_bundle()).unwrap();
    (server_for_artifact(&path), dir)
}

#[tokio::test]
async fn test_health_check() {
    let (server, _dir) = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "healthy");
}

#[tokio::test]
async fn test_recommendations_by_query() {
    let (server, _dir) = create_test_server();

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "StrangerThings")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["matched_entry"]["title"], "Stranger Things");
    assert_eq!(body["matched_entry"]["type"], "TV Show");
    assert_eq!(body["matched_entry"]["director"], "N/A");

    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 10);
    assert_eq!(recommendations[0], "Dark");
    assert_eq!(recommendations[9], "Russian Doll");
    assert!(!recommendations.contains(&json!("Stranger Things")));
}

#[tokio::test]
async fn test_recommendations_by_json_body() {
    let (server, _dir) = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "  ozark " }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["matched_entry"]["title"], "Ozark");
    assert_eq!(body["matched_entry"]["release_year"], "2017");
    assert_eq!(body["recommendations"][0], "Stranger Things");
}

#[tokio::test]
async fn test_substring_fallback() {
    let (server, _dir) = create_test_server();

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "haunting")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["matched_entry"]["title"], "The Haunting of Hill House");
}

#[tokio::test]
async fn test_unknown_title_is_not_found() {
    let (server, _dir) = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "Breaking Bad" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Breaking Bad"));
}

#[tokio::test]
async fn test_empty_title_is_bad_request() {
    let (server, _dir) = create_test_server();

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "   ")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server.post("/api/v1/recommendations").json(&json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_json_error() {
    let (server, _dir) = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .bytes(Bytes::from_static(br#"{"title": "#))
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());

    let response = server
        .post("/api/v1/recommendations")
        .text("Stranger Things")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_invalid_artifact_is_opaque_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json.zst");
    let mut bundle = netflix_bundle();
    bundle.similarity.truncate(2);
    write_bundle(&path, &bundle).unwrap();
    let server = server_for_artifact(&path);

    for _ in 0..2 {
        let response = server
            .get("/api/v1/recommendations")
            .add_query_param("title", "Dark")
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert!(!body["error"].as_str().unwrap().contains("dimension"));
    }

    let status: Value = server.get("/api/v1/catalog/status").await.json();
    assert_eq!(status["loaded"], false);
}

#[tokio::test]
async fn test_catalog_recovers_once_artifact_is_fixed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json.zst");
    let server = server_for_artifact(&path);

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Dark")
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    write_bundle(&path, &netflix_bundle()).unwrap();

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Dark")
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_catalog_status_reflects_lazy_load() {
    let (server, _dir) = create_test_server();

    let status: Value = server.get("/api/v1/catalog/status").await.json();
    assert_eq!(status["loaded"], false);
    assert_eq!(status["entries"], Value::Null);

    server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Dark")
        .await
        .assert_status_ok();

    let status: Value = server.get("/api/v1/catalog/status").await.json();
    assert_eq!(status["loaded"], true);
    assert_eq!(status["entries"], 12);
    assert!(status["loaded_at"].is_string());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let (server, _dir) = create_test_server();

    let response = server.get("/health").await;
    let header = response.headers().get("x-request-id").unwrap();
    assert!(uuid::Uuid::parse_str(header.to_str().unwrap()).is_ok());
}
