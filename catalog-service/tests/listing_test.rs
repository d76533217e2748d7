mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn venue_search_returns_count_and_data() {
    let app = TestApp::spawn();

    let (status, body) = app
        .post("/venues/search", json!({"search_term": "Music"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["name"], "The Musical Hop");
    assert_eq!(body["data"][1]["name"], "Park Square Live Music & Coffee");
}

#[tokio::test]
async fn artist_search_is_case_insensitive() {
    let app = TestApp::spawn();

    let (_, body) = app.post("/artists/search", json!({"search_term": "A"})).await;
    assert_eq!(body["count"], 3);

    let (_, body) = app.post("/artists/search", json!({"search_term": "band"})).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["id"], 6);
}

#[tokio::test]
async fn listing_is_paginated() {
    let app = TestApp::spawn();

    let (status, body) = app.get("/venues").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 1);
    assert_eq!(body["total_pages"], 1);

    let (status, body) = app.get("/venues?page=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn single_entry_lookup() {
    let app = TestApp::spawn();

    let (status, body) = app.get("/artists/5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Matt Quevedo");

    let (status, _) = app.get("/artists/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_and_delete_venue() {
    let app = TestApp::spawn();

    let (status, body) = app
        .post(
            "/venues",
            json!({
                "name": "The Blue Note",
                "city": "New York",
                "state": "NY",
                "address": "131 W 3rd St",
                "genres": ["Jazz"]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 4);

    let (status, _) = app
        .post(
            "/venues",
            json!({"name": "Nowhere", "city": "X", "state": "Texas", "address": "1 Main"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = app.delete("/venues/4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 4);

    let (status, _) = app.get("/venues/4").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
