use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use bookmarks::bookmarks::BookmarkStore;
use bookmarks::db::Database;
use bookmarks::error::ErrorPolicy;
use bookmarks::handler::AppState;
use bookmarks::model::{BookmarkPatch, NewBookmark};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

fn new_bookmark(title: &str, rating: i64) -> NewBookmark {
    NewBookmark {
        title: title.to_string(),
        url: format!("https://{}.example", title.to_lowercase()),
        description: String::new(),
        rating,
    }
}

async fn open(dir: &TempDir) -> Database {
    Database::new(&dir.path().join("bookmarks.db")).await.expect("open database")
}

#[tokio::test]
async fn crud_round_trip() {
    let dir = TempDir::new().unwrap();
    let db = open(&dir).await;

    let thinkful = db.insert(new_bookmark("Thinkful", 5)).await.unwrap();
    let google = db.insert(new_bookmark("Google", 4)).await.unwrap();
    assert!(google.id > thinkful.id);
    assert_eq!(db.get(thinkful.id).await.unwrap(), Some(thinkful.clone()));
    assert_eq!(db.list().await.unwrap(), vec![thinkful.clone(), google.clone()]);

    let patch = BookmarkPatch {
        description: Some("Think outside the classroom".to_string()),
        rating: Some(0),
        ..Default::default()
    };
    assert!(db.update(thinkful.id, patch).await.unwrap());
    let updated = db.get(thinkful.id).await.unwrap().unwrap();
    assert_eq!(updated.description, "Think outside the classroom");
    assert_eq!(updated.rating, 0);
    assert_eq!(updated.title, "Thinkful");

    assert!(db.delete(google.id).await.unwrap());
    assert!(!db.delete(google.id).await.unwrap());
    assert_eq!(db.get(google.id).await.unwrap(), None);
    assert!(!db.update(google.id, BookmarkPatch { rating: Some(1), ..Default::default() }).await.unwrap());
}

#[tokio::test]
async fn migrations_are_applied_once() {
    let dir = TempDir::new().unwrap();
    let id = {
        let db = open(&dir).await;
        db.insert(new_bookmark("MDN", 5)).await.unwrap().id
    };

    let reopened = open(&dir).await;
    let stored = reopened.get(id).await.unwrap().expect("bookmark survives reopen");
    assert_eq!(stored.title, "MDN");
}

#[tokio::test]
async fn http_create_and_fetch_through_database() {
    let dir = TempDir::new().unwrap();
    let store: Arc<dyn BookmarkStore> = Arc::new(open(&dir).await);
    let app = bookmarks::app(AppState::new(store, "secret", ErrorPolicy::Conceal));

    let request = Request::builder()
        .method("POST")
        .uri("/bookmarks")
        .header(header::AUTHORIZATION, "Bearer secret")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"title": "Reddit", "url": "https://www.reddit.com"}).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION].to_str().unwrap().to_string();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let created: Value = serde_json::from_slice(&bytes).unwrap();

    let request = Request::builder()
        .uri(&location)
        .header(header::AUTHORIZATION, "Bearer secret")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let fetched: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched["rating"], 1);
    assert_eq!(fetched["description"], "");
}
