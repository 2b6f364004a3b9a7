//! Shared test helpers for the HTTP integration tests.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use bookshelf_api::{AppState, build_app};
use bookshelf_core::config::AppConfig;
use bookshelf_database::DatabasePool;
use bookshelf_database::migration::run_migrations;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
}

impl TestApp {
    /// Create a new test application on a fresh in-memory database
    pub async fn new() -> Self {
        let db = DatabasePool::connect_in_memory()
            .await
            .expect("Failed to open test database");
        run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let router = build_app(AppState::new(AppConfig::default(), db));
        Self { router }
    }

    /// Send a request and decode the JSON response body (`Null` when empty)
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    /// GET helper
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None).await
    }

    /// POST helper
    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(body)).await
    }

    /// PATCH helper
    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("PATCH", uri, Some(body)).await
    }

    /// DELETE helper
    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request("DELETE", uri, None).await
    }

    /// Create an author and return its id
    pub async fn create_author(&self, first_name: &str, last_name: &str) -> String {
        let (status, body) = self
            .post(
                "/api/authors",
                serde_json::json!({ "firstName": first_name, "lastName": last_name }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"]
            .as_str()
            .expect("author id")
            .to_string()
    }

    /// Create a book and return its id
    pub async fn create_book(&self, title: &str, isbn: &str, author_id: &str) -> String {
        let (status, body) = self
            .post(
                "/api/books",
                serde_json::json!({ "title": title, "isbn": isbn, "authorId": author_id }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_str().expect("book id").to_string()
    }
}
