#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use libris_app::catalog::{AuthorStore, BookStore, CatalogHandle, SqlCatalog, StoreResult};
use libris_app::modules::{
    self,
    authors::{
        self,
        models::{Author, AuthorBook, AuthorChanges, NewAuthor},
    },
    books::{
        self,
        models::{Book, BookChanges, BookWithAuthor, NewBook},
    },
};
use serde_json::Value;
use tower::ServiceExt;

/// SQL catalog that counts every write it forwards.
pub struct RecordingCatalog {
    inner: SqlCatalog,
    writes: AtomicUsize,
}

impl RecordingCatalog {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl AuthorStore for RecordingCatalog {
    async fn find_all_authors(&self) -> StoreResult<Vec<Author>> {
        self.inner.find_all_authors().await
    }

    async fn find_author(&self, id: i64) -> StoreResult<Option<Author>> {
        self.inner.find_author(id).await
    }

    async fn insert_author(&self, author: &NewAuthor) -> StoreResult<i64> {
        self.record();
        self.inner.insert_author(author).await
    }

    async fn update_author(&self, id: i64, changes: &AuthorChanges) -> StoreResult<u64> {
        self.record();
        self.inner.update_author(id, changes).await
    }

    async fn delete_author(&self, id: i64) -> StoreResult<u64> {
        self.record();
        self.inner.delete_author(id).await
    }

    async fn list_books_for_author(&self, author_id: i64) -> StoreResult<Vec<AuthorBook>> {
        self.inner.list_books_for_author(author_id).await
    }
}

#[async_trait]
impl BookStore for RecordingCatalog {
    async fn find_all_books(&self) -> StoreResult<Vec<Book>> {
        self.inner.find_all_books().await
    }

    async fn find_book(&self, id: i64) -> StoreResult<Option<Book>> {
        self.inner.find_book(id).await
    }

    async fn insert_book(&self, book: &NewBook) -> StoreResult<i64> {
        self.record();
        self.inner.insert_book(book).await
    }

    async fn update_book(&self, id: i64, changes: &BookChanges) -> StoreResult<u64> {
        self.record();
        self.inner.update_book(id, changes).await
    }

    async fn delete_book(&self, id: i64) -> StoreResult<u64> {
        self.record();
        self.inner.delete_book(id).await
    }

    async fn find_book_with_author(&self, id: i64) -> StoreResult<Option<BookWithAuthor>> {
        self.inner.find_book_with_author(id).await
    }
}

pub struct TestApp {
    pub router: Router,
    pub catalog: Arc<RecordingCatalog>,
    pub pool: libris_db::DbPool,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = libris_db::connect_in_memory().await.unwrap();
        modules::registry().apply_schema(&pool).await.unwrap();

        let catalog = Arc::new(RecordingCatalog {
            inner: SqlCatalog::new(pool.clone()),
            writes: AtomicUsize::new(0),
        });
        let handle: CatalogHandle = catalog.clone();
        let router = Router::new()
            .nest("/authors", authors::router(handle.clone()))
            .nest("/books", books::router(handle));

        Self {
            router,
            catalog,
            pool,
        }
    }

    pub fn writes(&self) -> usize {
        self.catalog.writes()
    }

    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };
        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("PUT", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send("DELETE", uri, None).await
    }

    /// Create an author and return its id.
    pub async fn author(&self, name: &str, birth_year: i64, nationality: &str) -> i64 {
        let (status, body) = self
            .post(
                "/authors",
                serde_json::json!({
                    "author": name,
                    "birthYear": birth_year,
                    "nationality": nationality
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    /// Create a book and return its id.
    pub async fn book(&self, title: &str, author_id: i64, published: i64) -> i64 {
        let (status, body) = self
            .post(
                "/books",
                serde_json::json!({
                    "title": title,
                    "author_id": author_id,
                    "published": published
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }
}

/// `error.code` of an error response body.
pub fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}
