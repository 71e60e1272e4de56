//! Data access for the `authors` and `books` tables.
//!
//! Handlers talk to the store through the [`Catalog`] trait object so the
//! SQL implementation can be wrapped or replaced in tests. Every statement is
//! parameterized; failures are passed up as [`StoreError`] without retries.

use std::sync::Arc;

use async_trait::async_trait;
use libris_http::error::AppError;
use thiserror::Error;

use crate::modules::authors::models::{Author, AuthorBook, AuthorChanges, NewAuthor};
use crate::modules::books::models::{Book, BookChanges, BookWithAuthor, NewBook};

mod sqlite;

pub use sqlite::SqlCatalog;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Internal(anyhow::Error::new(err))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait AuthorStore: Send + Sync {
    async fn find_all_authors(&self) -> StoreResult<Vec<Author>>;

    async fn find_author(&self, id: i64) -> StoreResult<Option<Author>>;

    /// Returns the generated id.
    async fn insert_author(&self, author: &NewAuthor) -> StoreResult<i64>;

    /// Returns the number of rows touched.
    async fn update_author(&self, id: i64, changes: &AuthorChanges) -> StoreResult<u64>;

    async fn delete_author(&self, id: i64) -> StoreResult<u64>;

    /// Books referencing `author_id`, each carrying the author's name.
    async fn list_books_for_author(&self, author_id: i64) -> StoreResult<Vec<AuthorBook>>;
}

#[async_trait]
pub trait BookStore: Send + Sync {
    async fn find_all_books(&self) -> StoreResult<Vec<Book>>;

    async fn find_book(&self, id: i64) -> StoreResult<Option<Book>>;

    async fn insert_book(&self, book: &NewBook) -> StoreResult<i64>;

    async fn update_book(&self, id: i64, changes: &BookChanges) -> StoreResult<u64>;

    async fn delete_book(&self, id: i64) -> StoreResult<u64>;

    async fn find_book_with_author(&self, id: i64) -> StoreResult<Option<BookWithAuthor>>;
}

/// Both resource stores behind one handle.
pub trait Catalog: AuthorStore + BookStore {}

impl<T: AuthorStore + BookStore> Catalog for T {}

/// Shared store handle injected into the routers.
pub type CatalogHandle = Arc<dyn Catalog>;
