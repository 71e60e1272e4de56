use async_trait::async_trait;
use libris_db::DbPool;

use super::{AuthorStore, BookStore, StoreResult};
use crate::modules::authors::models::{Author, AuthorBook, AuthorChanges, NewAuthor};
use crate::modules::books::models::{Book, BookChanges, BookWithAuthor, NewBook};

/// [`Catalog`](super::Catalog) backed by a SQLite pool.
#[derive(Debug, Clone)]
pub struct SqlCatalog {
    pool: DbPool,
}

impl SqlCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorStore for SqlCatalog {
    async fn find_all_authors(&self) -> StoreResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            "SELECT id, author, birth_year, nationality FROM authors ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(authors)
    }

    async fn find_author(&self, id: i64) -> StoreResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            "SELECT id, author, birth_year, nationality FROM authors WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(author)
    }

    async fn insert_author(&self, author: &NewAuthor) -> StoreResult<i64> {
        let result =
            sqlx::query("INSERT INTO authors (author, birth_year, nationality) VALUES (?, ?, ?)")
                .bind(author.author.as_str())
                .bind(author.birth_year)
                .bind(author.nationality.as_str())
                .execute(&self.pool)
                .await?;
        Ok(result.last_insert_rowid())
    }

    async fn update_author(&self, id: i64, changes: &AuthorChanges) -> StoreResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE authors
            SET author = COALESCE(?, author),
                birth_year = COALESCE(?, birth_year),
                nationality = COALESCE(?, nationality)
            WHERE id = ?
            ",
        )
        .bind(changes.author.as_deref())
        .bind(changes.birth_year)
        .bind(changes.nationality.as_deref())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_author(&self, id: i64) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn list_books_for_author(&self, author_id: i64) -> StoreResult<Vec<AuthorBook>> {
        let books = sqlx::query_as::<_, AuthorBook>(
            r"
            SELECT books.id, books.title, books.published, authors.author
            FROM books
            INNER JOIN authors ON books.author_id = authors.id
            WHERE authors.id = ?
            ORDER BY books.id
            ",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }
}

#[async_trait]
impl BookStore for SqlCatalog {
    async fn find_all_books(&self) -> StoreResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, author_id, published FROM books ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    async fn find_book(&self, id: i64) -> StoreResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, author_id, published FROM books WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    async fn insert_book(&self, book: &NewBook) -> StoreResult<i64> {
        let result = sqlx::query("INSERT INTO books (title, author_id, published) VALUES (?, ?, ?)")
            .bind(book.title.as_str())
            .bind(book.author_id)
            .bind(book.published)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    async fn update_book(&self, id: i64, changes: &BookChanges) -> StoreResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE books
            SET title = COALESCE(?, title),
                author_id = COALESCE(?, author_id),
                published = COALESCE(?, published)
            WHERE id = ?
            ",
        )
        .bind(changes.title.as_deref())
        .bind(changes.author_id)
        .bind(changes.published)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_book(&self, id: i64) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn find_book_with_author(&self, id: i64) -> StoreResult<Option<BookWithAuthor>> {
        let book = sqlx::query_as::<_, BookWithAuthor>(
            r"
            SELECT books.id, books.title, books.author_id, books.published,
                   authors.author, authors.birth_year, authors.nationality
            FROM books
            INNER JOIN authors ON books.author_id = authors.id
            WHERE books.id = ?
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }
}
