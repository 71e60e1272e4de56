//! Book endpoints.
//!
//! Books are leaf records: deleting one is unconditional, but creating or
//! re-pointing one requires the referenced author to exist.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use libris_http::error::AppError;
use serde_json::json;

use super::models::{Book, BookWithAuthor, CreateBook, UpdateBook};
use crate::catalog::CatalogHandle;
use crate::modules::authors::handlers::author_not_found;
use crate::responses::UpdateOutcome;
use crate::validation;

fn book_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Could not find book with id: {id}"))
}

async fn load_book(catalog: &CatalogHandle, id: i64) -> Result<Book, AppError> {
    catalog.find_book(id).await?.ok_or_else(|| book_not_found(id))
}

pub async fn list_books(State(catalog): State<CatalogHandle>) -> Result<Json<Vec<Book>>, AppError> {
    Ok(Json(catalog.find_all_books().await?))
}

pub async fn get_book(
    State(catalog): State<CatalogHandle>,
    Path(raw_id): Path<String>,
) -> Result<Json<BookWithAuthor>, AppError> {
    let id = validation::identifier("id", &raw_id)?;
    let book = catalog
        .find_book_with_author(id)
        .await?
        .ok_or_else(|| book_not_found(id))?;
    Ok(Json(book))
}

pub async fn create_book(
    State(catalog): State<CatalogHandle>,
    payload: Result<Json<CreateBook>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let Json(payload) = payload?;
    let new_book = payload.validate(validation::current_year())?;

    if catalog.find_author(new_book.author_id).await?.is_none() {
        return Err(author_not_found(new_book.author_id));
    }

    let id = catalog.insert_book(&new_book).await?;
    let book = load_book(&catalog, id).await?;

    tracing::info!(book_id = id, author_id = book.author_id, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn update_book(
    State(catalog): State<CatalogHandle>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateBook>, JsonRejection>,
) -> Result<UpdateOutcome<Book>, AppError> {
    let id = validation::identifier("id", &raw_id)?;
    let Json(payload) = payload?;
    let changes = payload.validate(validation::current_year())?;

    let existing = load_book(&catalog, id).await?;

    if let Some(author_id) = changes.author_id {
        if catalog.find_author(author_id).await?.is_none() {
            return Err(AppError::validation_with_code(
                "invalid_reference",
                vec![json!({ "field": "author_id", "error": "invalid_reference" })],
                format!("Author with id {author_id} does not exist."),
            ));
        }
    }

    let changes = changes.changed_from(&existing);
    if changes.is_empty() {
        tracing::debug!(book_id = id, "book update is a no-op");
        return Ok(UpdateOutcome::Unchanged);
    }

    catalog.update_book(id, &changes).await?;
    let updated = load_book(&catalog, id).await?;

    tracing::info!(book_id = id, "book updated");
    Ok(UpdateOutcome::Updated(updated))
}

pub async fn delete_book(
    State(catalog): State<CatalogHandle>,
    Path(raw_id): Path<String>,
) -> Result<Json<Book>, AppError> {
    let id = validation::identifier("id", &raw_id)?;
    let existing = load_book(&catalog, id).await?;

    catalog.delete_book(id).await?;

    tracing::info!(book_id = id, "book deleted");
    Ok(Json(existing))
}
