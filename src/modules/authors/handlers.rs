//! Author endpoints.
//!
//! Flow for every handler: validate input, check existence, then touch the
//! store. Mutations re-read the row so the response reflects what was stored.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use libris_http::error::AppError;
use serde_json::json;

use super::models::{Author, AuthorBook, CreateAuthor, UpdateAuthor};
use crate::catalog::CatalogHandle;
use crate::responses::UpdateOutcome;
use crate::validation;

pub(crate) fn author_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Could not find author with id: {id}"))
}

async fn load_author(catalog: &CatalogHandle, id: i64) -> Result<Author, AppError> {
    catalog
        .find_author(id)
        .await?
        .ok_or_else(|| author_not_found(id))
}

pub async fn list_authors(State(catalog): State<CatalogHandle>) -> Result<Json<Vec<Author>>, AppError> {
    Ok(Json(catalog.find_all_authors().await?))
}

pub async fn get_author(
    State(catalog): State<CatalogHandle>,
    Path(raw_id): Path<String>,
) -> Result<Json<Author>, AppError> {
    let id = validation::identifier("id", &raw_id)?;
    Ok(Json(load_author(&catalog, id).await?))
}

pub async fn create_author(
    State(catalog): State<CatalogHandle>,
    payload: Result<Json<CreateAuthor>, JsonRejection>,
) -> Result<(StatusCode, Json<Author>), AppError> {
    let Json(payload) = payload?;
    let new_author = payload.validate(validation::current_year())?;

    let id = catalog.insert_author(&new_author).await?;
    let author = load_author(&catalog, id).await?;

    tracing::info!(author_id = id, "author created");
    Ok((StatusCode::CREATED, Json(author)))
}

pub async fn update_author(
    State(catalog): State<CatalogHandle>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateAuthor>, JsonRejection>,
) -> Result<UpdateOutcome<Author>, AppError> {
    let id = validation::identifier("id", &raw_id)?;
    let Json(payload) = payload?;
    let changes = payload.validate(validation::current_year())?;

    let existing = load_author(&catalog, id).await?;
    let changes = changes.changed_from(&existing);
    if changes.is_empty() {
        tracing::debug!(author_id = id, "author update is a no-op");
        return Ok(UpdateOutcome::Unchanged);
    }

    catalog.update_author(id, &changes).await?;
    let updated = load_author(&catalog, id).await?;

    tracing::info!(author_id = id, "author updated");
    Ok(UpdateOutcome::Updated(updated))
}

pub async fn delete_author(
    State(catalog): State<CatalogHandle>,
    Path(raw_id): Path<String>,
) -> Result<Json<Author>, AppError> {
    let id = validation::identifier("id", &raw_id)?;
    let existing = load_author(&catalog, id).await?;

    let dependents = catalog.list_books_for_author(id).await?;
    if !dependents.is_empty() {
        let details = dependents
            .iter()
            .map(|book| json!({ "id": book.id, "title": book.title, "published": book.published }))
            .collect();
        return Err(AppError::conflict(
            "dependent_records_exist",
            details,
            format!(
                "Cannot delete author with id: {id}; {} book(s) still reference it.",
                dependents.len()
            ),
        ));
    }

    catalog.delete_author(id).await?;

    tracing::info!(author_id = id, "author deleted");
    Ok(Json(existing))
}

pub async fn list_author_books(
    State(catalog): State<CatalogHandle>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<AuthorBook>>, AppError> {
    let id = validation::identifier("id", &raw_id)?;
    load_author(&catalog, id).await?;

    Ok(Json(catalog.list_books_for_author(id).await?))
}
