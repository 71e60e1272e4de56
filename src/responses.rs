//! Response shapes shared by the resource handlers.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

pub const NO_CHANGES_MESSAGE: &str =
    "No updates were made as all inputs match the existing values.";

/// Result of a partial update.
///
/// `Unchanged` means every supplied value already matched the stored row and
/// no write was issued; it renders as a message instead of the record.
#[derive(Debug)]
pub enum UpdateOutcome<T> {
    Updated(T),
    Unchanged,
}

impl<T: Serialize> IntoResponse for UpdateOutcome<T> {
    fn into_response(self) -> Response {
        match self {
            UpdateOutcome::Updated(record) => Json(record).into_response(),
            UpdateOutcome::Unchanged => Json(json!({ "message": NO_CHANGES_MESSAGE })).into_response(),
        }
    }
}
