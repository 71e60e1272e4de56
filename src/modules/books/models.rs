use serde::{Deserialize, Serialize};

use crate::validation::{self, Bounds, NumericInput, TextInput, ValidationError};

/// One bound for create and update alike.
pub const TITLE_BOUNDS: Bounds = Bounds::new(2, 200);

/// Stored book row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author_id: i64,
    /// Publication year
    pub published: i64,
}

/// A book joined with the author it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BookWithAuthor {
    pub id: i64,
    pub title: String,
    pub author_id: i64,
    pub published: i64,
    pub author: String,
    #[serde(rename = "birthYear")]
    pub birth_year: i64,
    pub nationality: String,
}

/// Request body for `POST /books`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBook {
    pub title: Option<TextInput>,
    pub author_id: Option<NumericInput>,
    pub published: Option<NumericInput>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author_id: i64,
    pub published: i64,
}

impl CreateBook {
    pub fn validate(self, current_year: i32) -> Result<NewBook, ValidationError> {
        let title = validation::required("title", self.title)?;
        let author_id = validation::required("author_id", self.author_id)?;
        let published = validation::required("published", self.published)?;

        Ok(NewBook {
            title: validation::text_input("title", &title, TITLE_BOUNDS)?,
            author_id: validation::identifier_input("author_id", &author_id)?,
            published: validation::year("published", &published, current_year)?,
        })
    }
}

/// Request body for `PUT /books/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBook {
    pub title: Option<TextInput>,
    pub author_id: Option<NumericInput>,
    pub published: Option<NumericInput>,
}

impl UpdateBook {
    pub fn validate(self, current_year: i32) -> Result<BookChanges, ValidationError> {
        if self.title.is_none() && self.author_id.is_none() && self.published.is_none() {
            return Err(ValidationError::EmptyUpdate);
        }

        Ok(BookChanges {
            title: validation::optional(self.title, |v| {
                validation::text_input("title", &v, TITLE_BOUNDS)
            })?,
            author_id: validation::optional(self.author_id, |v| {
                validation::identifier_input("author_id", &v)
            })?,
            published: validation::optional(self.published, |v| {
                validation::year("published", &v, current_year)
            })?,
        })
    }
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author_id: Option<i64>,
    pub published: Option<i64>,
}

impl BookChanges {
    /// Drop every field whose value equals the stored one.
    pub fn changed_from(self, existing: &Book) -> Self {
        Self {
            title: self.title.filter(|v| *v != existing.title),
            author_id: self.author_id.filter(|v| *v != existing.author_id),
            published: self.published.filter(|v| *v != existing.published),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author_id.is_none() && self.published.is_none()
    }
}
