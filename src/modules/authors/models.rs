use serde::{Deserialize, Serialize};

use crate::validation::{self, Bounds, NumericInput, TextInput, ValidationError};

pub const AUTHOR_NAME_BOUNDS: Bounds = Bounds::new(2, 100);
pub const NATIONALITY_BOUNDS: Bounds = Bounds::new(2, 50);

/// Stored author row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Author {
    pub id: i64,
    /// Display name of the author
    pub author: String,
    #[serde(rename = "birthYear")]
    pub birth_year: i64,
    pub nationality: String,
}

/// A book as listed under its author: book fields plus the author's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuthorBook {
    pub id: i64,
    pub title: String,
    pub published: i64,
    pub author: String,
}

/// Request body for `POST /authors`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAuthor {
    pub author: Option<TextInput>,
    #[serde(rename = "birthYear", alias = "birth_year")]
    pub birth_year: Option<NumericInput>,
    pub nationality: Option<TextInput>,
}

/// Normalized values ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub author: String,
    pub birth_year: i64,
    pub nationality: String,
}

impl CreateAuthor {
    /// All fields are required; presence is checked before shape.
    pub fn validate(self, current_year: i32) -> Result<NewAuthor, ValidationError> {
        let author = validation::required("author", self.author)?;
        let birth_year = validation::required("birthYear", self.birth_year)?;
        let nationality = validation::required("nationality", self.nationality)?;

        Ok(NewAuthor {
            author: validation::text_input("author", &author, AUTHOR_NAME_BOUNDS)?,
            birth_year: validation::year("birthYear", &birth_year, current_year)?,
            nationality: validation::text_input("nationality", &nationality, NATIONALITY_BOUNDS)?,
        })
    }
}

/// Request body for `PUT /authors/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAuthor {
    pub author: Option<TextInput>,
    #[serde(rename = "birthYear", alias = "birth_year")]
    pub birth_year: Option<NumericInput>,
    pub nationality: Option<TextInput>,
}

impl UpdateAuthor {
    pub fn validate(self, current_year: i32) -> Result<AuthorChanges, ValidationError> {
        if self.author.is_none() && self.birth_year.is_none() && self.nationality.is_none() {
            return Err(ValidationError::EmptyUpdate);
        }

        Ok(AuthorChanges {
            author: validation::optional(self.author, |v| {
                validation::text_input("author", &v, AUTHOR_NAME_BOUNDS)
            })?,
            birth_year: validation::optional(self.birth_year, |v| {
                validation::year("birthYear", &v, current_year)
            })?,
            nationality: validation::optional(self.nationality, |v| {
                validation::text_input("nationality", &v, NATIONALITY_BOUNDS)
            })?,
        })
    }
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorChanges {
    pub author: Option<String>,
    pub birth_year: Option<i64>,
    pub nationality: Option<String>,
}

impl AuthorChanges {
    /// Drop every field whose value equals the stored one.
    pub fn changed_from(self, existing: &Author) -> Self {
        Self {
            author: self.author.filter(|v| *v != existing.author),
            birth_year: self.birth_year.filter(|v| *v != existing.birth_year),
            nationality: self.nationality.filter(|v| *v != existing.nationality),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.birth_year.is_none() && self.nationality.is_none()
    }
}
