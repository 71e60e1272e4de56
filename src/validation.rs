//! Input validation shared by the resource handlers.
//!
//! Every function here is pure: it inspects raw request input and returns
//! either a normalized value or a [`ValidationError`]. Handlers call these
//! before touching the store.

use std::fmt;

use libris_http::error::AppError;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Inclusive character-count bounds for a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: usize,
    pub max: usize,
}

impl Bounds {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Integer input as it may appear in a JSON body.
///
/// Numbers and numeric strings are accepted and whole floats (`1815.0`) count
/// as integers. Any other JSON value is kept so it fails with the field's own
/// error rather than as a malformed body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl NumericInput {
    fn to_integer(&self) -> Option<i64> {
        match self {
            NumericInput::Integer(value) => Some(*value),
            NumericInput::Float(value) => whole_number(*value),
            NumericInput::Text(text) => {
                let text = text.trim();
                text.parse()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().and_then(whole_number))
            }
            NumericInput::Other(_) => None,
        }
    }

    fn raw(&self) -> String {
        match self {
            NumericInput::Integer(value) => value.to_string(),
            NumericInput::Float(value) => value.to_string(),
            NumericInput::Text(text) => text.clone(),
            NumericInput::Other(value) => value.to_string(),
        }
    }
}

fn whole_number(value: f64) -> Option<i64> {
    // `i64::MAX as f64` rounds up to 2^63, hence the strict upper bound.
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then_some(value as i64)
}

/// Text input as it may appear in a JSON body; non-strings are kept as
/// [`TextInput::Other`] and rejected by [`text_input`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextInput {
    Text(String),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid {field}: expected a positive integer, got '{raw}'.")]
    InvalidIdentifier { field: &'static str, raw: String },

    #[error("{field} must be between {} and {} characters.", .bounds.min, .bounds.max)]
    InvalidField { field: &'static str, bounds: Bounds },

    #[error("Invalid {field}: expected a year between 0 and {max}.")]
    InvalidYear { field: &'static str, max: i32 },

    #[error("{field} is required.")]
    MissingField { field: &'static str },

    #[error("At least one field must be provided for update.")]
    EmptyUpdate,
}

impl ValidationError {
    /// Stable machine-readable code for the failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidIdentifier { .. } => "invalid_identifier",
            ValidationError::InvalidField { .. } => "invalid_field",
            ValidationError::InvalidYear { .. } => "invalid_year",
            ValidationError::MissingField { .. } => "missing_field",
            ValidationError::EmptyUpdate => "empty_update",
        }
    }

    /// Name of the offending field, if the failure concerns one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::InvalidIdentifier { field, .. }
            | ValidationError::InvalidField { field, .. }
            | ValidationError::InvalidYear { field, .. }
            | ValidationError::MissingField { field } => Some(field),
            ValidationError::EmptyUpdate => None,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let detail = match (&err, err.field()) {
            (ValidationError::InvalidField { bounds, .. }, Some(field)) => {
                json!({ "field": field, "error": err.code(), "bounds": bounds.to_string() })
            }
            (_, Some(field)) => json!({ "field": field, "error": err.code() }),
            (_, None) => json!({ "error": err.code() }),
        };
        AppError::validation_with_code(err.code(), vec![detail], err.to_string())
    }
}

/// Parse a path or body identifier; it must be an integer greater than zero.
pub fn identifier(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidIdentifier {
            field,
            raw: raw.to_string(),
        }),
    }
}

/// Same as [`identifier`] for identifiers carried in a JSON body.
pub fn identifier_input(field: &'static str, input: &NumericInput) -> Result<i64, ValidationError> {
    match input.to_integer() {
        Some(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidIdentifier {
            field,
            raw: input.raw(),
        }),
    }
}

/// Trim `value` and check its character count against `bounds`.
pub fn text(field: &'static str, value: &str, bounds: Bounds) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    let length = trimmed.chars().count();
    if length < bounds.min || length > bounds.max {
        return Err(ValidationError::InvalidField { field, bounds });
    }
    Ok(trimmed.to_string())
}

/// [`text`] for a body value that may not be a string at all.
pub fn text_input(
    field: &'static str,
    input: &TextInput,
    bounds: Bounds,
) -> Result<String, ValidationError> {
    match input {
        TextInput::Text(value) => text(field, value, bounds),
        TextInput::Other(_) => Err(ValidationError::InvalidField { field, bounds }),
    }
}

/// Parse a calendar year in `0..=current_year`.
pub fn year(
    field: &'static str,
    input: &NumericInput,
    current_year: i32,
) -> Result<i64, ValidationError> {
    match input.to_integer() {
        Some(value) if (0..=i64::from(current_year)).contains(&value) => Ok(value),
        _ => Err(ValidationError::InvalidYear {
            field,
            max: current_year,
        }),
    }
}

/// Unwrap a field that must be present on create.
pub fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingField { field })
}

/// Validate a field only when it was supplied.
pub fn optional<T, U>(
    value: Option<T>,
    check: impl FnOnce(T) -> Result<U, ValidationError>,
) -> Result<Option<U>, ValidationError> {
    value.map(check).transpose()
}

/// Current calendar year in UTC.
pub fn current_year() -> i32 {
    time::OffsetDateTime::now_utc().year()
}
