use serde_json::Value as JsonValue;

use super::rating::{DEFAULT_RATING, normalize_rating};
use crate::error::ValidationError;
use crate::model::{BookmarkInput, BookmarkPatch, NewBookmark};

fn text_field(name: &'static str, value: Option<&JsonValue>) -> Result<Option<String>, ValidationError> {
    match value {
        None => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::InvalidField(name, "must be a string")),
    }
}

fn required_field(name: &'static str, value: Option<&JsonValue>) -> Result<String, ValidationError> {
    match text_field(name, value)? {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(ValidationError::MissingField(name)),
    }
}

fn non_empty_field(name: &'static str, value: Option<&JsonValue>) -> Result<Option<String>, ValidationError> {
    match text_field(name, value)? {
        Some(s) if s.is_empty() => Err(ValidationError::InvalidField(name, "must not be empty")),
        other => Ok(other),
    }
}

/// Validate a create body. `title` is checked before `url`.
pub fn validate_new(input: &BookmarkInput) -> Result<NewBookmark, ValidationError> {
    let title = required_field("title", input.title.as_ref())?;
    let url = required_field("url", input.url.as_ref())?;
    let description = text_field("description", input.description.as_ref())?.unwrap_or_default();
    let rating = match &input.rating {
        Some(value) => normalize_rating(value)?,
        None => DEFAULT_RATING,
    };

    Ok(NewBookmark {
        title,
        url,
        description,
        rating,
    })
}

/// Validate an update body. A field takes part in the patch when it is
/// present, whatever its value, so `rating: 0` and `description: ""` are
/// real updates.
pub fn validate_patch(input: &BookmarkInput) -> Result<BookmarkPatch, ValidationError> {
    let patch = BookmarkPatch {
        title: non_empty_field("title", input.title.as_ref())?,
        url: non_empty_field("url", input.url.as_ref())?,
        description: text_field("description", input.description.as_ref())?,
        rating: input.rating.as_ref().map(normalize_rating).transpose()?,
    };

    if patch.is_empty() {
        return Err(ValidationError::EmptyUpdate);
    }
    Ok(patch)
}
