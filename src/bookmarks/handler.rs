//! HTTP Handlers for the Bookmarks API

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use serde_json::Value as JsonValue;

use crate::error::ApiError;
use crate::handler::AppState;
use crate::model::{Bookmark, BookmarkInput};
use crate::sanitize::sanitize_bookmark;
use crate::validation::{validate_new, validate_patch};

fn success<T: serde::Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

fn created(bookmark: Bookmark) -> Response {
    let location = format!("/bookmarks/{}", bookmark.id);
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(bookmark)).into_response()
}

fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

fn failure(state: &AppState, action: &str, err: ApiError) -> Response {
    match &err {
        ApiError::StoreFault(e) => tracing::error!("failed to {}: {:#}", action, e),
        ApiError::NotFound => tracing::warn!("failed to {}: bookmark not found", action),
        other => tracing::info!("rejected request to {}: {}", action, other),
    }
    err.into_response_with(state.errors)
}

/// Ids that do not parse can never resolve, so they are answered like any other unknown id.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::NotFound)
}

/// Only a JSON object is a bookmark body; arrays would otherwise fill fields by position.
fn read_body(payload: Result<Json<JsonValue>, JsonRejection>) -> Result<BookmarkInput, ApiError> {
    let Json(value) = payload.map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;
    if !value.is_object() {
        return Err(ApiError::MalformedBody("request body must be a JSON object".to_string()));
    }
    serde_json::from_value(value).map_err(|e| ApiError::MalformedBody(e.to_string()))
}

pub async fn list_bookmarks(State(state): State<AppState>) -> Response {
    match state.store.list().await {
        Ok(bookmarks) => success(bookmarks.into_iter().map(sanitize_bookmark).collect::<Vec<_>>()),
        Err(e) => failure(&state, "list bookmarks", e.into()),
    }
}

pub async fn get_bookmark(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return failure(&state, "get bookmark", e),
    };

    match state.store.get(id).await {
        Ok(Some(bookmark)) => success(sanitize_bookmark(bookmark)),
        Ok(None) => failure(&state, "get bookmark", ApiError::NotFound),
        Err(e) => failure(&state, "get bookmark", e.into()),
    }
}

pub async fn create_bookmark(
    State(state): State<AppState>,
    payload: Result<Json<JsonValue>, JsonRejection>,
) -> Response {
    let new_bookmark = match read_body(payload).and_then(|input| Ok(validate_new(&input)?)) {
        Ok(new_bookmark) => new_bookmark,
        Err(e) => return failure(&state, "create bookmark", e),
    };

    match state.store.insert(new_bookmark).await {
        Ok(bookmark) => {
            tracing::info!(id = bookmark.id, "bookmark created");
            created(sanitize_bookmark(bookmark))
        }
        Err(e) => failure(&state, "create bookmark", e.into()),
    }
}

pub async fn update_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<JsonValue>, JsonRejection>,
) -> Response {
    let patch = match read_body(payload).and_then(|input| Ok(validate_patch(&input)?)) {
        Ok(patch) => patch,
        Err(e) => return failure(&state, "update bookmark", e),
    };
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return failure(&state, "update bookmark", e),
    };

    match state.store.get(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return failure(&state, "update bookmark", ApiError::NotFound),
        Err(e) => return failure(&state, "update bookmark", e.into()),
    }

    match state.store.update(id, patch).await {
        Ok(true) => {
            tracing::info!(id, "bookmark updated");
            no_content()
        }
        Ok(false) => failure(&state, "update bookmark", ApiError::NotFound),
        Err(e) => failure(&state, "update bookmark", e.into()),
    }
}

pub async fn delete_bookmark(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return failure(&state, "delete bookmark", e),
    };

    match state.store.get(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return failure(&state, "delete bookmark", ApiError::NotFound),
        Err(e) => return failure(&state, "delete bookmark", e.into()),
    }

    match state.store.delete(id).await {
        Ok(true) => {
            tracing::info!(id, "bookmark deleted");
            no_content()
        }
        Ok(false) => failure(&state, "delete bookmark", ApiError::NotFound),
        Err(e) => failure(&state, "delete bookmark", e.into()),
    }
}
