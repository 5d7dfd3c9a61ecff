use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::{ErrorResponse, FaultResponse, UnauthorizedResponse};
use crate::validation::rating::{MAX_RATING, MIN_RATING};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing '{0}' in request body")]
    MissingField(&'static str),
    #[error("'{0}' {1}")]
    InvalidField(&'static str, &'static str),
    #[error("Rating must be an integer from {} to {}", MIN_RATING, MAX_RATING)]
    InvalidRating,
    #[error("Rating must be an integer from {} to {}", MIN_RATING, MAX_RATING)]
    RatingOutOfRange,
    #[error("Request body must contain title, url, description, or rating")]
    EmptyUpdate,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid JSON body: {0}")]
    MalformedBody(String),
    #[error("Unauthorized request")]
    Unauthorized,
    #[error("Bookmark not found")]
    NotFound,
    #[error("store fault: {0:#}")]
    StoreFault(#[source] anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::StoreFault(error)
    }
}

/// How much of a server fault is shown to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    ExposeDetails,
    Conceal,
}

impl ErrorPolicy {
    pub fn for_environment(production: bool) -> Self {
        if production { ErrorPolicy::Conceal } else { ErrorPolicy::ExposeDetails }
    }
}

const SERVER_ERROR: &str = "server error";

impl ApiError {
    pub fn status(&self) -> StatusCode {
        use ApiError::*;
        match self {
            Validation(_) | MalformedBody(_) => StatusCode::BAD_REQUEST,
            Unauthorized => StatusCode::UNAUTHORIZED,
            NotFound => StatusCode::NOT_FOUND,
            StoreFault(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_response_with(self, policy: ErrorPolicy) -> Response {
        let status = self.status();
        let message = self.to_string();
        match self {
            ApiError::Unauthorized => (status, Json(UnauthorizedResponse::new(&message))).into_response(),
            ApiError::StoreFault(e) => {
                let detail = format!("{e:#}");
                let body = match policy {
                    ErrorPolicy::Conceal => FaultResponse::concealed(SERVER_ERROR),
                    ErrorPolicy::ExposeDetails => FaultResponse::detailed(SERVER_ERROR, &detail),
                };
                (status, Json(body)).into_response()
            }
            _ => (status, Json(ErrorResponse::new(&message))).into_response(),
        }
    }
}
