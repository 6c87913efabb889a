use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use phonebook_core::{DirectoryError, StoreError};
use serde::Serialize;

/// Errors surfaced at the HTTP boundary.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("{0}")]
    BadRequest(String),

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("unknown endpoint")]
    UnknownEndpoint,
}

/// JSON body of every error response: `{ "error": "..." }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Directory(DirectoryError::Invalid(err)) => {
                error_response(StatusCode::BAD_REQUEST, err.to_string())
            }
            Error::Directory(DirectoryError::NotFound(_)) => StatusCode::NOT_FOUND.into_response(),
            Error::Directory(DirectoryError::Store(err @ StoreError::MalformedId(_))) => {
                error_response(StatusCode::BAD_REQUEST, err.to_string())
            }
            Error::Directory(DirectoryError::Store(err @ StoreError::Rejected(_))) => {
                error_response(StatusCode::BAD_REQUEST, err.to_string())
            }
            Error::Directory(DirectoryError::Store(StoreError::Unavailable(cause))) => {
                log::error!("storage failure: {cause}");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
            Error::BadRequest(message) => error_response(StatusCode::BAD_REQUEST, message),
            Error::PayloadTooLarge => {
                error_response(StatusCode::PAYLOAD_TOO_LARGE, Error::PayloadTooLarge.to_string())
            }
            Error::UnknownEndpoint => {
                error_response(StatusCode::NOT_FOUND, Error::UnknownEndpoint.to_string())
            }
        }
    }
}
