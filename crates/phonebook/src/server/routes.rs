use super::logging::log_request;
use crate::directory::Directory;
use crate::prelude::*;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    middleware,
    response::Html,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use phonebook_core::{Contact, ContactInput, DirectoryError, StoreError};
use tower_http::cors::{Any, CorsLayer};

/// Build the HTTP surface over `directory`.
pub fn router(directory: Directory) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/persons", get(list_persons).post(create_person))
        .route(
            "/api/persons/{id}",
            get(get_person).put(update_person).delete(delete_person),
        )
        .route("/api/info", get(info))
        .fallback(unknown_endpoint)
        .method_not_allowed_fallback(unknown_endpoint)
        .layer(middleware::from_fn(log_request))
        .layer(cors)
        .with_state(directory)
}

/// Run a directory call on the blocking pool. Storage backends may block
/// on file I/O or a held connection.
async fn blocking<T, F>(directory: Directory, call: F) -> Result<T, Error>
where
    F: FnOnce(&Directory) -> Result<T, DirectoryError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || call(&directory))
        .await
        .map_err(|e| DirectoryError::from(StoreError::Unavailable(e.to_string())))?
        .map_err(Error::from)
}

async fn list_persons(State(directory): State<Directory>) -> Result<Json<Vec<Contact>>, Error> {
    Ok(Json(blocking(directory, |d| d.list()).await?))
}

async fn info(State(directory): State<Directory>) -> Result<Html<String>, Error> {
    let now = Utc::now();
    Ok(Html(blocking(directory, move |d| d.info(now)).await?))
}

async fn get_person(
    State(directory): State<Directory>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, Error> {
    Ok(Json(blocking(directory, move |d| d.get(&id)).await?))
}

async fn delete_person(
    State(directory): State<Directory>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    blocking(directory, move |d| d.delete(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_person(
    State(directory): State<Directory>,
    payload: Result<Json<ContactInput>, JsonRejection>,
) -> Result<Json<Contact>, Error> {
    let Json(input) = payload.map_err(|rejection| Error::BadRequest(rejection.body_text()))?;
    Ok(Json(blocking(directory, move |d| d.create(&input)).await?))
}

async fn update_person(
    State(directory): State<Directory>,
    Path(id): Path<String>,
    payload: Result<Json<ContactInput>, JsonRejection>,
) -> Result<Json<Contact>, Error> {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            // An unknown or malformed id is reported before a bad body
            blocking(directory, move |d| d.get(&id)).await?;
            return Err(Error::BadRequest(rejection.body_text()));
        }
    };

    Ok(Json(blocking(directory, move |d| d.update(&id, &input)).await?))
}

async fn unknown_endpoint() -> Error {
    Error::UnknownEndpoint
}
