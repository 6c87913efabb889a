//! One log line per request:
//! `METHOD URI STATUS LENGTH - ELAPSED ms BODY`.

use crate::error::Error;
use axum::{
    body::{Body, HttpBody},
    extract::Request,
    http::{header, Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use phonebook_core::ContactInput;
use std::time::{Duration, Instant};

/// Largest request body buffered for logging. Matches axum's default limit.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

pub async fn log_request(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("{method} {uri} body rejected: {e}");
            return Error::PayloadTooLarge.into_response();
        }
    };
    let summary = body_summary(&bytes);

    let response = next.run(Request::from_parts(parts, Body::from(bytes))).await;

    log::info!(
        "{}",
        log_line(
            &method,
            &uri,
            response.status(),
            &content_length(&response),
            started.elapsed(),
            &summary
        )
    );

    response
}

/// Format a request log line. The body summary is left off when empty.
fn log_line(
    method: &Method,
    uri: &Uri,
    status: StatusCode,
    length: &str,
    elapsed: Duration,
    summary: &str,
) -> String {
    let mut line = format!(
        "{} {} {} {} - {:.3} ms",
        method,
        uri,
        status.as_u16(),
        length,
        elapsed.as_secs_f64() * 1000.0
    );

    if !summary.is_empty() {
        line.push(' ');
        line.push_str(summary);
    }

    line
}

/// The `name` and `number` of a JSON request body, re-serialized.
///
/// Empty for bodies that are empty or not JSON objects.
fn body_summary(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return String::new();
    }

    serde_json::from_slice::<ContactInput>(bytes)
        .ok()
        .and_then(|input| serde_json::to_string(&input).ok())
        .unwrap_or_default()
}

fn content_length(response: &Response) -> String {
    if let Some(length) = response.body().size_hint().exact() {
        return length.to_string();
    }

    response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_string()
}
