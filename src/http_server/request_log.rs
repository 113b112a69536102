//! Request logging middleware
//!
//! One `HTTP_REQUEST` line per request with method, path, status and
//! elapsed milliseconds. Server errors are logged at ERROR.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

use crate::observability::{Event, Logger};

pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed = started.elapsed().as_millis().to_string();
    let fields = [
        ("duration_ms", elapsed.as_str()),
        ("method", method.as_str()),
        ("path", path.as_str()),
        ("status", status.as_str()),
    ];

    if status.is_server_error() {
        Logger::error(Event::HttpRequest.as_str(), &fields);
    } else {
        Logger::info(Event::HttpRequest.as_str(), &fields);
    }

    response
}
