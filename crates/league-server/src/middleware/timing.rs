//! Request timing middleware.
//!
//! Logs the duration of each HTTP request so slow endpoints stand out.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};

/// Requests taking longer than this are logged as warnings.
#[derive(Debug, Clone, Copy)]
pub struct SlowRequestThreshold(pub Duration);

impl Default for SlowRequestThreshold {
    fn default() -> Self {
        Self(Duration::from_millis(100))
    }
}

/// Middleware that logs request timing.
///
/// # Example
///
/// ```ignore
/// use axum::{middleware, routing::get, Router};
/// use league_server::middleware::{timing_layer, SlowRequestThreshold};
///
/// let app = Router::new()
///     .route("/api/example", get(handler))
///     .layer(middleware::from_fn_with_state(SlowRequestThreshold::default(), timing_layer));
/// ```
pub async fn timing_layer(
    State(threshold): State<SlowRequestThreshold>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status().as_u16();

    if duration > threshold.0 {
        tracing::warn!(
            method = %method,
            path = %path,
            status,
            duration_ms = duration.as_millis(),
            "Slow request"
        );
    } else {
        tracing::debug!(
            method = %method,
            path = %path,
            status,
            duration_ms = duration.as_millis(),
            "Request completed"
        );
    }

    response
}
