//! Per-request tracing

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use snipx_core::errors::ExError;
use snipx_core::{log_op_end, log_op_error};
use snipx_core_types::RequestContext;
use tracing::Instrument;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Wrap the request in a `request` span and log its outcome
///
/// An incoming `x-request-id` is reused, otherwise one is generated. The id
/// is echoed back on the response.
pub async fn trace_request(request: Request, next: Next) -> Response {
    let ctx = RequestContext::from_header(
        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
    );
    let span = tracing::info_span!(
        "request",
        request_id = %ctx.request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );
    let start = std::time::Instant::now();

    let mut response = next.run(request).instrument(span.clone()).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    span.in_scope(|| match response.extensions().get::<ExError>() {
        Some(err) => {
            log_op_error!("http_request", err.clone(), duration_ms = duration_ms);
        }
        None => {
            log_op_end!(
                "http_request",
                duration_ms = duration_ms,
                status = response.status().as_u16()
            );
        }
    });

    if let Ok(value) = HeaderValue::from_str(ctx.request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
