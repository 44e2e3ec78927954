//! Cross-cutting HTTP middleware: request logging, security headers and
//! server error rendering.

use crate::error::StoreFailure;
use crate::AppState;
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, info, warn};
use serde_json::json;
use std::time::Instant;
use tower_http::set_header::SetResponseHeaderLayer;

/// Emits one `http_request` event per request.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = started_at.elapsed().as_millis();
    if status.is_server_error() {
        warn!(
            "event=http_request module=http status=error method={method} path={path} http_status={} duration_ms={duration_ms}",
            status.as_u16()
        );
    } else {
        info!(
            "event=http_request module=http status=ok method={method} path={path} http_status={} duration_ms={duration_ms}",
            status.as_u16()
        );
    }
    response
}

/// Logs store failures and, outside production, replaces the generic 500
/// body with the failure details.
pub async fn render_server_errors(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let Some(failure) = response.extensions_mut().remove::<StoreFailure>() else {
        return response;
    };

    error!(
        "event=store_failure module=http status=error environment={} error={}",
        state.environment.as_str(),
        failure.message
    );

    if state.environment.is_production() {
        return response;
    }
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": failure.message, "error": failure.detail })),
    )
        .into_response()
}

/// Static response headers applied to every response.
pub fn security_headers() -> [SetResponseHeaderLayer<HeaderValue>; 3] {
    [
        SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ),
        SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ),
        SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ),
    ]
}
