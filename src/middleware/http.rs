//! HTTP-level middleware (cross-cutting concerns).
//!
//! Responsibility:
//! - Access logging: one line per request, `"<ip> - <method> <path> <status> <duration>"`
//! - Request-Id generation + propagation (X-Request-Id)
//! - Body size limits

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::{
    Router,
    body::Body,
    extract::{ConnectInfo, State},
    http::{Method, Request, StatusCode, header::HeaderName},
    middleware::{self, Next},
    response::Response,
};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Access log settings.
#[derive(Debug, Clone, Default)]
pub struct AccessLog {
    /// When set, the first entry of this header is logged as the client IP.
    pub proxy_header: Option<HeaderName>,
}

/// Apply HTTP-level middleware to the given Router.
///
/// Defaults:
/// - Request-Id header: `x-request-id`
/// - Body limit: 1 MiB
pub fn apply(router: Router, access_log: AccessLog) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    let layers = ServiceBuilder::new()
        // Generate a request id if missing, then propagate it to the response.
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(middleware::from_fn_with_state(access_log, access_log_middleware))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES));

    router.layer(layers)
}

async fn access_log_middleware(
    State(access_log): State<AccessLog>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let ip = client_ip(&req, access_log.proxy_header.as_ref());
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let response = next.run(req).await;

    tracing::info!(
        target: "access",
        "{}",
        format_access_line(&ip, &method, &path, response.status(), start.elapsed())
    );

    response
}

fn client_ip(req: &Request<Body>, proxy_header: Option<&HeaderName>) -> String {
    let forwarded = proxy_header
        .and_then(|name| req.headers().get(name))
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn format_access_line(
    ip: &str,
    method: &Method,
    path: &str,
    status: StatusCode,
    elapsed: Duration,
) -> String {
    format!("{ip} - {method} {path} {} {elapsed:?}", status.as_u16())
}
