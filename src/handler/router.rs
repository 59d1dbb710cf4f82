//! Request dispatch module
//!
//! Entry point for HTTP request processing: body size check, handler name
//! assignment, hook execution and access logging.

use crate::config::AppState;
use crate::hooks::{Outcome, RequestRec};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
#[allow(clippy::unused_async)]
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let access_log = state.access_log_enabled();

    let mut entry = access_log.then(|| access_entry(&req, peer_addr));
    let (response, handler) = dispatch(&req, &state);

    if let Some(entry) = entry.as_mut() {
        entry.status = response.status().as_u16();
        entry.body_bytes = body_bytes(&response);
        entry.handler = handler;
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Produce the response for a request and the handler name routing gave it
pub fn dispatch<B>(req: &Request<B>, state: &AppState) -> (Response<Full<Bytes>>, Option<String>) {
    let server_name = state.config.http.server_name.as_str();

    // 1. Check body size
    if let Some(resp) = check_body_size(req, state.config.http.max_body_size, server_name) {
        return (resp, None);
    }

    // 2. Log headers if enabled
    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    // 3. Assign handler name from routing config
    let path = req.uri().path();
    let handler = routing::resolve_handler(path, req.headers(), &state.config.routes.handlers);

    // 4. Run handler hooks
    let mut rec = RequestRec::new(req.method().clone(), path)
        .with_handler(handler)
        .with_headers(req.headers().clone())
        .with_version(req.version());

    let response = match state.hooks.run_handlers(&mut rec) {
        Outcome::Handled => {
            let is_head = *req.method() == Method::HEAD;
            http::build_handled_response(rec.into_output(), server_name, is_head)
        }
        Outcome::Declined => {
            if logger::debug_enabled() {
                logger::log_debug(&format!(
                    "[Dispatch] No hook handled {path} (handler: {})",
                    handler.unwrap_or("-")
                ));
            }
            http::build_404_response(server_name)
        }
    };

    (response, handler.map(ToString::to_string))
}

/// Bytes actually sent in the response body (0 for HEAD)
fn body_bytes(response: &Response<Full<Bytes>>) -> usize {
    response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(
    req: &Request<B>,
    max_body_size: u64,
    server_name: &str,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response(server_name))
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

fn access_entry<B>(req: &Request<B>, peer_addr: SocketAddr) -> AccessLogEntry {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = match req.version() {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string();
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry
}
