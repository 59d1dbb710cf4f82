//! HTTP response building module
//!
//! Turns hook output into hyper responses and builds the host's own error
//! responses.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::hooks::Output;

/// Build the 200 response for a request a hook handled
///
/// The content type is exactly what the hook set; nothing is appended.
/// HEAD requests keep `Content-Length` but carry no body.
pub fn build_handled_response(
    output: Output,
    server_name: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = output.body.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(output.body)
    };

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header("Server", server_name)
        .header("Content-Length", content_length);
    if let Some(content_type) = output.content_type.as_deref() {
        builder = builder.header("Content-Type", content_type);
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 404 Not Found response, used when every hook declined
pub fn build_404_response(server_name: &str) -> Response<Full<Bytes>> {
    plain_response(StatusCode::NOT_FOUND, server_name, "404 Not Found")
}

/// Build 413 Payload Too Large response
pub fn build_413_response(server_name: &str) -> Response<Full<Bytes>> {
    plain_response(StatusCode::PAYLOAD_TOO_LARGE, server_name, "413 Payload Too Large")
}

fn plain_response(
    status: StatusCode,
    server_name: &str,
    text: &'static str,
) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Server", server_name)
        .header("Content-Type", "text/plain")
        .header("Content-Length", text.len())
        .body(Full::new(Bytes::from(text)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            let mut resp = Response::new(Full::new(Bytes::from(text)));
            *resp.status_mut() = status;
            resp
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn greeting() -> Output {
        Output {
            content_type: Some("text/html".to_string()),
            body: b"Hello, martian!".to_vec(),
        }
    }

    #[tokio::test]
    async fn test_handled_response_is_exact() {
        let resp = build_handled_response(greeting(), "foo_module/1.0", false);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "text/html");
        assert_eq!(resp.headers()["content-length"], "15");
        assert_eq!(resp.headers()["server"], "foo_module/1.0");

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"Hello, martian!");
    }

    #[tokio::test]
    async fn test_head_response_has_no_body() {
        let resp = build_handled_response(greeting(), "foo_module/1.0", true);
        assert_eq!(resp.headers()["content-length"], "15");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[test]
    fn test_handled_without_content_type() {
        let resp = build_handled_response(Output::default(), "s", false);
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get("content-type").is_none());
    }

    #[test]
    fn test_error_responses() {
        let not_found = build_404_response("s");
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.headers()["content-length"], "13");

        let too_large = build_413_response("s");
        assert_eq!(too_large.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(too_large.headers()["content-length"], "21");
    }
}
