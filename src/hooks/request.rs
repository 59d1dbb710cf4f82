//! Per-request view handed to handler hooks
//!
//! The host owns the request for its whole lifetime. Hooks only ever see a
//! `&mut RequestRec` for the duration of one call.

use hyper::{HeaderMap, Method, Version};

/// Result of running a handler hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The hook produced the response
    Handled,
    /// Not for this hook, the host tries the next one
    Declined,
}

/// Response output written by a hook
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Output {
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Output {
    /// True when no hook has set a content type or written body bytes
    pub fn is_untouched(&self) -> bool {
        self.content_type.is_none() && self.body.is_empty()
    }
}

/// Request record passed to handler hooks
#[derive(Debug)]
pub struct RequestRec {
    pub method: Method,
    pub path: String,
    pub version: Version,
    pub headers: HeaderMap,
    handler: Option<String>,
    output: Output,
}

impl RequestRec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            version: Version::HTTP_11,
            headers: HeaderMap::new(),
            handler: None,
            output: Output::default(),
        }
    }

    /// Assign the handler name chosen by routing
    #[must_use]
    pub fn with_handler(mut self, handler: Option<&str>) -> Self {
        self.handler = handler.map(ToString::to_string);
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn handler(&self) -> Option<&str> {
        self.handler.as_deref()
    }

    pub fn set_content_type(&mut self, content_type: &str) {
        self.output.content_type = Some(content_type.to_string());
    }

    /// Append bytes to the response body
    pub fn write_body(&mut self, data: &[u8]) {
        self.output.body.extend_from_slice(data);
    }

    pub const fn output(&self) -> &Output {
        &self.output
    }

    pub fn into_output(self) -> Output {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_has_untouched_output() {
        let r = RequestRec::new(Method::GET, "/foo");
        assert!(r.handler().is_none());
        assert!(r.output().is_untouched());
    }

    #[test]
    fn test_writes_accumulate() {
        let mut r = RequestRec::new(Method::GET, "/").with_handler(Some("x"));
        r.set_content_type("text/plain");
        r.write_body(b"ab");
        r.write_body(b"cd");
        assert_eq!(r.handler(), Some("x"));

        let out = r.into_output();
        assert_eq!(out.content_type.as_deref(), Some("text/plain"));
        assert_eq!(out.body, b"abcd");
    }
}
