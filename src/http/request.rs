//! Inbound request model.
//!
//! # Responsibilities
//! - Carry method, target, headers and body across a Gate boundary
//! - Translate inbound axum requests
//!
//! # Design Decisions
//! - Passed to a Gate by value: the Gate owns it for the call and the body
//!   can be read only once
//! - Rewriting the target produces a new request; method, head and body move
//!   over untouched

use axum::http::Uri;

use crate::http::{Body, Head, Method, UnsupportedMethod};

/// Request message.
#[derive(Debug)]
pub struct Request {
    pub target: Uri,
    pub method: Method,
    pub head: Head,
    pub body: Body,
}

impl Request {
    /// Create a request with an empty head and body.
    pub fn new(method: Method, target: Uri) -> Self {
        Self {
            target,
            method,
            head: Head::new(),
            body: Body::empty(),
        }
    }

    pub fn with_head(mut self, head: Head) -> Self {
        self.head = head;
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.head.add(key, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    /// The same request addressed to a different target.
    pub fn retarget(self, target: Uri) -> Self {
        Self { target, ..self }
    }

    /// Path component of the target.
    pub fn path(&self) -> &str {
        self.target.path()
    }
}

impl TryFrom<axum::http::Request<axum::body::Body>> for Request {
    type Error = UnsupportedMethod;

    fn try_from(request: axum::http::Request<axum::body::Body>) -> Result<Self, Self::Error> {
        let (parts, body) = request.into_parts();
        Ok(Self {
            method: Method::try_from(&parts.method)?,
            head: Head::from(&parts.headers),
            target: parts.uri,
            body: Body::from(body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_axum_request() {
        let inbound = axum::http::Request::builder()
            .method("POST")
            .uri("/upload?kind=raw")
            .header("X-Trace", "a")
            .header("X-Trace", "b")
            .body(axum::body::Body::from("data"))
            .unwrap();

        let request = Request::try_from(inbound).unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path(), "/upload");
        assert_eq!(request.target.query(), Some("kind=raw"));
        assert_eq!(request.head.values("x-trace"), vec!["a", "b"]);
        assert_eq!(request.body.text().await.unwrap(), "data");
    }

    #[test]
    fn test_unknown_method_rejected() {
        let inbound = axum::http::Request::builder()
            .method("PURGE")
            .uri("/")
            .body(axum::body::Body::empty())
            .unwrap();

        assert!(Request::try_from(inbound).is_err());
    }

    #[test]
    fn test_retarget_keeps_everything_else() {
        let request = Request::new(Method::Put, Uri::from_static("/a/b"))
            .with_header("X-Id", "7");
        let moved = request.retarget(Uri::from_static("/b"));

        assert_eq!(moved.path(), "/b");
        assert_eq!(moved.method, Method::Put);
        assert_eq!(moved.head.first("x-id"), Some("7"));
    }
}
