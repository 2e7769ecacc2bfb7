//! Outbound response model.
//!
//! # Responsibilities
//! - Carry status, headers and an optional body back out of a Gate
//!
//! # Design Decisions
//! - A missing body is distinct from an empty one: the network adapter fills
//!   in the status reason phrase only when the body is absent
//! - The body is closed when the response (or the body taken out of it) is
//!   dropped

use axum::http::StatusCode;

use crate::http::{Body, Head};

/// Response message.
#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    pub head: Head,
    pub body: Option<Body>,
}

impl Response {
    /// A response with the given status, no headers and no body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            head: Head::new(),
            body: None,
        }
    }

    /// `200 OK` with no body.
    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    /// A `text/plain` response.
    pub fn text(status: StatusCode, text: impl Into<String>) -> Self {
        let text: String = text.into();
        Self::new(status)
            .with_header("Content-Type", "text/plain; charset=utf-8")
            .with_body(text)
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.head.add(key, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_body() {
        let response = Response::new(StatusCode::NOT_FOUND);
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert!(response.head.is_empty());
        assert!(response.body.is_none());
    }

    #[tokio::test]
    async fn test_text_response() {
        let response = Response::text(StatusCode::OK, "hi");
        assert_eq!(
            response.head.first("content-type"),
            Some("text/plain; charset=utf-8")
        );
        assert_eq!(response.body.unwrap().text().await.unwrap(), "hi");
    }
}
