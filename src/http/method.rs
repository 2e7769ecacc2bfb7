//! HTTP request methods.
//!
//! # Design Decisions
//! - Closed set: only the standard verbs are representable
//! - Parsing is an exact, case-sensitive match (`"get"` is not `GET`)

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Standard HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    Connect,
    Delete,
    Head,
    Get,
    Post,
    Put,
    Patch,
    Options,
    Trace,
}

/// Returned when a method token is outside [`Method`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported HTTP method: {0}")]
pub struct UnsupportedMethod(pub String);

impl Method {
    /// Every supported method, in declaration order.
    pub const ALL: [Method; 9] = [
        Method::Connect,
        Method::Delete,
        Method::Head,
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Options,
        Method::Trace,
    ];

    /// The wire token of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Connect => "CONNECT",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnsupportedMethod(s.to_string()))
    }
}

impl TryFrom<&axum::http::Method> for Method {
    type Error = UnsupportedMethod;

    fn try_from(method: &axum::http::Method) -> Result<Self, Self::Error> {
        method.as_str().parse()
    }
}

impl From<Method> for axum::http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Connect => axum::http::Method::CONNECT,
            Method::Delete => axum::http::Method::DELETE,
            Method::Head => axum::http::Method::HEAD,
            Method::Get => axum::http::Method::GET,
            Method::Post => axum::http::Method::POST,
            Method::Put => axum::http::Method::PUT,
            Method::Patch => axum::http::Method::PATCH,
            Method::Options => axum::http::Method::OPTIONS,
            Method::Trace => axum::http::Method::TRACE,
        }
    }
}
