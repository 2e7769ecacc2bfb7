//! `Set-Cookie` formatting.
//!
//! # Responsibilities
//! - Collect cookie attributes from a list of options
//! - Serialize them in a fixed order
//! - Append the result to a response as a `Set-Cookie` header
//!
//! # Design Decisions
//! - Attribute order is fixed: `name=value`, `HttpOnly`, `Secure`, `Expires`,
//!   `Max-Age`, `Domain`, `Path`, `SameSite`
//! - Empty domain/path values are rejected when the option is created;
//!   options and cookie fields are opaque, so no other route sets them
//! - Name and value are written verbatim
//!
//! ```
//! use std::time::Duration;
//! use torii::cookie;
//! use torii::http::Response;
//!
//! let response = cookie::set(
//!     Response::ok(),
//!     "id",
//!     "42",
//!     [cookie::secure(), cookie::max_age(Duration::from_secs(3600)), cookie::path("/")?],
//! );
//! assert_eq!(response.head.values("Set-Cookie"), vec!["id=42; Secure; Max-Age=3600; Path=/"]);
//! # Ok::<(), cookie::CookieError>(())
//! ```

mod options;

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::http::Response;

pub use options::{
    domain, expires, http_only, max_age, path, same_site, secure, CookieOption, SameSite,
};

/// Header key the formatter writes.
pub const SET_COOKIE: &str = "Set-Cookie";

/// Invalid cookie attribute. Treat as a configuration fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CookieError {
    #[error("empty domain value")]
    EmptyDomain,

    #[error("empty path value")]
    EmptyPath,

    #[error("invalid same-site policy: {0:?}")]
    InvalidSameSite(String),
}

/// A cookie being serialized into one header value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cookie {
    name: String,
    value: String,
    http_only: bool,
    secure: bool,
    expires: Option<DateTime<Utc>>,
    max_age: Option<Duration>,
    domain: Option<String>,
    path: Option<String>,
    same_site: Option<SameSite>,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Apply options in order.
    pub fn with_options(mut self, options: impl IntoIterator<Item = CookieOption>) -> Self {
        for option in options {
            option.apply(&mut self);
        }
        self
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)?;
        if self.http_only {
            f.write_str("; HttpOnly")?;
        }
        if self.secure {
            f.write_str("; Secure")?;
        }
        if let Some(expires) = self.expires {
            write!(f, "; Expires={}", expires.format("%a, %d %b %Y %H:%M:%S GMT"))?;
        }
        if let Some(max_age) = self.max_age {
            write!(f, "; Max-Age={}", max_age.as_secs())?;
        }
        if let Some(domain) = &self.domain {
            write!(f, "; Domain={domain}")?;
        }
        if let Some(path) = &self.path {
            write!(f, "; Path={path}")?;
        }
        if let Some(same_site) = self.same_site {
            write!(f, "; SameSite={same_site}")?;
        }
        Ok(())
    }
}

/// Return `response` with a `Set-Cookie` header appended.
///
/// Status and body are carried over; the head gains exactly one header.
pub fn set(
    response: Response,
    name: &str,
    value: &str,
    options: impl IntoIterator<Item = CookieOption>,
) -> Response {
    let cookie = Cookie::new(name, value).with_options(options);
    response.with_header(SET_COOKIE, cookie.to_string())
}
