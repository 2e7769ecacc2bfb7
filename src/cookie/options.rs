//! Cookie attributes.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::cookie::{Cookie, CookieError};

/// `SameSite` policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SameSite {
    type Err = CookieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Strict" => Ok(SameSite::Strict),
            "Lax" => Ok(SameSite::Lax),
            "None" => Ok(SameSite::None),
            _ => Err(CookieError::InvalidSameSite(s.to_string())),
        }
    }
}

/// One attribute setting, applied to a cookie under construction.
///
/// Each option touches a single attribute; when the same attribute is set
/// twice the later option wins. Built only through the functions in this
/// module, so `domain`/`path` values are never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOption(Attribute);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Attribute {
    HttpOnly,
    Secure,
    MaxAge(Duration),
    Expires(DateTime<Utc>),
    Domain(String),
    Path(String),
    SameSite(SameSite),
}

impl CookieOption {
    pub(crate) fn apply(self, cookie: &mut Cookie) {
        match self.0 {
            Attribute::HttpOnly => cookie.http_only = true,
            Attribute::Secure => cookie.secure = true,
            Attribute::MaxAge(age) => cookie.max_age = Some(age),
            Attribute::Expires(at) => cookie.expires = Some(at),
            Attribute::Domain(domain) => cookie.domain = Some(domain),
            Attribute::Path(path) => cookie.path = Some(path),
            Attribute::SameSite(policy) => cookie.same_site = Some(policy),
        }
    }
}

/// Hide the cookie from scripts.
pub fn http_only() -> CookieOption {
    CookieOption(Attribute::HttpOnly)
}

/// Send the cookie over secure channels only.
pub fn secure() -> CookieOption {
    CookieOption(Attribute::Secure)
}

/// Lifetime in whole seconds; sub-second precision is dropped.
pub fn max_age(age: Duration) -> CookieOption {
    CookieOption(Attribute::MaxAge(age))
}

pub fn expires(at: DateTime<Utc>) -> CookieOption {
    CookieOption(Attribute::Expires(at))
}

/// Fails on an empty domain.
pub fn domain(value: &str) -> Result<CookieOption, CookieError> {
    if value.is_empty() {
        return Err(CookieError::EmptyDomain);
    }
    Ok(CookieOption(Attribute::Domain(value.to_string())))
}

/// Fails on an empty path.
pub fn path(value: &str) -> Result<CookieOption, CookieError> {
    if value.is_empty() {
        return Err(CookieError::EmptyPath);
    }
    Ok(CookieOption(Attribute::Path(value.to_string())))
}

pub fn same_site(policy: SameSite) -> CookieOption {
    CookieOption(Attribute::SameSite(policy))
}
