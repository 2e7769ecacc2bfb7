//! Route registrations.
//!
//! # Responsibilities
//! - Validate segment names when a route is declared
//! - Capture (segment, method, gate) for a Fork to consume
//!
//! # Design Decisions
//! - Invalid names are configuration faults: they are reported while the
//!   routing table is built, never while serving a request
//! - The stored segment has its leading `/` removed

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::gate::{Gate, SharedGate};
use crate::http::Method;

/// Errors raised while building a routing table.
///
/// These describe wiring mistakes; callers are expected to abort startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("endpoint name cannot be empty")]
    EmptyName,

    #[error("endpoint name {0:?} must not contain new-line characters")]
    NewLine(String),

    #[error("endpoint name {0:?} must not contain carriage-return characters")]
    CarriageReturn(String),

    #[error("endpoint name {0:?} must not contain whitespace characters")]
    Whitespace(String),

    #[error("endpoint name {0:?} must start with a slash")]
    MissingLeadingSlash(String),

    #[error("endpoint name {0:?} must not contain slashes except the leading one")]
    NestedSlash(String),

    #[error("{method} /{segment} already exists")]
    DuplicateRoute { method: Method, segment: String },
}

/// A validated route: one path segment, one method, one gate.
#[derive(Clone)]
pub struct Endpoint {
    segment: String,
    method: Method,
    gate: SharedGate,
}

impl Endpoint {
    /// Declare a route for `name` (e.g. `"/users"`).
    ///
    /// The name must start with a slash and must not contain new-lines,
    /// carriage-returns, whitespace, or further slashes.
    pub fn new(method: Method, name: &str, gate: impl Gate + 'static) -> Result<Self, RouteError> {
        Self::shared(method, name, Arc::new(gate))
    }

    /// Same as [`Endpoint::new`] for an already shared gate.
    pub fn shared(method: Method, name: &str, gate: SharedGate) -> Result<Self, RouteError> {
        let segment = validate_name(name)?;
        Ok(Self {
            segment: segment.to_string(),
            method,
            gate,
        })
    }

    /// Segment this endpoint answers for, without the leading slash.
    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub(crate) fn into_parts(self) -> (String, Method, SharedGate) {
        (self.segment, self.method, self.gate)
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("segment", &self.segment)
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

/// Check `name` and return it without its leading slash.
fn validate_name(name: &str) -> Result<&str, RouteError> {
    if name.is_empty() {
        return Err(RouteError::EmptyName);
    }
    if name.contains('\n') {
        return Err(RouteError::NewLine(name.to_string()));
    }
    if name.contains('\r') {
        return Err(RouteError::CarriageReturn(name.to_string()));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(RouteError::Whitespace(name.to_string()));
    }
    let Some(segment) = name.strip_prefix('/') else {
        return Err(RouteError::MissingLeadingSlash(name.to_string()));
    };
    if segment.contains('/') {
        return Err(RouteError::NestedSlash(name.to_string()));
    }
    Ok(segment)
}
