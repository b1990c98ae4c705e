//! Error taxonomy for route registration and matching.
//!
//! Registration errors (`InvalidPattern`, `DuplicateRoute`) indicate a
//! programming mistake and are surfaced synchronously to the caller of
//! `register` — they are never retried or recovered internally and should
//! halt application startup. A missing route at request time is *not* an
//! error: `match_route` models it as `Ok(None)`. The only request-time error
//! is `MalformedRequestPath`, which points at a bug in the transport layer
//! rather than a normal 404.

use http::Method;
use std::fmt;

/// Why a path pattern was rejected at registration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidPatternReason {
    /// The pattern string was empty.
    EmptyPattern,
    /// The pattern does not start with `/`.
    MissingLeadingSlash,
    /// A `*` segment appeared anywhere but the final position.
    WildcardNotLast,
    /// A `:` segment with no name after the colon.
    EmptyParamName,
    /// A different parameter name is already bound at this position under
    /// the same parent (ambiguous routing).
    ParamNameConflict {
        /// Zero-based segment depth of the conflict.
        depth: usize,
        /// Parameter name already registered at this position.
        existing: String,
        /// Parameter name the new pattern tried to bind.
        conflicting: String,
    },
}

impl fmt::Display for InvalidPatternReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidPatternReason::EmptyPattern => write!(f, "pattern is empty"),
            InvalidPatternReason::MissingLeadingSlash => {
                write!(f, "pattern must start with '/'")
            }
            InvalidPatternReason::WildcardNotLast => {
                write!(f, "wildcard '*' must be the final segment")
            }
            InvalidPatternReason::EmptyParamName => {
                write!(f, "parameter segment ':' must declare a name")
            }
            InvalidPatternReason::ParamNameConflict {
                depth,
                existing,
                conflicting,
            } => {
                write!(
                    f,
                    "parameter name ':{conflicting}' at segment {depth} conflicts with \
                    already-registered ':{existing}' at the same position"
                )
            }
        }
    }
}

/// Errors produced by [`Router`](crate::Router) registration and matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// Malformed pattern at registration time (misplaced wildcard, empty
    /// pattern, ambiguous parameter naming at a shared depth).
    InvalidPattern {
        /// The offending pattern as passed to `register`.
        pattern: String,
        /// What exactly was wrong with it.
        reason: InvalidPatternReason,
    },
    /// Exact re-registration of an identical `(method, pattern)` pair.
    ///
    /// This is an explicit error, never a silent overwrite: ambiguity here
    /// is a programmer error that must surface at startup, not at request
    /// time.
    DuplicateRoute {
        /// HTTP method of the duplicate registration.
        method: Method,
        /// The pattern that was registered twice.
        pattern: String,
    },
    /// `match_route` was called with a path that does not start with `/`.
    ///
    /// This indicates a bug in the transport layer, not a normal 404, so it
    /// is loud rather than silently returning no match.
    MalformedRequestPath {
        /// The path as received.
        path: String,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::InvalidPattern { pattern, reason } => {
                write!(f, "invalid route pattern '{pattern}': {reason}")
            }
            RouterError::DuplicateRoute { method, pattern } => {
                write!(f, "duplicate route registration for {method} {pattern}")
            }
            RouterError::MalformedRequestPath { path } => {
                write!(
                    f,
                    "malformed request path '{path}': expected a path starting with '/'"
                )
            }
        }
    }
}

impl std::error::Error for RouterError {}

impl RouterError {
    pub(crate) fn invalid(pattern: &str, reason: InvalidPatternReason) -> Self {
        RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        }
    }
}
