//! Path segmentation and pattern parsing.
//!
//! Splitting a request path and parsing a registration pattern are the two
//! entry points of the routing engine. Both are pure functions.
//!
//! Percent-decoding is split across the two phases on purpose: literal
//! segments are decoded once at registration time (requests must arrive in
//! decoded form to match), while *matched parameter values* are decoded at
//! lookup time, after the path has been split. That ordering guarantees a
//! `%2F` inside a parameter value is never mistaken for a path separator.

use std::borrow::Cow;

use crate::error::{InvalidPatternReason, RouterError};

/// One token of a registered path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matched by exact string equality.
    Literal(String),
    /// `:name` — matches any single segment, bound to a named capture.
    Param(String),
    /// A lone terminal `*` — captures the remainder of the path, slashes
    /// included.
    Wildcard,
}

/// Capture name used for the `*` wildcard segment.
pub const WILDCARD_PARAM: &str = "*";

/// Split a request path into segments.
///
/// Empty tokens produced by doubled or trailing slashes are dropped, except
/// that in strict-trailing-slash mode a trailing slash is preserved as a
/// final empty segment so that `/users/` routes distinctly from `/users`.
/// The root path `/` always yields zero segments.
#[must_use]
pub fn split_path(path: &str, strict_trailing_slash: bool) -> Vec<&str> {
    let trailing = strict_trailing_slash && path.len() > 1 && path.ends_with('/');
    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if trailing {
        segments.push("");
    }
    segments
}

/// Parse a registration pattern into an ordered list of [`Segment`]s.
///
/// Syntax: literal segments are arbitrary non-`/` characters; a segment
/// beginning with `:` declares a named parameter; a lone `*` as the final
/// segment declares a catch-all wildcard. At most one wildcard is allowed
/// and it must be last. Literal segments are percent-decoded here so they
/// match the decoded form of incoming paths.
pub fn parse_pattern(
    pattern: &str,
    strict_trailing_slash: bool,
) -> Result<Vec<Segment>, RouterError> {
    if pattern.is_empty() {
        return Err(RouterError::invalid(
            pattern,
            InvalidPatternReason::EmptyPattern,
        ));
    }
    if !pattern.starts_with('/') {
        return Err(RouterError::invalid(
            pattern,
            InvalidPatternReason::MissingLeadingSlash,
        ));
    }

    let tokens = split_path(pattern, strict_trailing_slash);
    let mut segments = Vec::with_capacity(tokens.len());

    for (idx, token) in tokens.iter().enumerate() {
        let segment = if *token == "*" {
            if idx + 1 != tokens.len() {
                return Err(RouterError::invalid(
                    pattern,
                    InvalidPatternReason::WildcardNotLast,
                ));
            }
            Segment::Wildcard
        } else if let Some(name) = token.strip_prefix(':') {
            if name.is_empty() {
                return Err(RouterError::invalid(
                    pattern,
                    InvalidPatternReason::EmptyParamName,
                ));
            }
            Segment::Param(name.to_string())
        } else {
            Segment::Literal(decode_value(token))
        };
        segments.push(segment);
    }

    Ok(segments)
}

/// Percent-decode one matched value.
///
/// Invalid UTF-8 in the decoded bytes falls back to the raw, undecoded text
/// rather than failing the match.
#[must_use]
pub(crate) fn decode_value(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(Cow::Borrowed(_)) => raw.to_string(),
        Ok(Cow::Owned(decoded)) => decoded,
        Err(_) => raw.to_string(),
    }
}
