//! Route compilation.
//!
//! Compilation runs once per `register` call: it classifies the pattern,
//! builds or locates the trie nodes for it, binds the handler and middleware
//! list, and — for fully static patterns — inserts the same compiled route
//! into the static index. All adaptation cost is paid here, never on the
//! match path.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use http::Method;
use tracing::debug;

use crate::error::RouterError;
use crate::segment::{parse_pattern, Segment, WILDCARD_PARAM};

use super::static_index::StaticIndex;
use super::trie::Trie;

/// The immutable, registration-time-produced record bound to a trie node
/// and, for static patterns, to a static index entry. Both point at the
/// same `Arc`, never a copy.
///
/// `H` is the host framework's handler payload; the router stores and
/// returns it without ever inspecting or invoking it.
pub struct CompiledRoute<H> {
    /// HTTP method this route answers.
    pub method: Method,
    /// The pattern exactly as registered, for diagnostics.
    pub pattern: String,
    /// Parameter names in declaration order, zipped with extracted values
    /// at match time. The wildcard captures under [`WILDCARD_PARAM`].
    pub param_names: Vec<Arc<str>>,
    /// Middleware to run before the handler, in registration order. The
    /// dispatch layer invokes these; the router only resolves them.
    pub middleware: Vec<Arc<H>>,
    /// The handler bound to this route.
    pub handler: Arc<H>,
    /// True when the pattern contains no parameters and no wildcard.
    pub is_static: bool,
    /// When this route was registered.
    pub registered_at: Instant,
}

impl<H> fmt::Debug for CompiledRoute<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledRoute")
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("param_names", &self.param_names)
            .field("middleware_count", &self.middleware.len())
            .field("is_static", &self.is_static)
            .finish()
    }
}

/// Compile one registration into a [`CompiledRoute`] and wire it into the
/// trie and, when static, the index.
///
/// Fails with [`RouterError::InvalidPattern`] for malformed patterns and
/// [`RouterError::DuplicateRoute`] for an exact `(method, pattern)`
/// re-registration.
pub(crate) fn compile<H>(
    trie: &mut Trie<H>,
    index: &mut StaticIndex<H>,
    method: Method,
    pattern: &str,
    middleware: Vec<Arc<H>>,
    handler: Arc<H>,
    strict_trailing_slash: bool,
) -> Result<Arc<CompiledRoute<H>>, RouterError> {
    let segments = parse_pattern(pattern, strict_trailing_slash)?;

    let param_names: Vec<Arc<str>> = segments
        .iter()
        .filter_map(|segment| match segment {
            Segment::Param(name) => Some(Arc::from(name.as_str())),
            Segment::Wildcard => Some(Arc::from(WILDCARD_PARAM)),
            Segment::Literal(_) => None,
        })
        .collect();
    let is_static = param_names.is_empty();

    let route = Arc::new(CompiledRoute {
        method: method.clone(),
        pattern: pattern.to_string(),
        param_names,
        middleware,
        handler,
        is_static,
        registered_at: Instant::now(),
    });

    trie.insert(method.clone(), &segments, Arc::clone(&route))?;

    if is_static {
        let key = static_key(&segments);
        index.insert(method, key, Arc::clone(&route));
    }

    debug!(
        method = %route.method,
        pattern = %route.pattern,
        is_static = route.is_static,
        params = route.param_names.len(),
        "route compiled"
    );

    Ok(route)
}

/// Normalized full-path key for the static index, built from decoded
/// literal segments. Strict-mode trailing slashes survive as a trailing
/// empty literal, so `/users/` keys differently from `/users`.
fn static_key(segments: &[Segment]) -> String {
    let mut key = String::new();
    for segment in segments {
        if let Segment::Literal(literal) = segment {
            key.push('/');
            key.push_str(literal);
        }
    }
    if key.is_empty() {
        key.push('/');
    }
    key
}
