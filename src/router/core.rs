//! Router facade - hot path for request matching.
//!
//! The following clippy lints are denied here to keep stray allocations and
//! panics out of the match path:

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use http::Method;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::config::RouterConfig;
use crate::error::RouterError;
use crate::segment::split_path;

use super::cache::{CacheStats, MatchCache};
use super::compile::{compile, CompiledRoute};
use super::static_index::StaticIndex;
use super::trie::Trie;

/// Maximum number of path parameters before heap allocation.
/// Most REST APIs declare ≤4 path params (e.g., `/users/:id/posts/:postId`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the match hot path.
///
/// Param names are `Arc<str>` because they come from the static route tree
/// (known at registration); cloning one is an O(1) refcount bump. Values
/// remain `String` — they are per-request data from the URL. Insertion
/// order equals declaration order.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Operational phase of a [`Router`].
///
/// The transition is implicit: the first `match_route` call moves the
/// router from `Building` to `Serving`. Registrations remain technically
/// possible while `Serving` but are discouraged; the expected usage is
/// "register everything during startup, then only match".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Registrations expected; the match cache is bypassed.
    Building,
    /// Matching traffic; the match cache is active.
    Serving,
}

/// Result of successfully matching a request path to a route.
///
/// Request-scoped: created per request, owned by the caller, discarded when
/// the request completes. The router never retains one.
pub struct RouteMatch<H> {
    /// The matched compiled route (shared, never copied).
    pub route: Arc<CompiledRoute<H>>,
    /// Extracted path parameters, insertion order = declaration order.
    pub params: ParamVec,
    /// Whether this result was served from the match cache.
    pub from_cache: bool,
}

impl<H> RouteMatch<H> {
    /// Get an extracted parameter by name.
    ///
    /// Uses "last write wins" semantics for duplicate names at different
    /// depths: the deepest occurrence is returned.
    #[inline]
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert params to a `HashMap` for compatibility with map-shaped
    /// consumers. This allocates - use [`Self::get_param`] in hot paths.
    #[must_use]
    pub fn params_map(&self) -> HashMap<String, String> {
        self.params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// The handler bound to the matched route.
    #[must_use]
    pub fn handler(&self) -> &Arc<H> {
        &self.route.handler
    }

    /// The ordered middleware chain that must run before the handler. The
    /// dispatch layer invokes these; the router only resolves them.
    #[must_use]
    pub fn middleware(&self) -> &[Arc<H>] {
        &self.route.middleware
    }
}

impl<H> Clone for RouteMatch<H> {
    fn clone(&self) -> Self {
        Self {
            route: Arc::clone(&self.route),
            params: self.params.clone(),
            from_cache: self.from_cache,
        }
    }
}

impl<H> fmt::Debug for RouteMatch<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("route", &self.route)
            .field("params", &self.params)
            .field("from_cache", &self.from_cache)
            .finish()
    }
}

/// Request routing engine: maps `(method, path)` to a registered handler,
/// extracts path parameters, and resolves the middleware chain to run.
///
/// `H` is the host framework's handler payload (typically an adapter
/// closure or tagged variant decided once at registration), stored behind
/// `Arc` and returned untouched - the router never invokes it.
///
/// Not an ambient singleton: construct one, populate it at startup, and
/// pass it by reference to the dispatch layer. For multi-threaded or
/// multi-process hosts, give each worker its own identically populated
/// instance; `match_route` takes `&self` and is safe for concurrent reads,
/// but `register` requires `&mut self`.
pub struct Router<H> {
    config: RouterConfig,
    trie: Trie<H>,
    static_index: StaticIndex<H>,
    cache: Mutex<MatchCache<H>>,
    /// Bumped on every registration; cache entries from older generations
    /// are treated as absent.
    generation: AtomicU64,
    serving: AtomicBool,
    /// Registration-ordered list of all compiled routes, for introspection.
    routes: Vec<Arc<CompiledRoute<H>>>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    /// Create an empty router with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Create an empty router with the given configuration.
    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        let cache = MatchCache::new(config.cache_capacity);
        Self {
            config,
            trie: Trie::new(),
            static_index: StaticIndex::new(),
            cache: Mutex::new(cache),
            generation: AtomicU64::new(0),
            serving: AtomicBool::new(false),
            routes: Vec::new(),
        }
    }

    /// Register a route: compile the pattern, wire it into the trie (and
    /// the static index when it has no captures), and bind the middleware
    /// chain and handler.
    ///
    /// Fails loudly for malformed patterns and exact duplicates; such
    /// errors indicate a programming mistake and should halt startup.
    pub fn register(
        &mut self,
        method: Method,
        pattern: &str,
        middleware: Vec<Arc<H>>,
        handler: Arc<H>,
    ) -> Result<(), RouterError> {
        let route = compile(
            &mut self.trie,
            &mut self.static_index,
            method,
            pattern,
            middleware,
            handler,
            self.config.strict_trailing_slash,
        )?;
        self.routes.push(Arc::clone(&route));

        // Flip the generation so previously cached matches (including ones
        // a new higher-precedence route would now shadow) turn stale.
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;

        info!(
            method = %route.method,
            pattern = %route.pattern,
            is_static = route.is_static,
            middleware_count = route.middleware.len(),
            generation,
            "route registered"
        );
        Ok(())
    }

    /// Match a request to a registered route.
    ///
    /// `Ok(None)` is the normal not-found outcome - frequent, expected, and
    /// free of error-handling overhead. `Err` is reserved for a request
    /// path that does not start with `/`, which is a transport-layer bug.
    ///
    /// Flow: match cache → static index → trie → cache store.
    pub fn match_route(
        &self,
        method: Method,
        path: &str,
    ) -> Result<Option<RouteMatch<H>>, RouterError> {
        let path = if path.is_empty() { "/" } else { path };
        if !path.starts_with('/') {
            return Err(RouterError::MalformedRequestPath {
                path: path.to_string(),
            });
        }

        // Implicit Building -> Serving transition on first match.
        self.serving.store(true, Ordering::Relaxed);
        let generation = self.generation.load(Ordering::Relaxed);

        debug!(method = %method, path = %path, "route match attempt");
        let match_start = Instant::now();

        let cache_key = format!("{method} {path}");
        if self.config.cache_enabled {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some((route, params)) = cache.get(&cache_key, generation) {
                debug!(
                    method = %method,
                    path = %path,
                    route_pattern = %route.pattern,
                    "route match served from cache"
                );
                return Ok(Some(RouteMatch {
                    route,
                    params,
                    from_cache: true,
                }));
            }
        }

        let resolved = self
            .lookup_static(&method, path)
            .map(|route| (route, ParamVec::new()))
            .or_else(|| {
                let segments = split_path(path, self.config.strict_trailing_slash);
                self.trie.lookup(&method, &segments)
            });

        let match_duration = match_start.elapsed();

        let Some((route, params)) = resolved else {
            warn!(
                method = %method,
                path = %path,
                duration_us = match_duration.as_micros(),
                "no route matched"
            );
            return Ok(None);
        };

        if match_duration > std::time::Duration::from_millis(1) {
            warn!(
                method = %method,
                path = %path,
                route_pattern = %route.pattern,
                duration_us = match_duration.as_micros(),
                "slow route matching detected"
            );
        } else {
            info!(
                method = %method,
                path = %path,
                route_pattern = %route.pattern,
                path_params = ?params,
                duration_us = match_duration.as_micros(),
                "route matched"
            );
        }

        if self.config.cache_enabled {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            cache.put(cache_key, Arc::clone(&route), params.clone(), generation);
        }

        Ok(Some(RouteMatch {
            route,
            params,
            from_cache: false,
        }))
    }

    fn lookup_static(&self, method: &Method, path: &str) -> Option<Arc<CompiledRoute<H>>> {
        if !self.config.static_index_enabled {
            return None;
        }
        let normalized = normalize_path(path, self.config.strict_trailing_slash);
        self.static_index.get(method, &normalized)
    }

    /// Number of routes registered for `method`.
    #[must_use]
    pub fn routes_for_method(&self, method: &Method) -> usize {
        self.routes.iter().filter(|r| r.method == *method).count()
    }

    /// All registered patterns in registration order, e.g. for metrics
    /// pre-registration or route table dumps.
    #[must_use]
    pub fn path_patterns(&self) -> Vec<String> {
        self.routes.iter().map(|r| r.pattern.clone()).collect()
    }

    /// Print all registered routes to stdout. Useful for verifying that
    /// routes are loaded correctly.
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.routes.len());
        for route in &self.routes {
            println!(
                "[route] {} {} static={} middleware={}",
                route.method,
                route.pattern,
                route.is_static,
                route.middleware.len()
            );
        }
    }

    /// Current operational phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.serving.load(Ordering::Relaxed) {
            Phase::Serving
        } else {
            Phase::Building
        }
    }

    /// Current registration generation (bumped on every `register`).
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Relaxed)
    }

    /// Hit/miss counters and occupancy of the match cache.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .stats()
    }
}

macro_rules! verb_helpers {
    ($(($fn_name:ident, $method:expr)),+ $(,)?) => {
        impl<H> Router<H> {
            $(
                #[doc = concat!("Register a route for `", stringify!($fn_name), "` requests; see [`Router::register`].")]
                pub fn $fn_name(
                    &mut self,
                    pattern: &str,
                    middleware: Vec<Arc<H>>,
                    handler: Arc<H>,
                ) -> Result<(), RouterError> {
                    self.register($method, pattern, middleware, handler)
                }
            )+
        }
    };
}

verb_helpers!(
    (get, Method::GET),
    (post, Method::POST),
    (put, Method::PUT),
    (delete, Method::DELETE),
    (patch, Method::PATCH),
    (head, Method::HEAD),
    (options, Method::OPTIONS),
);

/// Normalized request path used as the static index probe key: trailing
/// slashes stripped unless strict mode keeps them significant.
fn normalize_path(path: &str, strict_trailing_slash: bool) -> Cow<'_, str> {
    if strict_trailing_slash {
        return Cow::Borrowed(path);
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Borrowed(trimmed)
    }
}
