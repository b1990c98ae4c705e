//! # routecore
//!
//! **routecore** is an HTTP request routing engine: it maps an incoming
//! `(method, path)` pair to a registered handler, extracts path parameters,
//! and resolves the ordered middleware chain that must run before the
//! handler. It is a library-level component with no network surface of its
//! own — the transport layer hands it a normalized request descriptor, and
//! the dispatch layer receives back *what* to run, never runs anything here.
//!
//! ## Architecture
//!
//! - **[`segment`]** — pure path splitting and `:param` / `*` pattern parsing
//! - **[`router`]** — the trie, static index, match cache and [`Router`] facade
//! - **[`config`]** — programmatic + environment-variable configuration
//! - **[`error`]** — the registration/matching error taxonomy
//!
//! Registration flows segmenter → compiler → (static index | trie). At
//! request time the facade probes a bounded LRU match cache, then the O(1)
//! static index, then falls back to precedence-ordered trie traversal, and
//! finally stores the result back in the cache.
//!
//! ## Pattern syntax
//!
//! Literal segments match by exact string equality; a segment beginning
//! with `:` declares a named parameter (`/users/:id`); a lone terminal `*`
//! declares a catch-all wildcard capturing the remainder of the path,
//! slashes included (`/static/*`). Precedence at every depth is
//! **literal > parameter > wildcard**, which is what lets `/users/new` and
//! `/users/:id` coexist unambiguously.
//!
//! ## Quick start
//!
//! ```rust
//! use http::Method;
//! use routecore::Router;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), routecore::RouterError> {
//! // `H` is whatever your dispatch layer runs; the router never calls it.
//! let mut router: Router<&str> = Router::new();
//! router.get("/users", vec![], Arc::new("list_users"))?;
//! router.get("/users/:id", vec![Arc::new("auth")], Arc::new("get_user"))?;
//! router.get("/static/*", vec![], Arc::new("serve_static"))?;
//!
//! let m = router.match_route(Method::GET, "/users/7")?.unwrap();
//! assert_eq!(m.get_param("id"), Some("7"));
//!
//! // A miss is a value, not an error.
//! assert!(router.match_route(Method::POST, "/users/7")?.is_none());
//! # Ok(())
//! # }
//! ```
//!
//! ## Lifecycle and concurrency
//!
//! A router moves implicitly from **Building** to **Serving** on its first
//! `match_route` call; the expected usage is "register everything during
//! startup, then only match". `match_route` is a synchronous, CPU-bound
//! call that never performs I/O. It takes `&self` and is safe under
//! concurrent readers; `register` takes `&mut self`. Hosts that fan out
//! across threads or processes should populate one router instance per
//! worker rather than sharing mutable state.

pub mod config;
pub mod error;
pub mod router;
pub mod segment;

pub use config::RouterConfig;
pub use error::{InvalidPatternReason, RouterError};
pub use router::{
    CacheStats, CompiledRoute, ParamVec, Phase, RouteMatch, Router, MAX_INLINE_PARAMS,
};
pub use segment::{Segment, WILDCARD_PARAM};
