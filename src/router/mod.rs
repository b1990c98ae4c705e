//! # Router Module
//!
//! Path matching and route resolution: the subsystem that maps an incoming
//! `(method, path)` pair to a registered handler, extracts path parameters,
//! and resolves the ordered middleware chain to run before it.
//!
//! ## Architecture
//!
//! Registration flows segmenter → compiler → (static index | trie); the
//! compiler runs once per `register` call and pays all adaptation cost up
//! front. Request-time flow is facade → match cache → static index → trie →
//! cache store → caller.
//!
//! - `trie` — per-method tree with literal > param > wildcard precedence
//! - `static_index` — O(1) fast path for routes with no captures
//! - `cache` — bounded LRU of resolved matches, generation-invalidated
//! - `compile` — pattern classification and [`CompiledRoute`] production
//! - `core` — the [`Router`] facade composing the above
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use routecore::Router;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), routecore::RouterError> {
//! let mut router: Router<&str> = Router::new();
//! router.get("/users/:id", vec![], Arc::new("get_user"))?;
//!
//! if let Some(m) = router.match_route(Method::GET, "/users/123")? {
//!     assert_eq!(**m.handler(), "get_user");
//!     assert_eq!(m.get_param("id"), Some("123"));
//! }
//! # Ok(())
//! # }
//! ```

mod cache;
mod compile;
mod core;
mod static_index;
mod trie;

pub use cache::CacheStats;
pub use compile::CompiledRoute;
pub use core::{ParamVec, Phase, RouteMatch, Router, MAX_INLINE_PARAMS};
