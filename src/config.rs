//! Router configuration.
//!
//! Configuration is programmatic with environment-variable overrides so a
//! deployed service can be tuned without a rebuild:
//!
//! - `ROUTECORE_STRICT_TRAILING_SLASH` — `1`/`true`/`on` makes `/users/` a
//!   distinct route from `/users` (default: off, trailing slashes stripped).
//! - `ROUTECORE_CACHE` — `off`/`0`/`false` disables the match cache.
//! - `ROUTECORE_CACHE_CAPACITY` — match cache entry bound, decimal or `0x`
//!   hex (default: 4096).

use std::env;

/// Default match cache bound. Sized for "a few thousand distinct hot paths";
/// tune per deployment via `ROUTECORE_CACHE_CAPACITY`.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Behavioral knobs for a [`Router`](crate::Router) instance.
///
/// Captured at construction time and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Treat a trailing slash as a distinct route instead of stripping it.
    pub strict_trailing_slash: bool,
    /// Whether match results are cached at all.
    pub cache_enabled: bool,
    /// LRU bound on cached match results.
    pub cache_capacity: usize,
    /// Whether the O(1) static route index is probed before the trie.
    ///
    /// On by default; disabling it forces every lookup through the trie,
    /// which must produce identical results (useful for equivalence
    /// testing and for bisecting routing bugs).
    pub static_index_enabled: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            strict_trailing_slash: false,
            cache_enabled: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            static_index_enabled: true,
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = env::var("ROUTECORE_STRICT_TRAILING_SLASH") {
            config.strict_trailing_slash = parse_switch(&val);
        }
        if let Ok(val) = env::var("ROUTECORE_CACHE") {
            config.cache_enabled = parse_switch(&val);
        }
        if let Ok(val) = env::var("ROUTECORE_CACHE_CAPACITY") {
            if let Some(capacity) = parse_size(&val) {
                config.cache_capacity = capacity;
            }
        }

        config
    }
}

fn parse_switch(val: &str) -> bool {
    matches!(
        val.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

fn parse_size(val: &str) -> Option<usize> {
    let val = val.trim();
    if let Some(hex) = val.strip_prefix("0x") {
        usize::from_str_radix(hex, 16).ok()
    } else {
        val.parse().ok()
    }
}
