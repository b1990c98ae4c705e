//! O(1) fast path for fully static routes.
//!
//! Most routes in real applications are static (health checks, fixed
//! resource collections); paying trie-traversal cost for them is wasted
//! work. The index maps `(method, normalized full path)` straight to the
//! compiled route and is probed before the trie on every match. It holds
//! the same `Arc<CompiledRoute>` the trie terminal holds, never a copy.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;

use super::compile::CompiledRoute;

pub(crate) struct StaticIndex<H> {
    entries: HashMap<Method, HashMap<String, Arc<CompiledRoute<H>>>>,
}

impl<H> StaticIndex<H> {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Duplicate keys cannot occur here: the trie rejects an exact
    /// `(method, pattern)` re-registration before the index is touched.
    pub(crate) fn insert(&mut self, method: Method, path: String, route: Arc<CompiledRoute<H>>) {
        self.entries.entry(method).or_default().insert(path, route);
    }

    pub(crate) fn get(&self, method: &Method, path: &str) -> Option<Arc<CompiledRoute<H>>> {
        self.entries.get(method)?.get(path).map(Arc::clone)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }
}
