//! Per-method route trie.
//!
//! One tree per HTTP method, created lazily on the first registration for
//! that method. Each node keys its children by segment kind: exact-match
//! literals in a map, at most one parameter child, at most one wildcard
//! child. Nodes are created during registration and never deleted
//! (de-registration is out of scope); after startup the structure is
//! effectively read-only.
//!
//! Lookup is precedence-ordered — **literal > named parameter > wildcard**.
//! A literal child matching the current segment is descended into
//! exclusively; there is no backtracking out of a literal subtree. The only
//! backtracking point is the param/wildcard boundary: if the parameter
//! subtree fails, the wildcard child is tried. A wildcard binds all
//! remaining segments joined by `/` and always terminates traversal.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;

use crate::error::{InvalidPatternReason, RouterError};
use crate::segment::{decode_value, Segment, WILDCARD_PARAM};

use super::compile::CompiledRoute;
use super::core::ParamVec;

struct TrieNode<H> {
    /// Exact-match children keyed by decoded literal segment.
    children: HashMap<String, TrieNode<H>>,
    /// At most one parameter child per node; a second registration with a
    /// different name at the same position is rejected at compile time.
    param_child: Option<Box<TrieNode<H>>>,
    wildcard_child: Option<Box<TrieNode<H>>>,
    /// Capture name, set on param/wildcard target nodes.
    param_name: Option<Arc<str>>,
    /// Present only on nodes that terminate a registered path.
    route: Option<Arc<CompiledRoute<H>>>,
}

impl<H> TrieNode<H> {
    fn new() -> Self {
        Self {
            children: HashMap::new(),
            param_child: None,
            wildcard_child: None,
            param_name: None,
            route: None,
        }
    }

    fn new_capture(param_name: Arc<str>) -> Self {
        Self {
            param_name: Some(param_name),
            ..Self::new()
        }
    }

    fn search(&self, segments: &[&str], params: &mut ParamVec) -> Option<Arc<CompiledRoute<H>>> {
        let Some((segment, rest)) = segments.split_first() else {
            // All segments consumed. A node with children but no terminal
            // route is a prefix of a deeper path, not a match.
            return self.route.clone();
        };

        // Literal match commits: no fallback to param/wildcard at this depth.
        if let Some(child) = self.children.get(*segment) {
            return child.search(rest, params);
        }

        if let Some(child) = &self.param_child {
            if let Some(name) = &child.param_name {
                params.push((Arc::clone(name), decode_value(segment)));
                if let Some(route) = child.search(rest, params) {
                    return Some(route);
                }
                params.pop();
            }
        }

        if let Some(child) = &self.wildcard_child {
            if let Some(name) = &child.param_name {
                let remainder = join_decoded(segments);
                params.push((Arc::clone(name), remainder));
                return child.route.clone();
            }
        }

        None
    }
}

/// Decode each remaining segment, then join with `/`. Decoding after the
/// split keeps an encoded `%2F` inside a value from becoming a separator.
fn join_decoded(segments: &[&str]) -> String {
    let mut out = String::new();
    for (idx, segment) in segments.iter().enumerate() {
        if idx > 0 {
            out.push('/');
        }
        out.push_str(&decode_value(segment));
    }
    out
}

/// Per-HTTP-method route tree; owns insertion and precedence-ordered
/// traversal.
pub(crate) struct Trie<H> {
    roots: HashMap<Method, TrieNode<H>>,
}

impl<H> Trie<H> {
    pub(crate) fn new() -> Self {
        Self {
            roots: HashMap::new(),
        }
    }

    /// Walk the tree for `method`, creating nodes as needed, and attach the
    /// compiled route to the terminal node.
    pub(crate) fn insert(
        &mut self,
        method: Method,
        segments: &[Segment],
        route: Arc<CompiledRoute<H>>,
    ) -> Result<(), RouterError> {
        let mut node = self.roots.entry(method).or_insert_with(TrieNode::new);

        for (depth, segment) in segments.iter().enumerate() {
            node = match segment {
                Segment::Literal(literal) => node
                    .children
                    .entry(literal.clone())
                    .or_insert_with(TrieNode::new),
                Segment::Param(name) => {
                    if let Some(existing) = &node.param_child {
                        let existing_name =
                            existing.param_name.as_deref().unwrap_or_default();
                        if existing_name != name {
                            return Err(RouterError::invalid(
                                &route.pattern,
                                InvalidPatternReason::ParamNameConflict {
                                    depth,
                                    existing: existing_name.to_string(),
                                    conflicting: name.clone(),
                                },
                            ));
                        }
                    }
                    let child = node.param_child.get_or_insert_with(|| {
                        Box::new(TrieNode::new_capture(Arc::from(name.as_str())))
                    });
                    &mut **child
                }
                Segment::Wildcard => {
                    let child = node.wildcard_child.get_or_insert_with(|| {
                        Box::new(TrieNode::new_capture(Arc::from(WILDCARD_PARAM)))
                    });
                    &mut **child
                }
            };
        }

        if node.route.is_some() {
            return Err(RouterError::DuplicateRoute {
                method: route.method.clone(),
                pattern: route.pattern.clone(),
            });
        }
        node.route = Some(route);
        Ok(())
    }

    /// Precedence-ordered lookup. Returns the matched route and extracted
    /// parameters in declaration order, or `None` for a miss.
    pub(crate) fn lookup(
        &self,
        method: &Method,
        segments: &[&str],
    ) -> Option<(Arc<CompiledRoute<H>>, ParamVec)> {
        let root = self.roots.get(method)?;
        let mut params = ParamVec::new();
        let route = root.search(segments, &mut params)?;
        Some((route, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::parse_pattern;
    use std::time::Instant;

    fn route(method: Method, pattern: &str) -> Arc<CompiledRoute<&'static str>> {
        let segments = parse_pattern(pattern, false).unwrap();
        let param_names = segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(name) => Some(Arc::from(name.as_str())),
                Segment::Wildcard => Some(Arc::from(WILDCARD_PARAM)),
                Segment::Literal(_) => None,
            })
            .collect::<Vec<Arc<str>>>();
        let is_static = param_names.is_empty();
        Arc::new(CompiledRoute {
            method,
            pattern: pattern.to_string(),
            param_names,
            middleware: Vec::new(),
            handler: Arc::new("handler"),
            is_static,
            registered_at: Instant::now(),
        })
    }

    fn insert(trie: &mut Trie<&'static str>, method: Method, pattern: &str) {
        let segments = parse_pattern(pattern, false).unwrap();
        trie.insert(method.clone(), &segments, route(method, pattern))
            .unwrap();
    }

    fn lookup(
        trie: &Trie<&'static str>,
        method: Method,
        path: &str,
    ) -> Option<(Arc<CompiledRoute<&'static str>>, ParamVec)> {
        let segments = crate::segment::split_path(path, false);
        trie.lookup(&method, &segments)
    }

    #[test]
    fn test_literal_wins_over_param() {
        let mut trie = Trie::new();
        insert(&mut trie, Method::GET, "/users/new");
        insert(&mut trie, Method::GET, "/users/:id");

        let (matched, params) = lookup(&trie, Method::GET, "/users/new").unwrap();
        assert_eq!(matched.pattern, "/users/new");
        assert!(params.is_empty());

        let (matched, params) = lookup(&trie, Method::GET, "/users/42").unwrap();
        assert_eq!(matched.pattern, "/users/:id");
        assert_eq!(params.as_slice().len(), 1);
        assert_eq!(params[0].0.as_ref(), "id");
        assert_eq!(params[0].1, "42");
    }

    #[test]
    fn test_param_wins_over_wildcard() {
        let mut trie = Trie::new();
        insert(&mut trie, Method::GET, "/files/:name");
        insert(&mut trie, Method::GET, "/files/*");

        let (matched, _) = lookup(&trie, Method::GET, "/files/report").unwrap();
        assert_eq!(matched.pattern, "/files/:name");

        // deeper path cannot be consumed by the single param; wildcard takes it
        let (matched, params) = lookup(&trie, Method::GET, "/files/a/b").unwrap();
        assert_eq!(matched.pattern, "/files/*");
        assert_eq!(params[0].1, "a/b");
    }

    #[test]
    fn test_wildcard_captures_remainder() {
        let mut trie = Trie::new();
        insert(&mut trie, Method::GET, "/static/*");

        let (matched, params) = lookup(&trie, Method::GET, "/static/css/a.css").unwrap();
        assert_eq!(matched.pattern, "/static/*");
        assert_eq!(params[0].0.as_ref(), WILDCARD_PARAM);
        assert_eq!(params[0].1, "css/a.css");
    }

    #[test]
    fn test_wildcard_requires_a_remaining_segment() {
        let mut trie = Trie::new();
        insert(&mut trie, Method::GET, "/static/*");
        assert!(lookup(&trie, Method::GET, "/static").is_none());
    }

    #[test]
    fn test_prefix_of_deeper_route_is_a_miss() {
        let mut trie = Trie::new();
        insert(&mut trie, Method::GET, "/a/b/c");
        assert!(lookup(&trie, Method::GET, "/a/b").is_none());
        assert!(lookup(&trie, Method::GET, "/a").is_none());
    }

    #[test]
    fn test_param_backtracks_to_wildcard() {
        let mut trie = Trie::new();
        insert(&mut trie, Method::GET, "/v/:id/detail");
        insert(&mut trie, Method::GET, "/v/*");

        // ":id" consumes "7" but "summary" fails under it; the wildcard
        // picks the whole remainder back up.
        let (matched, params) = lookup(&trie, Method::GET, "/v/7/summary").unwrap();
        assert_eq!(matched.pattern, "/v/*");
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].1, "7/summary");
    }

    #[test]
    fn test_param_name_conflict_rejected() {
        let mut trie = Trie::new();
        insert(&mut trie, Method::GET, "/a/:x/c");
        let segments = parse_pattern("/a/:y/c", false).unwrap();
        let err = trie
            .insert(Method::GET, &segments, route(Method::GET, "/a/:y/c"))
            .unwrap_err();
        assert!(matches!(
            err,
            RouterError::InvalidPattern {
                reason: InvalidPatternReason::ParamNameConflict { depth: 1, .. },
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut trie = Trie::new();
        insert(&mut trie, Method::GET, "/users");
        let segments = parse_pattern("/users", false).unwrap();
        let err = trie
            .insert(Method::GET, &segments, route(Method::GET, "/users"))
            .unwrap_err();
        assert!(matches!(err, RouterError::DuplicateRoute { .. }));
    }

    #[test]
    fn test_methods_are_isolated() {
        let mut trie = Trie::new();
        insert(&mut trie, Method::GET, "/users");
        assert!(lookup(&trie, Method::POST, "/users").is_none());
    }

    #[test]
    fn test_param_value_percent_decoded() {
        let mut trie = Trie::new();
        insert(&mut trie, Method::GET, "/users/:id");
        let (_, params) = lookup(&trie, Method::GET, "/users/a%2Fb").unwrap();
        assert_eq!(params[0].1, "a/b");
    }
}
