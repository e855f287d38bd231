/// Post-build normalization of the route tree
///
/// Walks every sibling list top-down and:
/// - makes child paths relative (no leading `/`)
/// - turns an optional parameter into a required one when a sibling index
///   page already serves the parameter-less URL at that depth
/// - drops the `_index` suffix that an index page's `index` key added to
///   its name
/// - removes the name of any route whose children include an empty-path
///   (index) route, leaving it as a pure path container
///
/// Running the pass on its own output changes nothing.
use super::pattern::{classify_segment, require_param, sanitize_key};
use crate::RouteNode;

const INDEX_SUFFIX: &str = "_index";

/// Normalizes a freshly built route tree in place
pub fn normalize_routes(routes: &mut [RouteNode]) {
    clean_children_routes(routes, false);
}

/// Normalizes one sibling list; `is_child` is false only for the top level
pub fn clean_children_routes(routes: &mut [RouteNode], is_child: bool) {
    let index_prefixes: Vec<Vec<String>> = routes
        .iter()
        .filter_map(|route| route.origin.index_prefix().map(<[String]>::to_vec))
        .collect();

    for route in routes.iter_mut() {
        if is_child {
            if let Some(relative) = route.path.strip_prefix('/') {
                route.path = relative.to_string();
            }
        }

        if route.path.contains('?') {
            route.path = promote_required_params(route, &index_prefixes, is_child);
        }

        strip_index_suffix(route);

        if !route.children.is_empty() {
            if route.children.iter().any(|child| child.path.is_empty()) {
                route.name = None;
            }
            clean_children_routes(&mut route.children, true);
        }
    }
}

/// Drops the `_index` part an index page's own `index` key added to its name
///
/// Only names still in their built form are touched, so a folder whose name
/// ends in `_index` keeps it and a second pass finds nothing to strip.
fn strip_index_suffix(route: &mut RouteNode) {
    if !route.origin.is_index() {
        return;
    }
    let built = route
        .origin
        .keys
        .iter()
        .map(|key| sanitize_key(key))
        .collect::<Vec<_>>()
        .join("_");

    if let Some(name) = route.name.as_mut() {
        if *name == built {
            if let Some(stripped) = name.strip_suffix(INDEX_SUFFIX) {
                *name = stripped.to_string();
            }
        }
    }
}

/// Rebuilds a route's path with index-shadowed optional parameters required
///
/// An index page with keys `prefix + ["index"]` serves the URL of `prefix`.
/// A route whose own keys start with that same `prefix` and which has an
/// optional parameter right at `prefix.len()` would also match that URL, so
/// the parameter becomes required.
fn promote_required_params(route: &RouteNode, index_prefixes: &[Vec<String>], is_child: bool) -> String {
    let keys = &route.origin.keys;
    let base = route.origin.base;

    let mut segments: Vec<&str> = route.path.split('/').filter(|s| !s.is_empty()).collect();

    for prefix in index_prefixes {
        let depth = prefix.len();
        let Some(position) = depth.checked_sub(base) else {
            continue;
        };
        if position >= segments.len() || keys.len() <= depth {
            continue;
        }
        if keys[..depth] != prefix[..] {
            continue;
        }
        if classify_segment(segments[position]).is_optional() {
            segments[position] = require_param(segments[position]);
        }
    }

    let joined = segments.join("/");
    if is_child {
        joined
    } else {
        format!("/{}", joined)
    }
}
