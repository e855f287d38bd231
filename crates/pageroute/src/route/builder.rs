/// Route tree assembly
///
/// Pages are threaded into a tree one at a time. Nodes live in an arena and
/// are addressed by index, so the insertion cursor ("which sibling list are
/// we in") is a plain value rather than a borrowed reference.
///
/// A folder sharing its name with a sibling page nests: `users.vue` plus
/// `users/_id.vue` yields a `users` route whose children hold `users_id`.
use std::mem;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::pattern::{route_segment, sanitize_key};
use super::sort::compare_routes;
use crate::mixin::{apply_mixins, split_mixins, MixinSet};
use crate::path::PageFile;
use crate::{CompileWarning, RouteNode, RouteOrigin};

/// Index of a node in the builder's arena
pub type NodeId = usize;

/// Which sibling list new routes are inserted into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Root,
    Children(NodeId),
}

#[derive(Debug, Default)]
struct Slot {
    node: RouteNode,
    children: Vec<NodeId>,
}

/// State threaded through the segments of one page
///
/// Each step consumes the state and returns the next one.
#[derive(Debug)]
struct SegmentState {
    name: String,
    path: String,
    cursor: Cursor,
    base: usize,
    keys: Vec<String>,
    fields: Map<String, Value>,
}

impl SegmentState {
    fn start(capacity: usize) -> Self {
        Self {
            name: String::new(),
            path: String::new(),
            cursor: Cursor::Root,
            base: 0,
            keys: Vec::with_capacity(capacity),
            fields: Map::new(),
        }
    }

    /// Extends the underscore-joined name
    fn with_name_part(mut self, part: &str) -> Self {
        if !self.name.is_empty() {
            self.name.push('_');
        }
        self.name.push_str(part);
        self
    }

    /// Descends into an existing sibling's children; the path restarts there
    fn nested_under(mut self, id: NodeId, consumed: usize) -> Self {
        self.cursor = Cursor::Children(id);
        self.path.clear();
        self.base = consumed;
        self
    }

    /// Index pages add nothing to the path, except at the very top
    fn with_index(mut self, first: bool) -> Self {
        if first {
            self.path.push('/');
        }
        self
    }

    fn with_path_segment(mut self, key: &str) -> Self {
        self.path.push('/');
        self.path.push_str(&route_segment(key));
        self
    }

    fn with_key(mut self, key: &str) -> Self {
        self.keys.push(key.to_string());
        self
    }
}

/// Builds the nested route tree from tokenized pages
///
/// # Examples
///
/// ```
/// use pageroute::mixin::MixinSet;
/// use pageroute::path::PageFile;
/// use pageroute::route::RouteTreeBuilder;
///
/// let mixins = MixinSet::new();
/// let mut builder = RouteTreeBuilder::new(&mixins);
/// for keys in [vec!["users"], vec!["users", "_id"]] {
///     builder.insert(PageFile {
///         source: format!("{}.vue", keys.join("/")),
///         component: format!("./{}.vue", keys.join("/")),
///         keys: keys.into_iter().map(String::from).collect(),
///     });
/// }
///
/// let (routes, warnings) = builder.finish();
/// assert!(warnings.is_empty());
/// assert_eq!(routes[0].path, "/users");
/// assert_eq!(routes[0].children[0].path, "/:id?");
/// ```
#[derive(Debug)]
pub struct RouteTreeBuilder<'a> {
    mixins: &'a MixinSet,
    arena: Vec<Slot>,
    roots: Vec<NodeId>,
    warnings: Vec<CompileWarning>,
}

impl<'a> RouteTreeBuilder<'a> {
    pub fn new(mixins: &'a MixinSet) -> Self {
        Self {
            mixins,
            arena: Vec::new(),
            roots: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Number of routes inserted so far
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Threads one page into the tree and re-sorts its sibling list
    ///
    /// Returns the arena id of the new node, or `None` when the page has no
    /// keys.
    pub fn insert(&mut self, page: PageFile) -> Option<NodeId> {
        let PageFile {
            source,
            keys,
            component,
        } = page;

        if keys.is_empty() {
            warn!(file = %source, "page has no route segments, skipped");
            self.warnings.push(CompileWarning::EmptyRoute { file: source });
            return None;
        }

        let last = keys.len() - 1;
        let mut state = SegmentState::start(keys.len());
        for (index, segment) in keys.iter().enumerate() {
            state = self.advance(state, &source, segment, index, index == last);
        }

        let id = self.arena.len();
        let SegmentState {
            name,
            path,
            cursor,
            base,
            keys,
            fields,
        } = state;

        debug!(file = %source, name = %name, path = %path, "route added");
        self.arena.push(Slot {
            node: RouteNode {
                name: Some(name),
                path,
                component: Some(component),
                fields,
                children: Vec::new(),
                origin: RouteOrigin::new(keys, base),
            },
            children: Vec::new(),
        });

        self.push_sorted(cursor, id);
        Some(id)
    }

    /// Processes one segment of a page and returns the next state
    fn advance(
        &mut self,
        mut state: SegmentState,
        source: &str,
        segment: &str,
        index: usize,
        is_last: bool,
    ) -> SegmentState {
        let (key, mixin_names) = split_mixins(segment);

        if !mixin_names.is_empty() {
            for rejected in apply_mixins(&mut state.fields, &mixin_names, self.mixins) {
                warn!(file = %source, mixin = %rejected.mixin, field = %rejected.field, "mixin sets a reserved field");
                self.warnings.push(CompileWarning::ReservedMixinField {
                    file: source.to_string(),
                    mixin: rejected.mixin,
                    field: rejected.field,
                });
            }
        }

        let state = state.with_name_part(sanitize_key(key)).with_key(key);

        match self.find_sibling(state.cursor, &state.name) {
            Some(id) => {
                if is_last {
                    warn!(file = %source, name = %state.name, "route name collides with a sibling");
                    self.warnings.push(CompileWarning::NameCollision {
                        file: source.to_string(),
                        name: state.name.clone(),
                    });
                }
                state.nested_under(id, index + 1)
            }
            None if is_last && key == "index" => state.with_index(index == 0),
            None => state.with_path_segment(key),
        }
    }

    /// Looks for a node with the given name in the sibling list at `cursor`
    fn find_sibling(&self, cursor: Cursor, name: &str) -> Option<NodeId> {
        self.siblings(cursor)
            .iter()
            .copied()
            .find(|&id| self.arena[id].node.name.as_deref() == Some(name))
    }

    fn siblings(&self, cursor: Cursor) -> &[NodeId] {
        match cursor {
            Cursor::Root => &self.roots,
            Cursor::Children(parent) => &self.arena[parent].children,
        }
    }

    fn siblings_mut(&mut self, cursor: Cursor) -> &mut Vec<NodeId> {
        match cursor {
            Cursor::Root => &mut self.roots,
            Cursor::Children(parent) => &mut self.arena[parent].children,
        }
    }

    /// Appends `id` to the list at `cursor` and restores matching order
    fn push_sorted(&mut self, cursor: Cursor, id: NodeId) {
        let mut list = mem::take(self.siblings_mut(cursor));
        list.push(id);
        list.sort_by(|&a, &b| compare_routes(&self.arena[a].node, &self.arena[b].node));
        *self.siblings_mut(cursor) = list;
    }

    /// Consumes the builder, returning the route tree and collected warnings
    pub fn finish(mut self) -> (Vec<RouteNode>, Vec<CompileWarning>) {
        let roots = mem::take(&mut self.roots);
        let routes = assemble(&mut self.arena, roots);
        (routes, self.warnings)
    }
}

/// Moves nodes out of the arena into an owned tree
fn assemble(arena: &mut [Slot], ids: Vec<NodeId>) -> Vec<RouteNode> {
    ids.into_iter()
        .map(|id| {
            let children = mem::take(&mut arena[id].children);
            let mut node = mem::take(&mut arena[id].node);
            node.children = assemble(arena, children);
            node
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn page(path: &str) -> PageFile {
        PageFile {
            source: format!("pages/{}.vue", path),
            keys: path.split('/').map(String::from).collect(),
            component: format!("./pages/{}.vue", path),
        }
    }

    fn build(paths: &[&str], mixins: &MixinSet) -> (Vec<RouteNode>, Vec<CompileWarning>) {
        let mut builder = RouteTreeBuilder::new(mixins);
        for path in paths {
            builder.insert(page(path));
        }
        builder.finish()
    }

    fn summary(routes: &[RouteNode]) -> Vec<(String, String)> {
        routes
            .iter()
            .map(|r| (r.name.clone().unwrap_or_default(), r.path.clone()))
            .collect()
    }

    #[test]
    fn test_flat_pages() {
        let (routes, warnings) = build(&["index", "about", "users/_id", "users/index"], &MixinSet::new());
        assert!(warnings.is_empty());
        assert_eq!(
            summary(&routes),
            vec![
                ("index".to_string(), "/".to_string()),
                ("about".to_string(), "/about".to_string()),
                ("users_index".to_string(), "/users".to_string()),
                ("users_id".to_string(), "/users/:id?".to_string()),
            ]
        );
        assert_eq!(routes[1].component.as_deref(), Some("./pages/about.vue"));
    }

    #[test]
    fn test_implicit_nesting() {
        let (routes, _) = build(&["foo", "foo/bar", "foo/index"], &MixinSet::new());
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].path, "/foo");
        assert_eq!(
            summary(&routes[0].children),
            vec![
                ("foo_index".to_string(), "".to_string()),
                ("foo_bar".to_string(), "/bar".to_string()),
            ]
        );
        assert_eq!(routes[0].children[1].origin, RouteOrigin::new(vec!["foo".into(), "bar".into()], 1));
    }

    #[test]
    fn test_folder_named_like_its_file() {
        let (routes, _) = build(&["foo/foo", "foo/foo/bar"], &MixinSet::new());
        assert_eq!(summary(&routes), vec![("foo_foo".to_string(), "/foo/foo".to_string())]);
        assert_eq!(summary(&routes[0].children), vec![("foo_foo_bar".to_string(), "/bar".to_string())]);
    }

    #[test]
    fn test_deep_nesting_restarts_path() {
        let (routes, _) = build(&["users", "users/_id", "users/_id/posts"], &MixinSet::new());
        let users_id = &routes[0].children[0];
        assert_eq!(users_id.path, "/:id?");
        assert_eq!(summary(&users_id.children), vec![("users_id_posts".to_string(), "/posts".to_string())]);
        assert_eq!(users_id.children[0].origin.base, 2);
    }

    #[test]
    fn test_name_collision_nests_and_warns() {
        let (routes, warnings) = build(&["_id", "id"], &MixinSet::new());
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].children[0].path, "");
        assert_eq!(
            warnings,
            vec![CompileWarning::NameCollision {
                file: "pages/id.vue".to_string(),
                name: "id".to_string()
            }]
        );
    }

    #[test]
    fn test_mixins_peeled_before_dynamic_check() {
        let mixins = MixinSet::new().with("auth", json!({ "meta": { "auth": true } }));
        let (routes, _) = build(&["_id auth"], &mixins);
        assert_eq!(routes[0].name.as_deref(), Some("id"));
        assert_eq!(routes[0].path, "/:id?");
        assert_eq!(routes[0].meta(), Some(&json!({ "auth": true })));
        assert_eq!(routes[0].origin.keys, vec!["_id".to_string()]);
    }

    #[test]
    fn test_reserved_mixin_field_warns() {
        let mixins = MixinSet::new().with("bad", json!({ "name": "hijack" }));
        let (routes, warnings) = build(&["about bad"], &mixins);
        assert_eq!(routes[0].name.as_deref(), Some("about"));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_empty_page_skipped() {
        let mixins = MixinSet::new();
        let mut builder = RouteTreeBuilder::new(&mixins);
        let id = builder.insert(PageFile {
            source: "pages/.vue".to_string(),
            keys: vec![],
            component: "./pages/.vue".to_string(),
        });
        assert_eq!(id, None);
        assert!(builder.is_empty());
        let (routes, warnings) = builder.finish();
        assert!(routes.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_siblings_sorted_after_each_insert() {
        let (routes, _) = build(&["*", "_slug", "about"], &MixinSet::new());
        let paths: Vec<_> = routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/about", "/:slug?", "/*"]);
    }
}
