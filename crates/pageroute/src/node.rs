/// The route node produced by the compiler
use serde::Serialize;
use serde_json::{Map, Value};

/// One entry in the generated route table
///
/// Serializes to the shape client-side routers expect:
/// `{ name?, path, component?, redirect?, meta?, ..., children? }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteNode {
    /// Underscore-joined route name. `None` once the node only groups an
    /// index child.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Route pattern. Empty means "inherit the parent's path".
    pub path: String,
    /// Component reference relative to the output directory, e.g. `./pages/about.vue`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Fields merged in from mixins (`redirect`, `meta`, ...)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    /// Nested routes, in matching order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteNode>,
    /// Where this node came from in the pages directory
    #[serde(skip)]
    pub origin: RouteOrigin,
}

/// Directory-convention facts about a node, kept for normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteOrigin {
    /// Path keys of the file (mixin tokens removed, `_` prefixes kept)
    pub keys: Vec<String>,
    /// Number of leading keys owned by ancestor routes. The node's own
    /// `path` segments line up with `keys[base..]`.
    pub base: usize,
}

impl RouteOrigin {
    pub fn new(keys: Vec<String>, base: usize) -> Self {
        Self { keys, base }
    }

    /// Whether the file is an `index` page
    pub fn is_index(&self) -> bool {
        self.keys.last().map_or(false, |key| key == "index")
    }

    /// Keys leading up to the `index` key, for index pages only
    pub fn index_prefix(&self) -> Option<&[String]> {
        if self.is_index() {
            Some(&self.keys[..self.keys.len() - 1])
        } else {
            None
        }
    }
}

impl RouteNode {
    /// Creates a bare node with a name and path
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Builder-style component setter
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Builder-style origin setter
    pub fn with_origin(mut self, keys: &[&str], base: usize) -> Self {
        self.origin = RouteOrigin::new(keys.iter().map(|k| k.to_string()).collect(), base);
        self
    }

    /// Builder-style children setter
    pub fn with_children(mut self, children: Vec<RouteNode>) -> Self {
        self.children = children;
        self
    }

    pub fn meta(&self) -> Option<&Value> {
        self.fields.get("meta")
    }

    pub fn redirect(&self) -> Option<&Value> {
        self.fields.get("redirect")
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Finds a direct child by name
    pub fn child(&self, name: &str) -> Option<&RouteNode> {
        self.children
            .iter()
            .find(|child| child.name.as_deref() == Some(name))
    }

    /// Counts this node and all of its descendants
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(RouteNode::count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_skips_empty_fields() {
        let node = RouteNode {
            name: None,
            path: "/users".to_string(),
            ..RouteNode::default()
        };
        assert_eq!(serde_json::to_value(&node).unwrap(), json!({ "path": "/users" }));
    }

    #[test]
    fn test_serialize_flattens_mixin_fields() {
        let mut node = RouteNode::new("about", "/about").with_component("./pages/about.vue");
        node.fields.insert("meta".to_string(), json!({ "title": "About" }));

        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "name": "about",
                "path": "/about",
                "component": "./pages/about.vue",
                "meta": { "title": "About" }
            })
        );
        assert_eq!(node.meta(), Some(&json!({ "title": "About" })));
        assert_eq!(node.redirect(), None);
    }

    #[test]
    fn test_origin_index_prefix() {
        let origin = RouteOrigin::new(vec!["users".into(), "index".into()], 0);
        assert!(origin.is_index());
        assert_eq!(origin.index_prefix(), Some(&["users".to_string()][..]));

        let origin = RouteOrigin::new(vec!["users".into(), "_id".into()], 0);
        assert!(!origin.is_index());
        assert_eq!(origin.index_prefix(), None);
    }

    #[test]
    fn test_count_includes_descendants() {
        let node = RouteNode::new("users", "/users").with_children(vec![
            RouteNode::new("users_index", ""),
            RouteNode::new("users_id", ":id"),
        ]);
        assert_eq!(node.count(), 3);
        assert!(node.child("users_id").is_some());
        assert!(!node.is_leaf());
    }
}
