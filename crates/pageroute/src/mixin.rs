/// Mixins: named route fragments applied through path segments
///
/// A segment such as `"admin auth wide"` routes as `admin` and merges the
/// `auth` and `wide` mixins into the route, in that order.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Fields the compiler owns; mixins cannot set them
pub const RESERVED_FIELDS: [&str; 4] = ["name", "path", "component", "children"];

/// Named mixin fragments, keyed by the token used in file names
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MixinSet(BTreeMap<String, Map<String, Value>>);

impl MixinSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a mixin
    pub fn insert(&mut self, name: impl Into<String>, fields: Map<String, Value>) {
        self.0.insert(name.into(), fields);
    }

    /// Builder-style variant of [`MixinSet::insert`]. Non-object values are
    /// ignored.
    pub fn with(mut self, name: impl Into<String>, fields: Value) -> Self {
        if let Value::Object(fields) = fields {
            self.insert(name, fields);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Map<String, Value>> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Splits a raw segment into its path key and mixin tokens
///
/// ```
/// use pageroute::mixin::split_mixins;
///
/// assert_eq!(split_mixins("admin auth wide"), ("admin", vec!["auth", "wide"]));
/// assert_eq!(split_mixins("_id"), ("_id", vec![]));
/// ```
pub fn split_mixins(segment: &str) -> (&str, Vec<&str>) {
    let mut tokens = segment.split_whitespace();
    let key = tokens.next().unwrap_or("");
    (key, tokens.collect())
}

/// A mixin field that was not applied because the compiler owns it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedField {
    pub mixin: String,
    pub field: String,
}

/// Deep-merges the named mixins into `fields`, later mixins winning
///
/// Unknown mixin names are skipped. Returns the reserved fields that were
/// refused.
pub fn apply_mixins(
    fields: &mut Map<String, Value>,
    names: &[&str],
    mixins: &MixinSet,
) -> Vec<RejectedField> {
    let mut rejected = Vec::new();

    for name in names {
        let Some(mixin) = mixins.get(name) else {
            debug!(mixin = %name, "unknown mixin, nothing merged");
            continue;
        };

        for (key, value) in mixin {
            if RESERVED_FIELDS.contains(&key.as_str()) {
                rejected.push(RejectedField {
                    mixin: name.to_string(),
                    field: key.clone(),
                });
                continue;
            }
            deep_merge(fields.entry(key.clone()).or_insert(Value::Null), value);
        }
    }

    rejected
}

/// Merges `source` into `target`
///
/// Objects merge key by key, recursively. Anything else (including arrays)
/// is replaced by a copy of `source`.
///
/// ```
/// use pageroute::mixin::deep_merge;
/// use serde_json::json;
///
/// let mut target = json!({ "meta": { "x": 1, "y": 1 } });
/// deep_merge(&mut target, &json!({ "meta": { "y": 2 } }));
/// assert_eq!(target, json!({ "meta": { "x": 1, "y": 2 } }));
/// ```
pub fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                deep_merge(target.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target, source) => *target = source.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mixins() -> MixinSet {
        MixinSet::new()
            .with("meta-a", json!({ "meta": { "x": 1, "shared": "a" } }))
            .with("meta-b", json!({ "meta": { "y": 2, "shared": "b" } }))
            .with("home", json!({ "redirect": "/home" }))
            .with("sneaky", json!({ "path": "/elsewhere", "meta": { "z": 3 } }))
    }

    #[test]
    fn test_split_mixins_whitespace_runs() {
        assert_eq!(split_mixins("section  meta-a\tmeta-b"), ("section", vec!["meta-a", "meta-b"]));
        assert_eq!(split_mixins(""), ("", vec![]));
    }

    #[test]
    fn test_apply_mixins_later_wins() {
        let mut fields = Map::new();
        let rejected = apply_mixins(&mut fields, &["meta-a", "meta-b"], &mixins());

        assert!(rejected.is_empty());
        assert_eq!(
            Value::Object(fields),
            json!({ "meta": { "x": 1, "y": 2, "shared": "b" } })
        );
    }

    #[test]
    fn test_apply_mixins_unknown_is_noop() {
        let mut fields = Map::new();
        let rejected = apply_mixins(&mut fields, &["missing"], &mixins());
        assert!(rejected.is_empty());
        assert!(fields.is_empty());
    }

    #[test]
    fn test_apply_mixins_rejects_reserved_fields() {
        let mut fields = Map::new();
        let rejected = apply_mixins(&mut fields, &["sneaky", "home"], &mixins());

        assert_eq!(
            rejected,
            vec![RejectedField {
                mixin: "sneaky".to_string(),
                field: "path".to_string()
            }]
        );
        assert_eq!(
            Value::Object(fields),
            json!({ "meta": { "z": 3 }, "redirect": "/home" })
        );
    }

    #[test]
    fn test_deep_merge_replaces_arrays_and_scalars() {
        let mut target = json!({ "tags": [1, 2], "title": "a" });
        deep_merge(&mut target, &json!({ "tags": [3], "title": { "text": "b" } }));
        assert_eq!(target, json!({ "tags": [3], "title": { "text": "b" } }));
    }

    #[test]
    fn test_mixin_set_deserializes_from_toml() {
        let set: MixinSet = toml::from_str(
            r#"
            [auth]
            meta = { requiresAuth = true }

            [legacy]
            redirect = "/new"
            "#,
        )
        .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["auth", "legacy"]);
        assert_eq!(set.get("legacy").unwrap()["redirect"], json!("/new"));
    }
}
