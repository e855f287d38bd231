/// Rendering of a route tree into an ES module
///
/// Output shape:
///
/// ```text
/// export default [
/// 	{
/// 		path: "/users",
/// 		component: () => import("./pages/users.vue"),
/// 		children: [
/// 			{
/// 				path: ":id?",
/// 				component: () => import("./pages/users/_id.vue"),
/// 				name: "users_id"
/// 			}
/// 		]
/// 	}
/// ]
/// ```
///
/// Components are loaded lazily. `redirect` and `meta` come right after the
/// component, then any other mixin field in key order, then `name` and
/// `children`.
use std::fmt::Write;

use serde_json::Value;

use crate::RouteNode;

/// Mixin fields emitted before all others, in this order
const LEADING_FIELDS: [&str; 2] = ["redirect", "meta"];

/// Renders the complete module text
///
/// ```
/// use pageroute::{render_module, RouteNode};
///
/// let routes = vec![RouteNode::new("about", "/about").with_component("./pages/about.vue")];
/// assert_eq!(
///     render_module(&routes),
///     "export default [\n\t{\n\t\tpath: \"/about\",\n\t\tcomponent: () => import(\"./pages/about.vue\"),\n\t\tname: \"about\"\n\t}\n]\n"
/// );
/// ```
pub fn render_module(routes: &[RouteNode]) -> String {
    format!("export default [\n{}\n]\n", render_routes(routes, "\t"))
}

/// Renders a list of routes as comma-separated object literals
pub fn render_routes(routes: &[RouteNode], tab: &str) -> String {
    let mut out = String::new();
    for (i, route) in routes.iter().enumerate() {
        write_route(&mut out, route, tab);
        if i + 1 < routes.len() {
            out.push_str(",\n");
        }
    }
    out
}

fn write_route(out: &mut String, route: &RouteNode, tab: &str) {
    // Writing into a String cannot fail
    let _ = write!(out, "{tab}{{\n{tab}\tpath: {}", json_string(&route.path));

    if let Some(component) = &route.component {
        let _ = write!(out, ",\n\t{tab}component: () => import({})", json_string(component));
    }

    for key in LEADING_FIELDS {
        if let Some(value) = route.fields.get(key) {
            write_field(out, tab, key, value);
        }
    }
    for (key, value) in &route.fields {
        if !LEADING_FIELDS.contains(&key.as_str()) {
            write_field(out, tab, key, value);
        }
    }

    if let Some(name) = &route.name {
        let _ = write!(out, ",\n\t{tab}name: {}", json_string(name));
    }

    if !route.children.is_empty() {
        let nested = format!("{tab}\t\t");
        let _ = write!(
            out,
            ",\n\t{tab}children: [\n{}\n\t{tab}]",
            render_routes(&route.children, &nested)
        );
    }

    let _ = write!(out, "\n{tab}}}");
}

fn write_field(out: &mut String, tab: &str, key: &str, value: &Value) {
    if value.is_null() {
        return;
    }
    let _ = write!(out, ",\n\t{tab}{}: {}", property_key(key), value);
}

fn json_string(value: &str) -> String {
    Value::from(value).to_string()
}

/// Object-literal key: bare when it is a valid identifier, quoted otherwise
fn property_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_identifier = chars
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if is_identifier {
        key.to_string()
    } else {
        json_string(key)
    }
}
