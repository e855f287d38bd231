/// Route module for directory-convention routing
///
/// Contains the pieces of the compiler that turn page keys into a sorted,
/// normalized route tree:
/// - `pattern` - segment classification and route-pattern forms
/// - `builder` - nested tree assembly with mixin injection
/// - `sort` - sibling precedence ordering
/// - `normalize` - index and optional-parameter reconciliation

pub mod builder;
pub mod normalize;
pub mod pattern;
pub mod sort;

// Re-export commonly used types
pub use builder::RouteTreeBuilder;
pub use normalize::{clean_children_routes, normalize_routes};
pub use pattern::{classify_segment, route_segment, sanitize_key, SegmentKind};
pub use sort::{compare_routes, sort_routes, Precedence};
