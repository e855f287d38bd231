/// Pattern handling for route segments
///
/// Two directions are covered here: page keys (`_id`, `about`) become route
/// pattern segments (`:id?`, `about`), and route pattern segments are
/// classified for precedence.
use std::borrow::Cow;

/// Kind of a route pattern segment
///
/// # Examples
///
/// ```
/// use pageroute::route::pattern::{classify_segment, SegmentKind};
///
/// assert_eq!(classify_segment("about"), SegmentKind::Static);
/// assert_eq!(classify_segment(":id"), SegmentKind::Dynamic { optional: false });
/// assert_eq!(classify_segment(":id?"), SegmentKind::Dynamic { optional: true });
/// assert_eq!(classify_segment("*"), SegmentKind::Wildcard);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Literal text
    Static,
    /// Parameter segment (`:name` or `:name?`)
    Dynamic { optional: bool },
    /// Catch-all segment (`*`)
    Wildcard,
}

impl SegmentKind {
    /// Matching rank: lower ranks are more specific and are tried first
    pub fn rank(self) -> u8 {
        match self {
            SegmentKind::Static => 0,
            SegmentKind::Dynamic { .. } => 1,
            SegmentKind::Wildcard => 2,
        }
    }

    pub fn is_optional(self) -> bool {
        matches!(self, SegmentKind::Dynamic { optional: true })
    }
}

/// Classifies one route pattern segment (pure function)
pub fn classify_segment(segment: &str) -> SegmentKind {
    if segment.starts_with('*') {
        SegmentKind::Wildcard
    } else if segment.contains(':') {
        SegmentKind::Dynamic {
            optional: segment.ends_with('?'),
        }
    } else {
        SegmentKind::Static
    }
}

/// Removes the dynamic-segment marker from a page key
///
/// ```
/// use pageroute::route::pattern::sanitize_key;
///
/// assert_eq!(sanitize_key("_id"), "id");
/// assert_eq!(sanitize_key("about"), "about");
/// ```
pub fn sanitize_key(key: &str) -> &str {
    key.strip_prefix('_').unwrap_or(key)
}

/// Route-pattern form of a page key
///
/// `_name` maps to an optional parameter; everything else is literal.
///
/// ```
/// use pageroute::route::pattern::route_segment;
///
/// assert_eq!(route_segment("_id"), ":id?");
/// assert_eq!(route_segment("about"), "about");
/// ```
pub fn route_segment(key: &str) -> Cow<'_, str> {
    match key.strip_prefix('_') {
        Some(param) => Cow::Owned(format!(":{}?", param)),
        None => Cow::Borrowed(key),
    }
}

/// Makes an optional parameter segment required, leaving others untouched
///
/// ```
/// use pageroute::route::pattern::require_param;
///
/// assert_eq!(require_param(":id?"), ":id");
/// assert_eq!(require_param(":id"), ":id");
/// assert_eq!(require_param("about"), "about");
/// ```
pub fn require_param(segment: &str) -> &str {
    if classify_segment(segment).is_optional() {
        &segment[..segment.len() - 1]
    } else {
        segment
    }
}
