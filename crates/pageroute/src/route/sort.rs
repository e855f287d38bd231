/// Sibling ordering for route matching precedence
///
/// Routers try routes in table order, so more specific patterns have to come
/// first. Segments rank static < dynamic < wildcard.
///
/// # Order
///
/// 1. Routes with an empty path (index children, containers)
/// 2. Rank sequences compared position by position; the first differing
///    rank decides
/// 3. When one rank sequence is a prefix of the other, the shorter route
///    comes first unless it ends in a wildcard, which swallows anything
///    the longer one could match
/// 4. Remaining ties fall back to the path text and then the name, so the
///    order never depends on insertion order
use std::cmp::Ordering;

use super::pattern::{classify_segment, SegmentKind};
use crate::RouteNode;

/// Trailing marker placed after a wildcard so that it outranks every extension
const WILDCARD_TAIL: u8 = 3;

/// Sort key derived from a route path
///
/// # Examples
///
/// ```
/// use pageroute::route::sort::Precedence;
///
/// assert!(Precedence::of("") < Precedence::of("/"));
/// assert!(Precedence::of("/") < Precedence::of("/about"));
/// assert!(Precedence::of("/about") < Precedence::of("/:id?"));
/// assert!(Precedence::of("/:id?") < Precedence::of("/*"));
/// assert!(Precedence::of("/*/edit") < Precedence::of("/*"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Precedence {
    anchored: bool,
    ranks: Vec<u8>,
}

impl Precedence {
    pub fn of(path: &str) -> Self {
        let kinds: Vec<SegmentKind> = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(classify_segment)
            .collect();

        let mut ranks: Vec<u8> = kinds.iter().map(|kind| kind.rank()).collect();
        if kinds.last() == Some(&SegmentKind::Wildcard) {
            ranks.push(WILDCARD_TAIL);
        }

        Precedence {
            anchored: !path.is_empty(),
            ranks,
        }
    }
}

/// Total order over sibling routes (pure function)
pub fn compare_routes(a: &RouteNode, b: &RouteNode) -> Ordering {
    Precedence::of(&a.path)
        .cmp(&Precedence::of(&b.path))
        .then_with(|| a.path.cmp(&b.path))
        .then_with(|| a.name.cmp(&b.name))
}

/// Sorts a sibling list in matching order
pub fn sort_routes(routes: &mut [RouteNode]) {
    routes.sort_by(compare_routes);
}
