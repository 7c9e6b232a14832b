//! Tree-walking helpers over [`DomNode`] handles.
//!
//! These mirror the handful of traversal patterns the adapters need:
//! nearest-ancestor matching, scoped descendant lookup, and the bounded
//! ancestor climb used to locate a send button near a composition surface.

use super::selector::Selector;
use super::DomNode;

/// Whether any selector in `selectors` matches `node` itself.
pub fn matches_any<D: DomNode>(node: &D, selectors: &[Selector]) -> bool {
    selectors.iter().any(|selector| selector.matches(node))
}

/// Nearest element (self first, then ancestors) matching `selector`.
pub fn closest<D: DomNode>(node: &D, selector: &Selector) -> Option<D> {
    let mut current = Some(node.clone());
    while let Some(candidate) = current {
        if selector.matches(&candidate) {
            return Some(candidate);
        }
        current = candidate.parent();
    }
    None
}

/// Nearest element (self first, then ancestors) matching any of `selectors`.
pub fn closest_any<D: DomNode>(node: &D, selectors: &[Selector]) -> Option<D> {
    let mut current = Some(node.clone());
    while let Some(candidate) = current {
        if matches_any(&candidate, selectors) {
            return Some(candidate);
        }
        current = candidate.parent();
    }
    None
}

/// First descendant of `scope` (depth-first, document order) matching
/// `selector`.  Like `querySelector`, the scope element itself is excluded.
pub fn query_first<D: DomNode>(scope: &D, selector: &Selector) -> Option<D> {
    for child in scope.children() {
        if selector.matches(&child) {
            return Some(child);
        }
        if let Some(found) = query_first(&child, selector) {
            return Some(found);
        }
    }
    None
}

/// First descendant matching the highest-priority selector that matches
/// anything: candidates are tried in order and the first selector with a
/// hit wins, regardless of document position of later candidates.
pub fn query_first_of<D: DomNode>(scope: &D, candidates: &[Selector]) -> Option<D> {
    candidates
        .iter()
        .find_map(|selector| query_first(scope, selector))
}

/// Climbs at most `max_hops` containers starting at `start`, returning the
/// first candidate hit inside any container.
///
/// The bound exists because site DOM trees are deep and unpredictable; an
/// unbounded climb eventually reaches containers that hold unrelated
/// controls (another message's buttons, the page chrome) and would match
/// the wrong element.
pub fn search_ancestors<D: DomNode>(
    start: &D,
    candidates: &[Selector],
    max_hops: usize,
) -> Option<D> {
    let mut container = Some(start.clone());
    for _ in 0..max_hops {
        let scope = container?;
        if let Some(found) = query_first_of(&scope, candidates) {
            return Some(found);
        }
        container = scope.parent();
    }
    None
}

// ── Tests ─────────────────────────────────────────────────────────────────────
