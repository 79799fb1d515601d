//! Hide-set calculation.
//!
//! For every focus node we climb to its root; at each level every sibling
//! that is visible, not editor-owned and not related to any focus node has to
//! go. The union of those siblings is the hide-set.

use std::collections::HashSet;

use isolationist_core::scene::{NodeId, SceneGraph};

/// Returns `true` if `node` is an ancestor, a descendant or one of the focus
/// nodes themselves.
pub fn is_focus_relative(graph: &SceneGraph, focus: &[NodeId], node: NodeId) -> bool {
    focus.iter().any(|&f| graph.is_relative(f, node))
}

/// Whether `node` may be hidden to isolate `focus`.
pub fn can_hide(graph: &SceneGraph, focus: &[NodeId], node: NodeId) -> bool {
    graph.is_active(node) && !graph.is_editor(node) && !is_focus_relative(graph, focus, node)
}

/// Computes the nodes that must be deactivated so that only `focus`, their
/// ancestor chains and their subtrees stay visible.
///
/// The result is de-duplicated and listed in discovery order. Despawned
/// focus handles contribute nothing.
pub fn compute_hide_set(graph: &SceneGraph, focus: &[NodeId]) -> Vec<NodeId> {
    collect(graph, focus, |node| can_hide(graph, focus, node))
}

/// Like [`compute_hide_set`], but treats `assume_visible` as active even if
/// their flag is currently off. Used when widening a running isolation: the
/// nodes it hid are still inactive, yet they are candidates again.
pub(crate) fn compute_hide_set_assuming_visible(
    graph: &SceneGraph,
    focus: &[NodeId],
    assume_visible: &[NodeId],
) -> Vec<NodeId> {
    let assumed: HashSet<NodeId> = assume_visible.iter().copied().collect();
    collect(graph, focus, |node| {
        (graph.is_active(node) || assumed.contains(&node))
            && !graph.is_editor(node)
            && !is_focus_relative(graph, focus, node)
    })
}

fn collect(
    graph: &SceneGraph,
    focus: &[NodeId],
    hideable: impl Fn(NodeId) -> bool,
) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    let mut hide = Vec::new();

    for &keeper in focus {
        if !graph.is_alive(keeper) {
            continue;
        }
        let levels = std::iter::once(keeper).chain(graph.ancestors(keeper));
        for level in levels {
            for &sibling in graph.siblings(level) {
                if seen.insert(sibling) && hideable(sibling) {
                    hide.push(sibling);
                }
            }
        }
    }

    hide
}
