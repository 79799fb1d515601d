//! Isolation session state.

use std::collections::HashSet;

use isolationist_core::scene::{NodeId, SceneGraph};

use crate::actions::SetActiveAction;
use crate::hide_set::{compute_hide_set, compute_hide_set_assuming_visible, is_focus_relative};

/// Focus and hidden sets of a running isolation.
///
/// The hidden set is always derived from the focus set; it is recomputed
/// from scratch whenever the focus grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolationSession {
    focus: Vec<NodeId>,
    hidden: Vec<NodeId>,
}

impl IsolationSession {
    /// Computes the hide-set for `focus`. Returns `None` when there is
    /// nothing to hide, in which case no session should exist.
    pub fn begin(graph: &SceneGraph, focus: Vec<NodeId>) -> Option<Self> {
        let mut unique = HashSet::new();
        let focus: Vec<NodeId> = focus.into_iter().filter(|id| unique.insert(*id)).collect();
        let hidden = compute_hide_set(graph, &focus);
        if hidden.is_empty() {
            return None;
        }
        Some(Self { focus, hidden })
    }

    pub fn focus(&self) -> &[NodeId] {
        &self.focus
    }

    pub fn hidden(&self) -> &[NodeId] {
        &self.hidden
    }

    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.hidden.contains(&node)
    }

    /// Whether `node` is a focus node, or an ancestor or descendant of one.
    pub fn is_focus_relative(&self, graph: &SceneGraph, node: NodeId) -> bool {
        is_focus_relative(graph, &self.focus, node)
    }

    /// Action deactivating the hidden set. Focus relatives are filtered out
    /// again so the focus chain can never end up hidden.
    pub fn hide_action(&self, graph: &SceneGraph, description: &str) -> SetActiveAction {
        let targets = self
            .hidden
            .iter()
            .copied()
            .filter(|&node| !self.is_focus_relative(graph, node));
        SetActiveAction::all(targets, false, description)
    }

    /// Action re-activating every node of the hidden set.
    pub fn show_action(&self, description: &str) -> SetActiveAction {
        SetActiveAction::all(self.hidden.iter().copied(), true, description)
    }

    /// Adds `new_focus` to the focus set and recomputes the hidden set.
    ///
    /// Returns the action that moves the scene from the old hidden set to
    /// the new one: nodes dropped from the set are re-activated, the rest
    /// are (re-)deactivated. Returns `None` if nothing new was added.
    pub fn extend_focus(
        &mut self,
        graph: &SceneGraph,
        new_focus: &[NodeId],
    ) -> Option<SetActiveAction> {
        let before = self.focus.len();
        for &node in new_focus {
            if graph.is_alive(node) && !self.focus.contains(&node) {
                self.focus.push(node);
            }
        }
        if self.focus.len() == before {
            return None;
        }

        let hidden = compute_hide_set_assuming_visible(graph, &self.focus, &self.hidden);
        let kept: HashSet<NodeId> = hidden.iter().copied().collect();

        let mut action = SetActiveAction::new("Isolate");
        action.set_all(
            self.hidden.iter().copied().filter(|node| !kept.contains(node)),
            true,
        );
        action.set_all(hidden.iter().copied(), false);

        self.hidden = hidden;
        Some(action)
    }
}
