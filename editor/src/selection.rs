//! Host selection snapshot and change tracking.

use std::collections::HashSet;

use isolationist_core::scene::NodeId;

/// The nodes currently selected in the host, in selection order.
///
/// The first node is the *primary* selection (the one the inspector shows).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    nodes: Vec<NodeId>,
}

impl Selection {
    /// Builds a selection, dropping repeated nodes but keeping order.
    pub fn new(nodes: impl IntoIterator<Item = NodeId>) -> Self {
        let mut seen = HashSet::new();
        Self {
            nodes: nodes.into_iter().filter(|id| seen.insert(*id)).collect(),
        }
    }

    pub fn single(node: NodeId) -> Self {
        Self { nodes: vec![node] }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn primary(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }
}

/// Remembers the last observed selection and reports what was added since.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    last: Option<Selection>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares `current` with the previous observation.
    ///
    /// Returns `None` if the selection did not change, otherwise the nodes
    /// that were not part of the previous selection (possibly empty, e.g.
    /// when nodes were only deselected). The very first observation reports
    /// the whole selection.
    pub fn observe(&mut self, current: &Selection) -> Option<Vec<NodeId>> {
        if self.last.as_ref() == Some(current) {
            return None;
        }
        let added = match &self.last {
            Some(last) => current
                .nodes()
                .iter()
                .copied()
                .filter(|node| !last.contains(*node))
                .collect(),
            None => current.nodes().to_vec(),
        };
        self.last = Some(current.clone());
        Some(added)
    }

    /// Records `current` as seen without reporting it.
    pub fn prime(&mut self, current: &Selection) {
        self.last = Some(current.clone());
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use isolationist_core::scene::SceneGraph;

    use super::*;

    fn nodes() -> [NodeId; 3] {
        let mut graph = SceneGraph::new();
        [graph.spawn("A"), graph.spawn("B"), graph.spawn("C")]
    }

    #[test]
    fn selection_keeps_order_and_drops_repeats() {
        let [a, b, c] = nodes();
        let selection = Selection::new([b, a, b, c]);
        assert_eq!(selection.nodes(), &[b, a, c]);
        assert_eq!(selection.primary(), Some(b));
        assert_eq!(selection.len(), 3);
        assert!(selection.contains(c));
        assert!(Selection::empty().primary().is_none());
    }

    #[test]
    fn first_observation_reports_everything() {
        let [a, b, _] = nodes();
        let mut tracker = SelectionTracker::new();
        assert_eq!(tracker.observe(&Selection::new([a, b])), Some(vec![a, b]));
    }

    #[test]
    fn unchanged_selection_reports_nothing() {
        let [a, ..] = nodes();
        let mut tracker = SelectionTracker::new();
        tracker.observe(&Selection::single(a));
        assert_eq!(tracker.observe(&Selection::single(a)), None);
    }

    #[test]
    fn reports_only_added_nodes() {
        let [a, b, c] = nodes();
        let mut tracker = SelectionTracker::new();
        tracker.prime(&Selection::new([a, b]));
        assert_eq!(tracker.observe(&Selection::new([a, b, c])), Some(vec![c]));
        assert_eq!(tracker.observe(&Selection::single(a)), Some(vec![]));
    }

    #[test]
    fn reset_forgets_previous_selection() {
        let [a, ..] = nodes();
        let mut tracker = SelectionTracker::new();
        tracker.prime(&Selection::single(a));
        tracker.reset();
        assert_eq!(tracker.observe(&Selection::single(a)), Some(vec![a]));
    }
}
