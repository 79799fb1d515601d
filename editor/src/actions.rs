//! Reversible visibility edits.

use isolationist_core::abstract_editor::{EditAction, EditActionResult};
use isolationist_core::scene::NodeId;

use crate::scene::EditorScene;
use crate::session::IsolationSession;

/// Sets the active flag of a batch of nodes as one undo step, optionally
/// installing a new isolation session along with it.
///
/// Changes are applied in order and the flag each node had is captured just
/// before it is overwritten, so undo (which walks the captures backwards)
/// is exact even when a node appears in the batch twice. Nodes that were
/// despawned in the meantime are skipped.
#[derive(Debug)]
pub struct SetActiveAction {
    changes: Vec<(NodeId, bool)>,
    previous: Vec<(NodeId, bool)>,
    description: String,
    recorded: bool,
    /// Session to install. Swapped with the scene's on apply and on undo,
    /// so after apply it holds the session that was replaced.
    session: Option<Option<IsolationSession>>,
    coalesce: bool,
}

impl SetActiveAction {
    /// An empty batch; add changes with [`set`](Self::set) or
    /// [`set_all`](Self::set_all).
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            changes: Vec::new(),
            previous: Vec::new(),
            description: description.into(),
            recorded: true,
            session: None,
            coalesce: false,
        }
    }

    /// Batch that activates (`active = true`) or deactivates every target.
    pub fn all(
        targets: impl IntoIterator<Item = NodeId>,
        active: bool,
        description: impl Into<String>,
    ) -> Self {
        let mut action = Self::new(description);
        action.set_all(targets, active);
        action
    }

    pub fn set(&mut self, node: NodeId, active: bool) {
        self.changes.push((node, active));
    }

    pub fn set_all(&mut self, targets: impl IntoIterator<Item = NodeId>, active: bool) {
        self.changes
            .extend(targets.into_iter().map(|node| (node, active)));
    }

    /// Marks the batch as transient: applied, but kept off the undo stack.
    #[must_use]
    pub fn transient(mut self) -> Self {
        self.recorded = false;
        self
    }

    /// Installs `session` (or ends isolation with `None`) when applied.
    #[must_use]
    pub(crate) fn with_session(mut self, session: Option<IsolationSession>) -> Self {
        self.session = Some(session);
        self
    }

    /// Lets consecutive batches with the same description fold into one
    /// undo step.
    #[must_use]
    pub(crate) fn coalescing(mut self) -> Self {
        self.coalesce = true;
        self
    }

    pub fn changes(&self) -> &[(NodeId, bool)] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    fn swap_session(&mut self, scene: &mut EditorScene) {
        if let Some(session) = &mut self.session {
            std::mem::swap(session, scene.isolation_mut());
        }
    }
}

impl EditAction<EditorScene> for SetActiveAction {
    fn apply(&mut self, scene: &mut EditorScene) -> EditActionResult {
        self.previous.clear();
        for &(node, active) in &self.changes {
            match scene.graph.set_active(node, active) {
                Some(old) => self.previous.push((node, old)),
                None => log::debug!("{}: skipping despawned node {node}", self.description),
            }
        }
        self.swap_session(scene);
        Ok(())
    }

    fn undo(&mut self, scene: &mut EditorScene) -> EditActionResult {
        self.swap_session(scene);
        for &(node, old) in self.previous.iter().rev() {
            scene.graph.set_active(node, old);
        }
        Ok(())
    }

    fn description(&self) -> &str {
        &self.description
    }

    // `other` has already been applied. Its flag captures follow ours, and
    // the session we replaced stays the one undo restores.
    fn merge(
        &mut self,
        other: Box<dyn EditAction<EditorScene>>,
    ) -> Option<Box<dyn EditAction<EditorScene>>> {
        if let Some(next) = (*other).as_any().downcast_ref::<SetActiveAction>()
            && self.coalesce
            && next.coalesce
            && next.description == self.description
        {
            self.changes.extend_from_slice(&next.changes);
            self.previous.extend_from_slice(&next.previous);
            return None;
        }
        Some(other)
    }

    fn is_recorded(&self) -> bool {
        self.recorded
    }

    // A play-mode flip between two focus extensions keeps them apart.
    fn breaks_merge(&self) -> bool {
        !self.recorded
    }
}

#[cfg(test)]
mod tests {
    use isolationist_core::scene::SceneGraph;

    use super::*;
    use crate::History;

    #[test]
    fn apply_and_undo_restore_mixed_flags() {
        let mut scene = EditorScene::default();
        let a = scene.graph.spawn("A");
        let b = scene.graph.spawn("B");
        scene.graph.set_active(b, false);

        let mut action = SetActiveAction::all([a, b], false, "Hide 2 Objects");
        action.apply(&mut scene).unwrap();
        assert!(!scene.graph.is_active(a));
        assert!(!scene.graph.is_active(b));

        action.undo(&mut scene).unwrap();
        assert!(scene.graph.is_active(a));
        assert!(!scene.graph.is_active(b));
    }

    #[test]
    fn repeated_node_undoes_to_first_capture() {
        let mut scene = EditorScene::default();
        let a = scene.graph.spawn("A");
        scene.graph.set_active(a, false);

        let mut action = SetActiveAction::new("Isolate");
        action.set(a, true);
        action.set(a, false);
        action.apply(&mut scene).unwrap();
        assert!(!scene.graph.is_active(a));

        action.set(a, true);
        action.apply(&mut scene).unwrap();
        assert!(scene.graph.is_active(a));
        action.undo(&mut scene).unwrap();
        assert!(!scene.graph.is_active(a));
    }

    #[test]
    fn despawned_nodes_are_skipped() {
        let mut scene = EditorScene::default();
        let a = scene.graph.spawn("A");
        let gone = scene.graph.spawn("Gone");
        scene.graph.despawn_recursive(gone);

        let mut action = SetActiveAction::all([gone, a], false, "Isolate");
        action.apply(&mut scene).unwrap();
        assert!(!scene.graph.is_active(a));
        action.undo(&mut scene).unwrap();
        assert!(scene.graph.is_active(a));
    }

    #[test]
    fn session_is_swapped_on_apply_and_back_on_undo() {
        let mut graph = SceneGraph::new();
        let a = graph.spawn("A");
        let b = graph.spawn("B");
        let session = IsolationSession::begin(&graph, vec![a]).unwrap();
        let mut scene = EditorScene::new(graph);

        let mut action = SetActiveAction::all([b], false, "Isolate").with_session(Some(session));
        action.apply(&mut scene).unwrap();
        assert_eq!(scene.isolation().map(|s| s.hidden().to_vec()), Some(vec![b]));

        action.undo(&mut scene).unwrap();
        assert!(!scene.is_isolated());
        assert!(scene.graph.is_active(b));

        action.apply(&mut scene).unwrap();
        assert!(scene.is_isolated());
        assert!(!scene.graph.is_active(b));
    }

    #[test]
    fn coalescing_batches_fold_into_one_step() {
        let mut scene = EditorScene::default();
        let a = scene.graph.spawn("A");
        let b = scene.graph.spawn("B");
        let mut history = History::default();

        let first = SetActiveAction::all([a], false, "Isolate").coalescing();
        let second = SetActiveAction::all([b], false, "Isolate").coalescing();
        history.execute(Box::new(first), &mut scene).unwrap();
        history.execute(Box::new(second), &mut scene).unwrap();
        assert_eq!(history.undo_count(), 1);

        history.undo(&mut scene).unwrap();
        assert!(scene.graph.is_active(a));
        assert!(scene.graph.is_active(b));
    }

    #[test]
    fn plain_batches_and_transients_do_not_fold() {
        let mut scene = EditorScene::default();
        let a = scene.graph.spawn("A");
        let mut history = History::default();

        let hide = SetActiveAction::all([a], false, "Isolate");
        let extend = SetActiveAction::all([a], true, "Isolate").coalescing();
        history.execute(Box::new(hide), &mut scene).unwrap();
        history.execute(Box::new(extend), &mut scene).unwrap();
        assert_eq!(history.undo_count(), 2);

        let flip = SetActiveAction::all([a], false, "Play mode").transient();
        let extend = SetActiveAction::all([a], true, "Isolate").coalescing();
        history.execute(Box::new(flip), &mut scene).unwrap();
        history.execute(Box::new(extend), &mut scene).unwrap();
        assert_eq!(history.undo_count(), 3);
    }

    #[test]
    fn transient_is_not_recorded_and_breaks_merge() {
        let action = SetActiveAction::all([], true, "Play mode").transient();
        assert!(!action.is_recorded());
        assert!(action.breaks_merge());
        assert!(action.is_empty());
        assert_eq!(action.description(), "Play mode");
    }
}
