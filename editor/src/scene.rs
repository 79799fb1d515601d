//! The editable document: node flags plus the running isolation.

use isolationist_core::abstract_editor::Editable;
use isolationist_core::scene::SceneGraph;

use crate::isolate::IsolationState;
use crate::session::IsolationSession;

/// Undo target of every visibility command.
///
/// The isolation session lives next to the scene graph so that one undo
/// step reverts both: undoing "Isolate" forgets the session, undoing
/// "DeIsolate" brings it back, and undoing a focus extension restores the
/// previous focus and hidden sets.
#[derive(Debug, Default)]
pub struct EditorScene {
    pub graph: SceneGraph,
    isolation: Option<IsolationSession>,
}

impl Editable for EditorScene {}

impl EditorScene {
    pub fn new(graph: SceneGraph) -> Self {
        Self {
            graph,
            isolation: None,
        }
    }

    pub fn isolation(&self) -> Option<&IsolationSession> {
        self.isolation.as_ref()
    }

    pub fn is_isolated(&self) -> bool {
        self.isolation.is_some()
    }

    pub fn state(&self) -> IsolationState {
        if self.is_isolated() {
            IsolationState::Isolating
        } else {
            IsolationState::Idle
        }
    }

    /// Only edit actions swap the session, so it always matches the flags
    /// the history has applied.
    pub(crate) fn isolation_mut(&mut self) -> &mut Option<IsolationSession> {
        &mut self.isolation
    }
}

impl From<SceneGraph> for EditorScene {
    fn from(graph: SceneGraph) -> Self {
        Self::new(graph)
    }
}
