use crate::History;
use crate::scene::EditorScene;
use crate::selection::Selection;

/// Whether the host is editing the scene or running it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayMode {
    #[default]
    Editing,
    Playing,
}

impl PlayMode {
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }
}

/// Everything a command needs from the host for one callback.
///
/// Built fresh by the host for each hook invocation; the commands never keep
/// references past the call.
pub struct EditorContext<'a> {
    pub scene: &'a mut EditorScene,
    pub history: &'a mut History,
    pub selection: &'a Selection,
    pub play_mode: PlayMode,
}

impl<'a> EditorContext<'a> {
    pub fn new(
        scene: &'a mut EditorScene,
        history: &'a mut History,
        selection: &'a Selection,
    ) -> Self {
        Self {
            scene,
            history,
            selection,
            play_mode: PlayMode::Editing,
        }
    }

    #[must_use]
    pub fn with_play_mode(mut self, play_mode: PlayMode) -> Self {
        self.play_mode = play_mode;
        self
    }

    pub fn is_isolated(&self) -> bool {
        self.scene.is_isolated()
    }
}
