//! Host integration seam.
//!
//! A host editor owns the scene, the selection and the undo history. It
//! calls into [`Isolationist`] through [`EditorHooks`] from its GUI loop and
//! exposes the two commands (menu entries, command palette) via
//! [`CommandId`].

use isolationist_core::input::{KeyEvent, Modifiers};
use serde::{Deserialize, Serialize};

use crate::context::{EditorContext, PlayMode};
use crate::error::IsolateError;
use crate::hide::ToggleHideCommand;
use crate::isolate::IsolateCommand;
use crate::prefs::Preferences;

/// Per-callback GUI state delivered by the host.
///
/// Hosts typically call [`EditorHooks::on_frame_gui`] several times per
/// redraw (once per hierarchy row plus once for the scene view), all with the
/// same `frame` number; a hotkey is acted on once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameGui {
    pub frame: u64,
    /// Keyboard event being processed in this callback, if any.
    pub key: Option<KeyEvent>,
    /// Modifiers currently held.
    pub modifiers: Modifiers,
    /// A text field owns keyboard focus; hotkeys must not fire.
    pub text_field_focused: bool,
}

/// Callbacks a host invokes on the plugin.
pub trait EditorHooks {
    /// The host selection changed.
    fn on_selection_changed(&mut self, ctx: &mut EditorContext<'_>) -> Result<(), IsolateError>;

    /// A hierarchy or scene view is being drawn.
    fn on_frame_gui(
        &mut self,
        ctx: &mut EditorContext<'_>,
        frame: &FrameGui,
    ) -> Result<(), IsolateError>;

    /// The host entered or left play mode.
    fn on_play_mode_changed(
        &mut self,
        ctx: &mut EditorContext<'_>,
        mode: PlayMode,
    ) -> Result<(), IsolateError>;
}

/// Invocable commands registered with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandId {
    ToggleIsolate,
    ToggleHide,
}

impl CommandId {
    pub const ALL: [CommandId; 2] = [CommandId::ToggleIsolate, CommandId::ToggleHide];

    pub fn menu_path(self) -> &'static str {
        match self {
            Self::ToggleIsolate => "Tools/Toggle Isolate",
            Self::ToggleHide => "Tools/Toggle Hide",
        }
    }
}

/// Lets a hotkey through once per frame.
#[derive(Debug, Default)]
struct FrameGuard {
    last: Option<u64>,
}

impl FrameGuard {
    fn claim(&mut self, frame: u64) -> bool {
        if self.last == Some(frame) {
            return false;
        }
        self.last = Some(frame);
        true
    }
}

/// The isolate and hide commands bundled behind [`EditorHooks`].
#[derive(Debug)]
pub struct Isolationist {
    prefs: Preferences,
    isolate: IsolateCommand,
    isolate_guard: FrameGuard,
    hide_guard: FrameGuard,
    held: Modifiers,
}

impl Isolationist {
    pub fn new(prefs: Preferences) -> Self {
        Self {
            prefs,
            isolate: IsolateCommand::new(),
            isolate_guard: FrameGuard::default(),
            hide_guard: FrameGuard::default(),
            held: Modifiers::NONE,
        }
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn set_prefs(&mut self, prefs: Preferences) {
        self.prefs = prefs;
    }

    pub fn can_invoke(&self, command: CommandId, ctx: &EditorContext<'_>) -> bool {
        match command {
            CommandId::ToggleIsolate => self.isolate.can_toggle(ctx),
            CommandId::ToggleHide => ToggleHideCommand::can_execute(ctx),
        }
    }

    /// Runs a command as if picked from the menu. Disabled commands are
    /// ignored.
    pub fn invoke(
        &mut self,
        command: CommandId,
        ctx: &mut EditorContext<'_>,
    ) -> Result<(), IsolateError> {
        if !self.can_invoke(command, ctx) {
            log::debug!("{} is disabled", command.menu_path());
            return Ok(());
        }
        match command {
            CommandId::ToggleIsolate => {
                self.isolate.toggle(ctx)?;
            }
            CommandId::ToggleHide => {
                ToggleHideCommand::execute(ctx)?;
            }
        }
        Ok(())
    }
}

impl EditorHooks for Isolationist {
    fn on_selection_changed(&mut self, ctx: &mut EditorContext<'_>) -> Result<(), IsolateError> {
        let outcome = self.isolate.on_selection_changed(ctx, self.held.ctrl)?;
        log::debug!("selection changed: {outcome:?}");
        Ok(())
    }

    fn on_frame_gui(
        &mut self,
        ctx: &mut EditorContext<'_>,
        frame: &FrameGui,
    ) -> Result<(), IsolateError> {
        self.held = frame.modifiers;

        let Some(event) = frame.key else {
            return Ok(());
        };
        if frame.text_field_focused {
            log::debug!("hotkey {:?} skipped: text field has focus", event.key);
            return Ok(());
        }

        if self.prefs.isolate.matches(&event) {
            if self.isolate_guard.claim(frame.frame) {
                self.isolate.toggle(ctx)?;
            }
        } else if self.prefs.hide.matches(&event)
            && ctx.selection.primary().is_some()
            && self.hide_guard.claim(frame.frame)
        {
            ToggleHideCommand::execute(ctx)?;
        }
        Ok(())
    }

    fn on_play_mode_changed(
        &mut self,
        ctx: &mut EditorContext<'_>,
        mode: PlayMode,
    ) -> Result<(), IsolateError> {
        self.isolate.on_play_mode_changed(ctx, mode)
    }
}
