//! The isolate command: a two-state machine over the scene's session.

use crate::context::{EditorContext, PlayMode};
use crate::error::IsolateError;
use crate::selection::SelectionTracker;
use crate::session::IsolationSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationState {
    Idle,
    Isolating,
}

/// Why a command invocation left the scene untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NothingSelected,
    NothingToIsolate,
    NotIsolated,
    SelectionUnchanged,
    /// Ctrl-selection added nothing outside the current focus.
    NoNewFocus,
    /// A plain selection inside the focus chain keeps the isolation running.
    RelatedSelection,
}

/// Result of driving the isolate state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Started { focus: usize, hidden: usize },
    Updated { focus: usize, hidden: usize },
    Ended { restored: usize },
    Skipped(SkipReason),
}

/// Drives the lifecycle of the session stored in
/// [`EditorScene`](crate::EditorScene).
///
/// Every transition is a single [`SetActiveAction`](crate::SetActiveAction)
/// that changes the node flags and swaps the session together, so host undo
/// and redo keep both in step.
#[derive(Debug, Default)]
pub struct IsolateCommand {
    tracker: SelectionTracker,
}

impl IsolateCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Menu enablement: something to isolate, or an isolation to end.
    pub fn can_toggle(&self, ctx: &EditorContext<'_>) -> bool {
        !ctx.selection.is_empty() || ctx.is_isolated()
    }

    /// Hotkey / menu entry point: ends a running isolation, otherwise starts
    /// one from the current selection.
    pub fn toggle(&mut self, ctx: &mut EditorContext<'_>) -> Result<Outcome, IsolateError> {
        if ctx.is_isolated() {
            self.end(ctx)
        } else {
            self.start(ctx)
        }
    }

    /// Isolates the current selection.
    pub fn start(&mut self, ctx: &mut EditorContext<'_>) -> Result<Outcome, IsolateError> {
        if ctx.is_isolated() {
            log::warn!("Isolationist: found a previous isolation session, ending it first");
            self.end(ctx)?;
        }

        if ctx.selection.is_empty() {
            log::warn!("Isolationist: nothing selected");
            return Ok(Outcome::Skipped(SkipReason::NothingSelected));
        }

        if ctx.play_mode.is_playing() {
            log::warn!("Isolationist: isolating while playing, visibility changes may not stick");
        }

        let graph = &ctx.scene.graph;
        let Some(session) = IsolationSession::begin(graph, ctx.selection.nodes().to_vec()) else {
            log::warn!("Isolationist: nothing to isolate");
            return Ok(Outcome::Skipped(SkipReason::NothingToIsolate));
        };

        let (focus, hidden) = (session.focus().len(), session.hidden().len());
        let action = session
            .hide_action(graph, "Isolate")
            .with_session(Some(session));
        ctx.history.execute(Box::new(action), ctx.scene)?;

        log::info!("Isolate: {focus} focused, {hidden} hidden");
        self.tracker.prime(ctx.selection);
        Ok(Outcome::Started { focus, hidden })
    }

    /// Restores every hidden node and discards the session.
    pub fn end(&mut self, ctx: &mut EditorContext<'_>) -> Result<Outcome, IsolateError> {
        let Some(session) = ctx.scene.isolation() else {
            return Ok(Outcome::Skipped(SkipReason::NotIsolated));
        };

        let restored = session.hidden().len();
        let action = session.show_action("DeIsolate").with_session(None);
        ctx.history.execute(Box::new(action), ctx.scene)?;

        log::info!("DeIsolate: {restored} restored");
        self.tracker.reset();
        Ok(Outcome::Ended { restored })
    }

    /// Reacts to a selection change while isolated.
    ///
    /// With `extend` (the Ctrl modifier) newly selected nodes join the focus
    /// set; consecutive extensions fold into one undo step. Without it,
    /// selecting a node unrelated to the focus ends the isolation and
    /// anything else is ignored.
    pub fn on_selection_changed(
        &mut self,
        ctx: &mut EditorContext<'_>,
        extend: bool,
    ) -> Result<Outcome, IsolateError> {
        let Some(session) = ctx.scene.isolation() else {
            return Ok(Outcome::Skipped(SkipReason::NotIsolated));
        };
        let Some(added) = self.tracker.observe(ctx.selection) else {
            return Ok(Outcome::Skipped(SkipReason::SelectionUnchanged));
        };

        let graph = &ctx.scene.graph;
        if !extend {
            let unrelated = ctx.selection.primary().is_some_and(|node| {
                graph.is_alive(node)
                    && !graph.is_editor(node)
                    && !session.is_focus_relative(graph, node)
            });
            if unrelated {
                return self.end(ctx);
            }
            return Ok(Outcome::Skipped(SkipReason::RelatedSelection));
        }

        let mut next = session.clone();
        let Some(action) = next.extend_focus(graph, &added) else {
            return Ok(Outcome::Skipped(SkipReason::NoNewFocus));
        };

        let (focus, hidden) = (next.focus().len(), next.hidden().len());
        let action = action.with_session(Some(next)).coalescing();
        ctx.history.execute(Box::new(action), ctx.scene)?;

        log::info!("Isolate: focus grew to {focus}, {hidden} hidden");
        Ok(Outcome::Updated { focus, hidden })
    }

    /// Entering play mode shows everything; returning to edit mode hides the
    /// isolated set again. Neither flip is recorded for undo.
    pub fn on_play_mode_changed(
        &mut self,
        ctx: &mut EditorContext<'_>,
        mode: PlayMode,
    ) -> Result<(), IsolateError> {
        let Some(session) = ctx.scene.isolation() else {
            return Ok(());
        };
        let action = match mode {
            PlayMode::Playing => session.show_action("Show isolated"),
            PlayMode::Editing => session.hide_action(&ctx.scene.graph, "Hide isolated"),
        }
        .transient();
        log::debug!("Isolate: play mode {mode:?}, {} nodes", action.changes().len());
        ctx.history.execute(Box::new(action), ctx.scene)?;
        Ok(())
    }
}
