use crate::actions::SetActiveAction;
use crate::context::EditorContext;
use crate::error::IsolateError;

/// Flips the active flag of the whole selection.
///
/// Every selected node receives the negation of the *primary* node's flag,
/// so a mixed selection ends up uniformly hidden or uniformly shown.
#[derive(Debug, Default, Clone, Copy)]
pub struct ToggleHideCommand;

impl ToggleHideCommand {
    /// Menu enablement: a selection exists or an isolation is running.
    pub fn can_execute(ctx: &EditorContext<'_>) -> bool {
        !ctx.selection.is_empty() || ctx.is_isolated()
    }

    /// Runs the toggle. Returns the undo entry name, or `None` if there was
    /// nothing to toggle.
    pub fn execute(ctx: &mut EditorContext<'_>) -> Result<Option<String>, IsolateError> {
        let Some(primary) = ctx.selection.primary() else {
            log::warn!("Toggle hide: nothing selected");
            return Ok(None);
        };
        if !ctx.scene.graph.is_alive(primary) {
            log::warn!("Toggle hide: primary selection {primary} no longer exists");
            return Ok(None);
        }

        let was_active = ctx.scene.graph.is_active(primary);
        let verb = if was_active { "Hide" } else { "Unhide" };
        let undo_name = match ctx.selection.len() {
            1 => format!("{verb} {}", ctx.scene.graph.name(primary).unwrap_or_default()),
            n => format!("{verb} {n} Objects"),
        };

        let action = SetActiveAction::all(
            ctx.selection.nodes().iter().copied(),
            !was_active,
            undo_name.clone(),
        );
        ctx.history.execute(Box::new(action), ctx.scene)?;

        log::info!("{undo_name}");
        Ok(Some(undo_name))
    }
}
