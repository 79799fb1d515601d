//! Editable targets and reversible editor actions.
//!
//! Each [`EditAction`] stores whatever it needs to revert itself: for the
//! visibility commands that is the list of touched nodes together with the
//! flag each one had before the action ran.

use std::any::Any;
use std::fmt;

/// Helper trait for downcasting trait objects to concrete types.
///
/// Blanket-implemented for every `'static` type so [`EditAction::merge`]
/// can inspect the concrete type of the incoming action.
pub trait AsAny: 'static {
    /// Returns a reference to `self` as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl<T: 'static> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Marker trait for types that serve as editing targets.
pub trait Editable: 'static {}

/// Error type for action execution failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditActionError {
    /// The target object was not found.
    TargetNotFound(String),
    /// The target is in an invalid state for this action.
    InvalidState(String),
    /// Undo or redo was requested with an empty stack.
    EmptyStack(&'static str),
}

impl fmt::Display for EditActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetNotFound(msg) => write!(f, "target not found: {msg}"),
            Self::InvalidState(msg) => write!(f, "invalid state: {msg}"),
            Self::EmptyStack(what) => write!(f, "nothing to {what}"),
        }
    }
}

impl std::error::Error for EditActionError {}

/// Result type for action operations.
pub type EditActionResult<T = ()> = Result<T, EditActionError>;

/// A reversible editor action (Command pattern).
///
/// The action is responsible for capturing the state it overwrites during
/// [`apply`](Self::apply) so that [`undo`](Self::undo) can put it back.
/// This is how "record the object before mutating it" is expressed here.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug)]
/// struct Rename {
///     node: NodeId,
///     old: Option<String>,
///     new: String,
/// }
///
/// impl EditAction<SceneGraph> for Rename {
///     fn apply(&mut self, graph: &mut SceneGraph) -> EditActionResult {
///         self.old = graph.rename(self.node, self.new.clone());
///         Ok(())
///     }
///
///     fn undo(&mut self, graph: &mut SceneGraph) -> EditActionResult {
///         graph.rename(self.node, self.old.take().unwrap_or_default());
///         Ok(())
///     }
///
///     fn description(&self) -> &str {
///         "Rename"
///     }
/// }
/// ```
pub trait EditAction<T: Editable>: fmt::Debug + AsAny + Send {
    /// Applies the action to the target (forward / redo direction).
    fn apply(&mut self, target: &mut T) -> EditActionResult;

    /// Reverses the action. Must restore the state seen by the last
    /// [`apply`](Self::apply).
    fn undo(&mut self, target: &mut T) -> EditActionResult;

    /// A short, human-readable description for display in the edit menu,
    /// e.g. `"Isolate"` or `"Hide 3 Objects"`.
    fn description(&self) -> &str;

    /// Tries to merge `other` into `self`, taking ownership.
    ///
    /// Returns `None` when `other` was absorbed, or hands it back unchanged.
    /// Returns `Some(other)` by default (no merging).
    ///
    /// Downcast through the trait object, `(*other).as_any()`; calling
    /// `as_any` on the box itself yields the `Box` type.
    fn merge(&mut self, other: Box<dyn EditAction<T>>) -> Option<Box<dyn EditAction<T>>> {
        Some(other)
    }

    /// Whether this action is recorded in the undo/redo history.
    ///
    /// Default: `true`.
    fn is_recorded(&self) -> bool {
        true
    }

    /// Whether executing this (non-recorded) action prevents the next
    /// recorded action from merging with the previous undo entry.
    ///
    /// Default: `false`.
    fn breaks_merge(&self) -> bool {
        false
    }
}
