//! Abstract editor framework for reversible editing operations.
//!
//! The host editor's undo stack is modelled here so that every visibility
//! change made by the isolate and hide commands can be reverted by a global
//! undo. Nothing in this module knows about scene nodes; the editor crate
//! implements concrete actions against its own editable scene type.
//!
//! - [`Editable`]: marker trait for types that can be edited
//! - [`EditAction`]: an edit operation (Command pattern)
//! - [`EditActionHistory`]: undo/redo stack managing action sequences
//!
//! # Recorded vs non-recorded actions
//!
//! Actions are **recorded** in the undo/redo history by default. Override
//! [`EditAction::is_recorded`] to return `false` for transient changes such
//! as the visibility flip performed when the host enters play mode. Such an
//! action can also [break the merge chain](EditAction::breaks_merge) so the
//! next recorded action starts a fresh undo entry.

mod action;
mod history;

pub use action::{AsAny, EditAction, EditActionError, EditActionResult, Editable};
pub use history::{DEFAULT_MAX_UNDO, EditActionHistory};
