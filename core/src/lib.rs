//! # Isolationist Core
//!
//! Building blocks shared by the isolate/hide editor commands: the scene
//! graph arena, platform-agnostic input types and the undo/redo history.

pub mod abstract_editor;
pub mod input;
pub mod scene;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
