//! # Isolationist editor commands
//!
//! "Isolate" and "hide" commands for a scene hierarchy editor.
//!
//! - **Isolate** keeps the selected nodes (plus their ancestors and
//!   descendants) visible and deactivates everything else. Ctrl-selecting
//!   more nodes while isolated widens the focus; selecting something
//!   unrelated, or pressing the hotkey again, restores the scene.
//! - **Hide** flips the active flag of the current selection.
//!
//! Every visibility change goes through the host's
//! [`EditActionHistory`](isolationist_core::abstract_editor::EditActionHistory).
//! The running isolation is stored in the same [`EditorScene`] as the node
//! flags, so a global undo reverts the flags and the session together.
//!
//! Hosts drive everything through [`EditorHooks`] on an [`Isolationist`]
//! instance:
//!
//! ```
//! use isolationist_core::scene::SceneGraph;
//! use isolationist_editor::{
//!     CommandId, EditorContext, EditorScene, History, Isolationist, Preferences, Selection,
//! };
//!
//! let mut graph = SceneGraph::new();
//! let a = graph.spawn("A");
//! let b = graph.spawn_child(a, "B").unwrap();
//! let c = graph.spawn_child(a, "C").unwrap();
//! let mut scene = EditorScene::new(graph);
//! let mut history = History::default();
//! let selection = Selection::single(b);
//!
//! let mut plugin = Isolationist::new(Preferences::default());
//! let mut ctx = EditorContext::new(&mut scene, &mut history, &selection);
//! plugin.invoke(CommandId::ToggleIsolate, &mut ctx).unwrap();
//! assert!(scene.is_isolated());
//! assert!(!scene.graph.is_active(c));
//!
//! history.undo(&mut scene).unwrap();
//! assert!(!scene.is_isolated());
//! assert!(scene.graph.is_active(c));
//! ```

mod actions;
mod context;
mod error;
mod hide;
mod hide_set;
mod host;
mod hotkey;
mod isolate;
mod prefs;
pub mod scenario;
mod scene;
mod selection;
mod session;

use isolationist_core::abstract_editor::EditActionHistory;

pub use actions::SetActiveAction;
pub use context::{EditorContext, PlayMode};
pub use error::{IsolateError, PrefsError};
pub use hide::ToggleHideCommand;
pub use hide_set::{can_hide, compute_hide_set, is_focus_relative};
pub use host::{CommandId, EditorHooks, FrameGui, Isolationist};
pub use hotkey::HotKey;
pub use isolate::{IsolateCommand, IsolationState, Outcome, SkipReason};
pub use prefs::Preferences;
pub use scene::EditorScene;
pub use selection::{Selection, SelectionTracker};
pub use session::IsolationSession;

/// Undo/redo history over the editor scene, as owned by the host editor.
pub type History = EditActionHistory<EditorScene>;
