//! Headless replay of editor sessions.
//!
//! A scenario is a TOML file describing a scene forest and a list of user
//! steps. [`Replay`] plays the role of the host editor: it owns the scene,
//! the selection and the undo history and feeds the steps to an
//! [`Isolationist`] through [`EditorHooks`].
//!
//! ```toml
//! [[node]]
//! name = "A"
//! children = [{ name = "B" }, { name = "C" }]
//!
//! [[node]]
//! name = "D"
//!
//! [[step]]
//! do = "select"
//! nodes = ["B"]
//!
//! [[step]]
//! do = "key"
//! key = "I"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use isolationist_core::input::{KeyCode, KeyEvent, Modifiers};
use isolationist_core::scene::{NodeId, SceneError, SceneGraph};
use serde::Deserialize;
use thiserror::Error;

use crate::History;
use crate::context::{EditorContext, PlayMode};
use crate::error::IsolateError;
use crate::host::{CommandId, EditorHooks, FrameGui, Isolationist};
use crate::prefs::Preferences;
use crate::scene::EditorScene;
use crate::selection::Selection;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown node \"{0}\"")]
    UnknownNode(String),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Isolate(#[from] IsolateError),
}

fn active_by_default() -> bool {
    true
}

/// A node and its subtree.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeDef {
    pub name: String,
    #[serde(default = "active_by_default")]
    pub active: bool,
    /// Editor-owned node, never hidden.
    #[serde(default)]
    pub editor: bool,
    #[serde(default)]
    pub children: Vec<NodeDef>,
}

/// One user interaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "do", rename_all = "snake_case")]
pub enum Step {
    /// Replace the selection; `ctrl` is held while clicking.
    Select {
        nodes: Vec<String>,
        #[serde(default)]
        ctrl: bool,
    },
    /// Release a key in the hierarchy view.
    Key {
        key: KeyCode,
        #[serde(default)]
        alt: bool,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        text_field: bool,
    },
    /// Pick a command from the menu.
    Invoke { command: CommandId },
    Play,
    Stop,
    Undo,
    Redo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeDef>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_toml_str(content: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

/// A minimal host editor driven by scenario steps.
pub struct Replay {
    scene: EditorScene,
    history: History,
    selection: Selection,
    play_mode: PlayMode,
    plugin: Isolationist,
    frame: u64,
}

impl Replay {
    pub fn new(scenario: &Scenario) -> Result<Self, ScenarioError> {
        let mut graph = SceneGraph::new();
        for def in &scenario.nodes {
            spawn_node(&mut graph, None, def)?;
        }
        Ok(Self {
            scene: EditorScene::new(graph),
            history: History::default(),
            selection: Selection::empty(),
            play_mode: PlayMode::Editing,
            plugin: Isolationist::new(scenario.preferences),
            frame: 0,
        })
    }

    pub fn scene(&self) -> &EditorScene {
        &self.scene
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.scene.graph
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn plugin(&self) -> &Isolationist {
        &self.plugin
    }

    pub fn set_preferences(&mut self, prefs: Preferences) {
        self.plugin.set_prefs(prefs);
    }

    pub fn node(&self, name: &str) -> Result<NodeId, ScenarioError> {
        self.scene
            .graph
            .find_by_name(name)
            .ok_or_else(|| ScenarioError::UnknownNode(name.to_owned()))
    }

    pub fn run(&mut self, steps: &[Step]) -> Result<(), ScenarioError> {
        for step in steps {
            self.step(step)?;
        }
        Ok(())
    }

    pub fn step(&mut self, step: &Step) -> Result<(), ScenarioError> {
        log::debug!("step: {step:?}");
        match step {
            Step::Select { nodes, ctrl } => {
                let ids = nodes
                    .iter()
                    .map(|name| self.node(name))
                    .collect::<Result<Vec<_>, _>>()?;
                let modifiers = Modifiers {
                    ctrl: *ctrl,
                    ..Modifiers::NONE
                };
                // The click itself is a GUI frame carrying the held modifiers.
                self.frame(None, modifiers, false)?;
                self.selection = Selection::new(ids);
                let (mut ctx, plugin) = self.split();
                plugin.on_selection_changed(&mut ctx)?;
            }
            Step::Key {
                key,
                alt,
                ctrl,
                shift,
                text_field,
            } => {
                let modifiers = Modifiers {
                    alt: *alt,
                    ctrl: *ctrl,
                    shift: *shift,
                };
                self.frame(
                    Some(KeyEvent::released(*key, modifiers)),
                    modifiers,
                    *text_field,
                )?;
            }
            Step::Invoke { command } => {
                let (mut ctx, plugin) = self.split();
                plugin.invoke(*command, &mut ctx)?;
            }
            Step::Play => self.set_play_mode(PlayMode::Playing)?,
            Step::Stop => self.set_play_mode(PlayMode::Editing)?,
            Step::Undo => {
                if let Err(e) = self.history.undo(&mut self.scene) {
                    log::warn!("undo: {e}");
                }
            }
            Step::Redo => {
                if let Err(e) = self.history.redo(&mut self.scene) {
                    log::warn!("redo: {e}");
                }
            }
        }
        Ok(())
    }

    /// Renders the forest with one line per node, `[x]` for active nodes.
    pub fn render_tree(&self) -> String {
        SceneTree(&self.scene.graph).to_string()
    }

    fn split(&mut self) -> (EditorContext<'_>, &mut Isolationist) {
        let ctx = EditorContext::new(&mut self.scene, &mut self.history, &self.selection)
            .with_play_mode(self.play_mode);
        (ctx, &mut self.plugin)
    }

    /// Delivers one GUI frame the way a host does: once for the hierarchy
    /// view and once for the scene view.
    fn frame(
        &mut self,
        key: Option<KeyEvent>,
        modifiers: Modifiers,
        text_field_focused: bool,
    ) -> Result<(), IsolateError> {
        self.frame += 1;
        let gui = FrameGui {
            frame: self.frame,
            key,
            modifiers,
            text_field_focused,
        };
        for _view in ["hierarchy", "scene"] {
            let (mut ctx, plugin) = self.split();
            plugin.on_frame_gui(&mut ctx, &gui)?;
        }
        Ok(())
    }

    fn set_play_mode(&mut self, mode: PlayMode) -> Result<(), IsolateError> {
        self.play_mode = mode;
        let (mut ctx, plugin) = self.split();
        plugin.on_play_mode_changed(&mut ctx, mode)
    }
}

/// Indented outline of a scene forest.
struct SceneTree<'a>(&'a SceneGraph);

impl SceneTree<'_> {
    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, node: NodeId, depth: usize) -> fmt::Result {
        let graph = self.0;
        let mark = if graph.is_active(node) { 'x' } else { ' ' };
        let name = graph.name(node).unwrap_or_default();
        writeln!(f, "{:indent$}[{mark}] {name}", "", indent = depth * 2)?;
        for &child in graph.children(node) {
            self.fmt_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for SceneTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &root in self.0.roots() {
            self.fmt_node(f, root, 0)?;
        }
        Ok(())
    }
}

fn spawn_node(
    graph: &mut SceneGraph,
    parent: Option<NodeId>,
    def: &NodeDef,
) -> Result<NodeId, SceneError> {
    let id = match parent {
        Some(parent) => graph.spawn_child(parent, def.name.as_str())?,
        None => graph.spawn(def.name.as_str()),
    };
    graph.set_active(id, def.active);
    if def.editor {
        graph.mark_editor(id);
    }
    for child in &def.children {
        spawn_node(graph, Some(id), child)?;
    }
    Ok(id)
}
