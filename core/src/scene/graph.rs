use std::fmt;

/// Generational handle to a node in a [`SceneGraph`].
///
/// Layout: `u32 index` + `u32 generation`. When a slot is reused after a
/// despawn the generation is bumped, so handles to the old node stop
/// resolving instead of silently aliasing the new one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// Returns the slot index of this node.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Returns the generation of this node.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Errors produced by structural scene graph edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The handle does not refer to a live node.
    NotFound(NodeId),
    /// Re-parenting would make a node its own ancestor.
    Cycle { node: NodeId, parent: NodeId },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "node {id} not found"),
            Self::Cycle { node, parent } => {
                write!(f, "cannot parent {node} under its own descendant {parent}")
            }
        }
    }
}

impl std::error::Error for SceneError {}

/// A node in the scene forest.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    active: bool,
    flags: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Node belongs to the editor itself (gizmos, bookkeeping objects).
    /// Editor nodes are never hidden by the visibility commands.
    pub const EDITOR: u32 = 1 << 0;

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn flags(&self) -> u32 {
        self.flags
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena-backed forest of scene nodes.
///
/// Roots and children keep insertion order, matching the order a hierarchy
/// panel would display them in.
///
/// # Example
///
/// ```
/// use isolationist_core::scene::SceneGraph;
///
/// let mut graph = SceneGraph::new();
/// let a = graph.spawn("A");
/// let b = graph.spawn_child(a, "B").unwrap();
/// assert!(graph.is_ancestor_of(a, b));
/// assert_eq!(graph.parent(b), Some(a));
/// ```
#[derive(Default)]
pub struct SceneGraph {
    slots: Vec<Slot>,
    free: Vec<u32>,
    roots: Vec<NodeId>,
    len: usize,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self, node: Node) -> NodeId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Spawns an active root node.
    pub fn spawn(&mut self, name: impl Into<String>) -> NodeId {
        let id = self.allocate(Node {
            name: name.into(),
            active: true,
            flags: 0,
            parent: None,
            children: Vec::new(),
        });
        self.roots.push(id);
        id
    }

    /// Spawns an active node as the last child of `parent`.
    pub fn spawn_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
    ) -> Result<NodeId, SceneError> {
        if !self.is_alive(parent) {
            return Err(SceneError::NotFound(parent));
        }
        let id = self.allocate(Node {
            name: name.into(),
            active: true,
            flags: 0,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        Ok(id)
    }

    /// Returns the node behind `id`, if it is still alive.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn is_alive(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates over all live nodes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node.as_ref().map(|_| NodeId {
                index: index as u32,
                generation: slot.generation,
            })
        })
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(Node::name)
    }

    /// First live node (in slot order) with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.iter().find(|&id| self.name(id) == Some(name))
    }

    /// Returns the node's own active flag; `false` for dead handles.
    pub fn is_active(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_active)
    }

    /// Sets the node's active flag and returns the previous value, or `None`
    /// if the node is gone.
    pub fn set_active(&mut self, id: NodeId, active: bool) -> Option<bool> {
        let node = self.node_mut(id)?;
        Some(std::mem::replace(&mut node.active, active))
    }

    /// Marks a node as editor-only. See [`Node::EDITOR`].
    pub fn mark_editor(&mut self, id: NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.flags |= Node::EDITOR;
        }
    }

    pub fn is_editor(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.flags & Node::EDITOR != 0)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    /// Children of `id`; empty for leaves and dead handles.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Node::children).unwrap_or(&[])
    }

    /// All nodes sharing `id`'s parent, `id` included. For root nodes this
    /// is the root list.
    pub fn siblings(&self, id: NodeId) -> &[NodeId] {
        match self.parent(id) {
            Some(parent) => self.children(parent),
            None if self.is_alive(id) => self.roots.as_slice(),
            None => &[],
        }
    }

    /// Walks the parent chain of `id`, nearest parent first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            graph: self,
            next: self.parent(id),
        }
    }

    /// Returns `true` if `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.is_alive(node) {
            return false;
        }
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Two nodes are relatives when one is an ancestor of (or equal to) the other.
    pub fn is_relative(&self, a: NodeId, b: NodeId) -> bool {
        self.is_ancestor_of(a, b) || self.is_ancestor_of(b, a)
    }

    fn detach(&mut self, id: NodeId) {
        match self.parent(id) {
            Some(parent) => {
                if let Some(p) = self.node_mut(parent) {
                    p.children.retain(|&c| c != id);
                }
            }
            None => self.roots.retain(|&r| r != id),
        }
    }

    /// Moves `node` under `parent`, appending it to the parent's children.
    ///
    /// # Panics
    ///
    /// Panics if `node == parent` (cannot parent to self).
    pub fn set_parent(&mut self, node: NodeId, parent: NodeId) -> Result<(), SceneError> {
        assert_ne!(node, parent, "Cannot set node as its own parent: {node}");
        if !self.is_alive(node) {
            return Err(SceneError::NotFound(node));
        }
        if !self.is_alive(parent) {
            return Err(SceneError::NotFound(parent));
        }
        if self.is_ancestor_of(node, parent) {
            return Err(SceneError::Cycle { node, parent });
        }
        if self.parent(node) == Some(parent) {
            return Ok(());
        }

        self.detach(node);
        if let Some(n) = self.node_mut(node) {
            n.parent = Some(parent);
        }
        if let Some(p) = self.node_mut(parent) {
            p.children.push(node);
        }
        Ok(())
    }

    /// Turns `node` into a root. Does nothing if it already is one.
    pub fn remove_parent(&mut self, node: NodeId) {
        if self.parent(node).is_none() {
            return;
        }
        self.detach(node);
        if let Some(n) = self.node_mut(node) {
            n.parent = None;
        }
        self.roots.push(node);
    }

    /// Despawns `node` and all its descendants.
    pub fn despawn_recursive(&mut self, node: NodeId) {
        if !self.is_alive(node) {
            return;
        }
        self.detach(node);
        self.despawn_subtree(node);
    }

    fn despawn_subtree(&mut self, node: NodeId) {
        let children = self
            .node_mut(node)
            .map(|n| std::mem::take(&mut n.children))
            .unwrap_or_default();
        for child in children {
            self.despawn_subtree(child);
        }

        let slot = &mut self.slots[node.index as usize];
        slot.node = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(node.index);
        self.len -= 1;
    }
}

impl fmt::Debug for SceneGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneGraph")
            .field("len", &self.len)
            .field("roots", &self.roots)
            .finish()
    }
}

/// Iterator over a node's ancestors, see [`SceneGraph::ancestors`].
pub struct Ancestors<'a> {
    graph: &'a SceneGraph,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.graph.parent(current);
        Some(current)
    }
}
