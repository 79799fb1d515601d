//! Scene graph arena.
//!
//! The host owns a forest of nodes; this module reproduces the parts of it
//! the editor commands depend on: parent/child links, the per-node active
//! flag and an editor-only marker.
//!
//! - [`SceneGraph`]: arena storing every node, addressed by [`NodeId`]
//! - [`Node`]: a single node's data
//! - [`Ancestors`]: iterator walking a node's parent chain

mod graph;

pub use graph::{Ancestors, Node, NodeId, SceneError, SceneGraph};
