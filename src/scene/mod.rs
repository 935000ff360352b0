//! Retained scene graph handed to the rendering engine every frame.

mod node;
mod tree;

pub use node::{AnimatedTransform, NodeKind, Outline, SceneNode};
pub use tree::{NodeId, SceneTree};
