//! Arena-based scene graph storage.
//!
//! The SceneTree stores every renderable node in a dense `Vec` with a sparse
//! map from stable [`NodeId`]s to dense slots.
//!
//! ## Key Features
//!
//! - **Generational Indices**: NodeId contains index + generation, so a handle
//!   kept by an animation track, a timer or a pending asset load stops
//!   resolving the moment its node is unmounted, even if the slot is reused.
//!
//! - **Dense Storage**: Nodes stored contiguously for cheap per-frame
//!   iteration by the animator.
//!
//! - **Swap-Remove**: O(1) removal without creating holes in dense storage.
//!
//! - **Subtree Unmount**: Removing a node removes its whole subtree.

use super::node::SceneNode;
use crate::math::Vec3;

/// Unique identifier for a node in the scene tree.
///
/// Uses a generational index design:
/// - `index`: Position in the sparse array (reusable after removal)
/// - `generation`: Version counter that increments when a slot is reused
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Convert to a u64 for external use (e.g., backend object handles).
    /// Combines generation (high bits) with index (low bits).
    pub fn as_u64(self) -> u64 {
        ((self.generation as u64) << 32) | (self.index as u64)
    }
}

/// Entry in the sparse map, pointing to a dense array slot.
struct SparseEntry {
    /// Index into the dense array
    dense_index: usize,
    /// Generation of this entry (for validation)
    generation: u32,
}

/// A slot in the tree: the node plus its hierarchy links.
struct Slot {
    node: SceneNode,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Back-pointer to sparse array index (for swap-remove fixup)
    sparse_index: u32,
}

/// Retained scene graph using arena-based sparse-set storage.
pub struct SceneTree {
    dense: Vec<Slot>,
    sparse: Vec<Option<SparseEntry>>,
    free_indices: Vec<u32>,
    /// Last generation handed out per sparse slot, kept after removal
    generations: Vec<u32>,
}

impl SceneTree {
    pub fn new() -> Self {
        Self {
            dense: Vec::new(),
            sparse: Vec::new(),
            free_indices: Vec::new(),
            generations: Vec::new(),
        }
    }

    /// Mount a root-level node.
    pub fn insert(&mut self, node: SceneNode) -> NodeId {
        let (sparse_index, generation) = if let Some(idx) = self.free_indices.pop() {
            // Reuse a freed slot - bump its generation
            let generation = self.generations[idx as usize].wrapping_add(1);
            self.generations[idx as usize] = generation;
            (idx, generation)
        } else {
            let idx = self.sparse.len() as u32;
            self.sparse.push(None);
            self.generations.push(0);
            (idx, 0)
        };

        let dense_index = self.dense.len();
        self.dense.push(Slot {
            node,
            parent: None,
            children: Vec::new(),
            sparse_index,
        });
        self.sparse[sparse_index as usize] = Some(SparseEntry {
            dense_index,
            generation,
        });

        NodeId::new(sparse_index, generation)
    }

    /// Mount a node under `parent`. Falls back to a root node when the
    /// parent is already gone.
    pub fn insert_child(&mut self, parent: NodeId, node: SceneNode) -> NodeId {
        let id = self.insert(node);
        if self.contains(parent) {
            self.set_parent(id, parent);
        }
        id
    }

    /// Unmount a node and its whole subtree.
    ///
    /// Stale ids are ignored. Returns the number of nodes removed.
    pub fn remove(&mut self, id: NodeId) -> usize {
        if !self.contains(id) {
            return 0;
        }

        // Detach from parent first
        if let Some(parent_id) = self.parent(id) {
            if let Some(parent_dense) = self.dense_index(parent_id) {
                self.dense[parent_dense].children.retain(|&c| c != id);
            }
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(dense_index) = self.dense_index(current) else {
                continue;
            };
            stack.extend(self.dense[dense_index].children.iter().copied());

            let last_dense_index = self.dense.len() - 1;
            self.dense.swap_remove(dense_index);

            // Fix up the moved slot's sparse entry
            if dense_index != last_dense_index {
                let moved_sparse_idx = self.dense[dense_index].sparse_index;
                if let Some(ref mut entry) = self.sparse[moved_sparse_idx as usize] {
                    entry.dense_index = dense_index;
                }
            }

            self.sparse[current.index as usize] = None;
            self.free_indices.push(current.index);
            removed += 1;
        }

        log::debug!("unmounted {} scene node(s)", removed);
        removed
    }

    /// Get the dense array index for a NodeId, validating generation.
    fn dense_index(&self, id: NodeId) -> Option<usize> {
        self.sparse
            .get(id.index as usize)
            .and_then(|e| e.as_ref())
            .filter(|e| e.generation == id.generation)
            .map(|e| e.dense_index)
    }

    /// Whether the node is still mounted.
    pub fn contains(&self, id: NodeId) -> bool {
        self.dense_index(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.dense_index(id).map(|idx| &self.dense[idx].node)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.dense_index(id).map(move |idx| &mut self.dense[idx].node)
    }

    /// Re-parent `child` under `parent`.
    pub fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        if child == parent || !self.contains(parent) {
            return;
        }
        // Reject parents below the child
        let mut cursor = self.parent(parent);
        while let Some(ancestor) = cursor {
            if ancestor == child {
                log::warn!("set_parent: {:?} is a descendant of {:?}", parent, child);
                return;
            }
            cursor = self.parent(ancestor);
        }
        let Some(child_dense) = self.dense_index(child) else {
            return;
        };

        if let Some(old_parent) = self.dense[child_dense].parent {
            if let Some(old_dense) = self.dense_index(old_parent) {
                self.dense[old_dense].children.retain(|&c| c != child);
            }
        }
        self.dense[child_dense].parent = Some(parent);

        if let Some(parent_dense) = self.dense_index(parent) {
            let children = &mut self.dense[parent_dense].children;
            if !children.contains(&child) {
                children.push(child);
            }
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.dense_index(id).and_then(|idx| self.dense[idx].parent)
    }

    /// Children in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.dense_index(id)
            .map(|idx| self.dense[idx].children.as_slice())
            .unwrap_or(&[])
    }

    /// World-space position: local positions accumulated up the parent
    /// chain, each scaled by the ancestors' scale.
    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        let node = self.get(id)?;
        let mut position = node.transform.position;
        let mut current = self.parent(id);
        while let Some(parent_id) = current {
            let Some(parent) = self.get(parent_id) else {
                break;
            };
            let s = parent.transform.scale;
            position = Vec3::new(position.x * s.x, position.y * s.y, position.z * s.z)
                + parent.transform.position;
            current = self.parent(parent_id);
        }
        Some(position)
    }

    /// Visit every mounted node.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.dense.iter().map(|slot| {
            let idx = slot.sparse_index;
            (NodeId::new(idx, self.generations[idx as usize]), &slot.node)
        })
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    pub fn clear(&mut self) {
        // Bump every live generation so handles held elsewhere go stale
        for slot in &self.dense {
            let idx = slot.sparse_index as usize;
            self.sparse[idx] = None;
            self.free_indices.push(slot.sparse_index);
        }
        self.dense.clear();
    }
}

impl Default for SceneTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(label: &str) -> SceneNode {
        SceneNode::new(label)
    }

    #[test]
    fn test_insert_remove() {
        let mut tree = SceneTree::new();
        let id = tree.insert(node("a"));
        assert!(tree.contains(id));
        assert_eq!(tree.remove(id), 1);
        assert!(!tree.contains(id));
        assert_eq!(tree.remove(id), 0);
    }

    #[test]
    fn test_generational_index() {
        let mut tree = SceneTree::new();
        let id1 = tree.insert(node("a"));
        tree.remove(id1);
        let id2 = tree.insert(node("b"));

        assert!(!tree.contains(id1));
        assert!(tree.contains(id2));
        assert_eq!(id1.index, id2.index);
        assert_ne!(id1.generation, id2.generation);
        assert!(tree.get(id1).is_none());
    }

    #[test]
    fn test_clear_invalidates_handles() {
        let mut tree = SceneTree::new();
        let id = tree.insert(node("a"));
        tree.clear();
        let reused = tree.insert(node("b"));
        assert!(!tree.contains(id));
        assert!(tree.contains(reused));
    }

    #[test]
    fn test_remove_subtree() {
        let mut tree = SceneTree::new();
        let root = tree.insert(node("root"));
        let child = tree.insert_child(root, node("child"));
        let grandchild = tree.insert_child(child, node("grandchild"));
        let other = tree.insert(node("other"));

        assert_eq!(tree.remove(child), 2);
        assert!(tree.contains(root));
        assert!(!tree.contains(child));
        assert!(!tree.contains(grandchild));
        assert!(tree.contains(other));
        assert!(tree.children(root).is_empty());
    }

    #[test]
    fn test_swap_remove_fixup() {
        let mut tree = SceneTree::new();
        let id1 = tree.insert(node("1"));
        let id2 = tree.insert(node("2"));
        let id3 = tree.insert(node("3"));

        tree.remove(id1);

        assert_eq!(tree.get(id2).map(|n| n.label.as_str()), Some("2"));
        assert_eq!(tree.get(id3).map(|n| n.label.as_str()), Some("3"));
        assert_eq!(tree.iter().count(), 2);
    }

    #[test]
    fn test_world_position() {
        let mut tree = SceneTree::new();
        let group = tree.insert(node("group").at(Vec3::new(0.0, -10.8, 6.0)));
        let item = tree.insert_child(group, node("item").at(Vec3::new(1.5, 0.0, 0.0)));
        assert_eq!(tree.world_position(item), Some(Vec3::new(1.5, -10.8, 6.0)));
    }

    #[test]
    fn test_reparent_under_descendant_rejected() {
        let mut tree = SceneTree::new();
        let root = tree.insert(node("root").at(Vec3::new(1.0, 0.0, 0.0)));
        let mid = tree.insert_child(root, node("mid"));
        let leaf = tree.insert_child(mid, node("leaf"));

        tree.set_parent(root, leaf);
        tree.set_parent(root, root);
        assert_eq!(tree.parent(root), None);
        assert!(tree.children(leaf).is_empty());
        assert_eq!(tree.world_position(leaf), Some(Vec3::new(1.0, 0.0, 0.0)));

        // Moving a leaf under a sibling branch is still allowed
        let other = tree.insert_child(root, node("other"));
        tree.set_parent(leaf, other);
        assert_eq!(tree.parent(leaf), Some(other));
        assert!(tree.children(mid).is_empty());
    }

    #[test]
    fn test_iter_reports_live_ids() {
        let mut tree = SceneTree::new();
        let a = tree.insert(node("a"));
        let b = tree.insert(node("b"));
        tree.remove(a);
        let c = tree.insert(node("c"));
        let ids: Vec<NodeId> = tree.iter().map(|(id, _)| id).collect();
        assert!(ids.contains(&b));
        assert!(ids.contains(&c));
        assert!(!ids.contains(&a));
    }
}
