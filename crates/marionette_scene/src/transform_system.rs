//! Transform System
//!
//! Resolves world matrices for the joint hierarchy. Decoupled from [`Scene`](crate::Scene)
//! so that it only borrows the node arena and the root list.
//!
//! Per tick, all joint updates (animation writes, joint integrators, locomotion) happen
//! first; the hierarchy pass then runs once, parents strictly before children. A node's
//! world matrix is only recomputed when its local transform or an ancestor changed.

use glam::Affine3A;
use slotmap::SlotMap;

use crate::NodeHandle;
use crate::node::Node;

/// (node, parent world matrix, parent changed)
type Pending = (NodeHandle, Affine3A, bool);

/// Updates world matrices for every tree reachable from `roots`.
pub fn update_hierarchy(nodes: &mut SlotMap<NodeHandle, Node>, roots: &[NodeHandle]) {
    let mut stack: Vec<Pending> = Vec::with_capacity(64);
    for &root_handle in roots.iter().rev() {
        stack.push((root_handle, Affine3A::IDENTITY, false));
    }
    propagate(nodes, stack);
}

/// Updates the subtree rooted at `root_handle`, taking the parent's current world
/// matrix as given.
pub fn update_subtree(nodes: &mut SlotMap<NodeHandle, Node>, root_handle: NodeHandle) {
    let Some(node) = nodes.get(root_handle) else {
        return;
    };

    let parent_world = node
        .parent
        .and_then(|parent_handle| nodes.get(parent_handle))
        .map_or(Affine3A::IDENTITY, |p| p.transform.world_matrix);

    if let Some(node) = nodes.get_mut(root_handle) {
        node.transform.mark_dirty();
    }

    propagate(nodes, vec![(root_handle, parent_world, true)]);
}

/// Walks down from the seeded entries, parents before children.
///
/// Uses an explicit stack instead of recursion so deep chains cannot overflow.
fn propagate(nodes: &mut SlotMap<NodeHandle, Node>, mut stack: Vec<Pending>) {
    while let Some((node_handle, parent_world_matrix, parent_changed)) = stack.pop() {
        let Some(node) = nodes.get_mut(node_handle) else {
            continue;
        };

        let local_changed = node.transform.update_local_matrix();
        let world_needs_update = local_changed || parent_changed;

        if world_needs_update {
            let new_world = parent_world_matrix * *node.transform.local_matrix();
            node.transform.set_world_matrix(new_world);
        }

        let current_world = node.transform.world_matrix;

        // Reverse order keeps siblings processed first-to-last
        for &child_handle in node.children.iter().rev() {
            stack.push((child_handle, current_world, world_needs_update));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_hierarchy_update() {
        let mut nodes: SlotMap<NodeHandle, Node> = SlotMap::with_key();

        let mut parent = Node::new("parent");
        parent.transform.position = Vec3::new(1.0, 0.0, 0.0);
        let parent_handle = nodes.insert(parent);

        let mut child = Node::new("child");
        child.transform.position = Vec3::new(0.0, 1.0, 0.0);
        child.parent = Some(parent_handle);
        let child_handle = nodes.insert(child);

        nodes.get_mut(parent_handle).unwrap().children.push(child_handle);

        update_hierarchy(&mut nodes, &[parent_handle]);

        let child_world_pos = nodes.get(child_handle).unwrap().transform.world_matrix.translation;
        assert!((child_world_pos.x - 1.0).abs() < 1e-5);
        assert!((child_world_pos.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_parent_move_propagates_to_unchanged_child() {
        let mut nodes: SlotMap<NodeHandle, Node> = SlotMap::with_key();

        let parent_handle = nodes.insert(Node::new("parent"));
        let mut child = Node::new("child");
        child.transform.position = Vec3::Y;
        child.parent = Some(parent_handle);
        let child_handle = nodes.insert(child);
        nodes.get_mut(parent_handle).unwrap().children.push(child_handle);

        update_hierarchy(&mut nodes, &[parent_handle]);

        // Only the parent moves; the child's local transform stays untouched
        nodes.get_mut(parent_handle).unwrap().transform.position = Vec3::new(0.0, 0.0, 5.0);
        update_hierarchy(&mut nodes, &[parent_handle]);

        let pos = nodes.get(child_handle).unwrap().transform.world_position();
        assert!((pos - Vec3::new(0.0, 1.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn test_subtree_uses_resolved_parent_world() {
        let mut nodes: SlotMap<NodeHandle, Node> = SlotMap::with_key();

        let mut parent = Node::new("parent");
        parent.transform.position = Vec3::X;
        let parent_handle = nodes.insert(parent);
        let mut child = Node::new("child");
        child.parent = Some(parent_handle);
        let child_handle = nodes.insert(child);
        nodes.get_mut(parent_handle).unwrap().children.push(child_handle);

        update_hierarchy(&mut nodes, &[parent_handle]);

        // The parent's new position is not resolved by a subtree pass below it
        nodes.get_mut(parent_handle).unwrap().transform.position = Vec3::new(9.0, 0.0, 0.0);
        nodes.get_mut(child_handle).unwrap().transform.position = Vec3::Y;
        update_subtree(&mut nodes, child_handle);

        let parent_pos = nodes.get(parent_handle).unwrap().transform.world_position();
        let child_pos = nodes.get(child_handle).unwrap().transform.world_position();
        assert!((parent_pos - Vec3::X).length() < 1e-5);
        assert!((child_pos - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-5);
    }
}
