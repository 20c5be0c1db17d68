use crate::NodeHandle;
use crate::transform::Transform;
use glam::Affine3A;

/// A joint in the rig hierarchy.
///
/// # Hierarchy
///
/// Nodes form a tree through parent-child links:
/// - `parent`: handle of the parent joint (None for root nodes)
/// - `children`: handles of attached joints
///
/// A child's world transform is its parent's world transform composed with its own
/// local [`Transform`]; the transform pass in [`crate::transform_system`] resolves
/// the whole tree top-down once per tick.
#[derive(Debug, Clone)]
pub struct Node {
    /// Human-readable joint name used for lookup (`"thigh_a1"`, `"palm"`, ...)
    pub name: String,

    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    pub transform: Transform,

    pub visible: bool,
}

impl Node {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Sets the parent of this node. Prefer [`Scene::attach`](crate::Scene::attach),
    /// which keeps both sides of the link in sync.
    #[inline]
    pub fn set_parent(&mut self, parent: Option<NodeHandle>) {
        self.parent = parent;
    }

    /// Appends a child handle. Prefer [`Scene::attach`](crate::Scene::attach),
    /// which keeps both sides of the link in sync.
    #[inline]
    pub fn push_child(&mut self, child: NodeHandle) {
        self.children.push(child);
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("")
    }
}
