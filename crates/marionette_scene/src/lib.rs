//! Scene graph module
//!
//! Manages the joint hierarchy of an articulated rig:
//! - Node: a joint (parent/child links plus a transform)
//! - Transform: local position, rotation, scale and cached matrices
//! - Scene: the node arena with hierarchy editing and name lookup
//! - transform_system: the top-down world transform pass run once per tick

pub mod node;
pub mod scene;
pub mod transform;
pub mod transform_system;

pub use node::Node;
pub use scene::{NodeBuilder, Scene};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}
