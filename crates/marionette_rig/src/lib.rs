//! Marionette Rig
//!
//! The articulated robot and its gesture controller:
//!
//! - [`rig`]: joint tree construction, action registration, walk priming
//! - [`clips`]: the keyframe data of every gesture
//! - [`controller`]: press/release handling and the per-frame tick
//! - [`input`]: gestures, held-control state, key bindings
//! - [`joint`]: rate-limited revolute joint integrators
//! - [`locomotion`]: whole-rig translation while walking
//! - [`config`]: serde-loadable tunables
//!
//! # Example
//!
//! ```rust,ignore
//! use marionette_rig::{Gesture, InputIntentState, RigConfig, RobotController};
//! use marionette_scene::Scene;
//!
//! let mut scene = Scene::new();
//! let mut controller = RobotController::new(&mut scene, &RigConfig::default())?;
//! let mut intent = InputIntentState::new();
//!
//! controller.on_press(Gesture::Advance, &mut intent);
//! controller.tick(1.0 / 60.0, &mut intent, &mut scene);
//! ```

pub mod clips;
pub mod config;
pub mod controller;
pub mod input;
pub mod joint;
pub mod locomotion;
pub mod rig;

#[cfg(feature = "winit")]
pub mod winit_adapter;

pub use clips::ClipLibrary;
pub use config::{JointConfig, JointsConfig, LocomotionConfig, RigConfig};
pub use controller::{GestureOutcome, IgnoreReason, RobotController};
pub use input::{DriveDirection, Gesture, InputIntentState, JointId, JointIntent, KeyBindings};
pub use joint::{JointAxis, JointLimits, RevoluteJoint};
pub use locomotion::Locomotion;
pub use rig::{RigActions, RigNodes, RobotRig};
