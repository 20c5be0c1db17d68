//! # Marionette
//!
//! Keyframe animation and procedural gesture control for an articulated robot rig.
//!
//! This umbrella crate re-exports the workspace members:
//!
//! | Module | Crate | Contents |
//! |---|---|---|
//! | [`errors`], [`input`], [`time`] | `marionette_core` | error type, keys, frame timer |
//! | [`scene`] | `marionette_scene` | joint tree and world transform pass |
//! | [`animation`] | `marionette_animation` | clips, actions, loop policies, mixer |
//! | [`rig`] | `marionette_rig` | the robot, its gestures and controller |
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use marionette::prelude::*;
//!
//! let mut scene = Scene::new();
//! let mut controller = RobotController::new(&mut scene, &RigConfig::default())?;
//! let mut intent = InputIntentState::new();
//!
//! controller.handle_key(Key::W, ButtonState::Pressed, &mut intent);
//! for _ in 0..60 {
//!     controller.tick(1.0 / 60.0, &mut intent, &mut scene);
//! }
//! ```

pub use marionette_animation as animation;
pub use marionette_core::{errors, input, time};
pub use marionette_rig as rig;
pub use marionette_scene as scene;

pub use marionette_core::{MarionetteError, Result};

pub mod prelude {
    pub use marionette_animation::{
        ActionHandle, AnimationAction, AnimationClip, AnimationMixer, Binder, LoopMode, MixerEvent,
        PlaybackDirection,
    };
    pub use marionette_core::{ButtonState, Key, MarionetteError, Result, Timer};
    pub use marionette_rig::{
        Gesture, GestureOutcome, IgnoreReason, InputIntentState, JointId, KeyBindings, RigConfig,
        RobotController, RobotRig,
    };
    pub use marionette_scene::{Node, NodeHandle, Scene, Transform};
}
