//! Gesture Controller
//!
//! Turns discrete press/release gestures into action state changes and runs the
//! per-frame update of the robot.
//!
//! # Gestures
//!
//! - *Hold-to-move* (advance, retreat): unpause the walk cycle from its current
//!   phase and set the walk flag; release clears it, and the walk pauses once
//!   neither walk key is held.
//! - *One-shot* (jump): rejected while a jump is in flight; otherwise restarts every
//!   jump action from 0. The torso jump finishing clears the in-flight flag.
//! - *Toggle-with-reverse* (grip, doggy, donkey): press plays forward from the
//!   current time, release plays backward from the current time. Interrupting a
//!   transition never snaps to either end.
//! - *Held rotation* (forearm, arm, wrist, palm): sets or clears a joint flag.
//!
//! # Tick order
//!
//! 1. Advance every action's clock
//! 2. Write action poses into the scene
//! 3. Handle finished events (jump landed, toggles back at rest)
//! 4. Locomotion
//! 5. Joint integrators
//! 6. World transform pass

use marionette_animation::{ActionHandle, AnimationMixer, MixerEvent, PlaybackDirection};
use marionette_core::{ButtonState, Key, Result};
use marionette_scene::Scene;

use crate::config::RigConfig;
use crate::input::{Gesture, InputIntentState, JointId, KeyBindings};
use crate::rig::RobotRig;

/// Why a gesture had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Jump pressed while the previous jump has not landed.
    JumpInFlight,
    /// Pose shift pressed while jumping or walking.
    Busy,
    /// Release of a toggle gesture that is not engaged.
    NotEngaged,
    /// The gesture does nothing on release.
    NoReleaseAction,
    /// The key has no binding.
    Unbound,
    /// OS auto-repeat of a key that is already held.
    KeyRepeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Applied,
    Ignored(IgnoreReason),
}

impl GestureOutcome {
    #[must_use]
    pub fn is_applied(self) -> bool {
        self == GestureOutcome::Applied
    }
}

/// Drives a [`RobotRig`] from gestures and elapsed time.
#[derive(Debug)]
pub struct RobotController {
    rig: RobotRig,
    bindings: KeyBindings,
    joint_speed: f32,
}

impl RobotController {
    /// Builds the rig into `scene` and wraps it.
    pub fn new(scene: &mut Scene, config: &RigConfig) -> Result<Self> {
        let rig = RobotRig::build(scene, config)?;
        Ok(Self {
            rig,
            bindings: config.keys.clone(),
            joint_speed: config.joint_speed,
        })
    }

    #[must_use]
    pub fn rig(&self) -> &RobotRig {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut RobotRig {
        &mut self.rig
    }

    #[must_use]
    pub fn mixer(&self) -> &AnimationMixer {
        &self.rig.mixer
    }

    #[must_use]
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn set_bindings(&mut self, bindings: KeyBindings) {
        self.bindings = bindings;
    }

    /// Maps a raw key event through the bindings and dispatches it.
    pub fn handle_key(&mut self, key: Key, state: ButtonState, intent: &mut InputIntentState) -> GestureOutcome {
        let Some(gesture) = self.bindings.gesture(key) else {
            log::trace!("Unbound key {key}");
            return GestureOutcome::Ignored(IgnoreReason::Unbound);
        };

        match state {
            ButtonState::Pressed => self.on_press(gesture, intent),
            ButtonState::Released => self.on_release(gesture, intent),
        }
    }

    pub fn on_press(&mut self, gesture: Gesture, intent: &mut InputIntentState) -> GestureOutcome {
        let actions = self.rig.actions;

        let outcome = match gesture {
            Gesture::Advance => {
                self.set_walk_paused(false);
                intent.advancing = true;
                GestureOutcome::Applied
            }
            Gesture::Retreat => {
                self.set_walk_paused(false);
                intent.retreating = true;
                GestureOutcome::Applied
            }
            Gesture::Jump => {
                if intent.jumped {
                    log::warn!("Jump ignored: previous jump still in flight");
                    return GestureOutcome::Ignored(IgnoreReason::JumpInFlight);
                }
                intent.jumped = true;
                for handle in actions.jump.all() {
                    if let Some(action) = self.rig.mixer.action_mut(handle) {
                        action.time_scale = 1.0;
                        action.reset().play();
                    }
                }
                GestureOutcome::Applied
            }
            Gesture::Grip => {
                self.play_forward(&actions.grip.all());
                GestureOutcome::Applied
            }
            Gesture::Doggy | Gesture::Donkey => {
                if intent.jumped || intent.is_moving() {
                    log::warn!("{gesture:?} ignored while jumping or walking");
                    return GestureOutcome::Ignored(IgnoreReason::Busy);
                }
                let group = if gesture == Gesture::Doggy {
                    actions.doggy.all()
                } else {
                    actions.donkey.all()
                };
                self.play_forward(&group);
                GestureOutcome::Applied
            }
            _ => Self::set_joint_flag(gesture, intent, true),
        };

        log::debug!("Pressed {gesture:?}: {outcome:?}");
        outcome
    }

    pub fn on_release(&mut self, gesture: Gesture, intent: &mut InputIntentState) -> GestureOutcome {
        let actions = self.rig.actions;

        let outcome = match gesture {
            Gesture::Advance | Gesture::Retreat => {
                if gesture == Gesture::Advance {
                    intent.advancing = false;
                } else {
                    intent.retreating = false;
                }
                // The other walk key may still be held.
                if !intent.is_moving() {
                    self.set_walk_paused(true);
                }
                GestureOutcome::Applied
            }
            Gesture::Jump => GestureOutcome::Ignored(IgnoreReason::NoReleaseAction),
            Gesture::Grip => self.play_reverse(&actions.grip.all()),
            Gesture::Doggy => self.play_reverse(&actions.doggy.all()),
            Gesture::Donkey => self.play_reverse(&actions.donkey.all()),
            _ => Self::set_joint_flag(gesture, intent, false),
        };

        log::debug!("Released {gesture:?}: {outcome:?}");
        outcome
    }

    /// Runs one frame. `elapsed` is in seconds; negative or non-finite values are
    /// treated as zero.
    pub fn tick(&mut self, elapsed: f32, intent: &mut InputIntentState, scene: &mut Scene) {
        let dt = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };

        self.rig.mixer.advance(dt);
        self.rig.mixer.apply(scene);
        self.process_events(intent);

        if self.rig.locomotion.step(intent, dt) {
            self.rig.locomotion.apply(scene);
        }

        for id in JointId::ALL {
            let joint = &mut self.rig.joints[id.index()];
            if joint.integrate(intent.joint(id), self.joint_speed, dt) {
                joint.apply(scene);
            }
        }

        scene.update_matrix_world();
        log::trace!("Tick dt={dt:.4} travel={:.3}", self.rig.locomotion.travel());
    }

    fn process_events(&mut self, intent: &mut InputIntentState) {
        let events: Vec<MixerEvent> = self.rig.mixer.drain_events().collect();
        let actions = self.rig.actions;

        for event in events {
            match event {
                MixerEvent::Finished { action, .. } if action == actions.jump.torso => {
                    intent.jumped = false;
                    log::debug!("Jump landed");
                }
                MixerEvent::Finished {
                    action,
                    direction: PlaybackDirection::Reverse,
                } if actions.is_toggle(action) => {
                    // The rest pose was written this frame. Stop overriding the
                    // walk pose on shared joints from the next one.
                    if let Some(a) = self.rig.mixer.action_mut(action) {
                        a.stop();
                    }
                }
                MixerEvent::Finished { .. } | MixerEvent::Looped { .. } => {}
            }
        }
    }

    fn set_walk_paused(&mut self, paused: bool) {
        for handle in self.rig.actions.walk.all() {
            if let Some(action) = self.rig.mixer.action_mut(handle) {
                action.paused = paused;
            }
        }
    }

    /// Plays `group` forward from each action's current time.
    fn play_forward(&mut self, group: &[ActionHandle]) {
        for &handle in group {
            if let Some(action) = self.rig.mixer.action_mut(handle) {
                let time = action.time();
                action.time_scale = 1.0;
                action.reset().seek(time).play();
            }
        }
    }

    /// Plays `group` backward from each action's current time.
    ///
    /// Seeking one duration before the current time makes the reverse pass count
    /// as the single repetition, so it stops at 0.
    fn play_reverse(&mut self, group: &[ActionHandle]) -> GestureOutcome {
        let engaged = group
            .iter()
            .any(|&h| self.rig.mixer.action(h).is_some_and(|a| a.enabled));
        if !engaged {
            return GestureOutcome::Ignored(IgnoreReason::NotEngaged);
        }

        for &handle in group {
            if let Some(action) = self.rig.mixer.action_mut(handle) {
                let time = action.time();
                let duration = action.duration();
                action.time_scale = -1.0;
                action.reset().seek(time - duration).play();
            }
        }
        GestureOutcome::Applied
    }

    fn set_joint_flag(gesture: Gesture, intent: &mut InputIntentState, held: bool) -> GestureOutcome {
        match gesture.joint_drive() {
            Some((joint, direction)) => {
                intent.set_joint(joint, direction, held);
                GestureOutcome::Applied
            }
            None => GestureOutcome::Ignored(IgnoreReason::NoReleaseAction),
        }
    }
}
