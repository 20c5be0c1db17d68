use marionette_scene::Scene;
use slotmap::{SlotMap, new_key_type};

use crate::action::{ActionEvent, AnimationAction, PlaybackDirection};

new_key_type! {
    pub struct ActionHandle;
}

/// Notification queued by [`AnimationMixer::update`], read back with
/// [`AnimationMixer::drain_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixerEvent {
    Finished {
        action: ActionHandle,
        direction: PlaybackDirection,
    },
    Looped {
        action: ActionHandle,
        loop_delta: u32,
    },
}

/// Ordered registry of actions sharing one clock.
///
/// Actions are applied in registration order, so when two enabled actions drive
/// the same property the one added later wins. Paused actions still write their
/// (frozen) pose; only disabled actions are skipped.
#[derive(Debug, Default)]
pub struct AnimationMixer {
    actions: SlotMap<ActionHandle, AnimationAction>,
    order: Vec<ActionHandle>,
    events: Vec<MixerEvent>,
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_action(&mut self, action: AnimationAction) -> ActionHandle {
        let handle = self.actions.insert(action);
        self.order.push(handle);
        handle
    }

    #[must_use]
    pub fn action(&self, handle: ActionHandle) -> Option<&AnimationAction> {
        self.actions.get(handle)
    }

    pub fn action_mut(&mut self, handle: ActionHandle) -> Option<&mut AnimationAction> {
        self.actions.get_mut(handle)
    }

    /// Actions in application order.
    pub fn actions(&self) -> impl Iterator<Item = (ActionHandle, &AnimationAction)> {
        self.order
            .iter()
            .filter_map(|&handle| self.actions.get(handle).map(|action| (handle, action)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Advances every action by `dt` seconds, then writes the sampled poses into `scene`.
    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        self.advance(dt);
        self.apply(scene);
    }

    /// Advances every action's clock by `dt` seconds without touching the scene.
    pub fn advance(&mut self, dt: f32) {
        for &handle in &self.order {
            let Some(action) = self.actions.get_mut(handle) else {
                continue;
            };

            match action.update(dt) {
                Some(ActionEvent::Finished(direction)) => {
                    log::debug!(
                        "Action '{}' finished ({direction:?}) at t={:.3}",
                        action.clip().name,
                        action.time()
                    );
                    self.events.push(MixerEvent::Finished {
                        action: handle,
                        direction,
                    });
                }
                Some(ActionEvent::Looped { loop_delta }) => {
                    self.events.push(MixerEvent::Looped {
                        action: handle,
                        loop_delta,
                    });
                }
                None => {}
            }
        }
    }

    /// Writes the current pose of every enabled action into `scene`.
    pub fn apply(&mut self, scene: &mut Scene) {
        for &handle in &self.order {
            let Some(action) = self.actions.get_mut(handle) else {
                continue;
            };
            if !action.enabled || action.weight <= 0.0 {
                continue;
            }
            action.apply_to(scene);
        }
    }

    /// Takes all events queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, MixerEvent> {
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::{Quat, Vec3};

    use super::*;
    use crate::action::LoopMode;
    use crate::binder::Binder;
    use crate::clip::{AnimationClip, Track};
    use crate::tracks::{InterpolationMode, KeyframeTrack};

    fn rotation_clip(name: &str, from: f32, to: f32) -> Arc<AnimationClip> {
        Arc::new(AnimationClip::new(
            name.to_string(),
            vec![Track::rotation(KeyframeTrack::new(
                vec![0.0, 1.0],
                vec![Quat::from_rotation_z(from), Quat::from_rotation_z(to)],
                InterpolationMode::Linear,
            ))],
        ))
    }

    #[test]
    fn later_actions_override_earlier_ones() {
        let mut scene = Scene::new();
        let joint = scene.build_node("joint").build();

        let mut mixer = AnimationMixer::new();
        let base_clip = rotation_clip("base", 0.0, 0.0);
        let top_clip = rotation_clip("top", 1.0, 1.0);

        let base = mixer.add_action(
            AnimationAction::new(base_clip.clone()).with_bindings(Binder::bind_group(&base_clip, &[joint])),
        );
        let top = mixer.add_action(
            AnimationAction::new(top_clip.clone()).with_bindings(Binder::bind_group(&top_clip, &[joint])),
        );

        mixer.action_mut(base).unwrap().play();
        mixer.update(0.1, &mut scene);
        let rot = scene.get_node(joint).unwrap().transform.rotation;
        assert!(rot.angle_between(Quat::IDENTITY) < 1e-4);

        mixer.action_mut(top).unwrap().play();
        mixer.update(0.1, &mut scene);
        let rot = scene.get_node(joint).unwrap().transform.rotation;
        assert!(rot.angle_between(Quat::from_rotation_z(1.0)) < 1e-4);
    }

    #[test]
    fn finished_events_are_queued_once() {
        let mut scene = Scene::new();
        let joint = scene.build_node("joint").build();
        let clip = Arc::new(AnimationClip::new(
            "slide".to_string(),
            vec![Track::translation(KeyframeTrack::new(
                vec![0.0, 1.0],
                vec![Vec3::ZERO, Vec3::X],
                InterpolationMode::Linear,
            ))],
        ));

        let mut mixer = AnimationMixer::new();
        let handle = mixer.add_action(
            AnimationAction::new(clip.clone())
                .with_bindings(Binder::bind_group(&clip, &[joint]))
                .with_loop_mode(LoopMode::Once)
                .with_clamp_when_finished(true),
        );
        mixer.action_mut(handle).unwrap().play();

        for _ in 0..30 {
            mixer.update(0.1, &mut scene);
        }

        let events: Vec<_> = mixer.drain_events().collect();
        assert_eq!(
            events,
            vec![MixerEvent::Finished {
                action: handle,
                direction: PlaybackDirection::Forward
            }]
        );
        assert!(mixer.drain_events().next().is_none());

        // Clamped: the final pose is still held
        let pos = scene.get_node(joint).unwrap().transform.position;
        assert!((pos - Vec3::X).length() < 1e-5);
    }
}
