use glam::Vec3;
use marionette_scene::{NodeHandle, Scene};

use crate::config::LocomotionConfig;
use crate::input::InputIntentState;

/// Translates the rig root while a walk control is held.
///
/// Travel is a signed distance along `forward` from `origin`, kept within
/// `[-bound, bound]`. Advancing takes precedence when both walk controls are held.
#[derive(Debug, Clone)]
pub struct Locomotion {
    pub node: NodeHandle,
    pub origin: Vec3,
    pub forward: Vec3,
    pub speed: f32,
    pub bound: f32,
    travel: f32,
}

impl Locomotion {
    #[must_use]
    pub fn new(node: NodeHandle, origin: Vec3, config: &LocomotionConfig) -> Self {
        Self {
            node,
            origin,
            forward: config.forward.normalize_or_zero(),
            speed: config.speed,
            bound: config.bound,
            travel: 0.0,
        }
    }

    /// Signed distance travelled from the origin.
    #[inline]
    #[must_use]
    pub fn travel(&self) -> f32 {
        self.travel
    }

    /// Advances travel for one tick. Returns whether it changed.
    pub fn step(&mut self, intent: &InputIntentState, dt: f32) -> bool {
        let direction = if intent.advancing {
            1.0
        } else if intent.retreating {
            -1.0
        } else {
            return false;
        };

        let travel = (self.travel + direction * self.speed * dt).clamp(-self.bound, self.bound);
        let changed = travel != self.travel;
        self.travel = travel;
        changed
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.origin + self.forward * self.travel
    }

    pub fn apply(&self, scene: &mut Scene) {
        if let Some(node) = scene.get_node_mut(self.node) {
            node.transform.position = self.position();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locomotion() -> Locomotion {
        let mut scene = Scene::new();
        let root = scene.build_node("rig_root").build();
        Locomotion::new(root, Vec3::ZERO, &LocomotionConfig::default())
    }

    #[test]
    fn advances_at_configured_speed() {
        let mut loco = locomotion();
        let mut intent = InputIntentState::new();
        intent.advancing = true;
        assert!(loco.step(&intent, 0.3));
        assert!((loco.travel() - 1.0).abs() < 1e-5);
        assert!((loco.position() - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn travel_is_bounded() {
        let mut loco = locomotion();
        let mut intent = InputIntentState::new();
        intent.retreating = true;
        for _ in 0..100 {
            loco.step(&intent, 1.0);
        }
        assert_eq!(loco.travel(), -50.0);
        assert!(!loco.step(&intent, 1.0));
    }

    #[test]
    fn idle_does_not_move() {
        let mut loco = locomotion();
        assert!(!loco.step(&InputIntentState::default(), 1.0));
        assert_eq!(loco.travel(), 0.0);
    }
}
