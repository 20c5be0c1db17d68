use glam::{EulerRot, Quat, Vec3};
use marionette_scene::{NodeHandle, Scene};

use crate::config::JointConfig;
use crate::input::JointIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointAxis {
    X,
    Y,
    Z,
}

/// Closed angle interval, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointLimits {
    pub min: f32,
    pub max: f32,
}

/// Rate-limited integrator for one revolute joint.
///
/// The joint owns one Euler angle of its node's rotation; the other two stay at
/// their rest values. A held positive flag raises the angle by `speed * dt` while
/// it is below `max`, a held negative flag lowers it while above `min`, and the
/// result is clamped to the limits exactly.
#[derive(Debug, Clone)]
pub struct RevoluteJoint {
    pub node: NodeHandle,
    pub axis: JointAxis,
    pub limits: Option<JointLimits>,
    angle: f32,
    rest_euler: Vec3,
}

impl RevoluteJoint {
    /// `rest_euler` is the node's XYZ Euler rest rotation; the component on `axis`
    /// is the starting angle.
    #[must_use]
    pub fn new(node: NodeHandle, axis: JointAxis, rest_euler: Vec3, limits: Option<JointLimits>) -> Self {
        let angle = match axis {
            JointAxis::X => rest_euler.x,
            JointAxis::Y => rest_euler.y,
            JointAxis::Z => rest_euler.z,
        };
        Self {
            node,
            axis,
            limits,
            angle,
            rest_euler,
        }
    }

    /// Builds a joint from a degree-based config, overriding the rest angle on `axis`.
    #[must_use]
    pub fn from_config(node: NodeHandle, axis: JointAxis, rest_euler: Vec3, config: &JointConfig) -> Self {
        let limits = match (config.min_deg, config.max_deg) {
            (None, None) => None,
            (min, max) => Some(JointLimits {
                min: min.map_or(f32::NEG_INFINITY, f32::to_radians),
                max: max.map_or(f32::INFINITY, f32::to_radians),
            }),
        };
        let mut joint = Self::new(node, axis, rest_euler, limits);
        joint.set_angle(config.initial_deg.to_radians());
        joint
    }

    #[inline]
    #[must_use]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Sets the angle, clamped to the limits.
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = match self.limits {
            Some(limits) => angle.clamp(limits.min, limits.max),
            None => angle,
        };
    }

    /// Advances the angle for one tick. Returns whether it changed.
    pub fn integrate(&mut self, intent: JointIntent, speed: f32, dt: f32) -> bool {
        let step = speed * dt;
        let (min, max) = self
            .limits
            .map_or((f32::NEG_INFINITY, f32::INFINITY), |l| (l.min, l.max));

        let mut angle = self.angle;
        if intent.positive && angle < max {
            angle = (angle + step).min(max);
        }
        if intent.negative && angle > min {
            angle = (angle - step).max(min);
        }

        let changed = angle != self.angle;
        self.angle = angle;
        changed
    }

    #[must_use]
    pub fn rotation(&self) -> Quat {
        let mut euler = self.rest_euler;
        match self.axis {
            JointAxis::X => euler.x = self.angle,
            JointAxis::Y => euler.y = self.angle,
            JointAxis::Z => euler.z = self.angle,
        }
        Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z)
    }

    /// Writes the current rotation into the node.
    pub fn apply(&self, scene: &mut Scene) {
        if let Some(node) = scene.get_node_mut(self.node) {
            node.transform.rotation = self.rotation();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounded_joint() -> RevoluteJoint {
        let mut scene = Scene::new();
        let node = scene.build_node("forearm").build();
        RevoluteJoint::from_config(node, JointAxis::Z, Vec3::ZERO, &JointConfig::bounded(45.0, 10.0, 170.0))
    }

    const HELD_POSITIVE: JointIntent = JointIntent {
        positive: true,
        negative: false,
    };
    const HELD_NEGATIVE: JointIntent = JointIntent {
        positive: false,
        negative: true,
    };

    #[test]
    fn clamps_exactly_at_max() {
        let mut joint = bounded_joint();
        for _ in 0..200 {
            joint.integrate(HELD_POSITIVE, 2.0, 1.0 / 60.0);
        }
        assert_eq!(joint.angle(), 170.0_f32.to_radians());
        assert!(!joint.integrate(HELD_POSITIVE, 2.0, 1.0 / 60.0));
    }

    #[test]
    fn clamps_exactly_at_min() {
        let mut joint = bounded_joint();
        joint.integrate(HELD_NEGATIVE, 2.0, 10.0);
        assert_eq!(joint.angle(), 10.0_f32.to_radians());
    }

    #[test]
    fn opposing_flags_cancel() {
        let mut joint = bounded_joint();
        let start = joint.angle();
        let both = JointIntent {
            positive: true,
            negative: true,
        };
        joint.integrate(both, 2.0, 0.1);
        assert!((joint.angle() - start).abs() < 1e-6);
    }

    #[test]
    fn unbounded_joint_keeps_rest_components() {
        let mut scene = Scene::new();
        let node = scene.build_node("palm").build();
        let rest = Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2);
        let mut joint = RevoluteJoint::from_config(node, JointAxis::X, rest, &JointConfig::unbounded(0.0));

        joint.integrate(HELD_NEGATIVE, 2.0, 5.0);
        assert!((joint.angle() + 10.0).abs() < 1e-5);

        let expected = Quat::from_rotation_x(-10.0) * Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
        assert!(joint.rotation().angle_between(expected) < 1e-4);
    }
}
