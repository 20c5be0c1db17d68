//! Rig configuration
//!
//! Every tunable constant of the robot lives in [`RigConfig`]. All structs use
//! `#[serde(default)]`, so a JSON file only needs to name the values it changes:
//!
//! ```json
//! { "joint_speed": 3.0, "joints": { "arm": { "initial_deg": 90.0, "min_deg": 5.0, "max_deg": 120.0 } } }
//! ```
//!
//! A joint entry replaces that joint's defaults as a whole; omitted limits mean
//! unbounded on that side.

use std::path::Path;

use glam::Vec3;
use marionette_core::{MarionetteError, Result};
use serde::{Deserialize, Serialize};

use crate::input::{JointId, KeyBindings};

/// Start angle and optional limits of a continuously driven joint, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JointConfig {
    pub initial_deg: f32,
    pub min_deg: Option<f32>,
    pub max_deg: Option<f32>,
}

impl JointConfig {
    #[must_use]
    pub fn bounded(initial_deg: f32, min_deg: f32, max_deg: f32) -> Self {
        Self {
            initial_deg,
            min_deg: Some(min_deg),
            max_deg: Some(max_deg),
        }
    }

    #[must_use]
    pub fn unbounded(initial_deg: f32) -> Self {
        Self {
            initial_deg,
            min_deg: None,
            max_deg: None,
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !self.initial_deg.is_finite() {
            return Err(MarionetteError::InvalidConfig(format!(
                "joint '{name}' initial angle must be finite"
            )));
        }
        if let Some(min) = self.min_deg
            && self.initial_deg < min
        {
            return Err(MarionetteError::InvalidConfig(format!(
                "joint '{name}' starts below its minimum ({} < {min})",
                self.initial_deg
            )));
        }
        if let Some(max) = self.max_deg
            && self.initial_deg > max
        {
            return Err(MarionetteError::InvalidConfig(format!(
                "joint '{name}' starts above its maximum ({} > {max})",
                self.initial_deg
            )));
        }
        if let (Some(min), Some(max)) = (self.min_deg, self.max_deg)
            && min > max
        {
            return Err(MarionetteError::InvalidConfig(format!(
                "joint '{name}' has inverted limits ({min} > {max})"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JointsConfig {
    pub forearm: JointConfig,
    pub arm: JointConfig,
    pub wrist: JointConfig,
    pub palm: JointConfig,
}

impl Default for JointsConfig {
    fn default() -> Self {
        Self {
            forearm: JointConfig::bounded(45.0, 10.0, 170.0),
            arm: JointConfig::bounded(90.0, 5.0, 100.0),
            wrist: JointConfig::bounded(45.0, -45.0, 90.0),
            palm: JointConfig::unbounded(0.0),
        }
    }
}

impl JointsConfig {
    #[must_use]
    pub fn get(&self, id: JointId) -> &JointConfig {
        match id {
            JointId::Forearm => &self.forearm,
            JointId::Arm => &self.arm,
            JointId::Wrist => &self.wrist,
            JointId::Palm => &self.palm,
        }
    }
}

/// Whole-rig translation while walking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Units per second.
    pub speed: f32,
    /// Maximum travel from the start position, in either direction.
    pub bound: f32,
    /// Direction of travel while advancing, in world space.
    pub forward: Vec3,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            speed: 1000.0 / 300.0,
            bound: 50.0,
            forward: Vec3::NEG_X,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// Rest position of the torso relative to the rig root.
    pub anchor: Vec3,
    /// Ping-pong phase the first leg pair and the torso bob start at (seconds).
    pub gait_priming_a: f32,
    /// Ping-pong phase the second leg pair starts at (seconds).
    pub gait_priming_b: f32,
    /// Duration of the doggy and donkey pose shifts (seconds).
    pub pose_shift_duration: f32,
    /// Duration of the gripper close (seconds).
    pub grip_duration: f32,
    /// Rotation rate of held joints (radians per second).
    pub joint_speed: f32,
    pub joints: JointsConfig,
    pub locomotion: LocomotionConfig,
    pub keys: KeyBindings,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            anchor: Vec3::new(1.5, 2.0, 2.0),
            gait_priming_a: 0.25,
            gait_priming_b: 0.75,
            pose_shift_duration: 0.5,
            grip_duration: 0.5,
            joint_speed: 2.0,
            joints: JointsConfig::default(),
            locomotion: LocomotionConfig::default(),
            keys: KeyBindings::default(),
        }
    }
}

impl RigConfig {
    /// Parses a JSON document and validates it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::info!("Loading rig config from {}", path.display());
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.anchor.is_finite() {
            return Err(MarionetteError::InvalidConfig("anchor must be finite".into()));
        }

        for (name, value) in [
            ("pose_shift_duration", self.pose_shift_duration),
            ("grip_duration", self.grip_duration),
            ("joint_speed", self.joint_speed),
            ("locomotion.speed", self.locomotion.speed),
            ("locomotion.bound", self.locomotion.bound),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(MarionetteError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        for (name, value) in [
            ("gait_priming_a", self.gait_priming_a),
            ("gait_priming_b", self.gait_priming_b),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(MarionetteError::InvalidConfig(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if !self.locomotion.forward.is_finite() || self.locomotion.forward.length_squared() < 1e-6 {
            return Err(MarionetteError::InvalidConfig(
                "locomotion.forward must be a non-zero vector".into(),
            ));
        }

        for id in JointId::ALL {
            self.joints.get(id).validate(id.name())?;
        }

        Ok(())
    }
}
