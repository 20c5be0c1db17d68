//! Gestures, held-control state and key bindings
//!
//! Raw key events are mapped to [`Gesture`]s through [`KeyBindings`]. The
//! controller records held controls in an explicit [`InputIntentState`] that the
//! host owns and passes into every tick.

use marionette_core::Key;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A continuously driven joint of the manipulator chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointId {
    Forearm,
    Arm,
    Wrist,
    Palm,
}

impl JointId {
    pub const ALL: [JointId; 4] = [JointId::Forearm, JointId::Arm, JointId::Wrist, JointId::Palm];

    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            JointId::Forearm => "forearm",
            JointId::Arm => "arm",
            JointId::Wrist => "wrist",
            JointId::Palm => "palm",
        }
    }
}

/// Sign of a held joint rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveDirection {
    Positive,
    Negative,
}

/// A discrete user intent, independent of the physical key that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    /// Hold to walk forward.
    Advance,
    /// Hold to walk backward.
    Retreat,
    /// One-shot jump.
    Jump,
    /// Hold to close the gripper, release to open it.
    Grip,
    /// Hold to lower the torso front, release to return.
    Doggy,
    /// Hold to lower the torso back, release to return.
    Donkey,
    ForearmPositive,
    ForearmNegative,
    ArmPositive,
    ArmNegative,
    WristPositive,
    WristNegative,
    PalmPositive,
    PalmNegative,
}

impl Gesture {
    /// The joint and direction a held-rotation gesture drives.
    #[must_use]
    pub fn joint_drive(self) -> Option<(JointId, DriveDirection)> {
        use DriveDirection::{Negative, Positive};

        match self {
            Gesture::ForearmPositive => Some((JointId::Forearm, Positive)),
            Gesture::ForearmNegative => Some((JointId::Forearm, Negative)),
            Gesture::ArmPositive => Some((JointId::Arm, Positive)),
            Gesture::ArmNegative => Some((JointId::Arm, Negative)),
            Gesture::WristPositive => Some((JointId::Wrist, Positive)),
            Gesture::WristNegative => Some((JointId::Wrist, Negative)),
            Gesture::PalmPositive => Some((JointId::Palm, Positive)),
            Gesture::PalmNegative => Some((JointId::Palm, Negative)),
            _ => None,
        }
    }
}

/// Held rotation flags for one joint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JointIntent {
    pub positive: bool,
    pub negative: bool,
}

/// Currently held controls, set on press and cleared on release.
///
/// `jumped` is the jump in-flight guard: set by the jump press, cleared by the
/// controller when the torso's jump clip finishes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputIntentState {
    pub advancing: bool,
    pub retreating: bool,
    pub jumped: bool,
    joints: [JointIntent; 4],
}

impl InputIntentState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn joint(&self, id: JointId) -> JointIntent {
        self.joints[id.index()]
    }

    pub fn set_joint(&mut self, id: JointId, direction: DriveDirection, held: bool) {
        let intent = &mut self.joints[id.index()];
        match direction {
            DriveDirection::Positive => intent.positive = held,
            DriveDirection::Negative => intent.negative = held,
        }
    }

    /// Whether the rig is walking in either direction.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.advancing || self.retreating
    }
}

/// Key to gesture table.
///
/// Serializes as a JSON object keyed by DOM key codes, e.g.
/// `{ "KeyW": "advance", "Space": "jump" }`. A table loaded from JSON replaces the
/// defaults entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    map: FxHashMap<Key, Gesture>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let map = [
            (Key::W, Gesture::Advance),
            (Key::S, Gesture::Retreat),
            (Key::E, Gesture::Grip),
            (Key::Space, Gesture::Jump),
            (Key::Key5, Gesture::Doggy),
            (Key::Key8, Gesture::Donkey),
            (Key::ShiftLeft, Gesture::ForearmPositive),
            (Key::ControlLeft, Gesture::ForearmNegative),
            (Key::PageUp, Gesture::ArmPositive),
            (Key::PageDown, Gesture::ArmNegative),
            (Key::ArrowUp, Gesture::WristPositive),
            (Key::ArrowDown, Gesture::WristNegative),
            (Key::ArrowLeft, Gesture::PalmNegative),
            (Key::ArrowRight, Gesture::PalmPositive),
        ]
        .into_iter()
        .collect();

        Self { map }
    }
}

impl KeyBindings {
    #[must_use]
    pub fn gesture(&self, key: Key) -> Option<Gesture> {
        self.map.get(&key).copied()
    }

    /// Binds `key`, returning the gesture it was previously bound to.
    pub fn bind(&mut self, key: Key, gesture: Gesture) -> Option<Gesture> {
        self.map.insert(key, gesture)
    }

    pub fn unbind(&mut self, key: Key) -> Option<Gesture> {
        self.map.remove(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Key, Gesture)> + '_ {
        self.map.iter().map(|(&k, &g)| (k, g))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
