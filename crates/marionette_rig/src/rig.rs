//! Robot rig construction
//!
//! Builds the joint tree, registers every gesture action with one mixer, primes
//! the walk cycle and sets up the continuous joints and locomotion.
//!
//! ```text
//! rig_root
//! └── torso
//!     ├── thigh_a1 ── leg_a1        ├── thigh_b1 ── leg_b1
//!     ├── thigh_a2 ── leg_a2        ├── thigh_b2 ── leg_b2
//!     └── forearm ── arm ── wrist ── palm ─┬─ grip_a
//!                                          └─ grip_b
//! ```

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use std::sync::Arc;

use glam::Vec3;
use marionette_animation::{
    ActionHandle, AnimationAction, AnimationClip, AnimationMixer, Binder, LoopMode,
};
use marionette_core::Result;
use marionette_scene::{NodeHandle, Scene};

use crate::clips::{ClipLibrary, PoseShiftClips};
use crate::config::RigConfig;
use crate::input::JointId;
use crate::joint::{JointAxis, RevoluteJoint};
use crate::locomotion::Locomotion;

const LEG_OFFSET: Vec3 = Vec3::new(0.0, -1.5, 0.0);

#[derive(Debug, Clone, Copy)]
pub struct RigNodes {
    pub root: NodeHandle,
    pub torso: NodeHandle,
    pub thigh_a1: NodeHandle,
    pub thigh_a2: NodeHandle,
    pub thigh_b1: NodeHandle,
    pub thigh_b2: NodeHandle,
    pub leg_a1: NodeHandle,
    pub leg_a2: NodeHandle,
    pub leg_b1: NodeHandle,
    pub leg_b2: NodeHandle,
    pub forearm: NodeHandle,
    pub arm: NodeHandle,
    pub wrist: NodeHandle,
    pub palm: NodeHandle,
    pub grip_a: NodeHandle,
    pub grip_b: NodeHandle,
}

impl RigNodes {
    #[must_use]
    pub fn thighs(&self) -> [NodeHandle; 4] {
        [self.thigh_a1, self.thigh_a2, self.thigh_b1, self.thigh_b2]
    }

    #[must_use]
    pub fn legs(&self) -> [NodeHandle; 4] {
        [self.leg_a1, self.leg_a2, self.leg_b1, self.leg_b2]
    }
}

/// Ping-pong walk cycle. The "a" and "b" pairs share clips but run half a gait
/// period apart.
#[derive(Debug, Clone, Copy)]
pub struct WalkActions {
    pub thigh_a: ActionHandle,
    pub leg_a: ActionHandle,
    pub thigh_b: ActionHandle,
    pub leg_b: ActionHandle,
    pub torso: ActionHandle,
}

impl WalkActions {
    #[must_use]
    pub fn all(&self) -> [ActionHandle; 5] {
        [self.thigh_a, self.leg_a, self.thigh_b, self.leg_b, self.torso]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct JumpActions {
    /// Its completion ends the jump.
    pub torso: ActionHandle,
    pub thigh: ActionHandle,
    pub leg: ActionHandle,
}

impl JumpActions {
    #[must_use]
    pub fn all(&self) -> [ActionHandle; 3] {
        [self.torso, self.thigh, self.leg]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PoseShiftActions {
    pub torso: ActionHandle,
    pub thigh_front: ActionHandle,
    pub thigh_back: ActionHandle,
    pub leg_front: ActionHandle,
    pub leg_back: ActionHandle,
}

impl PoseShiftActions {
    #[must_use]
    pub fn all(&self) -> [ActionHandle; 5] {
        [
            self.torso,
            self.thigh_front,
            self.thigh_back,
            self.leg_front,
            self.leg_back,
        ]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GripActions {
    pub a: ActionHandle,
    pub b: ActionHandle,
}

impl GripActions {
    #[must_use]
    pub fn all(&self) -> [ActionHandle; 2] {
        [self.a, self.b]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RigActions {
    pub walk: WalkActions,
    pub jump: JumpActions,
    pub doggy: PoseShiftActions,
    pub donkey: PoseShiftActions,
    pub grip: GripActions,
}

impl RigActions {
    /// Whether `handle` belongs to a hold-and-release gesture (pose shifts, grip).
    #[must_use]
    pub fn is_toggle(&self, handle: ActionHandle) -> bool {
        self.doggy.all().contains(&handle)
            || self.donkey.all().contains(&handle)
            || self.grip.all().contains(&handle)
    }
}

/// The assembled robot: node handles, actions, joints and locomotion.
#[derive(Debug)]
pub struct RobotRig {
    pub nodes: RigNodes,
    pub clips: ClipLibrary,
    pub mixer: AnimationMixer,
    pub actions: RigActions,
    pub joints: [RevoluteJoint; 4],
    pub locomotion: Locomotion,
}

impl RobotRig {
    /// Adds the robot to `scene` and returns the rig in its rest pose, with world
    /// matrices already resolved.
    pub fn build(scene: &mut Scene, config: &RigConfig) -> Result<Self> {
        config.validate()?;

        let nodes = build_nodes(scene, config);
        let clips = ClipLibrary::new(config.anchor, config.pose_shift_duration, config.grip_duration)?;

        // Registration order is override order: later gestures win on shared joints.
        let mut mixer = AnimationMixer::new();
        let walk = add_walk(&mut mixer, &clips, &nodes);
        let jump = JumpActions {
            torso: add(&mut mixer, &clips.torso_jump, &[nodes.torso], LoopMode::Once, false),
            thigh: add(&mut mixer, &clips.thigh_jump, &nodes.thighs(), LoopMode::Once, false),
            leg: add(&mut mixer, &clips.leg_jump, &nodes.legs(), LoopMode::Once, false),
        };
        let doggy = add_pose_shift(&mut mixer, &clips.doggy, &nodes);
        let donkey = add_pose_shift(&mut mixer, &clips.donkey, &nodes);
        let grip = GripActions {
            a: add(&mut mixer, &clips.grip_a, &[nodes.grip_a], LoopMode::Repeat(1), true),
            b: add(&mut mixer, &clips.grip_b, &[nodes.grip_b], LoopMode::Repeat(1), true),
        };
        let actions = RigActions {
            walk,
            jump,
            doggy,
            donkey,
            grip,
        };

        prime_walk(&mut mixer, &walk, config);
        mixer.apply(scene);

        let joints = JointId::ALL.map(|id| build_joint(id, &nodes, config));
        for joint in &joints {
            joint.apply(scene);
        }

        let locomotion = Locomotion::new(nodes.root, Vec3::ZERO, &config.locomotion);

        scene.update_matrix_world();
        log::debug!(
            "Robot rig built: {} nodes, {} actions",
            scene.nodes.len(),
            mixer.len()
        );

        Ok(Self {
            nodes,
            clips,
            mixer,
            actions,
            joints,
            locomotion,
        })
    }

    #[must_use]
    pub fn joint(&self, id: JointId) -> &RevoluteJoint {
        &self.joints[id.index()]
    }

    pub fn joint_mut(&mut self, id: JointId) -> &mut RevoluteJoint {
        &mut self.joints[id.index()]
    }
}

fn build_nodes(scene: &mut Scene, config: &RigConfig) -> RigNodes {
    let root = scene.build_node("rig_root").build();
    let torso = scene
        .build_node("torso")
        .with_position(config.anchor.x, config.anchor.y, config.anchor.z)
        .with_parent(root)
        .build();

    let mut limb = |name: &str, parent: NodeHandle, pos: Vec3| {
        scene
            .build_node(name)
            .with_position(pos.x, pos.y, pos.z)
            .with_parent(parent)
            .build()
    };

    let thigh_a1 = limb("thigh_a1", torso, Vec3::new(-2.0, 0.0, 1.5));
    let leg_a1 = limb("leg_a1", thigh_a1, LEG_OFFSET);
    let thigh_a2 = limb("thigh_a2", torso, Vec3::new(2.0, 0.0, -0.5));
    let leg_a2 = limb("leg_a2", thigh_a2, LEG_OFFSET);
    let thigh_b1 = limb("thigh_b1", torso, Vec3::new(-2.0, 0.0, -0.5));
    let leg_b1 = limb("leg_b1", thigh_b1, LEG_OFFSET);
    let thigh_b2 = limb("thigh_b2", torso, Vec3::new(2.0, 0.0, 1.5));
    let leg_b2 = limb("leg_b2", thigh_b2, LEG_OFFSET);

    let forearm = limb("forearm", torso, Vec3::new(-2.0, 0.65, 0.4));
    let arm = limb("arm", forearm, Vec3::new(1.5, 0.0, 0.0));
    let wrist = limb("wrist", arm, Vec3::new(1.5, 0.0, 0.0));
    let palm = limb("palm", wrist, Vec3::new(0.175, 0.0, 0.075));
    let grip_a = limb("grip_a", palm, Vec3::new(0.0, -0.05, -0.075));
    let grip_b = limb("grip_b", palm, Vec3::new(0.0, -0.05, -0.075));

    for (grip, deg) in [(grip_a, -30.0_f32), (grip_b, -150.0)] {
        if let Some(node) = scene.get_node_mut(grip) {
            node.transform.rotate_z(deg.to_radians());
        }
    }

    RigNodes {
        root,
        torso,
        thigh_a1,
        thigh_a2,
        thigh_b1,
        thigh_b2,
        leg_a1,
        leg_a2,
        leg_b1,
        leg_b2,
        forearm,
        arm,
        wrist,
        palm,
        grip_a,
        grip_b,
    }
}

fn build_joint(id: JointId, nodes: &RigNodes, config: &RigConfig) -> RevoluteJoint {
    let joint_config = config.joints.get(id);
    match id {
        JointId::Forearm => RevoluteJoint::from_config(
            nodes.forearm,
            JointAxis::Z,
            Vec3::new(0.0, 0.0, FRAC_PI_4),
            joint_config,
        ),
        JointId::Arm => RevoluteJoint::from_config(
            nodes.arm,
            JointAxis::Z,
            Vec3::new(0.0, 0.0, FRAC_PI_2),
            joint_config,
        ),
        JointId::Wrist => RevoluteJoint::from_config(
            nodes.wrist,
            JointAxis::Z,
            Vec3::new(0.0, 0.0, FRAC_PI_4),
            joint_config,
        ),
        // The palm rolls about X on top of a fixed quarter turn about Z.
        JointId::Palm => RevoluteJoint::from_config(
            nodes.palm,
            JointAxis::X,
            Vec3::new(0.0, 0.0, FRAC_PI_2),
            joint_config,
        ),
    }
}

fn add(
    mixer: &mut AnimationMixer,
    clip: &Arc<AnimationClip>,
    group: &[NodeHandle],
    loop_mode: LoopMode,
    clamp_when_finished: bool,
) -> ActionHandle {
    let action = AnimationAction::new(Arc::clone(clip))
        .with_bindings(Binder::bind_group(clip, group))
        .with_loop_mode(loop_mode)
        .with_clamp_when_finished(clamp_when_finished);
    mixer.add_action(action)
}

fn add_walk(mixer: &mut AnimationMixer, clips: &ClipLibrary, nodes: &RigNodes) -> WalkActions {
    let ping_pong = LoopMode::PingPong;
    WalkActions {
        thigh_a: add(mixer, &clips.thigh_walk, &[nodes.thigh_a1, nodes.thigh_a2], ping_pong, false),
        leg_a: add(mixer, &clips.leg_walk, &[nodes.leg_a1, nodes.leg_a2], ping_pong, false),
        thigh_b: add(mixer, &clips.thigh_walk, &[nodes.thigh_b1, nodes.thigh_b2], ping_pong, false),
        leg_b: add(mixer, &clips.leg_walk, &[nodes.leg_b1, nodes.leg_b2], ping_pong, false),
        torso: add(mixer, &clips.torso_walk, &[nodes.torso], ping_pong, false),
    }
}

/// Front joints are the "1" thighs and legs, back joints the "2" ones.
fn add_pose_shift(mixer: &mut AnimationMixer, clips: &PoseShiftClips, nodes: &RigNodes) -> PoseShiftActions {
    let repeat = LoopMode::Repeat(1);
    PoseShiftActions {
        torso: add(mixer, &clips.torso, &[nodes.torso], repeat, true),
        thigh_front: add(mixer, &clips.thigh_front, &[nodes.thigh_a1, nodes.thigh_b1], repeat, true),
        thigh_back: add(mixer, &clips.thigh_back, &[nodes.thigh_a2, nodes.thigh_b2], repeat, true),
        leg_front: add(mixer, &clips.leg_front, &[nodes.leg_a1, nodes.leg_b1], repeat, true),
        leg_back: add(mixer, &clips.leg_back, &[nodes.leg_a2, nodes.leg_b2], repeat, true),
    }
}

/// Starts the walk cycle and freezes it at the priming phases, so the legs rest in
/// a mid-stride pose and resume from it when walking starts.
fn prime_walk(mixer: &mut AnimationMixer, walk: &WalkActions, config: &RigConfig) {
    let primed = [
        (walk.thigh_a, config.gait_priming_a),
        (walk.leg_a, config.gait_priming_a),
        (walk.torso, config.gait_priming_a),
        (walk.thigh_b, config.gait_priming_b),
        (walk.leg_b, config.gait_priming_b),
    ];

    for (handle, phase) in primed {
        if let Some(action) = mixer.action_mut(handle) {
            action.play();
            action.update(phase);
            action.paused = true;
        }
    }
}
