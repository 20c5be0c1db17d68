//! Keyframe data of the robot's gestures
//!
//! Joint angles are about the local +Z axis, in degrees. Torso tracks are absolute
//! positions: the rig anchor plus a vertical offset.

use std::sync::Arc;

use glam::{Quat, Vec3};
use marionette_animation::{AnimationClip, InterpolationMode, KeyframeTrack, Track};
use marionette_core::Result;

pub const WALK_KEY_TIMES: [f32; 3] = [0.0, 0.25, 0.5];
pub const JUMP_KEY_TIMES: [f32; 4] = [0.0, 0.25, 0.45, 0.7];

/// One clip per joint group of a pose shift.
#[derive(Debug, Clone)]
pub struct PoseShiftClips {
    pub torso: Arc<AnimationClip>,
    pub thigh_front: Arc<AnimationClip>,
    pub thigh_back: Arc<AnimationClip>,
    pub leg_front: Arc<AnimationClip>,
    pub leg_back: Arc<AnimationClip>,
}

#[derive(Debug, Clone)]
pub struct ClipLibrary {
    pub thigh_walk: Arc<AnimationClip>,
    pub leg_walk: Arc<AnimationClip>,
    pub torso_walk: Arc<AnimationClip>,

    pub thigh_jump: Arc<AnimationClip>,
    pub leg_jump: Arc<AnimationClip>,
    pub torso_jump: Arc<AnimationClip>,

    pub doggy: PoseShiftClips,
    pub donkey: PoseShiftClips,

    pub grip_a: Arc<AnimationClip>,
    pub grip_b: Arc<AnimationClip>,
}

impl ClipLibrary {
    /// Builds every gesture clip. Fails if a duration would put the keys out of order.
    pub fn new(anchor: Vec3, pose_shift_duration: f32, grip_duration: f32) -> Result<Self> {
        let shift = [0.0, pose_shift_duration];
        let grip = [0.0, grip_duration];

        Ok(Self {
            thigh_walk: z_rotation_clip("ThighWalkCycle", &WALK_KEY_TIMES, &[25.0, 48.0, 60.0])?,
            leg_walk: z_rotation_clip("LegWalkCycle", &WALK_KEY_TIMES, &[-110.0, -98.0, -85.0])?,
            torso_walk: torso_bob_clip("TorsoWalkCycle", anchor, &WALK_KEY_TIMES, &[0.2, 0.0, 0.2])?,

            thigh_jump: z_rotation_clip("ThighJump", &JUMP_KEY_TIMES, &[48.0, 75.0, 30.0, 48.0])?,
            leg_jump: z_rotation_clip("LegJump", &JUMP_KEY_TIMES, &[-98.0, -130.0, -75.0, -98.0])?,
            torso_jump: torso_bob_clip("TorsoJump", anchor, &JUMP_KEY_TIMES, &[0.0, -0.75, 1.35, 0.0])?,

            doggy: PoseShiftClips {
                torso: z_rotation_clip("TorsoDoggy", &shift, &[0.0, 25.0])?,
                thigh_front: z_rotation_clip("ThighFrontDoggy", &shift, &[48.0, 60.0])?,
                thigh_back: z_rotation_clip("ThighBackDoggy", &shift, &[48.0, -10.0])?,
                leg_front: z_rotation_clip("LegFrontDoggy", &shift, &[-98.0, -130.0])?,
                leg_back: z_rotation_clip("LegBackDoggy", &shift, &[-98.0, -20.0])?,
            },
            donkey: PoseShiftClips {
                torso: z_rotation_clip("TorsoDonkey", &shift, &[0.0, -25.0])?,
                thigh_front: z_rotation_clip("ThighFrontDonkey", &shift, &[48.0, 30.0])?,
                thigh_back: z_rotation_clip("ThighBackDonkey", &shift, &[48.0, 70.0])?,
                leg_front: z_rotation_clip("LegFrontDonkey", &shift, &[-98.0, -20.0])?,
                leg_back: z_rotation_clip("LegBackDonkey", &shift, &[-98.0, -130.0])?,
            },

            grip_a: z_rotation_clip("GripA", &grip, &[-30.0, -60.0])?,
            grip_b: z_rotation_clip("GripB", &grip, &[-150.0, -120.0])?,
        })
    }
}

/// A single rotation track about +Z.
fn z_rotation_clip(name: &str, times: &[f32], degrees: &[f32]) -> Result<Arc<AnimationClip>> {
    let values = degrees
        .iter()
        .map(|deg| Quat::from_rotation_z(deg.to_radians()))
        .collect();
    let track = KeyframeTrack::try_new(times.to_vec(), values, InterpolationMode::Linear)?;
    Ok(Arc::new(AnimationClip::new(name.to_string(), vec![Track::rotation(track)])))
}

/// A single position track at `anchor` offset vertically by `dy`.
fn torso_bob_clip(name: &str, anchor: Vec3, times: &[f32], dy: &[f32]) -> Result<Arc<AnimationClip>> {
    let values = dy.iter().map(|&y| anchor + Vec3::new(0.0, y, 0.0)).collect();
    let track = KeyframeTrack::try_new(times.to_vec(), values, InterpolationMode::Linear)?;
    Ok(Arc::new(AnimationClip::new(name.to_string(), vec![Track::translation(track)])))
}
