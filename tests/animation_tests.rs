//! Animation System Tests
//!
//! Tests for:
//! - KeyframeTrack linear/step/cubic interpolation
//! - Interpolatable trait implementations (f32, Vec3, Quat)
//! - KeyframeCursor sequential access and binary search fallback
//! - AnimationAction loop modes (Once, Loop, Repeat, PingPong)
//! - AnimationMixer ordering, blending and events
//! - AnimationClip duration auto-computation

use std::f32::consts::{FRAC_PI_2, PI};
use std::sync::Arc;

use glam::{Quat, Vec3};

use marionette::animation::{
    ActionEvent, AnimationAction, AnimationClip, AnimationMixer, Binder, InterpolationMode, Interpolatable,
    KeyframeCursor, KeyframeTrack, LoopMode, MixerEvent, PlaybackDirection, Track,
};
use marionette::errors::MarionetteError;
use marionette::scene::Scene;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// KeyframeTrack: Linear Interpolation (f32)
// ============================================================================

#[test]
fn track_linear_f32_midpoint() {
    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![0.0_f32, 10.0], InterpolationMode::Linear);

    let mut cursor = KeyframeCursor::default();
    let val = track.sample_with_cursor(0.5, &mut cursor);
    assert!(approx(val, 5.0), "Expected 5.0, got {val}");
}

#[test]
fn track_linear_f32_exact_keyframe() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 10.0, 20.0],
        InterpolationMode::Linear,
    );

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(0.0, &mut cursor), 0.0));
    assert!(approx(track.sample_with_cursor(1.0, &mut cursor), 10.0));
    assert!(approx(track.sample_with_cursor(2.0, &mut cursor), 20.0));
}

#[test]
fn track_linear_f32_clamps_outside_range() {
    let track = KeyframeTrack::new(vec![1.0, 2.0], vec![10.0_f32, 20.0], InterpolationMode::Linear);

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(5.0, &mut cursor), 20.0));
    assert!(approx(track.sample_with_cursor(0.5, &mut cursor), 10.0));
}

// ============================================================================
// KeyframeTrack: Step / Vec3 / Quat
// ============================================================================

#[test]
fn track_step_holds_value() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 100.0, 200.0],
        InterpolationMode::Step,
    );

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(0.0, &mut cursor), 0.0));
    assert!(approx(track.sample_with_cursor(0.99, &mut cursor), 0.0));
    assert!(approx(track.sample_with_cursor(1.0, &mut cursor), 100.0));
    assert!(approx(track.sample_with_cursor(1.5, &mut cursor), 100.0));
}

#[test]
fn track_linear_vec3() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0)],
        InterpolationMode::Linear,
    );

    let val = track.sample(0.5);
    assert!((val - Vec3::new(5.0, 10.0, 15.0)).length() < EPSILON);
}

#[test]
fn track_linear_quat_slerp() {
    let q0 = Quat::IDENTITY;
    let q1 = Quat::from_rotation_y(PI);

    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![q0, q1], InterpolationMode::Linear);

    let mut cursor = KeyframeCursor::default();
    let val = track.sample_with_cursor(0.5, &mut cursor);
    let angle = val.angle_between(q0.slerp(q1, 0.5));
    assert!(angle < 0.01, "Quaternion slerp mismatch: angle={angle}");
    assert!(approx(val.length(), 1.0), "Slerp result must stay unit length");
}

// ============================================================================
// KeyframeTrack: Cubic Spline Interpolation
// ============================================================================

#[test]
fn track_cubic_f32_endpoints() {
    // values = [in_tangent0, value0, out_tangent0, in_tangent1, value1, out_tangent1]
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![
            0.0_f32, 0.0, 1.0, // frame 0
            1.0, 10.0, 0.0, // frame 1
        ],
        InterpolationMode::CubicSpline,
    );

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(0.0, &mut cursor), 0.0));
    assert!(approx(track.sample_with_cursor(1.0, &mut cursor), 10.0));
}

#[test]
fn track_cubic_f32_smooth_midpoint() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 0.0, 0.0, 0.0, 10.0, 0.0],
        InterpolationMode::CubicSpline,
    );

    // Zero tangents: Hermite midpoint is exactly halfway
    assert!(approx(track.sample(0.5), 5.0), "got {}", track.sample(0.5));
}

#[test]
fn track_try_new_validates() {
    assert!(matches!(
        KeyframeTrack::try_new(vec![0.0, 1.0], vec![Vec3::ZERO], InterpolationMode::Linear),
        Err(MarionetteError::KeyframeCountMismatch { expected: 2, actual: 1 })
    ));
    assert!(KeyframeTrack::try_new(vec![0.0, 0.5], vec![0.0_f32, 1.0], InterpolationMode::Step).is_ok());
}

// ============================================================================
// KeyframeCursor
// ============================================================================

#[test]
fn sample_matches_cursor_across_all_times() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
        vec![0.0_f32, 10.0, 5.0, 20.0, 15.0],
        InterpolationMode::Linear,
    );
    let mut cursor = KeyframeCursor::default();
    for i in 0..=40 {
        let t = i as f32 * 0.1;
        let val_cursor = track.sample_with_cursor(t, &mut cursor);
        let val_sample = track.sample(t);
        assert!(
            approx(val_sample, val_cursor),
            "t={t}: sample()={val_sample} != sample_with_cursor()={val_cursor}"
        );
    }
}

#[test]
fn cursor_handles_backward_sweep() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
        vec![0.0_f32, 10.0, 20.0, 30.0, 40.0],
        InterpolationMode::Linear,
    );

    let mut cursor = KeyframeCursor::default();
    for i in (0..=20).rev() {
        let t = i as f32 * 0.2;
        let val = track.sample_with_cursor(t, &mut cursor);
        assert!(approx(val, t * 10.0), "t={t}: got {val}");
    }
}

#[test]
fn cursor_forward_then_jump_back() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        vec![0.0_f32, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0],
        InterpolationMode::Linear,
    );

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(5.5, &mut cursor), 55.0));
    // Large jump back: binary search fallback
    assert!(approx(track.sample_with_cursor(0.5, &mut cursor), 5.0));
}

#[test]
fn cursor_single_keyframe() {
    let track = KeyframeTrack::new(vec![0.0], vec![42.0_f32], InterpolationMode::Linear);

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(5.0, &mut cursor), 42.0));
}

// ============================================================================
// Interpolatable Implementations
// ============================================================================

#[test]
fn interpolatable_f32_linear() {
    assert!(approx(f32::interpolate_linear(&0.0, &10.0, 0.25), 2.5));
}

#[test]
fn interpolatable_quat_linear_is_slerp() {
    let a = Quat::IDENTITY;
    let b = Quat::from_rotation_z(FRAC_PI_2);
    let result = Quat::interpolate_linear(&a, &b, 0.5);

    let angle = result.angle_between(Quat::from_rotation_z(FRAC_PI_2 / 2.0));
    assert!(angle < 1e-4, "Slerp mismatch: angle={angle}");
}

// ============================================================================
// AnimationAction Loop Modes
// ============================================================================

fn make_simple_clip(duration: f32) -> Arc<AnimationClip> {
    Arc::new(AnimationClip::new(
        "test".to_string(),
        vec![Track::translation(KeyframeTrack::new(
            vec![0.0, duration],
            vec![Vec3::ZERO, Vec3::X],
            InterpolationMode::Linear,
        ))],
    ))
}

fn playing(duration: f32, loop_mode: LoopMode) -> AnimationAction {
    let mut action = AnimationAction::new(make_simple_clip(duration)).with_loop_mode(loop_mode);
    action.play();
    action
}

#[test]
fn new_action_is_stopped() {
    let mut action = AnimationAction::new(make_simple_clip(1.0));
    assert!(!action.enabled);
    assert!(!action.is_running());

    assert_eq!(action.update(0.5), None);
    assert!(approx(action.time(), 0.0));
}

#[test]
fn action_loop_mode_once_clamps_and_finishes() {
    let mut action = playing(2.0, LoopMode::Once);

    let event = action.update(3.0);
    assert_eq!(event, Some(ActionEvent::Finished(PlaybackDirection::Forward)));
    assert!(approx(action.time(), 2.0), "Once: should clamp to duration, got {}", action.time());
    assert!(action.is_finished());
    assert!(!action.enabled, "Once without clamp disables the action");
}

#[test]
fn action_once_never_exceeds_duration() {
    for &dt in &[0.0_f32, 0.016, 0.3, 0.69, 0.71, 5.0, 1e6] {
        let mut action = playing(0.7, LoopMode::Once);
        action.seek(0.4);
        action.update(dt);
        assert!(
            action.time() <= 0.7 && action.time() >= 0.0,
            "dt={dt}: time {} escaped [0, 0.7]",
            action.time()
        );
    }
}

#[test]
fn action_once_clamped_holds_pose() {
    let mut action = playing(1.0, LoopMode::Once).with_clamp_when_finished(true);
    action.play();
    action.update(2.0);
    assert!(action.enabled && action.paused);
    assert!(approx(action.time(), 1.0));
}

#[test]
fn action_once_reverse_clamps_at_zero() {
    let mut action = playing(1.0, LoopMode::Once);
    action.seek(0.5);
    action.time_scale = -1.0;

    let event = action.update(0.8);
    assert_eq!(event, Some(ActionEvent::Finished(PlaybackDirection::Reverse)));
    assert!(approx(action.time(), 0.0));
}

#[test]
fn action_loop_mode_loop_wraps() {
    let mut action = playing(2.0, LoopMode::Loop);

    action.update(2.5);
    assert!(approx(action.time(), 0.5), "Loop: should wrap to 0.5, got {}", action.time());
    assert!(!action.paused, "Loop: should not pause");
}

#[test]
fn action_loop_reverse_playback() {
    let mut action = playing(2.0, LoopMode::Loop);
    action.time_scale = -1.0;
    action.seek(0.5);

    action.update(1.0);
    assert!(approx(action.time(), 1.5), "Loop reverse: got {}", action.time());
}

#[test]
fn action_repeat_finishes_after_count() {
    let mut action = playing(1.0, LoopMode::Repeat(3)).with_clamp_when_finished(true);
    action.play();

    let mut finished_at = None;
    for tick in 0..100 {
        if let Some(ActionEvent::Finished(_)) = action.update(0.25) {
            finished_at = Some(tick);
            break;
        }
    }

    // Three passes of four ticks each
    assert_eq!(finished_at, Some(11));
    assert!(approx(action.time(), 1.0));
    assert!(action.paused);
}

#[test]
fn action_ping_pong_is_triangle_wave() {
    let mut action = playing(0.5, LoopMode::PingPong);
    let dt = 0.03;

    for tick in 1..=400 {
        action.update(dt);
        let elapsed = tick as f32 * dt;
        let phase = elapsed % 1.0;
        let expected = if phase <= 0.5 { phase } else { 1.0 - phase };

        let time = action.time();
        assert!((0.0..=0.5).contains(&time), "tick {tick}: time {time} out of bounds");
        assert!(
            (time - expected).abs() < 1e-3,
            "tick {tick}: expected {expected}, got {time}"
        );
    }
}

#[test]
fn action_ping_pong_reflects_without_overshoot() {
    let mut action = playing(0.5, LoopMode::PingPong);
    action.seek(0.45);

    action.update(0.1);
    assert!(approx(action.time(), 0.45), "reflected at the top, got {}", action.time());
    assert!(action.is_ping_pong_reversed());
    assert!(approx(action.cycle_phase(), 0.55));

    action.update(0.5);
    assert!(approx(action.time(), 0.05), "reflected at the bottom, got {}", action.time());
    assert!(!action.is_ping_pong_reversed());
}

#[test]
fn action_paused_no_update() {
    let mut action = playing(2.0, LoopMode::Loop);
    action.seek(0.5);
    action.paused = true;

    action.update(1.0);
    assert!(approx(action.time(), 0.5), "Paused action should not advance");
}

#[test]
fn action_time_scale() {
    let mut action = playing(4.0, LoopMode::Once);
    action.time_scale = 2.0;

    action.update(1.0);
    assert!(approx(action.time(), 2.0), "Expected 2.0, got {}", action.time());
}

#[test]
fn action_stop_rewinds_and_disables() {
    let mut action = playing(1.0, LoopMode::Loop);
    action.update(0.4);
    action.stop();

    assert!(!action.enabled);
    assert!(approx(action.time(), 0.0));
    assert_eq!(action.loop_count(), -1);
}

// ============================================================================
// AnimationMixer
// ============================================================================

#[test]
fn mixer_writes_sampled_pose() {
    let mut scene = Scene::new();
    let node = scene.build_node("slider").build();

    let clip = make_simple_clip(1.0);
    let mut mixer = AnimationMixer::new();
    let handle = mixer.add_action(
        AnimationAction::new(clip.clone())
            .with_bindings(Binder::bind_group(&clip, &[node]))
            .with_loop_mode(LoopMode::Loop),
    );
    mixer.action_mut(handle).unwrap().play();

    mixer.update(0.25, &mut scene);
    let pos = scene.get_node(node).unwrap().transform.position;
    assert!(approx(pos.x, 0.25), "got {pos}");
}

#[test]
fn mixer_weight_blends_toward_sample() {
    let mut scene = Scene::new();
    let node = scene.build_node("slider").build();

    let clip = Arc::new(AnimationClip::new(
        "constant".to_string(),
        vec![Track::translation(KeyframeTrack::new(
            vec![0.0, 1.0],
            vec![Vec3::X * 4.0, Vec3::X * 4.0],
            InterpolationMode::Linear,
        ))],
    ));
    let mut mixer = AnimationMixer::new();
    let handle = mixer.add_action(AnimationAction::new(clip.clone()).with_bindings(Binder::bind_group(&clip, &[node])));
    let action = mixer.action_mut(handle).unwrap();
    action.weight = 0.5;
    action.play();

    mixer.update(0.1, &mut scene);
    let pos = scene.get_node(node).unwrap().transform.position;
    assert!(approx(pos.x, 2.0), "got {pos}");
}

#[test]
fn mixer_group_binding_drives_every_node() {
    let mut scene = Scene::new();
    let a = scene.build_node("a").build();
    let b = scene.build_node("b").build();

    let clip = make_simple_clip(1.0);
    let mut mixer = AnimationMixer::new();
    let handle = mixer.add_action(AnimationAction::new(clip.clone()).with_bindings(Binder::bind_group(&clip, &[a, b])));
    mixer.action_mut(handle).unwrap().play();
    mixer.update(0.5, &mut scene);

    for node in [a, b] {
        let pos = scene.get_node(node).unwrap().transform.position;
        assert!(approx(pos.x, 0.5));
    }
}

#[test]
fn mixer_reports_loops_and_finish() {
    let mut scene = Scene::new();
    let clip = make_simple_clip(1.0);
    let mut mixer = AnimationMixer::new();
    let handle = mixer.add_action(AnimationAction::new(clip).with_loop_mode(LoopMode::Repeat(2)));
    mixer.action_mut(handle).unwrap().play();

    mixer.update(1.5, &mut scene);
    mixer.update(1.0, &mut scene);

    let events: Vec<MixerEvent> = mixer.drain_events().collect();
    assert_eq!(
        events,
        vec![
            MixerEvent::Looped {
                action: handle,
                loop_delta: 1
            },
            MixerEvent::Finished {
                action: handle,
                direction: PlaybackDirection::Forward
            },
        ]
    );
    assert!(!mixer.action(handle).unwrap().enabled);
}

// ============================================================================
// AnimationClip Auto-Duration
// ============================================================================

#[test]
fn clip_auto_duration() {
    let clip = AnimationClip::new(
        "test".to_string(),
        vec![
            Track::translation(KeyframeTrack::new(
                vec![0.0, 1.5],
                vec![Vec3::ZERO, Vec3::X],
                InterpolationMode::Linear,
            )),
            Track::rotation(KeyframeTrack::new(
                vec![0.0, 3.0],
                vec![Quat::IDENTITY, Quat::from_rotation_y(1.0)],
                InterpolationMode::Linear,
            )),
        ],
    );

    assert!(approx(clip.duration, 3.0), "got {}", clip.duration);
}

#[test]
fn clip_empty_tracks_zero_duration() {
    let clip = AnimationClip::new("empty".to_string(), vec![]);
    assert!(approx(clip.duration, 0.0));
}

#[test]
fn clip_explicit_duration() {
    let clip = AnimationClip::with_duration("padded".to_string(), 2.0, vec![]);
    assert!(approx(clip.duration, 2.0));
}
