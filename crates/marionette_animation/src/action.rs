use std::sync::Arc;

use marionette_scene::Scene;

use crate::binder::Bindings;
use crate::binding::TargetPath;
use crate::clip::{AnimationClip, TrackData};
use crate::tracks::KeyframeCursor;

/// How an action behaves when its time reaches either end of the clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Play to the end (or start, when reversed) and finish.
    Once,
    /// Wrap around forever.
    Loop,
    /// Wrap around until `n` passes have completed, then finish.
    Repeat(u32),
    /// Bounce between both ends forever.
    PingPong,
}

/// Direction of travel through the clip, derived from the sign of the effective delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackDirection {
    Forward,
    Reverse,
}

impl PlaybackDirection {
    fn of(delta: f32) -> Self {
        if delta < 0.0 {
            PlaybackDirection::Reverse
        } else {
            PlaybackDirection::Forward
        }
    }
}

/// Notification produced by [`AnimationAction::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEvent {
    /// The loop policy ran out; the action is now paused (clamped) or disabled.
    Finished(PlaybackDirection),
    /// The time wrapped around `loop_delta` times without finishing.
    Looped { loop_delta: u32 },
}

/// Playback state of one clip bound to one or more nodes.
///
/// The playback time always lies within `[0, duration]`. For [`LoopMode::PingPong`]
/// it is the reflected time; [`cycle_phase`](Self::cycle_phase) gives the unfolded
/// position within the `2 * duration` round trip.
///
/// A new action is stopped: it neither advances nor writes to the scene until
/// [`play`](Self::play) is called.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    time: f32,
    pub time_scale: f32,
    /// Blend factor toward the sampled value; `1.0` overwrites the node property.
    pub weight: f32,
    pub loop_mode: LoopMode,
    pub paused: bool,
    pub enabled: bool,
    /// On finish, hold the final pose (pause) instead of disabling the action.
    pub clamp_when_finished: bool,

    pub bindings: Bindings,

    pub(crate) track_cursors: Vec<KeyframeCursor>,

    // -1 until the first forward step; a reverse start leaves it at -1 so the
    // initial pass through zero counts as a repetition.
    loop_count: i32,
    // Ping-pong: travelling from `duration` back toward 0.
    reversed: bool,
    finished: bool,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        let track_count = clip.tracks.len();
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            weight: 1.0,
            loop_mode: LoopMode::Loop,
            paused: false,
            enabled: false,
            clamp_when_finished: false,
            bindings: Bindings::new(),
            track_cursors: vec![KeyframeCursor::default(); track_count],
            loop_count: -1,
            reversed: false,
            finished: false,
        }
    }

    #[must_use]
    pub fn with_bindings(mut self, bindings: Bindings) -> Self {
        self.bindings = bindings;
        self
    }

    #[must_use]
    pub fn with_loop_mode(mut self, loop_mode: LoopMode) -> Self {
        self.loop_mode = loop_mode;
        self
    }

    #[must_use]
    pub fn with_clamp_when_finished(mut self, clamp: bool) -> Self {
        self.clamp_when_finished = clamp;
        self
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.clip.duration
    }

    /// Current playback time, within `[0, duration]`.
    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Unfolded position in the loop. Equals [`time`](Self::time) except for
    /// ping-pong playback on the way back, where it lies in `(duration, 2 * duration)`.
    #[must_use]
    pub fn cycle_phase(&self) -> f32 {
        if self.loop_mode == LoopMode::PingPong && self.reversed {
            2.0 * self.clip.duration - self.time
        } else {
            self.time
        }
    }

    /// Ping-pong only: whether the action is on its way back toward 0.
    #[must_use]
    pub fn is_ping_pong_reversed(&self) -> bool {
        self.reversed
    }

    /// Whether the action is enabled, unpaused, and actually moving.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.enabled && !self.paused && self.time_scale != 0.0
    }

    /// Polled completion flag: set when the loop policy runs out, cleared by
    /// [`play`](Self::play), [`reset`](Self::reset) and [`stop`](Self::stop).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn loop_count(&self) -> i32 {
        self.loop_count
    }

    /// Activates the action from its current time.
    pub fn play(&mut self) -> &mut Self {
        self.enabled = true;
        self.paused = false;
        self.finished = false;
        self
    }

    /// Rewinds to the start and clears loop bookkeeping. Leaves the action active.
    pub fn reset(&mut self) -> &mut Self {
        self.enabled = true;
        self.paused = false;
        self.finished = false;
        self.time = 0.0;
        self.loop_count = -1;
        self.reversed = false;
        self
    }

    /// Resets and deactivates the action; it stops writing to the scene.
    pub fn stop(&mut self) -> &mut Self {
        self.reset();
        self.enabled = false;
        self
    }

    /// Moves the playback time to `time`.
    ///
    /// For [`LoopMode::Loop`] and [`LoopMode::Repeat`], times outside `[0, duration]`
    /// are folded back into the clip and every fold counts as a completed pass, so
    /// `seek(time - duration)` followed by reverse playback walks back from `time`
    /// to 0 exactly once. Ping-pong maps `time` onto the round trip; `Once` clamps.
    pub fn seek(&mut self, time: f32) -> &mut Self {
        let duration = self.clip.duration;
        if duration <= 0.0 {
            self.time = 0.0;
            return self;
        }

        match self.loop_mode {
            LoopMode::Loop | LoopMode::Repeat(_) if time < 0.0 || time > duration => {
                let loop_delta = (time / duration).floor();
                self.time = (time - duration * loop_delta).clamp(0.0, duration);
                self.loop_count = self.loop_count.saturating_add(loop_delta.abs() as i32);
            }
            LoopMode::PingPong => {
                self.set_ping_pong_phase(time, duration);
            }
            _ => {
                self.time = time.clamp(0.0, duration);
            }
        }
        self
    }

    /// Advances time by `dt * time_scale` and applies the loop policy.
    pub fn update(&mut self, dt: f32) -> Option<ActionEvent> {
        if self.paused || !self.enabled {
            return None;
        }

        let duration = self.clip.duration;
        if duration <= 0.0 {
            return None;
        }

        let delta = dt * self.time_scale;
        if delta.abs() < f32::EPSILON {
            return None;
        }

        match self.loop_mode {
            LoopMode::Once => self.update_once(delta, duration),
            LoopMode::Loop => self.update_repeating(delta, duration, None),
            LoopMode::Repeat(repetitions) => self.update_repeating(delta, duration, Some(repetitions)),
            LoopMode::PingPong => {
                let phase = self.cycle_phase() + delta;
                self.set_ping_pong_phase(phase, duration);
                None
            }
        }
    }

    fn update_once(&mut self, delta: f32, duration: f32) -> Option<ActionEvent> {
        let time = self.time + delta;
        if time >= duration {
            self.time = duration;
            Some(self.finish(PlaybackDirection::Forward))
        } else if time <= 0.0 {
            self.time = 0.0;
            Some(self.finish(PlaybackDirection::Reverse))
        } else {
            self.time = time;
            None
        }
    }

    fn update_repeating(&mut self, delta: f32, duration: f32, repetitions: Option<u32>) -> Option<ActionEvent> {
        if self.loop_count == -1 && delta >= 0.0 {
            self.loop_count = 0;
        }

        let time = self.time + delta;
        if (0.0..duration).contains(&time) {
            self.time = time;
            return None;
        }

        let loop_delta = (time / duration).floor();
        let wraps = loop_delta.abs() as i32;
        self.loop_count = self.loop_count.saturating_add(wraps);

        let pending = repetitions.map_or(i64::MAX, |n| i64::from(n) - i64::from(self.loop_count));
        if pending <= 0 {
            let direction = PlaybackDirection::of(delta);
            self.time = match direction {
                PlaybackDirection::Forward => duration,
                PlaybackDirection::Reverse => 0.0,
            };
            return Some(self.finish(direction));
        }

        self.time = (time - duration * loop_delta).clamp(0.0, duration);
        Some(ActionEvent::Looped {
            loop_delta: wraps.unsigned_abs(),
        })
    }

    fn set_ping_pong_phase(&mut self, phase: f32, duration: f32) {
        let period = duration * 2.0;
        let phase = phase.rem_euclid(period);
        if phase > duration {
            self.time = (period - phase).clamp(0.0, duration);
            self.reversed = true;
        } else {
            self.time = phase;
            self.reversed = false;
        }
    }

    fn finish(&mut self, direction: PlaybackDirection) -> ActionEvent {
        if self.clamp_when_finished {
            self.paused = true;
        } else {
            self.enabled = false;
        }
        self.finished = true;
        ActionEvent::Finished(direction)
    }

    /// Samples every bound track at the current time and writes the result into the
    /// bound node properties, blending by `weight`.
    pub(crate) fn apply_to(&mut self, scene: &mut Scene) {
        let time = self.time;
        let weight = self.weight.min(1.0);

        for binding in &self.bindings {
            let Some(track) = self.clip.tracks.get(binding.track_index) else {
                continue;
            };
            let Some(cursor) = self.track_cursors.get_mut(binding.track_index) else {
                continue;
            };
            let Some(node) = scene.get_node_mut(binding.node_handle) else {
                continue;
            };
            let transform = &mut node.transform;

            match (&track.data, binding.target) {
                (TrackData::Vector3(t), TargetPath::Translation) => {
                    let val = t.sample_with_cursor(time, cursor);
                    transform.position = transform.position.lerp(val, weight);
                }
                (TrackData::Quaternion(t), TargetPath::Rotation) => {
                    let val = t.sample_with_cursor(time, cursor);
                    transform.rotation = if weight >= 1.0 {
                        val
                    } else {
                        transform.rotation.slerp(val, weight)
                    };
                }
                _ => {}
            }
        }
    }
}
