use marionette_core::{MarionetteError, Result};

use crate::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    Linear,
    Step,
    /// glTF-style: each key stores `[in_tangent, value, out_tangent]`.
    CubicSpline,
}

const MAX_SCAN_OFFSET: usize = 3;

/// Remembers the last sampled key interval so sequential playback avoids a search.
#[derive(Debug, Clone, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f32>,
    pub values: Vec<T>, // For CubicSpline, length is times.len() * 3
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    /// Creates a track without validation. Sampling a cubic-spline track whose value
    /// count is not three per key panics; use [`try_new`](Self::try_new) for any data
    /// not built in code.
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        Self {
            times,
            values,
            interpolation,
        }
    }

    /// Creates a track, checking that it has keys, that key times never decrease,
    /// and that the value count matches the interpolation mode.
    pub fn try_new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Result<Self> {
        if times.is_empty() {
            return Err(MarionetteError::EmptyTrack);
        }

        if let Some(index) = times.windows(2).position(|w| w[1] < w[0]) {
            return Err(MarionetteError::UnsortedKeyframes {
                index: index + 1,
                previous: times[index],
                current: times[index + 1],
            });
        }

        let expected = match interpolation {
            InterpolationMode::CubicSpline => times.len() * 3,
            _ => times.len(),
        };
        if values.len() != expected {
            return Err(MarionetteError::KeyframeCountMismatch {
                expected,
                actual: values.len(),
            });
        }

        Ok(Self::new(times, values, interpolation))
    }

    /// Time of the last key, or `0.0` for an empty track.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Stateless sampling (binary search every call).
    #[must_use]
    pub fn sample(&self, time: f32) -> T {
        if self.times.is_empty() {
            return T::default();
        }

        // partition_point finds the first index where t > time, i.e. next_index
        let next_idx = self.times.partition_point(|&t| t <= time);
        let idx = next_idx.saturating_sub(1);

        self.sample_at_frame(idx, time)
    }

    /// Sampling with a cursor: O(1) for small forward or backward steps,
    /// binary search for large jumps. The cursor is updated in place.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> T {
        let len = self.times.len();
        if len == 0 {
            return T::default();
        }
        // Static data (single keyframe)
        if len == 1 {
            return *self.get_value_at(0);
        }

        let i = cursor.last_index.min(len - 1);
        let t_curr = self.times[i];

        let found_index = if time >= t_curr {
            // Case A: normal playback or fast-forward
            let mut res = None;
            for offset in 0..=MAX_SCAN_OFFSET {
                let idx = i + offset;
                if idx >= len - 1 {
                    if time >= self.times[len - 1] {
                        res = Some(len - 1);
                    }
                    break;
                }
                if time < self.times[idx + 1] {
                    res = Some(idx);
                    break;
                }
            }
            res
        } else {
            // Case B: reverse playback or ping-pong descent
            let mut res = None;
            for offset in 0..=MAX_SCAN_OFFSET {
                if i < offset {
                    break;
                }
                let idx = i - offset;
                if time >= self.times[idx] {
                    res = Some(idx);
                    break;
                }
            }
            res
        };

        let final_index = if let Some(idx) = found_index {
            idx
        } else {
            // Case C: large jump, fall back to binary search
            let next_idx = self.times.partition_point(|&t| t <= time);
            next_idx.saturating_sub(1)
        };
        cursor.last_index = final_index;

        self.sample_at_frame(final_index, time)
    }

    /// For Linear/Step the index is used directly; for CubicSpline the value
    /// sits at `index * 3 + 1`.
    fn get_value_at(&self, index: usize) -> &T {
        match self.interpolation {
            InterpolationMode::CubicSpline => &self.values[index * 3 + 1],
            _ => &self.values[index],
        }
    }

    fn sample_at_frame(&self, index: usize, time: f32) -> T {
        let len = self.times.len();

        if index >= len - 1 {
            return *self.get_value_at(len - 1);
        }

        let next_idx = index + 1;
        let t0 = self.times[index];
        let t1 = self.times[next_idx];
        let dt = t1 - t0;

        let t = if dt > 1e-6 { (time - t0) / dt } else { 0.0 };
        let t = t.clamp(0.0, 1.0);

        match self.interpolation {
            InterpolationMode::Step => *self.get_value_at(index),
            InterpolationMode::Linear => {
                let v0 = self.get_value_at(index);
                let v1 = self.get_value_at(next_idx);
                T::interpolate_linear(v0, v1, t)
            }
            InterpolationMode::CubicSpline => {
                let i_prev = index * 3;
                let i_next = next_idx * 3;

                let v0 = &self.values[i_prev + 1];
                let out_tangent0 = &self.values[i_prev + 2];
                let in_tangent1 = &self.values[i_next];
                let v1 = &self.values[i_next + 1];

                T::interpolate_cubic(v0, out_tangent0, in_tangent1, v1, t, dt)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_rejects_bad_tracks() {
        assert!(matches!(
            KeyframeTrack::<f32>::try_new(vec![], vec![], InterpolationMode::Linear),
            Err(MarionetteError::EmptyTrack)
        ));
        assert!(matches!(
            KeyframeTrack::try_new(vec![0.0, 1.0, 0.5], vec![0.0_f32; 3], InterpolationMode::Linear),
            Err(MarionetteError::UnsortedKeyframes { index: 2, .. })
        ));
        assert!(matches!(
            KeyframeTrack::try_new(vec![0.0, 1.0], vec![0.0_f32; 2], InterpolationMode::CubicSpline),
            Err(MarionetteError::KeyframeCountMismatch { expected: 6, actual: 2 })
        ));
    }

    #[test]
    fn empty_track_samples_default() {
        let track = KeyframeTrack::<f32>::new(vec![], vec![], InterpolationMode::Linear);
        let mut cursor = KeyframeCursor::default();
        assert_eq!(track.sample(1.0), 0.0);
        assert_eq!(track.sample_with_cursor(1.0, &mut cursor), 0.0);
    }
}
