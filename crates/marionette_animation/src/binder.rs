use marionette_scene::NodeHandle;
use smallvec::SmallVec;

use crate::binding::PropertyBinding;
use crate::clip::AnimationClip;

/// Inline capacity for per-action bindings; rig clips drive one to four joints.
pub type Bindings = SmallVec<[PropertyBinding; 4]>;

pub struct Binder;

impl Binder {
    /// Binds every track of `clip` to every node in `group`.
    ///
    /// One clip can drive a whole group of joints (e.g. both front thighs) with a
    /// single playback time.
    #[must_use]
    pub fn bind_group(clip: &AnimationClip, group: &[NodeHandle]) -> Bindings {
        let mut bindings = Bindings::with_capacity(clip.tracks.len() * group.len());

        for (track_index, track) in clip.tracks.iter().enumerate() {
            for &node_handle in group {
                bindings.push(PropertyBinding {
                    track_index,
                    node_handle,
                    target: track.meta.target,
                });
            }
        }

        bindings
    }
}
