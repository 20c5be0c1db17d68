//! Animation system
//!
//! - [`KeyframeTrack`]: times + values with linear/step/cubic sampling
//! - [`AnimationClip`]: an immutable set of tracks with a duration
//! - [`AnimationAction`]: playback state of one clip bound to one or more nodes
//! - [`AnimationMixer`]: ordered action registry, advanced once per tick

pub mod action;
pub mod binder;
pub mod binding;
pub mod clip;
pub mod mixer;
pub mod tracks;
pub mod values;

pub use action::{ActionEvent, AnimationAction, LoopMode, PlaybackDirection};
pub use binder::Binder;
pub use binding::{PropertyBinding, TargetPath};
pub use clip::{AnimationClip, Track, TrackData, TrackMeta};
pub use mixer::{ActionHandle, AnimationMixer, MixerEvent};
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use values::Interpolatable;
