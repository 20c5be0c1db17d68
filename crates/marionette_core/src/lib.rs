//! Marionette Core
//!
//! Shared foundation for the Marionette crates:
//!
//! - [`errors`]: the crate-wide [`MarionetteError`] and [`Result`] alias
//! - [`time`]: the per-frame [`Timer`] that produces tick deltas
//! - [`input`]: platform-agnostic [`Key`] and [`ButtonState`]

pub mod errors;
pub mod input;
pub mod time;

pub use errors::{MarionetteError, Result};
pub use input::{ButtonState, Key};
pub use time::Timer;
