//! Error Types
//!
//! This module defines the error types used throughout Marionette.
//!
//! # Overview
//!
//! Gesture handling and per-frame ticking never fail: re-entrant triggers are
//! ignored, out-of-range times are clamped. Errors only surface while a rig is
//! being put together:
//! - Malformed keyframe data
//! - Invalid rig configuration
//! - Scene lookups that name a node which does not exist
//! - Configuration file I/O and JSON parsing
//!
//! # Usage
//!
//! All fallible APIs return [`Result<T>`] which is an alias for `std::result::Result<T, MarionetteError>`.
//!
//! ```rust,ignore
//! use marionette_core::errors::{MarionetteError, Result};
//!
//! fn load_config() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for Marionette.
#[derive(Error, Debug)]
pub enum MarionetteError {
    // ========================================================================
    // Animation Data Errors
    // ========================================================================
    /// A keyframe track has no keys.
    #[error("Keyframe track is empty")]
    EmptyTrack,

    /// Keyframe times must be non-decreasing.
    #[error("Keyframe times are not sorted at index {index} ({previous} > {current})")]
    UnsortedKeyframes {
        /// Index of the offending key
        index: usize,
        /// Time of the previous key
        previous: f32,
        /// Time of the offending key
        current: f32,
    },

    /// Number of values does not match the number of key times.
    #[error("Keyframe value count mismatch: expected {expected}, got {actual}")]
    KeyframeCountMismatch {
        /// Values required by the interpolation mode
        expected: usize,
        /// Values supplied
        actual: usize,
    },

    // ========================================================================
    // Scene Errors
    // ========================================================================
    /// A named node could not be found in the scene.
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration values are out of their valid domain.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A key name in a binding table is not recognised.
    #[error("Unknown key name: {0}")]
    UnknownKey(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Alias for `Result<T, MarionetteError>`.
pub type Result<T> = std::result::Result<T, MarionetteError>;
