//! Camera rig and automatic viewpoint drift.
//!
//! The eye stays fixed; the rain volume is rotated by the current
//! [`core::ViewAngles`], which [`auto_track::CameraTrack`] eases between
//! preset viewpoints.

/// Preset viewpoints and the hold/move drift between them.
pub mod auto_track;
/// Perspective rig and view angles.
pub mod core;
