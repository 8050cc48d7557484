//! Rendering of the glyph rain.
//!
//! [`frame::FrameData`] stages the simulation into GPU layouts on the CPU;
//! [`rain_pass::RainPass`] owns the pipeline and issues the one instanced
//! draw per frame.

pub mod frame;
pub(crate) mod pipeline_util;
pub mod rain_pass;
