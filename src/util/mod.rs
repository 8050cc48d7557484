//! Shared utilities for the simulation and the frame loop.
//!
//! Random draws, easing curves, period tickers, and frame timing.

pub mod easing;
/// Frame clock and windowed FPS estimate.
pub mod frame_timing;
pub mod random;
/// Integer-counter period timers.
pub mod ticker;
