// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! GPU-instanced 3D falling-glyph rain built on wgpu.
//!
//! Strips of glyphs fall through a depth volume: a spinner runs down each
//! strip revealing glyphs, then climbs back erasing them, while a brightness
//! wave rolls along the column and the whole volume slowly drifts between
//! preset camera angles.
//!
//! # Key entry points
//!
//! - [`Viewer`] - standalone winit window (`viewer` feature)
//! - [`RainEngine`] - GPU context, rain pipeline, and simulation for
//!   embedding in an existing event loop
//! - [`rain::RainField`] - the CPU-side strip simulation, usable headless
//! - [`Options`] - runtime configuration (rain, camera, display) with TOML
//!   presets
//!
//! # Architecture
//!
//! Everything runs on the thread that owns the window. Each redraw advances
//! the [`engine::simulation::Simulation`] by one tick, which stages strips
//! and glyph codes into flat arrays; the renderer uploads them and issues a
//! single instanced draw of `(grid_size + 1) * strips` quads. Glyph codes
//! resolve to atlas cells in the vertex shader through the encoding table in
//! the uniform buffer.

pub mod camera;
/// The rain engine and its frame-loop bookkeeping.
pub mod engine;
pub mod error;
pub mod glyph;
pub mod gpu;
pub mod options;
pub mod rain;
pub mod renderer;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::RainEngine;
pub use error::GlyphfallError;
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
