//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, growable buffers, the glyph
//! atlas texture, and shader composition.

/// Instance buffers that grow on upload.
pub mod dynamic_buffer;
/// Shared bind group layout and sampler helpers.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Glyph atlas image and texture.
pub mod texture;
