//! CPU-side staging of one frame's GPU data.
//!
//! [`FrameData`] flattens the strip pool into the exact byte layouts the
//! rain shader reads, so the render pass only has to upload slices.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::{glyph::packed_encoding, rain::RainField};

/// Corner of the shared glyph quad.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    /// Position offset within the glyph cell.
    pub position: [f32; 2],
    /// Texture coordinate before atlas cell offset.
    pub texcoord: [f32; 2],
}

/// Unit quad shared by every glyph instance.
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex {
        position: [0.0, 0.0],
        texcoord: [0.0, 1.0],
    },
    QuadVertex {
        position: [1.0, 0.0],
        texcoord: [1.0, 1.0],
    },
    QuadVertex {
        position: [0.0, 1.0],
        texcoord: [0.0, 0.0],
    },
    QuadVertex {
        position: [1.0, 1.0],
        texcoord: [1.0, 0.0],
    },
];

/// Two triangles over [`QUAD_VERTICES`].
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 1, 3];

/// Per-strip scalars, read from a storage buffer by
/// `instance_index / (grid_size + 1)`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StripInstance {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position of the top glyph.
    pub y: f32,
    /// Depth position.
    pub z: f32,
    /// Signed spinner position.
    pub spinner: f32,
    /// Brightness wave phase.
    pub wave: f32,
    /// Depth attenuation.
    pub depth_factor: f32,
    pub(crate) _pad0: f32,
    pub(crate) _pad1: f32,
}

/// Rain shader uniform block.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct RainUniform {
    /// Projection * view * scene rotation.
    pub view_proj: [[f32; 4]; 4],
    /// Glyphs per strip, excluding the spinner.
    pub grid_size: f32,
    /// Brightness wave length in glyphs.
    pub wave_size: f32,
    pub(crate) _pad0: f32,
    pub(crate) _pad1: f32,
    /// Encoding table, four entries per row.
    pub encoding: [[u32; 4]; 9],
}

impl RainUniform {
    /// Uniform for a field of `grid_size` glyphs with an identity
    /// transform.
    pub fn new(grid_size: usize, wave_size: u32) -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            grid_size: grid_size as f32,
            wave_size: wave_size as f32,
            _pad0: 0.0,
            _pad1: 0.0,
            encoding: packed_encoding(),
        }
    }
}

/// Everything uploaded for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameData {
    /// Uniform block.
    pub uniform: RainUniform,
    /// One entry per strip.
    pub strips: Vec<StripInstance>,
    /// One glyph code per instance, strip-major.
    pub glyphs: Vec<u32>,
}

impl FrameData {
    /// Empty staging sized for `field`.
    pub fn new(field: &RainField) -> Self {
        let params = field.params();
        Self {
            uniform: RainUniform::new(params.grid_size, params.wave_size),
            strips: Vec::with_capacity(params.strips),
            glyphs: Vec::with_capacity(field.instance_count() as usize),
        }
    }

    /// Fresh staging of `field` under `view_proj`.
    pub fn build(field: &RainField, view_proj: Mat4) -> Self {
        let mut frame = Self::new(field);
        frame.update(field, view_proj);
        frame
    }

    /// Stage `field` and the view transform, reusing allocations.
    pub fn update(&mut self, field: &RainField, view_proj: Mat4) {
        let params = field.params();
        self.uniform.view_proj = view_proj.to_cols_array_2d();

        self.strips.clear();
        self.glyphs.clear();
        for strip in field.strips() {
            self.strips.push(StripInstance {
                x: strip.x(),
                y: strip.y(),
                z: strip.z(),
                spinner: strip.spinner(),
                wave: strip.wave() as f32,
                depth_factor: strip.depth_factor(params),
                _pad0: 0.0,
                _pad1: 0.0,
            });
            self.glyphs
                .extend(strip.glyphs().iter().map(|&g| u32::from(g)));
        }
    }

    /// Instances to draw.
    pub fn instance_count(&self) -> u32 {
        self.glyphs.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        options::RainOptions,
        rain::{clock::FixedClock, params::RainParams},
    };

    fn field() -> RainField {
        let opts = RainOptions {
            strips: 5,
            grid_size: 9,
            ..RainOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        RainField::new(
            RainParams::new(&opts).unwrap(),
            &mut rng,
            &FixedClock(String::new()),
        )
    }

    #[test]
    fn gpu_layouts_match_the_shader() {
        assert_eq!(size_of::<QuadVertex>(), 16);
        assert_eq!(size_of::<StripInstance>(), 32);
        assert_eq!(size_of::<RainUniform>(), 224);
    }

    #[test]
    fn update_flattens_every_slot() {
        let f = field();
        let mut frame = FrameData::new(&f);
        frame.update(&f, Mat4::IDENTITY);

        assert_eq!(frame.strips.len(), 5);
        assert_eq!(frame.instance_count(), 50);
        for (k, strip) in f.strips().iter().enumerate() {
            let staged = &frame.glyphs[k * 10..(k + 1) * 10];
            let expected: Vec<u32> =
                strip.glyphs().iter().map(|&g| u32::from(g)).collect();
            assert_eq!(staged, expected.as_slice());
            assert_eq!(frame.strips[k].spinner, strip.spinner());
            assert_eq!(
                frame.strips[k].depth_factor,
                strip.depth_factor(f.params())
            );
        }
    }

    #[test]
    fn update_reuses_buffers() {
        let f = field();
        let mut frame = FrameData::new(&f);
        frame.update(&f, Mat4::IDENTITY);
        frame.update(&f, Mat4::from_scale(glam::Vec3::splat(2.0)));
        assert_eq!(frame.instance_count(), 50);
        assert_eq!(frame.uniform.view_proj[0][0], 2.0);
        assert_eq!(frame.uniform.grid_size, 9.0);
    }
}
