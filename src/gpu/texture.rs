//! Glyph atlas image and its GPU texture.

use crate::{
    error::GlyphfallError,
    glyph::{ATLAS_COLUMNS, ATLAS_ROWS},
    gpu::pipeline_helpers,
};

/// Decoded RGBA8 atlas pixels, 16 x 13 glyph cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Tightly packed RGBA8 rows.
    pub rgba: Vec<u8>,
}

impl AtlasImage {
    /// Wrap decoded pixels.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphfallError::Atlas`] if the buffer length does not match
    /// the dimensions or either dimension is zero.
    pub fn new(
        width: u32,
        height: u32,
        rgba: Vec<u8>,
    ) -> Result<Self, GlyphfallError> {
        if width == 0 || height == 0 {
            return Err(GlyphfallError::Atlas(format!(
                "empty atlas image ({width}x{height})"
            )));
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(GlyphfallError::Atlas(format!(
                "{width}x{height} atlas needs {expected} bytes, got {}",
                rgba.len()
            )));
        }
        if width % ATLAS_COLUMNS != 0 || height % ATLAS_ROWS != 0 {
            log::warn!(
                "atlas {width}x{height} does not divide into \
                 {ATLAS_COLUMNS}x{ATLAS_ROWS} cells; glyphs may bleed"
            );
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// 1x1 translucent green pixel, drawn until a real atlas is supplied.
    pub fn placeholder() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: vec![0, 128, 0, 128],
        }
    }
}

/// Atlas texture, view, and sampler bound together in one bind group.
pub struct AtlasTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
    /// Linear clamp-to-edge sampler.
    pub sampler: wgpu::Sampler,
    /// Texture + sampler bind group layout.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group for the current texture.
    pub bind_group: wgpu::BindGroup,
}

impl AtlasTexture {
    /// Upload `image` and build its bind group.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &AtlasImage,
    ) -> Self {
        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Atlas Layout"),
                entries: &[
                    pipeline_helpers::texture_2d(0),
                    pipeline_helpers::filtering_sampler(1),
                ],
            });
        let sampler = pipeline_helpers::linear_sampler(device, "Atlas Sampler");
        let (texture, view) = Self::upload(device, queue, image);
        let bind_group =
            Self::create_bind_group(device, &layout, &view, &sampler);
        Self {
            texture,
            view,
            sampler,
            layout,
            bind_group,
        }
    }

    /// Replace the atlas pixels, e.g. once a real image has loaded.
    pub fn replace(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &AtlasImage,
    ) {
        let (texture, view) = Self::upload(device, queue, image);
        self.bind_group =
            Self::create_bind_group(device, &self.layout, &view, &self.sampler);
        self.texture = texture;
        self.view = view;
    }

    fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &AtlasImage,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Glyph Atlas"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Atlas Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }
}
