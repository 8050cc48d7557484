pub mod run_state;
pub mod simulation;

use self::simulation::Simulation;
use crate::{
    error::GlyphfallError,
    gpu::{
        render_context::RenderContext,
        shader_composer::ShaderComposer,
        texture::{AtlasImage, AtlasTexture},
    },
    options::Options,
    rain::clock::{ClockText, LocalClock},
    renderer::rain_pass::RainPass,
    util::frame_timing::{FpsWindow, FrameClock},
};

/// The glyph rain engine.
///
/// Owns the GPU context, the rain pipeline, and the [`Simulation`].
///
/// # Frame loop
///
/// Each display refresh, call [`update`](Self::update) to advance the
/// simulation by one tick, then [`render`](Self::render) to draw and
/// present it. [`frame`](Self::frame) does both in that order. Call
/// [`resize`](Self::resize) once a window resize has settled.
pub struct RainEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    _shader_composer: ShaderComposer,
    atlas: AtlasTexture,
    rain_pass: RainPass,
    simulation: Simulation,
    fps: FpsWindow,
    frame_clock: FrameClock,
}

impl RainEngine {
    /// Engine drawing `options` into `window`, seeded with `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphfallError`] if the options are invalid, GPU
    /// initialization fails, or the rain shader fails to compile.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: &Options,
        atlas: &AtlasImage,
        seed: u64,
    ) -> Result<Self, GlyphfallError> {
        Self::with_clock(window, size, options, atlas, seed, Box::new(LocalClock))
            .await
    }

    /// Like [`new`](Self::new) with an explicit clock-text source.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub async fn with_clock(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: &Options,
        atlas: &AtlasImage,
        seed: u64,
        clock: Box<dyn ClockText>,
    ) -> Result<Self, GlyphfallError> {
        // Reject bad options before touching the GPU
        let simulation = Simulation::new(options, size, seed, clock)?;

        let context = RenderContext::new(window, size).await?;
        let mut shader_composer = ShaderComposer::new()?;
        let atlas = AtlasTexture::new(&context.device, &context.queue, atlas);
        let rain_pass = RainPass::new(
            &context,
            &mut shader_composer,
            &atlas.layout,
            simulation.frame(),
        )
        .await?;

        log::info!(
            "glyph rain ready: {} strips, {} instances, seed {seed}",
            options.rain.strips,
            rain_pass.instance_count()
        );

        Ok(Self {
            context,
            _shader_composer: shader_composer,
            atlas,
            rain_pass,
            simulation,
            fps: FpsWindow::default(),
            frame_clock: FrameClock::new(),
        })
    }

    /// Advance the simulation one tick and record the frame time.
    ///
    /// Returns the updated frame rate once the window holds enough
    /// samples.
    pub fn update(&mut self) -> Option<f32> {
        let fps = self.fps.record(self.frame_clock.now_ms());
        let summary = self.simulation.step();
        if summary.splashed + summary.recycled > 0 {
            log::trace!("{summary:?}");
        }
        fps
    }

    /// Upload the staged frame and present it.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain texture cannot be
    /// acquired; the caller decides whether to reconfigure or skip.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.rain_pass.upload(&self.context, self.simulation.frame());

        let frame = self.context.acquire_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.frame_encoder();
        {
            let mut rp =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Rain Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            depth_slice: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
            self.rain_pass.draw(&mut rp, &self.atlas.bind_group);
        }
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    /// Simulate then render one frame.
    ///
    /// # Errors
    ///
    /// See [`render`](Self::render).
    pub fn frame(&mut self) -> Result<Option<f32>, wgpu::SurfaceError> {
        let fps = self.update();
        self.render()?;
        Ok(fps)
    }

    /// Reconfigure the surface and projection for a new window size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.context.resize(width, height);
            self.simulation.resize(width, height);
            log::info!("resized to {width}x{height}");
        }
    }

    /// Swap in a new atlas image.
    pub fn set_atlas(&mut self, image: &AtlasImage) {
        self.atlas
            .replace(&self.context.device, &self.context.queue, image);
    }

    /// Forget frame-rate history, e.g. after a pause.
    pub fn reset_fps(&mut self) {
        self.fps.clear();
    }

    /// Latest frame-rate estimate.
    pub fn fps(&self) -> Option<f32> {
        self.fps.fps()
    }
}
