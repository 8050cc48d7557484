use std::fmt;

/// GPU setup failures, reported before the first frame.
#[derive(Debug)]
pub enum RenderContextError {
    /// The window handle could not back a surface.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the surface.
    AdapterRequest(wgpu::RequestAdapterError),
    /// The adapter refused a device with default limits.
    DeviceRequest(wgpu::RequestDeviceError),
    /// The adapter offers no configuration for the surface.
    UnsupportedSurface,
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceCreation(e) => write!(f, "cannot create surface: {e}"),
            Self::AdapterRequest(e) => write!(f, "no usable GPU adapter: {e}"),
            Self::DeviceRequest(e) => write!(f, "cannot open GPU device: {e}"),
            Self::UnsupportedSurface => {
                write!(f, "adapter cannot present to this surface")
            }
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SurfaceCreation(e) => Some(e),
            Self::AdapterRequest(e) => Some(e),
            Self::DeviceRequest(e) => Some(e),
            Self::UnsupportedSurface => None,
        }
    }
}

/// Surface extent for a window size; a minimised window reports zero.
fn surface_extent(width: u32, height: u32) -> (u32, u32) {
    (width.max(1), height.max(1))
}

/// Device, queue, and the window surface the rain is presented to.
pub struct RenderContext {
    /// Logical device all rain resources are created on.
    pub device: wgpu::Device,
    /// Queue for uploads and submissions.
    pub queue: wgpu::Queue,
    /// Swapchain surface of the viewer window.
    pub surface: wgpu::Surface<'static>,
    /// Applied surface configuration. Presentation is vsynced.
    pub config: wgpu::SurfaceConfiguration,
}

impl RenderContext {
    /// Open a device that can present to `window` and configure the surface
    /// at `size`.
    ///
    /// # Errors
    ///
    /// Returns `RenderContextError` naming the setup step that failed.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
    ) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(RenderContextError::SurfaceCreation)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                power_preference: wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::AdapterRequest)?;
        let info = adapter.get_info();
        log::info!("GPU: {} ({:?})", info.name, info.backend);

        let (width, height) = surface_extent(size.0, size.1);
        let mut config = surface
            .get_default_config(&adapter, width, height)
            .ok_or(RenderContextError::UnsupportedSurface)?;
        config.present_mode = wgpu::PresentMode::Fifo;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("glyphfall"),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::DeviceRequest)?;
        surface.configure(&device, &config);

        Ok(Self {
            device,
            queue,
            surface,
            config,
        })
    }

    /// Color format of the swapchain.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Apply a new window size. A zero dimension keeps the last extent.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Next swapchain image to draw into.
    ///
    /// # Errors
    ///
    /// Returns the [`wgpu::SurfaceError`] when no image can be acquired.
    pub fn acquire_frame(
        &self,
    ) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Encoder for one frame's commands.
    pub fn frame_encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Rain Frame"),
            })
    }

    /// Submit a finished frame.
    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        let _ = self.queue.submit([encoder.finish()]);
    }
}
