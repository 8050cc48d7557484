//! Standalone rain window backed by winit.
//!
//! ```no_run
//! # use glyphfall::Viewer;
//! Viewer::builder()
//!     .with_seed(7)
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::{sync::Arc, time::Duration};

use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::{
    engine::{run_state::RunState, RainEngine},
    error::GlyphfallError,
    gpu::texture::AtlasImage,
    options::Options,
};

/// Minimum interval between title bar FPS updates.
const TITLE_INTERVAL: Duration = Duration::from_millis(250);

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Options,
    atlas: Option<AtlasImage>,
    seed: Option<u64>,
    title: Option<String>,
}

impl ViewerBuilder {
    /// Builder with default options, the placeholder atlas, and a random
    /// seed.
    fn new() -> Self {
        Self {
            options: Options::default(),
            atlas: None,
            seed: None,
            title: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Use a decoded glyph atlas instead of the placeholder.
    #[must_use]
    pub fn with_atlas(mut self, atlas: AtlasImage) -> Self {
        self.atlas = Some(atlas);
        self
    }

    /// Seed the simulation for a reproducible run.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the window title (defaults to `display.title`).
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let title = self
            .title
            .unwrap_or_else(|| self.options.display.title.clone());
        Viewer {
            options: self.options,
            atlas: self.atlas.unwrap_or_else(AtlasImage::placeholder),
            seed: self.seed.unwrap_or_else(rand::random),
            title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window showing the glyph rain.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    atlas: AtlasImage,
    seed: u64,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed or Escape is pressed.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphfallError`] if the options are invalid, the event
    /// loop cannot start, or the engine fails to initialize.
    pub fn run(self) -> Result<(), GlyphfallError> {
        self.options.validate()?;

        let event_loop = EventLoop::new()
            .map_err(|e| GlyphfallError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let debounce =
            Duration::from_millis(self.options.display.resize_debounce_ms);
        let mut app = ViewerApp {
            window: None,
            engine: None,
            run_state: RunState::new(debounce),
            last_title_update: Instant::now(),
            options: self.options,
            atlas: self.atlas,
            seed: self.seed,
            title: self.title,
            error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| GlyphfallError::Viewer(e.to_string()))?;

        app.error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<RainEngine>,
    run_state: RunState,
    last_title_update: Instant,
    options: Options,
    atlas: AtlasImage,
    seed: u64,
    title: String,
    /// Fatal startup error, returned from [`Viewer::run`].
    error: Option<GlyphfallError>,
}

/// The wgpu surface size, never zero.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: GlyphfallError) {
        log::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }

    /// Apply a run-state change and react when frames stop or restart.
    fn set_active(&mut self, change: impl FnOnce(&mut RunState) -> bool) {
        if !change(&mut self.run_state) {
            return;
        }
        if !self.run_state.is_active() {
            log::debug!("paused");
            return;
        }
        log::debug!("resumed");
        // Time spent paused must not drag the average down
        if let Some(engine) = &mut self.engine {
            engine.reset_fps();
        }
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if !self.run_state.should_render() {
            return;
        }
        let (Some(window), Some(engine)) = (&self.window, &mut self.engine)
        else {
            return;
        };

        match engine.frame() {
            Ok(fps) => {
                let now = Instant::now();
                if self.options.display.fps_in_title
                    && now.duration_since(self.last_title_update)
                        >= TITLE_INTERVAL
                {
                    if let Some(fps) = fps {
                        window.set_title(&format!("{fps:.0} FPS"));
                    }
                    self.last_title_update = now;
                }
            }
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                let (w, h) = viewport_size(window.inner_size());
                engine.resize(w, h);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory");
                event_loop.exit();
                return;
            }
            Err(e) => {
                // Dropped refresh; the next one retries
                log::warn!("skipped frame: {e}");
            }
        }
        window.request_redraw();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            self.set_active(|s| s.set_suspended(false));
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            #[allow(clippy::cast_possible_truncation)]
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            #[allow(clippy::cast_possible_truncation)]
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(event_loop, GlyphfallError::Viewer(e.to_string()));
                return;
            }
        };

        let size = viewport_size(window.inner_size());
        let engine = match pollster::block_on(RainEngine::new(
            window.clone(),
            size,
            &self.options,
            &self.atlas,
            self.seed,
        )) {
            Ok(e) => e,
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.set_active(|s| s.set_suspended(true));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape) =>
            {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                let (w, h) = viewport_size(size);
                self.run_state.request_resize(w, h, Instant::now());
            }
            WindowEvent::Focused(focused) => {
                self.set_active(|s| s.set_focused(focused));
            }
            WindowEvent::Occluded(occluded) => {
                self.set_active(|s| s.set_visible(!occluded));
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some((w, h)) = self.run_state.poll(Instant::now()) {
            if let Some(engine) = &mut self.engine {
                engine.resize(w, h);
            }
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
        event_loop.set_control_flow(
            self.run_state
                .resize_deadline()
                .map_or(ControlFlow::Wait, ControlFlow::WaitUntil),
        );
    }
}
