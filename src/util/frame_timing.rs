use std::collections::VecDeque;

use web_time::Instant;

/// Trailing window, in milliseconds, that the frame rate is averaged over.
pub const FPS_WINDOW_MS: f64 = 10_000.0;

/// Windowed frame-rate estimator.
///
/// Keeps every frame timestamp from the last [`FPS_WINDOW_MS`] and reports
/// `frames / elapsed` over that window. No fixed refresh rate is assumed, so
/// irregular frame intervals simply show up in the average.
#[derive(Debug, Clone)]
pub struct FpsWindow {
    /// Recent frame timestamps in milliseconds, oldest first.
    timestamps: VecDeque<f64>,
    /// Window length in milliseconds.
    window_ms: f64,
    /// Most recent estimate.
    fps: Option<f32>,
}

impl Default for FpsWindow {
    fn default() -> Self {
        Self::new(FPS_WINDOW_MS)
    }
}

impl FpsWindow {
    /// Create an estimator averaging over `window_ms`.
    pub fn new(window_ms: f64) -> Self {
        Self {
            timestamps: VecDeque::new(),
            window_ms,
            fps: None,
        }
    }

    /// Record a frame timestamp and return the current rate.
    ///
    /// Returns `None` until at least one earlier sample lies inside the
    /// window.
    pub fn record(&mut self, now_ms: f64) -> Option<f32> {
        while self
            .timestamps
            .front()
            .is_some_and(|&oldest| oldest + self.window_ms < now_ms)
        {
            let _ = self.timestamps.pop_front();
        }

        self.fps = self.timestamps.front().and_then(|&oldest| {
            let span = now_ms - oldest;
            (span > 0.0)
                .then(|| (self.timestamps.len() as f64 / span * 1000.0) as f32)
        });

        self.timestamps.push_back(now_ms);
        self.fps
    }

    /// Latest estimate, if any.
    pub fn fps(&self) -> Option<f32> {
        self.fps
    }

    /// Milliseconds covered by the retained samples.
    pub fn span_ms(&self) -> f64 {
        match (self.timestamps.front(), self.timestamps.back()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether no samples have been recorded.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Forget every sample (e.g. after a pause, so idle time is not
    /// averaged in).
    pub fn clear(&mut self) {
        self.timestamps.clear();
        self.fps = None;
    }
}

/// Monotonic millisecond clock anchored at construction.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Start the clock now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds elapsed since the clock started.
    pub fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}
