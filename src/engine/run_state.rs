//! Frame-loop bookkeeping: pausing on focus, occlusion, or suspend, and
//! resize debouncing.
//!
//! Kept free of any windowing types so the scheduling rules can be tested
//! without an event loop.

use std::time::Duration;

use web_time::Instant;

/// Whether the loop should keep requesting frames, and which resize (if
/// any) is waiting out its quiet period.
///
/// Focus, occlusion, and suspension are tracked separately; frames run only
/// while the window is focused, visible, and not suspended.
#[derive(Debug, Clone)]
pub struct RunState {
    focused: bool,
    visible: bool,
    suspended: bool,
    debounce: Duration,
    pending_resize: Option<(u32, u32)>,
    resize_deadline: Option<Instant>,
}

impl RunState {
    /// Running state that applies resizes after `debounce` of quiet.
    pub fn new(debounce: Duration) -> Self {
        Self {
            focused: true,
            visible: true,
            suspended: false,
            debounce,
            pending_resize: None,
            resize_deadline: None,
        }
    }

    /// Whether the window is focused, visible, and not suspended.
    pub fn is_active(&self) -> bool {
        self.focused && self.visible && !self.suspended
    }

    fn update(&mut self, apply: impl FnOnce(&mut Self)) -> bool {
        let was_active = self.is_active();
        apply(self);
        was_active != self.is_active()
    }

    /// Record a focus change. Returns `true` if frames started or stopped.
    pub fn set_focused(&mut self, focused: bool) -> bool {
        self.update(|s| s.focused = focused)
    }

    /// Record an occlusion change. Returns `true` if frames started or
    /// stopped.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        self.update(|s| s.visible = visible)
    }

    /// Record an app suspend or resume. Returns `true` if frames started or
    /// stopped.
    pub fn set_suspended(&mut self, suspended: bool) -> bool {
        self.update(|s| s.suspended = suspended)
    }

    /// Whether the next redraw should simulate and render: active and no
    /// resize waiting out its quiet period.
    pub fn should_render(&self) -> bool {
        self.is_active() && self.pending_resize.is_none()
    }

    /// Record a resize and hold rendering until it settles. Restarts the
    /// quiet period; the latest size wins.
    pub fn request_resize(&mut self, width: u32, height: u32, now: Instant) {
        self.pending_resize = Some((width, height));
        self.resize_deadline = Some(now + self.debounce);
    }

    /// The pending size once its quiet period has elapsed. Yields each
    /// debounced resize exactly once.
    pub fn poll(&mut self, now: Instant) -> Option<(u32, u32)> {
        match self.resize_deadline {
            Some(deadline) if now >= deadline => {
                self.resize_deadline = None;
                self.pending_resize.take()
            }
            _ => None,
        }
    }

    /// When the pending resize becomes due, for scheduling a wake-up.
    pub fn resize_deadline(&self) -> Option<Instant> {
        self.resize_deadline
    }
}
