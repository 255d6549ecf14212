//! Debounced viewport change detection.

use std::time::{Duration, Instant};

use linefield_core::{RESIZE_DEBOUNCE, Viewport, WIDTH_BREAKPOINT};
use tracing::debug;

/// Whether a debounced resize should restart growth.
///
/// Wide viewports always restart. Narrow ones only restart when the width
/// actually changed, so height-only jitter on small screens is ignored.
pub fn should_restart(previous_width: i32, new_width: i32) -> bool {
    previous_width > WIDTH_BREAKPOINT || previous_width != new_width
}

/// Coalesces bursts of resize notifications into at most one restart per
/// quiet period.
#[derive(Debug)]
pub struct ViewportWatcher {
    debounce: Duration,
    /// Width of the viewport the current run was started with.
    started_width: i32,
    /// Latest notified viewport and the instant it becomes actionable.
    pending: Option<(Viewport, Instant)>,
}

impl Default for ViewportWatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportWatcher {
    pub fn new() -> Self {
        Self {
            debounce: RESIZE_DEBOUNCE,
            started_width: 0,
            pending: None,
        }
    }

    /// Record a resize. Each call pushes the deadline back.
    pub fn notify(&mut self, viewport: Viewport, now: Instant) {
        self.pending = Some((viewport, now + self.debounce));
    }

    /// Return the viewport to restart with once the quiet period has passed.
    ///
    /// The pending notification is consumed even when the restart rule says
    /// no.
    pub fn poll(&mut self, now: Instant) -> Option<Viewport> {
        let (viewport, deadline) = self.pending?;
        if now < deadline {
            return None;
        }
        self.pending = None;

        if should_restart(self.started_width, viewport.width) {
            Some(viewport)
        } else {
            debug!(width = viewport.width, "ignoring resize");
            None
        }
    }

    /// Remember the viewport a new run was started with.
    pub fn mark_started(&mut self, viewport: Viewport) {
        self.started_width = viewport.width;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, deadline)| deadline)
    }
}
