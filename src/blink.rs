//! Blink state machine
//!
//! Owns the caret's on/off phase and its repeating timer. Every method runs
//! on the UI thread; the timer is only ever advanced from [`BlinkScheduler::poll`]
//! or [`BlinkScheduler::on_tick`], so `hide()` stops ticks before it returns.

use std::time::Instant;

use crate::commands::Cmd;
use crate::geometry::Rect;
use crate::timer::{BlinkTimer, BlinkTimerConfig};

/// What the renderer needs to know about the caret this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretVisualState {
    /// Whether the caret is present at all (false while unfocused)
    pub is_visible: bool,
    /// Blink phase; the caret is painted only when visible and on
    pub blink_on: bool,
    /// Caret geometry in content coordinates
    pub caret_rect: Rect,
}

impl CaretVisualState {
    /// True when the solid caret should be painted this frame
    pub fn is_painted(&self) -> bool {
        self.is_visible && self.blink_on
    }
}

impl Default for CaretVisualState {
    fn default() -> Self {
        Self {
            is_visible: false,
            blink_on: true,
            caret_rect: Rect::default(),
        }
    }
}

/// Blink phase and timer for one caret
#[derive(Debug)]
pub struct BlinkScheduler {
    state: CaretVisualState,
    timer: BlinkTimer,
}

impl BlinkScheduler {
    pub fn new(config: BlinkTimerConfig) -> Self {
        Self {
            state: CaretVisualState::default(),
            timer: BlinkTimer::new(config),
        }
    }

    pub fn state(&self) -> &CaretVisualState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state.is_visible
    }

    pub fn is_painted(&self) -> bool {
        self.state.is_painted()
    }

    pub fn caret_rect(&self) -> Rect {
        self.state.caret_rect
    }

    pub fn timer_config(&self) -> BlinkTimerConfig {
        self.timer.config()
    }

    /// When the event loop must wake for the next tick, if blinking
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Show the caret at `rect` (content coordinates)
    pub fn show(&mut self, rect: Rect) -> Cmd {
        self.show_at(rect, Instant::now())
    }

    /// [`show`](Self::show) with an explicit clock reading.
    ///
    /// Always resets the phase to on and restarts the timer, even when the
    /// caret is already visible.
    pub fn show_at(&mut self, rect: Rect, now: Instant) -> Cmd {
        self.state.caret_rect = rect;
        self.state.is_visible = true;
        self.state.blink_on = true;
        let deadline = self.timer.start(now);
        tracing::trace!(?rect, ?deadline, "Caret shown");
        Cmd::redraw_until(deadline)
    }

    /// Hide the caret and stop blinking. No-op (and no redraw) when hidden.
    pub fn hide(&mut self) -> Option<Cmd> {
        if !self.state.is_visible {
            return None;
        }
        self.state.is_visible = false;
        self.timer.stop();
        tracing::trace!("Caret hidden");
        Some(Cmd::Redraw)
    }

    /// One timer elapse: flip the phase.
    ///
    /// Ignored unless the caret is visible and its timer is armed, so a tick
    /// that was already queued when `hide()` ran changes nothing.
    pub fn on_tick(&mut self) -> Option<Cmd> {
        if !self.state.is_visible || !self.timer.is_running() {
            return None;
        }
        self.state.blink_on = !self.state.blink_on;
        tracing::trace!(blink_on = self.state.blink_on, "Caret blink");
        Some(Cmd::Redraw)
    }

    /// Deliver every tick that elapsed up to `now`.
    ///
    /// Redraws only if the phase actually changed; reports the next deadline
    /// whenever the timer is still armed.
    pub fn poll(&mut self, now: Instant) -> Option<Cmd> {
        let ticks = self.timer.poll(now);
        if ticks == 0 {
            return None;
        }

        let redraw = if ticks % 2 == 1 { self.on_tick() } else { None };
        Cmd::merge(redraw, self.timer.deadline().map(Cmd::WakeAt))
    }

    /// Swap the blink interval. A visible caret restarts in the on phase.
    pub fn set_timer_config(&mut self, config: BlinkTimerConfig) -> Option<Cmd> {
        self.timer.set_config(config);
        if self.state.is_visible {
            Some(self.show(self.state.caret_rect))
        } else {
            None
        }
    }
}

impl Default for BlinkScheduler {
    fn default() -> Self {
        Self::new(BlinkTimerConfig::default())
    }
}

impl Drop for BlinkScheduler {
    fn drop(&mut self) {
        if self.timer.is_running() {
            tracing::trace!("Stopping caret timer on teardown");
        }
        self.timer.stop();
    }
}
