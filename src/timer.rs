//! Repeating blink timer
//!
//! The timer does not own a thread or register callbacks. The event loop
//! asks for the next deadline, sleeps until it, then calls [`BlinkTimer::poll`]
//! on the UI thread. Stopping the timer therefore cancels every future tick
//! synchronously.

use std::time::{Duration, Instant};

/// Default blink half-period
pub const DEFAULT_BLINK_INTERVAL_MS: i64 = 500;

/// Blink interval and whether blinking is enabled at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkTimerConfig {
    pub interval: Duration,
    pub enabled: bool,
}

impl BlinkTimerConfig {
    /// Build from a signed millisecond value; zero or negative disables blinking
    pub fn from_millis(ms: i64) -> Self {
        if ms > 0 {
            Self {
                interval: Duration::from_millis(ms as u64),
                enabled: true,
            }
        } else {
            Self::disabled()
        }
    }

    /// A solid, never-blinking caret
    pub const fn disabled() -> Self {
        Self {
            interval: Duration::ZERO,
            enabled: false,
        }
    }

    /// True when ticks will actually be produced
    pub fn blinks(&self) -> bool {
        self.enabled && !self.interval.is_zero()
    }
}

impl Default for BlinkTimerConfig {
    fn default() -> Self {
        Self::from_millis(DEFAULT_BLINK_INTERVAL_MS)
    }
}

/// Single repeating timer; at most one deadline is armed at a time
#[derive(Debug, Clone)]
pub struct BlinkTimer {
    config: BlinkTimerConfig,
    next_due: Option<Instant>,
}

impl BlinkTimer {
    pub fn new(config: BlinkTimerConfig) -> Self {
        Self {
            config,
            next_due: None,
        }
    }

    pub fn config(&self) -> BlinkTimerConfig {
        self.config
    }

    /// Replace the interval. Stops the timer; the owner decides whether to restart.
    pub fn set_config(&mut self, config: BlinkTimerConfig) {
        self.config = config;
        self.stop();
    }

    /// Arm (or re-arm) the timer one interval after `now`.
    ///
    /// Returns the deadline, or `None` if blinking is disabled. Restarting a
    /// running timer replaces its deadline rather than adding a second one.
    pub fn start(&mut self, now: Instant) -> Option<Instant> {
        if !self.config.blinks() {
            self.next_due = None;
            return None;
        }
        let due = now + self.config.interval;
        self.next_due = Some(due);
        Some(due)
    }

    /// Disarm the timer. No-op when already stopped.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// When the next tick is due
    pub fn deadline(&self) -> Option<Instant> {
        self.next_due
    }

    /// Count the intervals that elapsed up to `now` and re-arm on the same grid.
    ///
    /// Returns 0 when stopped or when the deadline has not passed yet.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(due) = self.next_due else {
            return 0;
        };
        if now < due {
            return 0;
        }

        let interval = self.config.interval.as_nanos().max(1);
        let late = now.duration_since(due).as_nanos();
        let elapsed = late / interval + 1;
        let advance = u32::try_from(elapsed).unwrap_or(u32::MAX);

        self.next_due = Some(due + self.config.interval * advance);
        advance
    }
}
