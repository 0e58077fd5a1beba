//! Message types for the Elm-style architecture
//!
//! All caret state changes flow through these message types.

use std::time::Instant;

use crate::geometry::{Rect, ScrollOffset};
use crate::text::FlowDirection;
use crate::theme::{Brush, Theme};
use crate::timer::BlinkTimerConfig;

/// Caret lifecycle and host-view changes
#[derive(Debug, Clone)]
pub enum CaretMsg {
    // === Lifecycle ===
    /// Caret moved or regained visibility (content coordinates)
    Show(Rect),
    /// Focus left the view
    Hide,

    // === Blinking ===
    /// A single timer elapse
    BlinkTick,
    /// Deliver every tick due up to this instant
    Poll(Instant),
    /// Change the blink interval
    SetBlinkConfig(BlinkTimerConfig),

    // === Host view ===
    /// Scroll position changed
    ScrollTo(ScrollOffset),
    /// IME composition text changed; empty clears it
    SetPreedit(String),
    /// Overstrike mode on/off
    SetOverstrike(bool),
    /// Insert key
    ToggleOverstrike,
    /// Host caret brush override; `None` restores the theme or foreground brush
    SetCaretBrush(Option<Brush>),
    /// Window moved to a monitor with a different scale
    SetScaleFactor(f64),
    SetFlowDirection(FlowDirection),
    /// Theme switched; a host caret brush override is kept
    ApplyTheme(Box<Theme>),
}

impl CaretMsg {
    /// Periodic messages that would flood the log
    pub fn is_noisy(&self) -> bool {
        matches!(self, CaretMsg::BlinkTick | CaretMsg::Poll(_))
    }
}
