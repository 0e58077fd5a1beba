//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::time::{Duration, Instant};

use caret::geometry::{Rect, ScrollOffset};
use caret::text::{TextMeasurer, TextMetrics, TextStyle};
use caret::theme::{Brush, Color};
use caret::timer::BlinkTimerConfig;
use caret::{CaretModel, HostView};

/// Fixed-advance measurer so layout tests don't depend on installed fonts
#[derive(Debug, Clone, Copy)]
pub struct MonoMeasurer {
    pub advance: f32,
    pub line_height: f32,
}

impl MonoMeasurer {
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl Default for MonoMeasurer {
    fn default() -> Self {
        Self::new(8.0, 16.0)
    }
}

impl TextMeasurer for MonoMeasurer {
    fn measure(&self, text: &str, _style: &TextStyle) -> TextMetrics {
        if text.is_empty() {
            return TextMetrics::default();
        }
        let count = |s: &str| s.chars().count() as f32;
        TextMetrics {
            width: count(text.trim_end()) * self.advance,
            width_including_trailing_whitespace: count(text) * self.advance,
            height: self.line_height,
            ascent: self.line_height * 0.8,
        }
    }
}

/// Host view with a solid black foreground at 1x
pub fn test_host() -> HostView {
    HostView::default()
}

pub fn host_with_scroll(horizontal: f32, vertical: f32) -> HostView {
    HostView {
        scroll: ScrollOffset::new(horizontal, vertical),
        ..HostView::default()
    }
}

pub fn solid(r: u8, g: u8, b: u8) -> Brush {
    Brush::Solid(Color::rgb(r, g, b))
}

/// Model with the default 500ms blink and no explicit caret brush
pub fn test_model() -> CaretModel {
    let mut model = CaretModel::default();
    model.caret.set_caret_brush(None);
    model
}

pub fn model_with_interval(ms: i64) -> CaretModel {
    let mut model = test_model();
    model
        .caret
        .set_timer_config(BlinkTimerConfig::from_millis(ms));
    model
}

pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect::new(x, y, width, height)
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// A fixed clock origin for deterministic blink tests
pub fn t0() -> Instant {
    Instant::now()
}
