//! Layered rendering and the caret layer
//!
//! Layers draw in [`KnownLayer`] order: the caret lands above text and
//! selection, below overlays.

use std::time::Instant;

use crate::blink::{BlinkScheduler, CaretVisualState};
use crate::commands::Cmd;
use crate::geometry::Rect;
use crate::host::HostView;
use crate::render::CaretRenderer;
use crate::scene::Scene;
use crate::text::TextMeasurer;
use crate::theme::Brush;
use crate::timer::BlinkTimerConfig;

/// Fixed drawing slots, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KnownLayer {
    Background,
    Selection,
    Text,
    Caret,
    Overlay,
}

/// Something that contributes draw commands to a frame
pub trait Layer {
    fn kind(&self) -> KnownLayer;

    fn render(&self, host: &HostView, measurer: &dyn TextMeasurer) -> Scene;
}

/// Render `layers` back to front into one scene.
///
/// Layers sharing a slot keep their relative order.
pub fn compose_layers(
    layers: &[&dyn Layer],
    host: &HostView,
    measurer: &dyn TextMeasurer,
) -> Scene {
    let mut ordered = layers.to_vec();
    ordered.sort_by_key(|layer| layer.kind());

    let mut scene = Scene::new();
    for layer in ordered {
        scene.extend(layer.render(host, measurer));
    }
    scene
}

/// Blinking caret, pre-edit bubble and overstrike styling for one text view
#[derive(Debug, Default)]
pub struct CaretLayer {
    scheduler: BlinkScheduler,
    renderer: CaretRenderer,
    /// Set by the host; wins over the theme
    caret_brush: Option<Brush>,
    theme_brush: Option<Brush>,
}

impl CaretLayer {
    pub fn new(config: BlinkTimerConfig) -> Self {
        Self {
            scheduler: BlinkScheduler::new(config),
            renderer: CaretRenderer::new(),
            caret_brush: None,
            theme_brush: None,
        }
    }

    pub fn state(&self) -> &CaretVisualState {
        self.scheduler.state()
    }

    pub fn scheduler(&self) -> &BlinkScheduler {
        &self.scheduler
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Brush the caret is painted with: host override, then theme.
    ///
    /// `None` means the view foreground is used.
    pub fn caret_brush(&self) -> Option<&Brush> {
        self.caret_brush.as_ref().or(self.theme_brush.as_ref())
    }

    /// Override the caret brush; `None` drops the override so the theme
    /// brush (or the view foreground) applies again.
    ///
    /// Takes effect on the next render. Returns whether the override changed.
    pub fn set_caret_brush(&mut self, brush: Option<Brush>) -> bool {
        if self.caret_brush == brush {
            return false;
        }
        self.caret_brush = brush;
        true
    }

    /// Caret brush supplied by the active theme. A host override keeps priority.
    pub fn set_theme_brush(&mut self, brush: Option<Brush>) {
        self.theme_brush = brush;
    }

    pub fn show(&mut self, rect: Rect) -> Cmd {
        self.scheduler.show(rect)
    }

    pub fn show_at(&mut self, rect: Rect, now: Instant) -> Cmd {
        self.scheduler.show_at(rect, now)
    }

    pub fn hide(&mut self) -> Option<Cmd> {
        self.scheduler.hide()
    }

    pub fn on_tick(&mut self) -> Option<Cmd> {
        self.scheduler.on_tick()
    }

    pub fn poll(&mut self, now: Instant) -> Option<Cmd> {
        self.scheduler.poll(now)
    }

    pub fn set_timer_config(&mut self, config: BlinkTimerConfig) -> Option<Cmd> {
        self.scheduler.set_timer_config(config)
    }
}

impl Layer for CaretLayer {
    fn kind(&self) -> KnownLayer {
        KnownLayer::Caret
    }

    fn render(&self, host: &HostView, measurer: &dyn TextMeasurer) -> Scene {
        self.renderer.render(
            self.scheduler.state(),
            self.caret_brush(),
            host,
            measurer,
        )
    }
}
