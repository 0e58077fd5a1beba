//! Per-frame caret composition
//!
//! Turns the blink state plus a [`HostView`] snapshot into draw commands:
//! the pre-edit bubble (never blinks) followed by the caret fill (only in the
//! on phase). Nothing here mutates the scheduler.

use crate::blink::CaretVisualState;
use crate::geometry::{snap_to_pixels, Point, Rect};
use crate::host::HostView;
use crate::scene::{BoxShadow, DrawCommand, Scene};
use crate::text::{TextMeasurer, TextMetrics};
use crate::theme::{Brush, Color};

pub const PREEDIT_LEFT_MARGIN: f32 = 4.0;
/// Bubble edge sits this far left of the pre-edit text
pub const PREEDIT_BUBBLE_INSET: f32 = 3.5;
/// Added to the measured text width to get the bubble width
pub const PREEDIT_HORIZONTAL_PADDING: f32 = 8.0;
/// Minimum space above and below the text when it outgrows the caret
pub const PREEDIT_VERTICAL_PADDING: f32 = 1.0;
pub const PREEDIT_CORNER_RADIUS: f32 = 3.0;
pub const PREEDIT_SHADOW_BLUR: f32 = 6.0;

/// Fixed geometry of the pre-edit bubble
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreeditLayout {
    pub left_margin: f32,
    pub bubble_inset: f32,
    pub horizontal_padding: f32,
    pub vertical_padding: f32,
    pub corner_radius: f32,
    pub shadow_blur: f32,
}

impl Default for PreeditLayout {
    fn default() -> Self {
        Self {
            left_margin: PREEDIT_LEFT_MARGIN,
            bubble_inset: PREEDIT_BUBBLE_INSET,
            horizontal_padding: PREEDIT_HORIZONTAL_PADDING,
            vertical_padding: PREEDIT_VERTICAL_PADDING,
            corner_radius: PREEDIT_CORNER_RADIUS,
            shadow_blur: PREEDIT_SHADOW_BLUR,
        }
    }
}

/// Where the pre-edit text and its bubble land, in view-local pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreeditPlacement {
    pub text_origin: Point,
    pub bubble: Rect,
    /// Left edge for the caret drawn after the bubble
    pub caret_x: f32,
}

impl PreeditLayout {
    /// Position the bubble for text of `metrics` next to the caret at `caret`
    pub fn place(&self, caret: Rect, metrics: &TextMetrics) -> PreeditPlacement {
        let text_x = caret.x.max(self.left_margin);
        let text_y = caret.y + (caret.height - metrics.height) * 0.5;

        // Spans the caret; padded only when the text outgrows it
        let bubble_height = if metrics.height > caret.height {
            metrics.height + self.vertical_padding * 2.0
        } else {
            caret.height
        };
        let bubble_y = caret.y + (caret.height - bubble_height) * 0.5;

        PreeditPlacement {
            text_origin: Point::new(text_x, text_y),
            bubble: Rect::new(
                text_x - self.bubble_inset,
                bubble_y,
                metrics.width + self.horizontal_padding,
                bubble_height,
            ),
            caret_x: text_x + metrics.width_including_trailing_whitespace,
        }
    }
}

/// Pick the caret brush: explicit override first, then the view foreground.
///
/// In overstrike mode a solid brush is made translucent; other brushes pass
/// through untouched.
pub fn resolve_caret_brush(caret_brush: Option<&Brush>, host: &HostView) -> Brush {
    let brush = caret_brush.copied().unwrap_or(host.foreground);
    if host.overstrike {
        brush.overstrike()
    } else {
        brush
    }
}

/// Stateless compositor for the caret layer
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CaretRenderer {
    pub preedit: PreeditLayout,
}

impl CaretRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compose one frame
    pub fn render(
        &self,
        state: &CaretVisualState,
        caret_brush: Option<&Brush>,
        host: &HostView,
        measurer: &dyn TextMeasurer,
    ) -> Scene {
        let mut scene = Scene::new();
        let mut relative = host.scroll.to_view(state.caret_rect);

        if host.has_preedit() {
            let caret_x = self.draw_preedit(&mut scene, relative, host, measurer);
            relative = relative.with_x(caret_x);
        }

        if state.is_painted() {
            let brush = resolve_caret_brush(caret_brush, host);
            scene.push(DrawCommand::FillRect {
                rect: snap_to_pixels(relative, host.scale_factor),
                brush,
            });
        }

        scene
    }

    /// Emit the bubble and text; returns where the caret goes next
    fn draw_preedit(
        &self,
        scene: &mut Scene,
        caret: Rect,
        host: &HostView,
        measurer: &dyn TextMeasurer,
    ) -> f32 {
        let metrics = measurer.measure(&host.preedit_text, &host.text_style);
        let placement = self.preedit.place(caret, &metrics);
        let palette = &host.preedit;

        scene.push(DrawCommand::RoundedRect {
            rect: placement.bubble,
            radius: self.preedit.corner_radius,
            fill: Brush::Solid(palette.background),
            border: palette.border,
            shadow: shadow(self.preedit.shadow_blur, palette.shadow),
        });
        scene.push(DrawCommand::Text {
            origin: placement.text_origin,
            text: host.preedit_text.clone(),
            style: host.text_style.clone(),
            color: palette.foreground,
        });

        placement.caret_x
    }
}

fn shadow(blur: f32, color: Color) -> Option<BoxShadow> {
    (blur > 0.0 && color.a > 0).then_some(BoxShadow { blur, color })
}
