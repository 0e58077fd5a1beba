//! Frame abstraction for drawing primitives
//!
//! Provides a simple, safe API for pixel buffer operations. All coordinates
//! here are device pixels; out-of-bounds operations are clipped.

use fontdue::Font;

use crate::geometry::Rect;
use crate::text::FlowDirection;
use crate::theme::{Brush, Color, GradientDirection};

use super::GlyphCache;

/// Blend a foreground color onto a background color using alpha compositing.
///
/// Both colors are in ARGB format (0xAARRGGBB). `alpha` determines the
/// blend ratio.
///
/// Returns the blended color with full opacity (alpha = 0xFF).
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let bg_r = ((bg >> 16) & 0xFF) as f32;
    let bg_g = ((bg >> 8) & 0xFF) as f32;
    let bg_b = (bg & 0xFF) as f32;

    let fg_r = ((fg >> 16) & 0xFF) as f32;
    let fg_g = ((fg >> 8) & 0xFF) as f32;
    let fg_b = (fg & 0xFF) as f32;

    let final_r = (bg_r * (1.0 - alpha) + fg_r * alpha) as u32;
    let final_g = (bg_g * (1.0 - alpha) + fg_g * alpha) as u32;
    let final_b = (bg_b * (1.0 - alpha) + fg_b * alpha) as u32;

    0xFF000000 | (final_r << 16) | (final_g << 8) | final_b
}

/// Signed distance from `(px, py)` to a rounded rectangle (negative inside)
fn rounded_rect_distance(rect: Rect, radius: f32, px: f32, py: f32) -> f32 {
    let half_w = rect.width * 0.5;
    let half_h = rect.height * 0.5;
    let radius = radius.clamp(0.0, half_w.min(half_h));

    let qx = (px - (rect.x + half_w)).abs() - (half_w - radius);
    let qy = (py - (rect.y + half_h)).abs() - (half_h - radius);

    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    let inside = qx.max(qy).min(0.0);
    outside + inside - radius
}

/// Pixel coverage for a signed distance sampled at the pixel center
#[inline]
fn coverage(distance: f32) -> f32 {
    (0.5 - distance).clamp(0.0, 1.0)
}

/// Pixel span `[start, end)` covered by `start..start+len`, clamped to `limit`.
///
/// A negative `len` yields an empty span.
#[inline]
fn span(start: f32, len: f32, limit: usize) -> (usize, usize) {
    let lo = start.round().max(0.0) as usize;
    let hi = (start + len).round().max(0.0) as usize;
    let (lo, hi) = (lo.min(limit), hi.min(limit));
    (lo, hi.max(lo))
}

/// A frame buffer wrapper providing safe drawing primitives.
pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
}

impl<'a> Frame<'a> {
    /// Create a new frame from a mutable pixel buffer
    ///
    /// If the buffer is smaller than width*height, dimensions are adjusted
    /// to match the actual buffer size to prevent out-of-bounds access.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let expected_size = width * height;
        let actual_size = buffer.len();

        let (width, height) = if actual_size < expected_size && width > 0 {
            (width, actual_size / width)
        } else {
            (width, height)
        };

        Self {
            buffer,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Clear the entire buffer with a solid color
    #[inline]
    pub fn clear(&mut self, color: Color) {
        self.buffer.fill(color.to_argb_u32() | 0xFF000000);
    }

    /// Get a single pixel (bounds-checked, returns 0 if out of bounds)
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        if x < self.width && y < self.height {
            self.buffer[y * self.width + x]
        } else {
            0
        }
    }

    /// Blend `color` into one pixel, scaled by `coverage` (0.0..=1.0)
    #[inline]
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: Color, coverage: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let alpha = (color.a as f32 / 255.0) * coverage;
        if alpha <= 0.0 {
            return;
        }
        let idx = y * self.width + x;
        let argb = color.to_argb_u32();
        if alpha >= 1.0 {
            self.buffer[idx] = argb | 0xFF000000;
        } else {
            self.buffer[idx] = blend_colors(self.buffer[idx], argb, alpha);
        }
    }

    /// Fill a rectangle with a color, alpha blending when translucent
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let (x0, x1) = span(rect.x, rect.width, self.width);
        let (y0, y1) = span(rect.y, rect.height, self.height);

        if color.is_opaque() {
            let argb = color.to_argb_u32();
            for y in y0..y1 {
                let row_start = y * self.width;
                self.buffer[row_start + x0..row_start + x1].fill(argb);
            }
            return;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x, y, color, 1.0);
            }
        }
    }

    /// Fill a rectangle with any brush
    pub fn fill_brush(&mut self, rect: Rect, brush: &Brush) {
        match brush {
            Brush::Solid(color) => self.fill_rect(rect, *color),
            Brush::LinearGradient { direction, .. } => {
                let (x0, x1) = span(rect.x, rect.width, self.width);
                let (y0, y1) = span(rect.y, rect.height, self.height);
                for y in y0..y1 {
                    for x in x0..x1 {
                        let t = match direction {
                            GradientDirection::Vertical => {
                                (y as f32 + 0.5 - rect.y) / rect.height.max(1.0)
                            }
                            GradientDirection::Horizontal => {
                                (x as f32 + 0.5 - rect.x) / rect.width.max(1.0)
                            }
                        };
                        self.blend_pixel(x, y, brush.color_at(t), 1.0);
                    }
                }
            }
        }
    }

    /// Fill a rounded rectangle with anti-aliased edges
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, brush: &Brush) {
        let (x0, x1) = span(rect.x.floor(), rect.width.ceil() + 1.0, self.width);
        let (y0, y1) = span(rect.y.floor(), rect.height.ceil() + 1.0, self.height);

        for y in y0..y1 {
            let cy = y as f32 + 0.5;
            let t = (cy - rect.y) / rect.height.max(1.0);
            for x in x0..x1 {
                let cx = x as f32 + 0.5;
                let cover = coverage(rounded_rect_distance(rect, radius, cx, cy));
                if cover > 0.0 {
                    let color = match brush {
                        Brush::LinearGradient {
                            direction: GradientDirection::Horizontal,
                            ..
                        } => brush.color_at((cx - rect.x) / rect.width.max(1.0)),
                        _ => brush.color_at(t),
                    };
                    self.blend_pixel(x, y, color, cover);
                }
            }
        }
    }

    /// Draw a 1px anti-aliased outline just inside a rounded rectangle
    pub fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        let (x0, x1) = span(rect.x.floor(), rect.width.ceil() + 1.0, self.width);
        let (y0, y1) = span(rect.y.floor(), rect.height.ceil() + 1.0, self.height);

        for y in y0..y1 {
            let cy = y as f32 + 0.5;
            for x in x0..x1 {
                let cx = x as f32 + 0.5;
                let d = rounded_rect_distance(rect, radius, cx, cy);
                let cover = coverage(d) - coverage(d + 1.0);
                if cover > 0.0 {
                    self.blend_pixel(x, y, color, cover);
                }
            }
        }
    }

    /// Soft shadow outside a rounded rectangle, fading to nothing over `blur`
    pub fn draw_box_shadow(&mut self, rect: Rect, radius: f32, blur: f32, color: Color) {
        if blur <= 0.0 {
            return;
        }
        let area = rect.inflate(blur);
        let (x0, x1) = span(area.x.floor(), area.width.ceil() + 1.0, self.width);
        let (y0, y1) = span(area.y.floor(), area.height.ceil() + 1.0, self.height);

        for y in y0..y1 {
            let cy = y as f32 + 0.5;
            for x in x0..x1 {
                let cx = x as f32 + 0.5;
                let d = rounded_rect_distance(rect, radius, cx, cy);
                if d <= 0.0 || d >= blur {
                    continue;
                }
                let t = 1.0 - d / blur;
                // Smoothstep falloff
                let strength = t * t * (3.0 - 2.0 * t);
                self.blend_pixel(x, y, color, strength);
            }
        }
    }
}

/// Text rendering context wrapping font and glyph cache.
pub struct TextPainter<'a> {
    font: &'a Font,
    glyph_cache: &'a mut GlyphCache,
    font_size: f32,
    ascent: f32,
}

impl<'a> TextPainter<'a> {
    /// Create a new text painter; `font_size` and `ascent` are device pixels
    pub fn new(
        font: &'a Font,
        glyph_cache: &'a mut GlyphCache,
        font_size: f32,
        ascent: f32,
    ) -> Self {
        Self {
            font,
            glyph_cache,
            font_size,
            ascent,
        }
    }

    /// Number of cached glyphs
    #[inline]
    pub fn glyph_cache_size(&self) -> usize {
        self.glyph_cache.len()
    }

    /// Draw text with its line box's top-left at `(x, y)`.
    ///
    /// Right-to-left runs start with the first character at the right edge.
    pub fn draw(
        &mut self,
        frame: &mut Frame,
        x: f32,
        y: f32,
        text: &str,
        color: Color,
        flow: FlowDirection,
    ) {
        let mut current_x = x;
        let baseline = y + self.ascent;

        let mut draw_char = |ch: char, current_x: &mut f32| {
            let key = (ch, self.font_size.to_bits());
            let (metrics, bitmap) = self
                .glyph_cache
                .entry(key)
                .or_insert_with(|| self.font.rasterize(ch, self.font_size));

            let glyph_top = baseline - metrics.height as f32 - metrics.ymin as f32;

            for bitmap_y in 0..metrics.height {
                for bitmap_x in 0..metrics.width {
                    let Some(&alpha) = bitmap.get(bitmap_y * metrics.width + bitmap_x) else {
                        continue;
                    };
                    if alpha == 0 {
                        continue;
                    }
                    let px = *current_x as isize + bitmap_x as isize + metrics.xmin as isize;
                    let py = (glyph_top + bitmap_y as f32) as isize;
                    if px >= 0 && py >= 0 {
                        frame.blend_pixel(px as usize, py as usize, color, alpha as f32 / 255.0);
                    }
                }
            }

            *current_x += metrics.advance_width;
        };

        match flow {
            FlowDirection::LeftToRight => {
                for ch in text.chars() {
                    draw_char(ch, &mut current_x);
                }
            }
            FlowDirection::RightToLeft => {
                for ch in text.chars().rev() {
                    draw_char(ch, &mut current_x);
                }
            }
        }
    }
}
