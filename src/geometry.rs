//! Geometry primitives shared by the caret scheduler, renderer and rasterizer
//!
//! All coordinates are logical pixels (`f32`). Device pixels are logical
//! pixels multiplied by the host's scale factor.

/// Axis-aligned rectangle in logical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Move the rectangle by `(dx, dy)`, keeping its size
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Same size, new left edge
    pub fn with_x(&self, x: f32) -> Self {
        Self::new(x, self.y, self.width, self.height)
    }

    /// Grow the rectangle by `amount` on every side
    pub fn inflate(&self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Scale every component, e.g. logical → device pixels
    pub fn scale(&self, factor: f32) -> Self {
        Self::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }
}

/// A point in logical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Current scroll position of the host view
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollOffset {
    pub horizontal: f32,
    pub vertical: f32,
}

impl ScrollOffset {
    pub const fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Convert a content-space rectangle into view-local space
    pub fn to_view(&self, content_rect: Rect) -> Rect {
        content_rect.translate(-self.horizontal, -self.vertical)
    }
}

/// Size of one device pixel in logical units.
///
/// Non-positive or non-finite scale factors fall back to 1.0.
pub fn pixel_size(scale_factor: f64) -> f32 {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        (1.0 / scale_factor) as f32
    } else {
        1.0
    }
}

/// Round a single logical coordinate to the nearest device pixel boundary.
///
/// Midpoints round away from zero.
#[inline]
pub fn snap_value(value: f32, pixel_size: f32) -> f32 {
    pixel_size * (value / pixel_size).round()
}

/// Snap a rectangle onto the device pixel grid.
///
/// Position and size are rounded independently, so a zero-width rectangle
/// stays zero-width and a sub-pixel width collapses or grows to whole pixels.
pub fn snap_to_pixels(rect: Rect, scale_factor: f64) -> Rect {
    let px = pixel_size(scale_factor);
    Rect::new(
        snap_value(rect.x, px),
        snap_value(rect.y, px),
        snap_value(rect.width, px),
        snap_value(rect.height, px),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset_to_view() {
        let scroll = ScrollOffset::new(10.0, 5.0);
        let view = scroll.to_view(Rect::new(50.0, 20.0, 2.0, 16.0));
        assert_eq!(view, Rect::new(40.0, 15.0, 2.0, 16.0));
    }

    #[test]
    fn test_pixel_size() {
        assert_eq!(pixel_size(1.0), 1.0);
        assert_eq!(pixel_size(2.0), 0.5);
        assert_eq!(pixel_size(0.0), 1.0);
        assert_eq!(pixel_size(-2.0), 1.0);
        assert_eq!(pixel_size(f64::NAN), 1.0);
    }

    #[test]
    fn test_snap_integer_rect_unchanged_at_scale_one() {
        let rect = Rect::new(0.0, 0.0, 2.0, 18.0);
        assert_eq!(snap_to_pixels(rect, 1.0), rect);
    }

    #[test]
    fn test_snap_rounds_to_whole_pixels() {
        let snapped = snap_to_pixels(Rect::new(10.4, 3.6, 1.5, 16.2), 1.0);
        assert_eq!(snapped, Rect::new(10.0, 4.0, 2.0, 16.0));
    }

    #[test]
    fn test_snap_at_fractional_scale() {
        // 1.5x: one device pixel is 2/3 logical px
        let snapped = snap_to_pixels(Rect::new(10.1, 0.0, 1.0, 10.0), 1.5);
        let device = snapped.scale(1.5);
        assert!((device.x - device.x.round()).abs() < 1e-4);
        assert!((device.width - device.width.round()).abs() < 1e-4);
        assert!((device.height - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_snap_keeps_degenerate_rect() {
        let snapped = snap_to_pixels(Rect::new(5.0, 5.0, 0.0, 0.0), 2.0);
        assert_eq!(snapped.width, 0.0);
        assert_eq!(snapped.height, 0.0);
    }

    #[test]
    fn test_snap_midpoint_rounds_away_from_zero() {
        assert_eq!(snap_value(0.5, 1.0), 1.0);
        assert_eq!(snap_value(-0.5, 1.0), -1.0);
    }
}
