//! View module - turns scenes into pixels
//!
//! [`rasterize`] executes a [`Scene`] into a [`Frame`]; [`Renderer`] owns the
//! softbuffer surface and presents the result to a window.

pub mod frame;

pub use frame::{Frame, TextPainter};

use anyhow::Result;
use fontdue::Metrics;
use softbuffer::Surface;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::rc::Rc;
use winit::window::Window;

use crate::geometry::Rect;
use crate::scene::{DrawCommand, Scene};
use crate::text::{FontBook, TextStyle};
use crate::theme::Color;

pub type GlyphCacheKey = (char, u32);

pub type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Vec<u8>)>;

/// Execute `scene` into `frame`.
///
/// Scene coordinates are logical pixels and are multiplied by `scale` here.
/// Text whose face cannot be resolved is skipped.
pub fn rasterize(
    scene: &Scene,
    frame: &mut Frame,
    scale: f32,
    fonts: &FontBook,
    glyph_cache: &mut GlyphCache,
) {
    for command in scene {
        match command {
            DrawCommand::FillRect { rect, brush } => {
                frame.fill_brush(rect.scale(scale), brush);
            }
            DrawCommand::RoundedRect {
                rect,
                radius,
                fill,
                border,
                shadow,
            } => {
                let device = rect.scale(scale);
                let radius = radius * scale;
                if let Some(shadow) = shadow {
                    frame.draw_box_shadow(device, radius, shadow.blur * scale, shadow.color);
                }
                frame.fill_rounded_rect(device, radius, fill);
                if let Some(border) = border {
                    frame.stroke_rounded_rect(device, radius, *border);
                }
            }
            DrawCommand::Text {
                origin,
                text,
                style,
                color,
            } => {
                draw_text(
                    frame,
                    fonts,
                    glyph_cache,
                    (origin.x * scale, origin.y * scale),
                    text,
                    style,
                    *color,
                    scale,
                );
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_text(
    frame: &mut Frame,
    fonts: &FontBook,
    glyph_cache: &mut GlyphCache,
    (x, y): (f32, f32),
    text: &str,
    style: &TextStyle,
    color: Color,
    scale: f32,
) {
    let Some(font) = fonts.resolve(style) else {
        tracing::trace!(family = %style.family, "No face for text run, skipping");
        return;
    };
    let font_size = style.size * scale;
    let ascent = font
        .horizontal_line_metrics(font_size)
        .map(|m| m.ascent)
        .unwrap_or(font_size * 0.8);

    let mut painter = TextPainter::new(font, glyph_cache, font_size, ascent);
    painter.draw(frame, x, y, text, color, style.flow);
}

/// Presents rendered scenes to a window via softbuffer
pub struct Renderer {
    surface: Surface<Rc<Window>, Rc<Window>>,
    /// Persistent back buffer; softbuffer does not preserve surface contents
    back_buffer: Vec<u32>,
    width: u32,
    height: u32,
    glyph_cache: GlyphCache,
    scale_factor: f64,
}

impl Renderer {
    /// Create a new renderer, automatically detecting the window's scale factor
    pub fn new(window: Rc<Window>, context: &softbuffer::Context<Rc<Window>>) -> Result<Self> {
        let scale_factor = window.scale_factor();
        let size = window.inner_size();

        let surface = Surface::new(context, Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create surface: {}", e))?;

        let mut renderer = Self {
            surface,
            back_buffer: Vec::new(),
            width: 0,
            height: 0,
            glyph_cache: HashMap::new(),
            scale_factor,
        };
        renderer.resize(size.width, size.height, scale_factor)?;
        Ok(renderer)
    }

    /// Match the surface to new window dimensions
    pub fn resize(&mut self, width: u32, height: u32, scale_factor: f64) -> Result<()> {
        let w = NonZeroU32::new(width.max(1)).unwrap_or(NonZeroU32::MIN);
        let h = NonZeroU32::new(height.max(1)).unwrap_or(NonZeroU32::MIN);
        self.surface
            .resize(w, h)
            .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))?;

        self.width = w.get();
        self.height = h.get();
        self.back_buffer = vec![0u32; (self.width as usize) * (self.height as usize)];
        if self.scale_factor != scale_factor {
            // Glyph sizes are device pixels; a new scale invalidates them
            self.glyph_cache.clear();
            self.scale_factor = scale_factor;
        }
        Ok(())
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Logical viewport of the window
    pub fn viewport(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
            .scale(1.0 / self.scale_factor as f32)
    }

    /// Clear to `background`, rasterize `scene` and present it
    pub fn present(&mut self, scene: &Scene, background: Color, fonts: &FontBook) -> Result<()> {
        let mut frame = Frame::new(
            &mut self.back_buffer,
            self.width as usize,
            self.height as usize,
        );
        frame.clear(background);
        rasterize(
            scene,
            &mut frame,
            self.scale_factor as f32,
            fonts,
            &mut self.glyph_cache,
        );

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("Failed to get surface buffer: {}", e))?;
        buffer.copy_from_slice(&self.back_buffer);
        buffer
            .present()
            .map_err(|e| anyhow::anyhow!("Failed to present buffer: {}", e))?;

        Ok(())
    }
}
