//! Layer composition and end-to-end rasterization

mod common;

use caret::geometry::Point;
use caret::host::HostView;
use caret::layer::{compose_layers, KnownLayer, Layer};
use caret::scene::{DrawCommand, Scene};
use caret::text::{FontBook, TextMeasurer, TextStyle};
use caret::theme::{Brush, Color};
use caret::view::{rasterize, Frame, GlyphCache};
use caret::CaretLayer;
use common::{rect, t0, test_host, MonoMeasurer};

/// Full-width band standing in for the host's text or selection layer
struct Band {
    kind: KnownLayer,
    color: Color,
}

impl Layer for Band {
    fn kind(&self) -> KnownLayer {
        self.kind
    }

    fn render(&self, _host: &HostView, _measurer: &dyn TextMeasurer) -> Scene {
        let mut scene = Scene::new();
        scene.push(DrawCommand::FillRect {
            rect: rect(0.0, 0.0, 20.0, 20.0),
            brush: Brush::Solid(self.color),
        });
        scene
    }
}

fn caret_layer() -> CaretLayer {
    let mut layer = CaretLayer::default();
    layer.set_caret_brush(Some(Brush::Solid(Color::WHITE)));
    layer.show_at(rect(4.0, 2.0, 2.0, 10.0), t0());
    layer
}

fn raster(scene: &Scene, scale: f32, width: usize, height: usize) -> Vec<u32> {
    let mut buffer = vec![0xFF00_0000_u32; width * height];
    let mut frame = Frame::new(&mut buffer, width, height);
    let mut cache = GlyphCache::new();
    rasterize(scene, &mut frame, scale, &FontBook::new(), &mut cache);
    buffer
}

#[test]
fn test_caret_layer_kind() {
    assert_eq!(CaretLayer::default().kind(), KnownLayer::Caret);
}

#[test]
fn test_caret_composes_above_text_below_overlay() {
    let caret = caret_layer();
    let text = Band {
        kind: KnownLayer::Text,
        color: Color::rgb(0x10, 0x10, 0x10),
    };
    let overlay = Band {
        kind: KnownLayer::Overlay,
        color: Color::rgb(0x20, 0x20, 0x20),
    };

    // Registration order must not matter
    let layers: [&dyn Layer; 3] = [&overlay, &caret, &text];
    let scene = compose_layers(&layers, &test_host(), &MonoMeasurer::default());

    let colors: Vec<Color> = scene
        .fills()
        .filter_map(|(_, brush)| brush.as_solid())
        .collect();
    assert_eq!(
        colors,
        vec![
            Color::rgb(0x10, 0x10, 0x10),
            Color::WHITE,
            Color::rgb(0x20, 0x20, 0x20),
        ]
    );
}

#[test]
fn test_caret_pixels_over_text() {
    let caret = caret_layer();
    let text = Band {
        kind: KnownLayer::Text,
        color: Color::rgb(0x10, 0x10, 0x10),
    };
    let layers: [&dyn Layer; 2] = [&caret, &text];
    let scene = compose_layers(&layers, &test_host(), &MonoMeasurer::default());
    let pixels = raster(&scene, 1.0, 20, 20);
    let at = |x: usize, y: usize| pixels[y * 20 + x];

    assert_eq!(at(4, 2), 0xFFFF_FFFF);
    assert_eq!(at(5, 11), 0xFFFF_FFFF);
    assert_eq!(at(6, 2), 0xFF10_1010);
    assert_eq!(at(4, 12), 0xFF10_1010);
}

#[test]
fn test_overstrike_caret_blends() {
    let caret = caret_layer();
    let host = HostView {
        overstrike: true,
        ..test_host()
    };
    let scene = caret.render(&host, &MonoMeasurer::default());
    let pixels = raster(&scene, 1.0, 20, 20);

    // White at alpha 100 over black
    assert_eq!(pixels[2 * 20 + 4], 0xFF64_6464);
}

#[test]
fn test_hidden_caret_leaves_frame_untouched() {
    let mut caret = caret_layer();
    caret.hide();
    let scene = caret.render(&test_host(), &MonoMeasurer::default());
    let pixels = raster(&scene, 2.0, 16, 16);
    assert!(pixels.iter().all(|&p| p == 0xFF00_0000));
}

#[test]
fn test_preedit_text_skipped_without_font() {
    let mut scene = Scene::new();
    scene.push(DrawCommand::Text {
        origin: Point::new(0.0, 0.0),
        text: "へんかん".to_string(),
        style: TextStyle::default(),
        color: Color::WHITE,
    });
    let pixels = raster(&scene, 1.0, 32, 16);
    assert!(pixels.iter().all(|&p| p == 0xFF00_0000));
}

#[test]
fn test_negative_width_caret_rasterizes_without_pixels() {
    let mut layer = CaretLayer::default();
    layer.set_caret_brush(Some(Brush::Solid(Color::WHITE)));
    layer.show_at(rect(10.0, 0.0, -2.0, 16.0), t0());

    let scene = layer.render(&test_host(), &MonoMeasurer::default());
    assert_eq!(scene.fills().count(), 1);

    let pixels = raster(&scene, 1.0, 40, 40);
    assert!(pixels.iter().all(|&p| p == 0xFF00_0000));
}
