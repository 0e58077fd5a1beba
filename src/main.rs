//! Caret demo - a one-line text field driving the caret layer
//!
//! Type to insert, arrows/Home/End to move, Insert toggles overstrike,
//! the mouse wheel scrolls. IME composition shows up as the pre-edit bubble.
//!
//! Usage:
//!   cargo run -- --theme default-light --blink-ms 300

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use softbuffer::Context;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event::{ElementState, Ime, KeyEvent, MouseScrollDelta, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use caret::config::CaretConfig;
use caret::geometry::{Point, Rect, ScrollOffset};
use caret::layer::{compose_layers, KnownLayer, Layer};
use caret::scene::{DrawCommand, Scene};
use caret::text::{FontBook, TextMeasurer, TextStyle};
use caret::theme::{load_theme, Color, Theme};
use caret::update::update;
use caret::view::Renderer;
use caret::{CaretModel, CaretMsg, Cmd, HostView};

/// Left edge of the text line in content coordinates
const TEXT_LEFT: f32 = 16.0;
/// Top edge of the text line in content coordinates
const TEXT_TOP: f32 = 16.0;
/// Insert-mode caret width
const CARET_WIDTH: f32 = 2.0;
/// Pixels scrolled per wheel line
const SCROLL_LINE_PX: f32 = 24.0;

#[derive(Parser, Debug)]
#[command(name = "caret-demo", about = "Interactive caret layer demo")]
struct Args {
    /// Theme id (builtin or ~/.config/caret/themes/{id}.yaml)
    #[arg(long)]
    theme: Option<String>,
    /// Font file for text and pre-edit
    #[arg(long)]
    font: Option<PathBuf>,
    /// Blink interval in milliseconds; 0 or less keeps the caret solid
    #[arg(long, allow_hyphen_values = true)]
    blink_ms: Option<i64>,
    /// Initial text
    #[arg(long, default_value = "Hello, caret")]
    text: String,
}

// ============================================================================
// Host text line
// ============================================================================

/// The one line of text the demo edits, with a char-indexed cursor
#[derive(Debug, Clone, Default)]
struct TextLine {
    chars: Vec<char>,
    cursor: usize,
}

impl TextLine {
    fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let cursor = chars.len();
        Self { chars, cursor }
    }

    fn text(&self) -> String {
        self.chars.iter().collect()
    }

    fn prefix(&self) -> String {
        self.chars[..self.cursor].iter().collect()
    }

    fn char_at_cursor(&self) -> Option<char> {
        self.chars.get(self.cursor).copied()
    }

    /// Insert, or replace the character under the cursor in overstrike mode
    fn type_str(&mut self, s: &str, overstrike: bool) {
        for ch in s.chars() {
            if overstrike && self.cursor < self.chars.len() {
                self.chars[self.cursor] = ch;
            } else {
                self.chars.insert(self.cursor, ch);
            }
            self.cursor += 1;
        }
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
        }
    }

    fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    fn home(&mut self) {
        self.cursor = 0;
    }

    fn end(&mut self) {
        self.cursor = self.chars.len();
    }
}

/// Draws the committed text beneath the caret
struct TextLayer<'a> {
    text: &'a str,
    color: Color,
}

impl Layer for TextLayer<'_> {
    fn kind(&self) -> KnownLayer {
        KnownLayer::Text
    }

    fn render(&self, host: &HostView, _measurer: &dyn TextMeasurer) -> Scene {
        let mut scene = Scene::new();
        let origin = host
            .scroll
            .to_view(Rect::new(TEXT_LEFT, TEXT_TOP, 0.0, 0.0));
        scene.push(DrawCommand::Text {
            origin: Point::new(origin.x, origin.y),
            text: self.text.to_string(),
            style: host.text_style.clone(),
            color: self.color,
        });
        scene
    }
}

// ============================================================================
// Application
// ============================================================================

struct App {
    model: CaretModel,
    line: TextLine,
    fonts: FontBook,
    theme: Theme,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    renderer: Option<Renderer>,
    focused: bool,
}

impl App {
    fn new(config: &CaretConfig, text: &str) -> Self {
        let theme = load_theme(&config.theme).unwrap_or_else(|e| {
            tracing::warn!("Failed to load theme '{}': {}", config.theme, e);
            Theme::default()
        });

        let mut fonts = FontBook::new();
        let candidates = config.font_candidates();
        if let Err(e) = fonts.load_first(candidates.iter().map(PathBuf::as_path)) {
            tracing::warn!("No font available, text will not be drawn: {:#}", e);
        }

        let style = TextStyle {
            size: config.font_size,
            ..TextStyle::default()
        };

        Self {
            model: CaretModel::new(&theme, style, config.blink_timer_config()),
            line: TextLine::new(text),
            fonts,
            theme,
            window: None,
            context: None,
            renderer: None,
            focused: false,
        }
    }

    fn line_height(&self) -> f32 {
        let metrics = self.fonts.measure("M", &self.model.host.text_style);
        if metrics.height > 0.0 {
            metrics.height
        } else {
            self.model.host.text_style.size * 1.2
        }
    }

    /// Caret rectangle in content coordinates for the current cursor
    fn caret_rect(&self) -> Rect {
        let style = &self.model.host.text_style;
        let x = TEXT_LEFT
            + self
                .fonts
                .measure(&self.line.prefix(), style)
                .width_including_trailing_whitespace;

        let width = match self.line.char_at_cursor() {
            Some(ch) if self.model.host.overstrike => self
                .fonts
                .measure(&ch.to_string(), style)
                .width_including_trailing_whitespace
                .max(CARET_WIDTH),
            _ => CARET_WIDTH,
        };

        Rect::new(x, TEXT_TOP, width, self.line_height())
    }

    fn dispatch(&mut self, event_loop: &ActiveEventLoop, msg: CaretMsg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(event_loop, cmd);
        }
    }

    fn process_cmd(&self, event_loop: &ActiveEventLoop, cmd: Cmd) {
        if let Some(at) = cmd.wake_deadline() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(at));
        }
        if cmd.needs_redraw() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    /// Re-show the caret after the cursor moved (restarts the blink on-phase)
    fn refresh_caret(&mut self, event_loop: &ActiveEventLoop) {
        if !self.focused {
            return;
        }
        let rect = self.caret_rect();
        if let Some(window) = &self.window {
            let view = self.model.host.scroll.to_view(rect);
            window.set_ime_cursor_area(
                LogicalPosition::new(view.x as f64, view.y as f64),
                LogicalSize::new(view.width as f64, view.height as f64),
            );
        }
        self.dispatch(event_loop, CaretMsg::Show(rect));
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed {
            return;
        }
        let overstrike = self.model.host.overstrike;

        match &event.logical_key {
            Key::Named(NamedKey::ArrowLeft) => self.line.move_left(),
            Key::Named(NamedKey::ArrowRight) => self.line.move_right(),
            Key::Named(NamedKey::Home) => self.line.home(),
            Key::Named(NamedKey::End) => self.line.end(),
            Key::Named(NamedKey::Backspace) => self.line.backspace(),
            Key::Named(NamedKey::Delete) => self.line.delete(),
            Key::Named(NamedKey::Space) => self.line.type_str(" ", overstrike),
            Key::Named(NamedKey::Insert) => {
                self.dispatch(event_loop, CaretMsg::ToggleOverstrike);
            }
            Key::Named(NamedKey::Escape) => {
                event_loop.exit();
                return;
            }
            Key::Character(s) if !self.model.host.has_preedit() => {
                self.line.type_str(s.as_str(), overstrike);
            }
            _ => return,
        }

        self.refresh_caret(event_loop);
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn handle_ime(&mut self, event_loop: &ActiveEventLoop, ime: &Ime) {
        match ime {
            Ime::Preedit(text, _) => {
                self.dispatch(event_loop, CaretMsg::SetPreedit(text.clone()));
            }
            Ime::Commit(text) => {
                self.dispatch(event_loop, CaretMsg::SetPreedit(String::new()));
                let overstrike = self.model.host.overstrike;
                self.line.type_str(text, overstrike);
                self.refresh_caret(event_loop);
            }
            Ime::Disabled => {
                self.dispatch(event_loop, CaretMsg::SetPreedit(String::new()));
            }
            Ime::Enabled => {}
        }
    }

    fn handle_scroll(&mut self, event_loop: &ActiveEventLoop, delta: &MouseScrollDelta) {
        let (dx, dy) = match delta {
            MouseScrollDelta::LineDelta(x, y) => (x * SCROLL_LINE_PX, y * SCROLL_LINE_PX),
            MouseScrollDelta::PixelDelta(pos) => {
                let scale = self.model.host.scale_factor;
                ((pos.x / scale) as f32, (pos.y / scale) as f32)
            }
        };
        let current = self.model.host.scroll;
        let next = ScrollOffset::new(
            (current.horizontal - dx).max(0.0),
            (current.vertical - dy).max(0.0),
        );
        self.dispatch(event_loop, CaretMsg::ScrollTo(next));
    }

    fn render(&mut self) -> Result<()> {
        let text = self.line.text();
        let text_layer = TextLayer {
            text: &text,
            color: self.theme.editor.foreground,
        };
        let layers: [&dyn Layer; 2] = [&self.model.caret, &text_layer];
        let scene = compose_layers(&layers, &self.model.host, &self.fonts);

        if let Some(renderer) = &mut self.renderer {
            renderer.present(&scene, self.theme.editor.background, &self.fonts)?;
        }
        Ok(())
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("Caret")
            .with_inner_size(LogicalSize::new(640, 120));

        let window = Rc::new(event_loop.create_window(window_attributes)?);
        window.set_ime_allowed(true);

        let context = Context::new(Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create softbuffer context: {}", e))?;
        let renderer = Renderer::new(Rc::clone(&window), &context)?;

        self.dispatch(
            event_loop,
            CaretMsg::SetScaleFactor(renderer.scale_factor()),
        );
        self.renderer = Some(renderer);
        self.context = Some(context);
        self.window = Some(window);
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                tracing::error!("Failed to create window: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            self.dispatch(event_loop, CaretMsg::Poll(Instant::now()));
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map(|w| w.id()) != Some(window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                let scale = self.model.host.scale_factor;
                if let Some(renderer) = &mut self.renderer {
                    if let Err(e) = renderer.resize(size.width, size.height, scale) {
                        tracing::warn!("Resize failed: {:#}", e);
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.dispatch(event_loop, CaretMsg::SetScaleFactor(scale_factor));
                if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
                    let size = window.inner_size();
                    if let Err(e) = renderer.resize(size.width, size.height, scale_factor) {
                        tracing::warn!("Resize failed: {:#}", e);
                    }
                }
            }
            WindowEvent::Focused(focused) => {
                self.focused = focused;
                if focused {
                    self.refresh_caret(event_loop);
                } else {
                    self.dispatch(event_loop, CaretMsg::Hide);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::Ime(ime) => self.handle_ime(event_loop, &ime),
            WindowEvent::MouseWheel { delta, .. } => self.handle_scroll(event_loop, &delta),
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    tracing::error!("Render failed: {:#}", e);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        match self.model.caret.next_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

fn main() -> Result<()> {
    caret::tracing::init();

    let args = Args::parse();
    let mut config = CaretConfig::load();
    if let Some(theme) = args.theme {
        config.theme = theme;
    }
    if let Some(font) = args.font {
        config.font_path = Some(font);
    }
    if let Some(ms) = args.blink_ms {
        config.blink_interval_ms = ms;
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(&config, &args.text);
    event_loop.run_app(&mut app)?;

    Ok(())
}
