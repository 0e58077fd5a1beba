//! Per-frame snapshot of the host text view
//!
//! The caret layer never reaches into the editor. The host fills a
//! [`HostView`] with its scroll offsets, fonts, brushes and input-method
//! state and hands it to the renderer each frame.

use crate::geometry::ScrollOffset;
use crate::text::{FlowDirection, TextStyle};
use crate::theme::{Brush, Color, PreeditTheme, Theme};

/// Read-only view state consumed by the caret renderer
#[derive(Debug, Clone, PartialEq)]
pub struct HostView {
    pub scroll: ScrollOffset,
    /// Brush the view paints text with; the caret's fallback brush
    pub foreground: Brush,
    /// Font used for the pre-edit bubble
    pub text_style: TextStyle,
    /// Uncommitted IME composition text; empty when not composing
    pub preedit_text: String,
    pub overstrike: bool,
    /// Device pixels per logical pixel
    pub scale_factor: f64,
    /// Pre-edit bubble palette
    pub preedit: PreeditTheme,
}

impl HostView {
    pub fn new(theme: &Theme, text_style: TextStyle) -> Self {
        Self {
            scroll: ScrollOffset::default(),
            foreground: theme.foreground_brush(),
            text_style,
            preedit_text: String::new(),
            overstrike: false,
            scale_factor: 1.0,
            preedit: theme.preedit.clone(),
        }
    }

    pub fn flow_direction(&self) -> FlowDirection {
        self.text_style.flow
    }

    pub fn has_preedit(&self) -> bool {
        !self.preedit_text.is_empty()
    }

    /// Re-read theme-derived colors after a theme switch
    pub fn apply_theme(&mut self, theme: &Theme) {
        self.foreground = theme.foreground_brush();
        self.preedit = theme.preedit.clone();
    }
}

impl Default for HostView {
    fn default() -> Self {
        Self {
            scroll: ScrollOffset::default(),
            foreground: Brush::Solid(Color::BLACK),
            text_style: TextStyle::default(),
            preedit_text: String::new(),
            overstrike: false,
            scale_factor: 1.0,
            preedit: PreeditTheme::default(),
        }
    }
}
