//! Caret model - the caret layer together with the host view it draws into

use crate::host::HostView;
use crate::layer::{CaretLayer, Layer};
use crate::scene::Scene;
use crate::text::{TextMeasurer, TextStyle};
use crate::theme::Theme;
use crate::timer::BlinkTimerConfig;

/// State updated by [`crate::update::update`]
#[derive(Debug, Default)]
pub struct CaretModel {
    pub caret: CaretLayer,
    pub host: HostView,
}

impl CaretModel {
    pub fn new(theme: &Theme, text_style: TextStyle, blink: BlinkTimerConfig) -> Self {
        let mut caret = CaretLayer::new(blink);
        caret.set_theme_brush(theme.caret_brush());
        Self {
            caret,
            host: HostView::new(theme, text_style),
        }
    }

    /// Render the caret layer for the current frame
    pub fn render(&self, measurer: &dyn TextMeasurer) -> Scene {
        self.caret.render(&self.host, measurer)
    }
}
