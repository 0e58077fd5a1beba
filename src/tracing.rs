//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging caret
//! visibility, blink phase and pre-edit transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=caret=trace,message=debug` - scoped filtering
//! - `RUST_LOG=caret::blink=trace` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/caret/logs/caret.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::blink::CaretVisualState;
use crate::geometry::Rect;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG env var (default `warn`).
/// File logging writes to `~/.config/caret/logs/caret.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "caret.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // A second init (e.g. from a test harness) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of caret state for diffing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretSnapshot {
    pub visible: bool,
    pub blink_on: bool,
    pub rect: Rect,
}

impl CaretSnapshot {
    pub fn from_state(state: &CaretVisualState) -> Self {
        Self {
            visible: state.is_visible,
            blink_on: state.blink_on,
            rect: state.caret_rect,
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &CaretSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.visible != other.visible {
            changes.push(format!(
                "visible: {} → {}",
                self.visible, other.visible
            ));
        }
        if self.blink_on != other.blink_on {
            changes.push(format!("blink: {} → {}", self.blink_on, other.blink_on));
        }
        if self.rect != other.rect {
            changes.push(format!(
                "rect: ({},{} {}x{}) → ({},{} {}x{})",
                self.rect.x,
                self.rect.y,
                self.rect.width,
                self.rect.height,
                other.rect.x,
                other.rect.y,
                other.rect.width,
                other.rect.height
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_diff_none_when_equal() {
        let state = CaretVisualState::default();
        let a = CaretSnapshot::from_state(&state);
        assert_eq!(a.diff(&a), None);
    }

    #[test]
    fn test_snapshot_diff_lists_changes() {
        let before = CaretSnapshot::from_state(&CaretVisualState::default());
        let after = CaretSnapshot {
            visible: true,
            blink_on: true,
            rect: Rect::new(1.0, 2.0, 2.0, 16.0),
        };
        let diff = before.diff(&after).unwrap();
        assert!(diff.contains("visible: false → true"), "{}", diff);
        assert!(diff.contains("rect:"), "{}", diff);
        assert!(!diff.contains("blink"), "{}", diff);
    }
}
