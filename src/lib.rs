//! Caret - blinking text caret for CPU-rendered editors
//!
//! This crate provides the caret layer of a text view: a blink state
//! machine driven by a repeating timer, and a per-frame compositor that draws
//! the caret, the IME pre-edit bubble and the overstrike variant. State
//! changes flow through an Elm-style `update` returning [`Cmd`]s.

pub mod blink;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod geometry;
pub mod host;
pub mod layer;
pub mod messages;
pub mod model;
pub mod render;
pub mod scene;
pub mod text;
pub mod theme;
pub mod timer;
pub mod tracing;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use blink::{BlinkScheduler, CaretVisualState};
pub use commands::Cmd;
pub use config::CaretConfig;
pub use geometry::Rect;
pub use host::HostView;
pub use layer::{CaretLayer, KnownLayer, Layer};
pub use messages::CaretMsg;
pub use model::CaretModel;
pub use render::CaretRenderer;
pub use scene::{DrawCommand, Scene};
pub use theme::{Brush, Color, Theme};
pub use timer::BlinkTimerConfig;
