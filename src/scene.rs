//! Drawing primitives emitted by layers
//!
//! A [`Scene`] is a flat, ordered list of commands in view-local logical
//! pixels. The rasterizer in [`crate::view`] executes it; tests inspect it.

use crate::geometry::{Point, Rect};
use crate::text::TextStyle;
use crate::theme::{Brush, Color};

/// Soft shadow around a shape, no offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShadow {
    /// Distance over which the shadow fades out
    pub blur: f32,
    pub color: Color,
}

/// A single drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill an axis-aligned rectangle
    FillRect { rect: Rect, brush: Brush },
    /// Rounded rectangle with optional outline and shadow
    RoundedRect {
        rect: Rect,
        radius: f32,
        fill: Brush,
        border: Option<Color>,
        shadow: Option<BoxShadow>,
    },
    /// A run of text; `origin` is the top-left of its line box
    Text {
        origin: Point,
        text: String,
        style: TextStyle,
        color: Color,
    },
}

/// Ordered draw commands for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Append another scene's commands after this one's
    pub fn extend(&mut self, other: Scene) {
        self.commands.extend(other.commands);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand> {
        self.commands.iter()
    }

    /// All plain rectangle fills, in draw order
    pub fn fills(&self) -> impl Iterator<Item = (&Rect, &Brush)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::FillRect { rect, brush } => Some((rect, brush)),
            _ => None,
        })
    }

    /// All text runs, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
