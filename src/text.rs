//! Text style description and measurement
//!
//! Shaping proper belongs to the host. The caret layer only needs run widths
//! and heights for the pre-edit bubble, so it talks to a [`TextMeasurer`].
//! [`FontBook`] is the fontdue-backed implementation used by the binaries.

use std::path::Path;

use anyhow::{Context, Result};
use fontdue::{Font, FontSettings};

/// Slant of a face
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// Numeric weight, CSS scale (100..=900)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const BOLD: FontWeight = FontWeight(700);
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Width class of a face
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontStretch {
    Condensed,
    #[default]
    Normal,
    Expanded,
}

/// Base direction of a text run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlowDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// Everything needed to pick a face and lay out a run
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub family: String,
    pub style: FontStyle,
    pub weight: FontWeight,
    pub stretch: FontStretch,
    /// Font size in logical pixels
    pub size: f32,
    pub flow: FlowDirection,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: "monospace".to_string(),
            style: FontStyle::Normal,
            weight: FontWeight::NORMAL,
            stretch: FontStretch::Normal,
            size: 14.0,
            flow: FlowDirection::LeftToRight,
        }
    }
}

/// Measured extent of a text run, in logical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width without trailing whitespace
    pub width: f32,
    /// Advance width including trailing whitespace
    pub width_including_trailing_whitespace: f32,
    /// Line height of the run
    pub height: f32,
    /// Distance from the top of the line box to the baseline
    pub ascent: f32,
}

impl TextMetrics {
    pub fn is_empty(&self) -> bool {
        self.width_including_trailing_whitespace <= 0.0 && self.height <= 0.0
    }
}

/// Measures text for layout.
///
/// Implementations never fail: an unresolvable face yields
/// `TextMetrics::default()`.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Describes a loaded face so styles can be matched against it
#[derive(Debug, Clone, PartialEq)]
pub struct FaceDescriptor {
    pub family: String,
    pub style: FontStyle,
    pub weight: FontWeight,
    pub stretch: FontStretch,
}

impl FaceDescriptor {
    pub fn regular(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: FontStyle::Normal,
            weight: FontWeight::NORMAL,
            stretch: FontStretch::Normal,
        }
    }

    /// Lower is better. Family dominates, then slant, stretch and weight.
    fn match_cost(&self, style: &TextStyle) -> u32 {
        let mut cost = 0;
        if !self.family.eq_ignore_ascii_case(&style.family) {
            cost += 100_000;
        }
        if self.style != style.style {
            cost += 10_000;
        }
        if self.stretch != style.stretch {
            cost += 1_000;
        }
        cost + self.weight.0.abs_diff(style.weight.0) as u32
    }
}

struct Face {
    descriptor: FaceDescriptor,
    font: Font,
}

/// A small collection of fontdue faces with style matching
#[derive(Default)]
pub struct FontBook {
    faces: Vec<Face>,
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Add an already-parsed face
    pub fn add_face(&mut self, descriptor: FaceDescriptor, font: Font) {
        tracing::debug!(
            family = %descriptor.family,
            weight = descriptor.weight.0,
            "Registered font face"
        );
        self.faces.push(Face { descriptor, font });
    }

    /// Parse a face from raw TTF/OTF bytes.
    ///
    /// When `family` is `None` the family name embedded in the font is used.
    pub fn add_bytes(&mut self, bytes: &[u8], family: Option<&str>) -> Result<()> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| anyhow::anyhow!("Failed to parse font: {}", e))?;
        let family = family
            .map(str::to_string)
            .or_else(|| font.name().map(str::to_string))
            .unwrap_or_else(|| "monospace".to_string());
        self.add_face(FaceDescriptor::regular(family), font);
        Ok(())
    }

    /// Load a face from a font file
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read font file {}", path.display()))?;
        self.add_bytes(&bytes, None)
            .with_context(|| format!("Failed to load font {}", path.display()))
    }

    /// Load the first readable font among `paths`.
    ///
    /// Returns the path that was loaded.
    pub fn load_first<'a, I>(&mut self, paths: I) -> Result<&'a Path>
    where
        I: IntoIterator<Item = &'a Path>,
    {
        let mut last_error = None;
        for path in paths {
            match self.load_file(path) {
                Ok(()) => {
                    tracing::info!("Loaded font from {}", path.display());
                    return Ok(path);
                }
                Err(e) => {
                    tracing::debug!("Skipping font {}: {:#}", path.display(), e);
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("No font candidates given")))
    }

    /// Best matching face for `style`, or `None` if the book is empty
    pub fn resolve(&self, style: &TextStyle) -> Option<&Font> {
        self.faces
            .iter()
            .min_by_key(|face| face.descriptor.match_cost(style))
            .map(|face| &face.font)
    }
}

impl TextMeasurer for FontBook {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        if text.is_empty() {
            return TextMetrics::default();
        }
        let Some(font) = self.resolve(style) else {
            return TextMetrics::default();
        };

        let (ascent, height) = match font.horizontal_line_metrics(style.size) {
            Some(line) => (line.ascent, line.new_line_size),
            None => (style.size * 0.8, style.size * 1.2),
        };

        let advance = |s: &str| -> f32 {
            s.chars()
                .map(|ch| font.metrics(ch, style.size).advance_width)
                .sum()
        };

        TextMetrics {
            width: advance(text.trim_end()),
            width_including_trailing_whitespace: advance(text),
            height,
            ascent,
        }
    }
}
