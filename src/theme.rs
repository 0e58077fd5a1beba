//! Theme system for the caret layer
//!
//! Provides YAML-based theming support with compile-time embedded themes
//! and user-defined themes from config directories.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/caret/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary

use std::path::Path;

use serde::Deserialize;

// Embed theme YAML files at compile time
pub const DEFAULT_DARK_YAML: &str = include_str!("../themes/dark.yaml");
pub const DEFAULT_LIGHT_YAML: &str = include_str!("../themes/light.yaml");

/// Alpha applied to a solid caret brush while overstrike mode is active (~39%)
pub const OVERSTRIKE_ALPHA: u8 = 100;

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "default-dark")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "default-dark",
        yaml: DEFAULT_DARK_YAML,
    },
    BuiltinTheme {
        id: "default-light",
        yaml: DEFAULT_LIGHT_YAML,
    },
];

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    if let Some(user_dir) = crate::config_paths::themes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::info!("Loading builtin theme: {}", id);
    Theme::from_builtin(id)
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from a packed ARGB value (0xAARRGGBB)
    pub const fn from_argb_u32(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Convert to ARGB u32 for softbuffer
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Return a new color with the specified alpha value
    pub const fn with_alpha(&self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    pub const fn is_opaque(&self) -> bool {
        self.a == 0xFF
    }

    /// Linear interpolation between two colors, `t` in `0.0..=1.0`
    pub fn lerp(&self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        if !s.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        match s.len() {
            6 => Ok(Color {
                r: u8::from_str_radix(&s[0..2], 16).map_err(|e| e.to_string())?,
                g: u8::from_str_radix(&s[2..4], 16).map_err(|e| e.to_string())?,
                b: u8::from_str_radix(&s[4..6], 16).map_err(|e| e.to_string())?,
                a: 255,
            }),
            8 => Ok(Color {
                r: u8::from_str_radix(&s[0..2], 16).map_err(|e| e.to_string())?,
                g: u8::from_str_radix(&s[2..4], 16).map_err(|e| e.to_string())?,
                b: u8::from_str_radix(&s[4..6], 16).map_err(|e| e.to_string())?,
                a: u8::from_str_radix(&s[6..8], 16).map_err(|e| e.to_string())?,
            }),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }
}

/// Same RGB, new alpha.
///
/// Used to derive the overstrike caret from a solid caret color.
pub fn translucent(color: Color, alpha: u8) -> Color {
    color.with_alpha(alpha)
}

/// Direction a linear gradient runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientDirection {
    /// `start` at the top edge, `end` at the bottom edge
    Vertical,
    /// `start` at the left edge, `end` at the right edge
    Horizontal,
}

/// Paint used to fill a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Brush {
    Solid(Color),
    LinearGradient {
        start: Color,
        end: Color,
        direction: GradientDirection,
    },
}

impl Brush {
    /// The flat color, if this is a solid brush
    pub fn as_solid(&self) -> Option<Color> {
        match self {
            Brush::Solid(color) => Some(*color),
            Brush::LinearGradient { .. } => None,
        }
    }

    /// Derive the overstrike variant of this brush.
    ///
    /// Solid brushes keep their RGB and take [`OVERSTRIKE_ALPHA`]; other
    /// brushes are returned unchanged.
    pub fn overstrike(&self) -> Brush {
        match self {
            Brush::Solid(color) => Brush::Solid(translucent(*color, OVERSTRIKE_ALPHA)),
            other => *other,
        }
    }

    /// Color at normalized position `t` along the brush (0.0 = start)
    pub fn color_at(&self, t: f32) -> Color {
        match self {
            Brush::Solid(color) => *color,
            Brush::LinearGradient { start, end, .. } => start.lerp(*end, t),
        }
    }
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub editor: EditorThemeData,
    #[serde(default)]
    pub preedit: PreeditThemeData,
}

/// Editor area colors (raw strings from YAML)
#[derive(Debug, Clone, Deserialize)]
pub struct EditorThemeData {
    pub background: String,
    pub foreground: String,
    /// Explicit caret color; absent means "use the foreground"
    #[serde(default)]
    pub caret: Option<String>,
}

/// Pre-edit bubble colors (all optional)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PreeditThemeData {
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub foreground: Option<String>,
    #[serde(default)]
    pub border: Option<String>,
    #[serde(default)]
    pub shadow: Option<String>,
}

/// Resolved theme with parsed colors
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub editor: EditorTheme,
    pub preedit: PreeditTheme,
}

/// Editor colors (resolved)
#[derive(Debug, Clone, PartialEq)]
pub struct EditorTheme {
    pub background: Color,
    pub foreground: Color,
    pub caret: Option<Color>,
}

/// Pre-edit bubble colors (resolved)
#[derive(Debug, Clone, PartialEq)]
pub struct PreeditTheme {
    pub background: Color,
    pub foreground: Color,
    /// Optional 1px outline (None = no border)
    pub border: Option<Color>,
    pub shadow: Color,
}

impl Default for PreeditTheme {
    fn default() -> Self {
        Self {
            background: Color::rgb(0xF0, 0xF0, 0xF0),
            foreground: Color::BLACK,
            border: None,
            shadow: Color::from_argb_u32(0xA000_0000),
        }
    }
}

fn parse_optional(value: &Option<String>) -> Result<Option<Color>, String> {
    value.as_ref().map(|s| Color::from_hex(s)).transpose()
}

impl Theme {
    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        Theme::from_yaml(entry.yaml)
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let defaults = PreeditTheme::default();

        Ok(Theme {
            name: data.name,
            editor: EditorTheme {
                background: Color::from_hex(&data.editor.background)?,
                foreground: Color::from_hex(&data.editor.foreground)?,
                caret: parse_optional(&data.editor.caret)?,
            },
            preedit: PreeditTheme {
                background: parse_optional(&data.preedit.background)?
                    .unwrap_or(defaults.background),
                foreground: parse_optional(&data.preedit.foreground)?
                    .unwrap_or(defaults.foreground),
                border: parse_optional(&data.preedit.border)?,
                shadow: parse_optional(&data.preedit.shadow)?.unwrap_or(defaults.shadow),
            },
        })
    }

    /// Brush the host view paints text with; the caret falls back to it
    pub fn foreground_brush(&self) -> Brush {
        Brush::Solid(self.editor.foreground)
    }

    /// Explicit caret brush from the theme, if it defines one
    pub fn caret_brush(&self) -> Option<Brush> {
        self.editor.caret.map(Brush::Solid)
    }

    /// Default dark theme (YAML-backed with Rust fallback)
    pub fn default_dark() -> Self {
        match Theme::from_yaml(DEFAULT_DARK_YAML) {
            Ok(theme) => theme,
            Err(e) => {
                tracing::warn!("Embedded dark theme failed to parse: {}", e);
                Theme {
                    name: "Default Dark".to_string(),
                    editor: EditorTheme {
                        background: Color::rgb(0x1E, 0x1E, 0x1E),
                        foreground: Color::rgb(0xD4, 0xD4, 0xD4),
                        caret: None,
                    },
                    preedit: PreeditTheme::default(),
                }
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_dark()
    }
}
