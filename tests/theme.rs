use caret::theme::{
    Brush, Color, Theme, BUILTIN_THEMES, DEFAULT_DARK_YAML, DEFAULT_LIGHT_YAML, OVERSTRIKE_ALPHA,
};

#[test]
fn test_color_from_hex_6() {
    let color = Color::from_hex("#1E1E1E").unwrap();
    assert_eq!(color, Color::rgb(0x1E, 0x1E, 0x1E));
    assert_eq!(color.a, 255);
}

#[test]
fn test_color_from_hex_8() {
    let color = Color::from_hex("#000000A0").unwrap();
    assert_eq!(color.to_argb_u32(), 0xA000_0000);
}

#[test]
fn test_color_from_hex_rejects_garbage() {
    assert!(Color::from_hex("#12").is_err());
    assert!(Color::from_hex("not a color").is_err());
}

#[test]
fn test_default_dark_yaml_parses() {
    let theme = Theme::from_yaml(DEFAULT_DARK_YAML).unwrap();
    assert_eq!(theme.name, "Default Dark");
    assert_eq!(theme.editor.caret, None);
    assert_eq!(theme.preedit.background, Color::rgb(0xF0, 0xF0, 0xF0));
    assert_eq!(theme.preedit.border, None);
}

#[test]
fn test_default_light_yaml_parses() {
    let theme = Theme::from_yaml(DEFAULT_LIGHT_YAML).unwrap();
    assert_eq!(theme.name, "Default Light");
    assert_eq!(theme.editor.caret, Some(Color::rgb(0x09, 0x69, 0xDA)));
    assert_eq!(theme.preedit.border, Some(Color::rgb(0xD0, 0xD7, 0xDE)));
}

#[test]
fn test_all_builtin_themes_parse() {
    for builtin in BUILTIN_THEMES {
        assert!(
            Theme::from_builtin(builtin.id).is_ok(),
            "builtin theme {} failed to parse",
            builtin.id
        );
    }
}

#[test]
fn test_unknown_builtin_is_error() {
    assert!(Theme::from_builtin("no-such-theme").is_err());
}

#[test]
fn test_preedit_section_is_optional() {
    let yaml = r##"
version: 1
name: "Minimal"
editor:
  background: "#000000"
  foreground: "#FFFFFF"
"##;
    let theme = Theme::from_yaml(yaml).unwrap();
    assert_eq!(theme.preedit.shadow.to_argb_u32(), 0xA000_0000);
    assert_eq!(theme.caret_brush(), None);
    assert_eq!(theme.foreground_brush(), Brush::Solid(Color::WHITE));
}

#[test]
fn test_overstrike_brush_keeps_rgb() {
    let brush = Brush::Solid(Color::rgb(0xD4, 0xD4, 0xD4)).overstrike();
    assert_eq!(
        brush,
        Brush::Solid(Color::rgba(0xD4, 0xD4, 0xD4, OVERSTRIKE_ALPHA))
    );
}
