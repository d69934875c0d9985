use std::str::FromStr;

use ratatui::style::Color;

use crate::model::UserConfig;

/// Selects the base palette, from `LANES_THEME`
pub const THEME_ENV: &str = "LANES_THEME";

/// Base palette for the terminal background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    /// Anything other than "light" means dark
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("light") {
            ThemeKind::Light
        } else {
            ThemeKind::Dark
        }
    }

    pub fn from_env() -> Self {
        std::env::var(THEME_ENV)
            .map(|v| ThemeKind::parse(&v))
            .unwrap_or_default()
    }
}

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Text, borders and titles
    pub text: Color,
    pub dim: Color,
    /// Focused card and active input
    pub primary: Color,
    pub error: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::new(ThemeKind::Dark, Color::Blue)
    }
}

impl Theme {
    pub fn new(kind: ThemeKind, primary: Color) -> Self {
        let (text, dim, match_fg) = match kind {
            ThemeKind::Dark => (Color::White, Color::Gray, Color::Black),
            ThemeKind::Light => (Color::Black, Color::DarkGray, Color::White),
        };
        Theme {
            text,
            dim,
            primary,
            error: Color::Red,
            search_match_bg: Color::Yellow,
            search_match_fg: match_fg,
        }
    }

    /// Theme for the given palette with the config's primary color,
    /// falling back to blue when the color doesn't parse
    pub fn from_config(kind: ThemeKind, config: &UserConfig) -> Self {
        let primary = parse_color(&config.primary_color).unwrap_or_else(|| {
            tracing::warn!(color = %config.primary_color, "unknown primary_color, using blue");
            Color::Blue
        });
        Theme::new(kind, primary)
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// "#RRGGBB", a color name ("blue", "light-green", ...) or a palette index ("208")
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if value.starts_with('#') {
        return parse_hex_color(value);
    }
    Color::from_str(value).ok()
}
