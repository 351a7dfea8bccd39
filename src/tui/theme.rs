use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub border: Color,
    /// Behind the focused column title
    pub selection_bg: Color,
    /// Border of the empty slot a lifted subject leaves behind
    pub reserved: Color,
    /// Background of the dragged clone
    pub clone_bg: Color,
    pub clone_border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            border: Color::Rgb(0x4A, 0x45, 0x80),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            reserved: Color::Rgb(0x3A, 0x33, 0x5C),
            clone_bg: Color::Rgb(0x24, 0x10, 0x3A),
            clone_border: Color::Rgb(0xFB, 0x41, 0x96),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the `[ui]` config, falling back to defaults.
    /// Unknown names and malformed colors are ignored.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring malformed color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "border" => theme.border = color,
                "selection_bg" => theme.selection_bg = color,
                "reserved" => theme.reserved = color,
                "clone_bg" => theme.clone_bg = color,
                "clone_border" => theme.clone_border = color,
                _ => {}
            }
        }

        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#FF4444"),
            Some(Color::Rgb(0xFF, 0x44, 0x44))
        );
        assert_eq!(
            parse_hex_color("#0C001B"),
            Some(Color::Rgb(0x0C, 0x00, 0x1B))
        );
        assert_eq!(parse_hex_color("FF4444"), None); // missing #
        assert_eq!(parse_hex_color("#FF44"), None); // too short
        assert_eq!(parse_hex_color("#ZZZZZZ"), None); // invalid hex
    }

    #[test]
    fn test_from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("background".into(), "#000000".into());
        ui.colors.insert("clone_bg".into(), "#112233".into());
        ui.colors.insert("border".into(), "not a color".into());
        ui.colors.insert("red".into(), "#FF0000".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        assert_eq!(theme.clone_bg, Color::Rgb(0x11, 0x22, 0x33));
        // Unchanged defaults still present
        assert_eq!(theme.text, Color::Rgb(0xB0, 0xAA, 0xFF));
        assert_eq!(theme.border, Theme::default().border);
        // Names outside the palette change nothing
        assert_eq!(theme.highlight, Theme::default().highlight);
    }
}
