//! Brand colors and hex parsing.

use ratatui::style::{Color, Modifier, Style};

pub const BRAND: Color = Color::Rgb(255, 107, 138);
pub const ACCENT: Color = Color::Rgb(255, 159, 67);
pub const HIGHLIGHT: Color = Color::Rgb(255, 217, 61);
pub const MUTED: Color = Color::Rgb(120, 120, 130);
pub const TEXT: Color = Color::Rgb(230, 230, 235);
pub const PANEL_BG: Color = Color::Rgb(30, 30, 40);

/// Parse `#rrggbb` into a terminal color
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

pub fn heading() -> Style {
    Style::default().fg(BRAND).add_modifier(Modifier::BOLD)
}

pub fn body() -> Style {
    Style::default().fg(TEXT)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

/// Active member of a selection group
pub fn active() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(BRAND)
        .add_modifier(Modifier::BOLD)
}

/// Primary call-to-action button
pub fn button() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Controls at their limit are dimmed, never hidden
pub fn control(dimmed: bool) -> Style {
    if dimmed {
        Style::default().fg(MUTED).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
    }
}
