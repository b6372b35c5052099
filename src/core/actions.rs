//! Page action vocabulary.
//!
//! Keybinds in `config.toml` name these actions; the app core only ever
//! reacts to `PageAction`s, never to raw keys.

use crate::content::SectionId;
use crossterm::event::{KeyCode, KeyModifiers};

/// Everything a key can ask the page to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Quit,

    // Page scrolling
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    JumpTo(SectionId),

    // Widget focus
    FocusNext,
    FocusPrev,

    // Focused widget input
    Left,
    Right,
    Up,
    Down,
    Activate,

    // Overlays
    OpenSearch,
    OpenLabReport,
    ToggleMenu,
    CloseOverlay,

    // Primary call-to-action (confetti)
    Buy,
}

impl PageAction {
    /// Parse an action name from the keybinds table
    pub fn from_str(action: &str) -> Option<Self> {
        if let Some(section) = action.strip_prefix("jump:") {
            return SectionId::from_str(section).map(Self::JumpTo);
        }

        match action {
            "quit" => Some(Self::Quit),
            "scroll_up" => Some(Self::ScrollUp),
            "scroll_down" => Some(Self::ScrollDown),
            "page_up" => Some(Self::PageUp),
            "page_down" => Some(Self::PageDown),
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "focus_next" => Some(Self::FocusNext),
            "focus_prev" => Some(Self::FocusPrev),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "activate" => Some(Self::Activate),
            "search" => Some(Self::OpenSearch),
            "lab_report" => Some(Self::OpenLabReport),
            "toggle_menu" => Some(Self::ToggleMenu),
            "close" => Some(Self::CloseOverlay),
            "buy" => Some(Self::Buy),
            _ => None,
        }
    }
}

/// Parse a key string like "ctrl+c", "shift+tab" or "pagedown"
pub fn parse_key_string(key_str: &str) -> Option<(KeyCode, KeyModifiers)> {
    let key_str = key_str.trim();
    if key_str.is_empty() {
        return None;
    }

    // A lone "+" is the plus key, not a separator
    if key_str == "+" {
        return Some((KeyCode::Char('+'), KeyModifiers::empty()));
    }

    let parts: Vec<&str> = key_str.split('+').collect();
    let mut modifiers = KeyModifiers::empty();
    let mut key_part = key_str;

    if parts.len() > 1 {
        for part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        key_part = parts[parts.len() - 1];
    }

    let key_code = match key_part.to_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "page_up" | "pageup" => KeyCode::PageUp,
        "page_down" | "pagedown" => KeyCode::PageDown,
        f if f.len() > 1 && f.starts_with('f') => {
            let n: u8 = f[1..].parse().ok()?;
            if !(1..=12).contains(&n) {
                return None;
            }
            KeyCode::F(n)
        }
        _ => {
            // Keep the original case for single characters ("G" vs "g")
            let mut chars = key_part.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                _ => return None,
            }
        }
    };

    Some((key_code, modifiers))
}

/// Normalize modifiers so lookups match what terminals actually send.
///
/// Terminals report BackTab with SHIFT set and uppercase letters with or
/// without SHIFT depending on the platform.
pub fn normalize_key(code: KeyCode, modifiers: KeyModifiers) -> (KeyCode, KeyModifiers) {
    match code {
        KeyCode::BackTab => (KeyCode::BackTab, modifiers.difference(KeyModifiers::SHIFT)),
        KeyCode::Char(c) if c.is_ascii_uppercase() => (code, modifiers.difference(KeyModifiers::SHIFT)),
        _ => (code, modifiers),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action_names() {
        assert_eq!(PageAction::from_str("quit"), Some(PageAction::Quit));
        assert_eq!(PageAction::from_str("buy"), Some(PageAction::Buy));
        assert_eq!(
            PageAction::from_str("jump:reviews"),
            Some(PageAction::JumpTo(SectionId::Reviews))
        );
        assert_eq!(PageAction::from_str("jump:nowhere"), None);
        assert_eq!(PageAction::from_str("dance"), None);
    }

    #[test]
    fn test_parse_key_string() {
        assert_eq!(
            parse_key_string("ctrl+c"),
            Some((KeyCode::Char('c'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            parse_key_string("shift+tab"),
            Some((KeyCode::BackTab, KeyModifiers::SHIFT))
        );
        assert_eq!(
            parse_key_string("PageDown"),
            Some((KeyCode::PageDown, KeyModifiers::empty()))
        );
        assert_eq!(parse_key_string("f5"), Some((KeyCode::F(5), KeyModifiers::empty())));
        assert_eq!(parse_key_string("G"), Some((KeyCode::Char('G'), KeyModifiers::empty())));
        assert_eq!(parse_key_string("+"), Some((KeyCode::Char('+'), KeyModifiers::empty())));
        assert_eq!(parse_key_string("hyper+x"), None);
        assert_eq!(parse_key_string("f13"), None);
        assert_eq!(parse_key_string(""), None);
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(
            normalize_key(KeyCode::BackTab, KeyModifiers::SHIFT),
            (KeyCode::BackTab, KeyModifiers::empty())
        );
        assert_eq!(
            normalize_key(KeyCode::Char('G'), KeyModifiers::SHIFT),
            (KeyCode::Char('G'), KeyModifiers::empty())
        );
        assert_eq!(
            normalize_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
        );
    }
}
