use std::collections::hash_map::Entry;
use std::collections::HashMap;

use cardfolio_core::config::KeymapConfig;
use crossterm::event::{KeyCode, KeyModifiers};
use tracing::warn;

use crate::input::Action;

/// A key code with its modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

/// Key-to-action lookup built from [`KeymapConfig`]
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
    /// Bound to the two-key "gg" sequence
    gg_action: Option<Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    pub fn from_config(config: &KeymapConfig) -> Self {
        let configured = [
            (&config.quit, Action::Quit),
            (&config.scroll_down, Action::ScrollDown),
            (&config.scroll_up, Action::ScrollUp),
            (&config.scroll_page_down, Action::ScrollPageDown),
            (&config.scroll_page_up, Action::ScrollPageUp),
            (&config.jump_to_top, Action::JumpToTop),
            (&config.jump_to_bottom, Action::JumpToBottom),
            (&config.next_card, Action::NextCard),
            (&config.prev_card, Action::PrevCard),
            (&config.tap, Action::Tap),
            (&config.reveal, Action::Reveal),
            (&config.flip_back, Action::FlipBack),
            (&config.back, Action::Back),
        ];

        let mut keymap = Self {
            bindings: HashMap::new(),
            gg_action: None,
        };
        for (notation, action) in configured {
            keymap.bind(notation, action);
        }

        // Fixed fallbacks that configuration cannot remove
        keymap
            .bindings
            .insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        let arrows = [
            (KeyCode::Down, Action::ScrollDown),
            (KeyCode::Up, Action::ScrollUp),
        ];
        for (code, action) in arrows {
            keymap
                .bindings
                .entry(KeyBinding::simple(code))
                .or_insert(action);
        }
        keymap
    }

    fn bind(&mut self, notation: &str, action: Action) {
        if notation.trim() == "gg" {
            self.gg_action = Some(action);
            return;
        }
        let Some(binding) = parse_key_binding(notation) else {
            warn!(notation, ?action, "Invalid key binding, ignoring");
            return;
        };
        match self.bindings.entry(binding) {
            Entry::Occupied(existing) => warn!(
                notation,
                existing = ?existing.get(),
                ?action,
                "Key already bound, keeping the first binding"
            ),
            Entry::Vacant(slot) => {
                slot.insert(action);
            }
        }
    }

    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }

    pub fn get_pending_g_action(&self) -> Option<&Action> {
        self.gg_action.as_ref()
    }

    /// Whether `binding` is the first half of a bound "gg"
    pub fn is_g_prefix(&self, binding: &KeyBinding) -> bool {
        self.gg_action.is_some() && *binding == KeyBinding::simple(KeyCode::Char('g'))
    }
}

/// Parse Vim-style key notation
///
/// `"j"`, `"G"` (Shift), `"<C-d>"`, `"<S-Tab>"`, and named keys such as
/// `"<CR>"`, `"<Esc>"`, `"<Space>"`, `"<Up>"`.
pub fn parse_key_binding(notation: &str) -> Option<KeyBinding> {
    let notation = notation.trim();

    let Some(inner) = notation
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .filter(|inner| !inner.is_empty())
    else {
        return single_char(notation).map(|c| {
            if c.is_ascii_uppercase() {
                KeyBinding::shift(KeyCode::Char(c))
            } else {
                KeyBinding::simple(KeyCode::Char(c))
            }
        });
    };

    if let Some(name) = inner.strip_prefix("C-") {
        return key_code(name).map(KeyBinding::ctrl);
    }
    if let Some(name) = inner.strip_prefix("S-") {
        // Terminals report Shift+Tab as BackTab
        return key_code(name).map(|code| match code {
            KeyCode::Tab => KeyBinding::shift(KeyCode::BackTab),
            code => KeyBinding::shift(code),
        });
    }
    key_code(inner).map(KeyBinding::simple)
}

fn key_code(name: &str) -> Option<KeyCode> {
    let code = match name.to_ascii_lowercase().as_str() {
        "cr" | "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" | "spc" => KeyCode::Char(' '),
        "bs" | "backspace" => KeyCode::Backspace,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        _ => KeyCode::Char(single_char(name)?.to_ascii_lowercase()),
    };
    Some(code)
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_keys() {
        assert_eq!(
            parse_key_binding("j"),
            Some(KeyBinding::simple(KeyCode::Char('j')))
        );
        assert_eq!(
            parse_key_binding("b"),
            Some(KeyBinding::simple(KeyCode::Char('b')))
        );
        assert_eq!(
            parse_key_binding("G"),
            Some(KeyBinding::shift(KeyCode::Char('G')))
        );
        assert_eq!(parse_key_binding("jk"), None);
    }

    #[test]
    fn test_parse_special_keys() {
        assert_eq!(
            parse_key_binding("<CR>"),
            Some(KeyBinding::simple(KeyCode::Enter))
        );
        assert_eq!(
            parse_key_binding("<Space>"),
            Some(KeyBinding::simple(KeyCode::Char(' ')))
        );
        assert_eq!(
            parse_key_binding("<C-d>"),
            Some(KeyBinding::ctrl(KeyCode::Char('d')))
        );
        assert_eq!(
            parse_key_binding("<S-Tab>"),
            Some(KeyBinding::shift(KeyCode::BackTab))
        );
        assert_eq!(parse_key_binding("<Nope>"), None);
    }

    #[test]
    fn test_keymap_from_config() {
        let keymap = Keymap::default();

        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('q'))),
            Some(&Action::Quit)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Tab)),
            Some(&Action::NextCard)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char(' '))),
            Some(&Action::Reveal)
        );
        assert_eq!(
            keymap.get(&KeyBinding::ctrl(KeyCode::Char('c'))),
            Some(&Action::Quit)
        );
        assert_eq!(keymap.get_pending_g_action(), Some(&Action::JumpToTop));
    }

    #[test]
    fn test_conflicting_binding_keeps_first() {
        let config = KeymapConfig {
            flip_back: "q".to_string(),
            ..KeymapConfig::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('q'))),
            Some(&Action::Quit)
        );
    }
}
