use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, View};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    NextCard,
    PrevCard,
    /// Tap the card under the cursor
    Tap,
    /// Tap a card by its position in the stack
    TapIndex(usize),
    Reveal,
    FlipBack,
    Back,
    None,
}

impl Action {
    /// Whether the action means anything in the given view
    fn applies_to(self, view: View) -> bool {
        match self {
            Action::Quit | Action::Back | Action::None => true,
            Action::Reveal | Action::FlipBack => matches!(view, View::Card(_)),
            _ => view == View::Wallet,
        }
    }
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    let binding = KeyBinding::new(key.code, key.modifiers);

    // Digits tap cards directly: 1 is the first card
    if let (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) = (key.code, key.modifiers) {
        if app.view == View::Wallet {
            return Action::TapIndex(c as usize - '1' as usize);
        }
    }

    if keymap.is_g_prefix(&binding) {
        let action = if app.pending_key == Some('g') {
            keymap.get_pending_g_action().copied().unwrap_or(Action::None)
        } else {
            Action::PendingG
        };
        return if action.applies_to(app.view) || action == Action::PendingG {
            action
        } else {
            Action::None
        };
    }

    match keymap.get(&binding).copied() {
        Some(action) if action.applies_to(app.view) => action,
        _ => Action::None,
    }
}
