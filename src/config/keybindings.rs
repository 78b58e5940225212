//! Keyboard bindings configuration.

use crate::model::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only code and modifiers are compared, so repeat and release events
    /// from enhanced keyboards map like presses.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;

        // Vim-style scrolling
        keys.bind(KeyCode::Char('j'), none, KeyAction::ScrollDown);
        keys.bind(KeyCode::Char('k'), none, KeyAction::ScrollUp);
        keys.bind(KeyCode::Char('g'), none, KeyAction::ScrollToTop);
        keys.bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::JumpToTail);
        keys.bind(KeyCode::Char('G'), none, KeyAction::JumpToTail);

        // Arrow keys and navigation block
        keys.bind(KeyCode::Up, none, KeyAction::ScrollUp);
        keys.bind(KeyCode::Down, none, KeyAction::ScrollDown);
        keys.bind(KeyCode::Home, none, KeyAction::ScrollToTop);
        keys.bind(KeyCode::End, none, KeyAction::JumpToTail);

        // Page navigation
        keys.bind(KeyCode::Char('d'), ctrl, KeyAction::PageDown);
        keys.bind(KeyCode::Char('u'), ctrl, KeyAction::PageUp);
        keys.bind(KeyCode::PageDown, none, KeyAction::PageDown);
        keys.bind(KeyCode::PageUp, none, KeyAction::PageUp);

        keys.bind(KeyCode::Char('t'), none, KeyAction::ToggleTail);

        // Entry focus and expansion
        keys.bind(KeyCode::Char('j'), ctrl, KeyAction::NextEntry);
        keys.bind(KeyCode::Char('k'), ctrl, KeyAction::PrevEntry);
        keys.bind(KeyCode::Enter, none, KeyAction::ToggleExpand);
        keys.bind(KeyCode::Char(' '), none, KeyAction::ToggleExpand);
        keys.bind(KeyCode::Char('e'), none, KeyAction::ToggleExpandAll);

        // Search
        keys.bind(KeyCode::Char('/'), none, KeyAction::StartSearch);

        // Log commands
        keys.bind(KeyCode::Char('c'), none, KeyAction::Clear);
        keys.bind(KeyCode::Char('y'), none, KeyAction::CopyVisible);

        // Quit
        keys.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), ctrl, KeyAction::Quit);

        keys
    }
}
