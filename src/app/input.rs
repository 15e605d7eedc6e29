//! Event handling utilities

use crossterm::event::{KeyCode, KeyModifiers};

use crate::catalog::LinkKind;

/// Vim-style key mapping (basic, without modifiers)
pub fn vim_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::Left),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::Right),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::Top),
        KeyCode::Char('G') | KeyCode::End => Some(Action::Bottom),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::Enter => Some(Action::Select),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Tab => Some(Action::SwitchScreen),
        KeyCode::Char('/') => Some(Action::Search),
        KeyCode::Char(':') => Some(Action::Command),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('m') | KeyCode::Char(' ') => Some(Action::ToggleComplete),
        KeyCode::Char('y') => Some(Action::YankLink),
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            Some(Action::YankKind(LinkKind::ALL[index]))
        }
        KeyCode::Char('c') => Some(Action::NextChart),
        KeyCode::Char('r') => Some(Action::Reload),
        _ => None,
    }
}

/// Map a key press, honoring the vim-mode setting.
/// With vim mode off, only arrow/page keys move the selection.
pub fn key_to_action(key: KeyCode, modifiers: KeyModifiers, vim_mode: bool) -> Option<Action> {
    if !vim_mode && matches!(key, KeyCode::Char('j' | 'k' | 'h' | 'l' | 'g' | 'G')) {
        return None;
    }
    key_with_modifier_to_action(key, modifiers)
}

/// Key mapping with modifiers (for Ctrl combinations)
pub fn key_with_modifier_to_action(key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        match key {
            KeyCode::Char('d') | KeyCode::Char('f') => Some(Action::PageDown),
            KeyCode::Char('u') | KeyCode::Char('b') => Some(Action::PageUp),
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        }
    } else {
        vim_key_to_action(key)
    }
}

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Left,
    Right,
    Top,
    Bottom,
    PageUp,
    PageDown,

    // Selection
    Select,
    Back,
    SwitchScreen,

    // Progress
    ToggleComplete,
    YankLink,
    /// Copy the link of one kind; digits follow [`LinkKind::ALL`]
    YankKind(LinkKind),
    NextChart,
    Reload,

    // Modes
    Search,
    Command,
    Help,
    Quit,
}
