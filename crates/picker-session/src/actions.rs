//! Key event to [`EmojiAction`] mapping.
//!
//! Pure function of one event. First matching rule wins:
//! unknown non-ASCII keys, releases and Super chords are dropped, Ctrl chords
//! map to search/clipboard/paging actions, then the plain keys.

use picker_core::key::{Key, RawKeyEvent};

use crate::types::EmojiAction;

pub fn action_for_key(event: &RawKeyEvent) -> EmojiAction {
    if event.key == Key::Unknown && !event.text.is_empty() && !event.text.is_ascii() {
        return EmojiAction::Invalid;
    }
    if event.release {
        return EmojiAction::Invalid;
    }
    if event.modifiers.super_key() {
        return EmojiAction::Invalid;
    }

    if event.modifiers.ctrl() {
        return match (event.key, letter(event)) {
            (_, Some('a')) => EmojiAction::SelectAllInSearch,
            (_, Some('c')) => EmojiAction::CopySelected,
            (_, Some('x')) => EmojiAction::CutSelection,
            (Key::Up, _) => EmojiAction::PageUp,
            (Key::Down, _) => EmojiAction::PageDown,
            (Key::Backspace, _) => EmojiAction::ClearSearch,
            _ => EmojiAction::Invalid,
        };
    }

    match event.key {
        Key::Escape => EmojiAction::Disable,
        Key::Return => EmojiAction::Commit,
        Key::Tab => EmojiAction::SwitchMode {
            backwards: event.modifiers.shift(),
        },
        Key::Up => EmojiAction::Up,
        Key::Down => EmojiAction::Down,
        Key::Left => EmojiAction::Left,
        Key::Right => EmojiAction::Right,
        Key::PageUp => EmojiAction::PageUp,
        Key::PageDown => EmojiAction::PageDown,
        Key::F4 => EmojiAction::OpenSettings,
        Key::Backspace => EmojiAction::RemoveChar,
        _ if is_printable(&event.text) => EmojiAction::InsertChar,
        _ => EmojiAction::Invalid,
    }
}

/// Lowercased letter a Ctrl chord was pressed with.
fn letter(event: &RawKeyEvent) -> Option<char> {
    let c = match event.key {
        Key::Char(c) => c,
        _ => {
            let mut chars = event.text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return None,
            }
        }
    };
    Some(c.to_ascii_lowercase())
}

fn is_printable(text: &str) -> bool {
    !text.is_empty() && !text.chars().any(char::is_control)
}
