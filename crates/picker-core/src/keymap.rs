//! User hot-key remapping.
//!
//! A remap entry turns one typed character into a key chord, e.g. `j` into
//! `Down` or `q` into `Ctrl+Backspace`. The table is parsed once at startup
//! and applied by the host adapters before action mapping.

use std::collections::HashMap;
use std::fmt;

use crate::key::{Key, Modifiers, RawKeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub key: Key,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyChordError {
    #[error("empty key chord")]
    Empty,
    #[error("unknown modifier {0:?}")]
    UnknownModifier(String),
    #[error("unknown key {0:?}")]
    UnknownKey(String),
}

impl KeyChord {
    /// Parse `"Ctrl+Shift+Up"` style text. The last `+`-separated part is the
    /// key; a literal plus is written `Ctrl++`.
    pub fn parse(text: &str) -> Result<Self, KeyChordError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(KeyChordError::Empty);
        }
        let (mods_part, key_part) = if let Some(prefix) = text.strip_suffix("++") {
            (Some(prefix), "+")
        } else {
            match text.rsplit_once('+') {
                Some((m, k)) => (Some(m), k),
                None => (None, text),
            }
        };

        let mut modifiers = Modifiers::NONE;
        if let Some(mods_part) = mods_part.filter(|m| !m.is_empty()) {
            for m in mods_part.split('+') {
                modifiers |= match m.trim().to_ascii_lowercase().as_str() {
                    "ctrl" | "control" => Modifiers::CTRL,
                    "shift" => Modifiers::SHIFT,
                    "super" | "meta" | "win" => Modifiers::SUPER,
                    _ => return Err(KeyChordError::UnknownModifier(m.to_string())),
                };
            }
        }
        let key = Key::from_name(key_part.trim())
            .ok_or_else(|| KeyChordError::UnknownKey(key_part.to_string()))?;
        Ok(Self { key, modifiers })
    }

    pub fn to_event(self) -> RawKeyEvent {
        RawKeyEvent::press(self.key, self.modifiers)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl() {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.shift() {
            f.write_str("Shift+")?;
        }
        if self.modifiers.super_key() {
            f.write_str("Super+")?;
        }
        f.write_str(&self.key.name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotkeyMap {
    map: HashMap<char, KeyChord>,
}

impl HotkeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: char, chord: KeyChord) {
        self.map.insert(source, chord);
    }

    pub fn get(&self, source: char) -> Option<KeyChord> {
        self.map.get(&source).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Replace a key press whose text is a remapped character. Shift only
    /// selects the character (`J`, `?`), so it does not block a remap; Ctrl
    /// and Super do. Releases keep their release flag so press/release pairs
    /// stay matched.
    pub fn apply(&self, event: RawKeyEvent) -> RawKeyEvent {
        if self.map.is_empty() || event.modifiers.ctrl() || event.modifiers.super_key() {
            return event;
        }
        let mut chars = event.text.chars();
        let source = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return event,
        };
        match self.get(source) {
            Some(chord) => {
                tracing::debug!(%source, chord = %chord, "hotkey remapped");
                let mut remapped = chord.to_event();
                remapped.release = event.release;
                remapped
            }
            None => event,
        }
    }
}
