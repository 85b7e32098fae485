//! Host-independent key events.
//!
//! Host adapters translate protocol-specific key codes into [`Key`] and
//! modifier masks into [`Modifiers`]; everything past that point is shared.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A key code the picker has no name for. `text` may still carry input.
    Unknown,
    Char(char),
    Escape,
    Return,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    F4,
}

impl Key {
    pub fn from_name(name: &str) -> Option<Key> {
        let key = match name.to_ascii_lowercase().as_str() {
            "escape" | "esc" => Key::Escape,
            "return" | "enter" => Key::Return,
            "backspace" => Key::Backspace,
            "delete" => Key::Delete,
            "tab" => Key::Tab,
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "pageup" | "page_up" => Key::PageUp,
            "pagedown" | "page_down" => Key::PageDown,
            "f4" => Key::F4,
            "space" => Key::Char(' '),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    pub fn name(&self) -> String {
        match self {
            Key::Unknown => "Unknown".into(),
            Key::Char(' ') => "Space".into(),
            Key::Char(c) => c.to_string(),
            Key::Escape => "Escape".into(),
            Key::Return => "Return".into(),
            Key::Backspace => "Backspace".into(),
            Key::Delete => "Delete".into(),
            Key::Tab => "Tab".into(),
            Key::Up => "Up".into(),
            Key::Down => "Down".into(),
            Key::Left => "Left".into(),
            Key::Right => "Right".into(),
            Key::PageUp => "PageUp".into(),
            Key::PageDown => "PageDown".into(),
            Key::F4 => "F4".into(),
        }
    }
}

/// Modifier bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const SUPER: Modifiers = Modifiers(4);

    pub fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    pub fn ctrl(self) -> bool {
        self.contains(Self::CTRL)
    }

    pub fn super_key(self) -> bool {
        self.contains(Self::SUPER)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Modifiers) {
        self.0 |= rhs.0;
    }
}

/// One key press or release as delivered by a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub release: bool,
    /// Text the key would produce, possibly empty.
    pub text: String,
}

impl RawKeyEvent {
    pub fn press(key: Key, modifiers: Modifiers) -> Self {
        let text = match key {
            Key::Char(c) => c.to_string(),
            _ => String::new(),
        };
        Self {
            key,
            modifiers,
            release: false,
            text,
        }
    }

    pub fn text(text: &str) -> Self {
        Self {
            key: Key::Unknown,
            modifiers: Modifiers::NONE,
            release: false,
            text: text.to_string(),
        }
    }

    pub fn released(mut self) -> Self {
        self.release = true;
        self
    }
}
