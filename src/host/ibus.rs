//! IBus engine adapter.
//!
//! IBus hands over a keysym (`keyval`), an evdev key code and a modifier
//! state. Named keys are recognised by key code; everything else is text.

use tracing::debug;

use picker_core::key::{Key, Modifiers, RawKeyEvent};

use super::HostLink;
use crate::command::{CommitFn, CursorRect};

pub mod keyval {
    pub const SHIFT_L: u32 = 0xffe1;
    pub const SHIFT_R: u32 = 0xffe2;
    pub const CONTROL_L: u32 = 0xffe3;
    pub const CONTROL_R: u32 = 0xffe4;
    pub const DELETE: u32 = 0xffff;
}

pub mod keycode {
    pub const ESCAPE: u32 = 1;
    pub const BACKSPACE: u32 = 14;
    pub const TAB: u32 = 15;
    pub const RETURN: u32 = 28;
    pub const F4: u32 = 62;
    pub const UP: u32 = 103;
    pub const PAGE_UP: u32 = 104;
    pub const LEFT: u32 = 105;
    pub const RIGHT: u32 = 106;
    pub const DOWN: u32 = 108;
    pub const PAGE_DOWN: u32 = 109;
    pub const DELETE: u32 = 111;
}

pub const SHIFT_MASK: u32 = 1 << 0;
pub const CONTROL_MASK: u32 = 1 << 2;
pub const SUPER_MASK: u32 = 1 << 26;
pub const RELEASE_MASK: u32 = 1 << 30;

/// Keys IBus should always pass through to the application.
fn is_passthrough(keyval: u32) -> bool {
    matches!(
        keyval,
        keyval::CONTROL_L | keyval::CONTROL_R | keyval::SHIFT_L | keyval::SHIFT_R | keyval::DELETE
    )
}

fn named_key(keycode: u32) -> Key {
    match keycode {
        keycode::ESCAPE => Key::Escape,
        keycode::RETURN => Key::Return,
        keycode::BACKSPACE => Key::Backspace,
        keycode::DELETE => Key::Delete,
        keycode::TAB => Key::Tab,
        keycode::UP => Key::Up,
        keycode::DOWN => Key::Down,
        keycode::LEFT => Key::Left,
        keycode::RIGHT => Key::Right,
        keycode::PAGE_UP => Key::PageUp,
        keycode::PAGE_DOWN => Key::PageDown,
        keycode::F4 => Key::F4,
        _ => Key::Unknown,
    }
}

fn modifiers(state: u32) -> Modifiers {
    let mut m = Modifiers::NONE;
    if state & SUPER_MASK != 0 {
        m |= Modifiers::SUPER;
    }
    if state & CONTROL_MASK != 0 {
        m |= Modifiers::CTRL;
    }
    if state & SHIFT_MASK != 0 {
        m |= Modifiers::SHIFT;
    }
    m
}

/// Character a keysym stands for. Latin-1 keysyms equal their code point;
/// `0x01xxxxxx` keysyms carry a Unicode code point directly.
fn keyval_text(keyval: u32) -> String {
    let code_point = if keyval & 0xff00_0000 == 0x0100_0000 {
        keyval & 0x00ff_ffff
    } else if keyval < 0x100 {
        keyval
    } else {
        return String::new();
    };
    char::from_u32(code_point)
        .map(String::from)
        .unwrap_or_default()
}

/// Translate IBus key data. `None` for keys that must never be consumed.
pub fn translate(keyval: u32, keycode: u32, state: u32) -> Option<RawKeyEvent> {
    if is_passthrough(keyval) {
        return None;
    }
    Some(RawKeyEvent {
        key: named_key(keycode),
        modifiers: modifiers(state),
        release: state & RELEASE_MASK != 0,
        text: keyval_text(keyval),
    })
}

/// One IBus engine instance. All methods are called on the IBus thread.
pub struct IbusEngine {
    link: HostLink,
}

impl IbusEngine {
    pub fn new(link: HostLink) -> Self {
        Self { link }
    }

    pub fn enable(&self, commit: CommitFn) {
        debug!("ibus enable");
        self.link.enable(commit, true);
    }

    pub fn disable(&self) {
        debug!("ibus disable");
        self.link.disable();
    }

    pub fn reset(&self) {
        self.link.reset();
    }

    pub fn set_cursor_location(&self, x: i32, y: i32, width: i32, height: i32) {
        self.link
            .set_cursor_location(CursorRect::new(x, y, width, height));
    }

    /// Returns whether IBus should treat the key as handled.
    pub fn process_key_event(&self, keyval: u32, keycode: u32, state: u32) -> bool {
        match translate(keyval, keycode, state) {
            Some(event) => self.link.submit_key(event),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use picker_core::keymap::HotkeyMap;
    use picker_session::EmojiAction;

    use super::*;
    use crate::command::Command;
    use crate::queue::CommandQueue;

    fn engine() -> IbusEngine {
        IbusEngine::new(HostLink::new(Arc::new(CommandQueue::new()), HotkeyMap::new()))
    }

    fn popped_action(engine: &IbusEngine) -> Option<EmojiAction> {
        match engine.link.queue().try_pop() {
            Some(Command::ProcessKeyEvent { action, .. }) => action,
            _ => None,
        }
    }

    #[test]
    fn modifier_and_delete_keyvals_pass_through() {
        let e = engine();
        for kv in [
            keyval::CONTROL_L,
            keyval::CONTROL_R,
            keyval::SHIFT_L,
            keyval::SHIFT_R,
            keyval::DELETE,
        ] {
            assert!(!e.process_key_event(kv, 0, 0));
        }
        assert!(e.link.queue().is_empty());
    }

    #[test]
    fn named_keys_by_keycode() {
        let e = engine();
        assert!(e.process_key_event(0xff0d, keycode::RETURN, 0));
        assert_eq!(popped_action(&e), Some(EmojiAction::Commit));
        assert!(e.process_key_event(0xff09, keycode::TAB, SHIFT_MASK));
        assert_eq!(
            popped_action(&e),
            Some(EmojiAction::SwitchMode { backwards: true })
        );
        assert!(e.process_key_event(0xff52, keycode::UP, CONTROL_MASK));
        assert_eq!(popped_action(&e), Some(EmojiAction::PageUp));
    }

    #[test]
    fn printable_keyval_inserts() {
        let e = engine();
        assert!(e.process_key_event(u32::from(b'g'), 34, 0));
        match e.link.queue().try_pop() {
            Some(Command::ProcessKeyEvent { event, action }) => {
                assert_eq!(event.text, "g");
                assert_eq!(action, Some(EmojiAction::InsertChar));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn ctrl_letter_from_keyval() {
        let e = engine();
        assert!(e.process_key_event(u32::from(b'a'), 30, CONTROL_MASK));
        assert_eq!(popped_action(&e), Some(EmojiAction::SelectAllInSearch));
    }

    #[test]
    fn releases_and_super_are_not_consumed() {
        let e = engine();
        assert!(!e.process_key_event(0xff0d, keycode::RETURN, RELEASE_MASK));
        assert!(!e.process_key_event(u32::from(b'a'), 30, SUPER_MASK));
        assert!(e.link.queue().is_empty());
    }

    #[test]
    fn unicode_keysym_text() {
        assert_eq!(keyval_text(0x0100_00e9), "é");
        assert_eq!(keyval_text(u32::from(b' ')), " ");
        assert_eq!(keyval_text(0xff0d), "");
        // Non-ASCII text on an unknown key is dropped.
        assert!(!engine().process_key_event(0x0100_00e9, 18, 0));
    }

    #[test]
    fn lifecycle_commands() {
        let e = engine();
        e.enable(Box::new(|_: &str| {}));
        e.set_cursor_location(1, 2, 3, 4);
        e.reset();
        e.disable();
        let names: Vec<_> = std::iter::from_fn(|| e.link.queue().try_pop())
            .map(|c| c.name())
            .collect();
        assert_eq!(names, ["enable", "set_cursor_location", "reset", "disable"]);
        assert!(e.link.queue().is_active());
    }
}
