//! Fcitx5 module adapter.
//!
//! The module is a trigger-key add-on rather than a full input method: it
//! activates on its trigger, filters every key while active, and deactivates
//! on focus-out, reset or input-method switch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use tracing::debug;

use picker_core::key::{Key, Modifiers, RawKeyEvent};

use super::HostLink;
use crate::command::{CommitFn, CursorRect};
use crate::dispatch::ResetHook;

/// X11 key codes.
pub mod keycode {
    pub const ESCAPE: u32 = 9;
    pub const BACKSPACE: u32 = 22;
    pub const TAB: u32 = 23;
    pub const RETURN: u32 = 36;
    pub const UNDERSCORE: u32 = 61;
    pub const SPACE: u32 = 65;
    pub const F4: u32 = 70;
    pub const UP: u32 = 111;
    pub const PAGE_UP: u32 = 112;
    pub const LEFT: u32 = 113;
    pub const RIGHT: u32 = 114;
    pub const DOWN: u32 = 116;
    pub const PAGE_DOWN: u32 = 117;
}

pub const STATE_SHIFT: u32 = 1 << 0;
pub const STATE_CTRL: u32 = 1 << 2;
pub const STATE_SUPER: u32 = 1 << 6;

/// Key data as Fcitx5 reports it.
#[derive(Debug, Clone, Copy)]
pub struct FcitxKey<'a> {
    pub code: u32,
    pub states: u32,
    /// Fcitx's string form of the key, e.g. `"Control+a"` or `"space"`.
    pub name: &'a str,
    pub is_modifier: bool,
    pub release: bool,
}

fn named_key(code: u32) -> Option<Key> {
    Some(match code {
        keycode::ESCAPE => Key::Escape,
        keycode::RETURN => Key::Return,
        keycode::BACKSPACE => Key::Backspace,
        keycode::TAB => Key::Tab,
        keycode::UP => Key::Up,
        keycode::DOWN => Key::Down,
        keycode::LEFT => Key::Left,
        keycode::RIGHT => Key::Right,
        keycode::PAGE_UP => Key::PageUp,
        keycode::PAGE_DOWN => Key::PageDown,
        keycode::F4 => Key::F4,
        _ => return None,
    })
}

fn modifiers(states: u32) -> Modifiers {
    let mut m = Modifiers::NONE;
    if states & STATE_SUPER != 0 {
        m |= Modifiers::SUPER;
    }
    if states & STATE_CTRL != 0 {
        m |= Modifiers::CTRL;
    }
    if states & STATE_SHIFT != 0 {
        m |= Modifiers::SHIFT;
    }
    m
}

pub fn translate(key: &FcitxKey<'_>) -> RawKeyEvent {
    let modifiers = modifiers(key.states);
    if let Some(named) = named_key(key.code) {
        let mut event = RawKeyEvent::press(named, modifiers);
        event.release = key.release;
        return event;
    }
    let text = match key.code {
        keycode::SPACE => " ".to_string(),
        keycode::UNDERSCORE => "_".to_string(),
        _ => key.name.chars().last().map(String::from).unwrap_or_default(),
    };
    RawKeyEvent {
        key: text.chars().next().map_or(Key::Unknown, Key::Char),
        modifiers,
        release: key.release,
        text,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Accept the key so the application never sees it.
    pub consumed: bool,
    /// Send a fresh cursor location; the commit may have moved the cursor.
    pub refresh_cursor: bool,
}

pub struct FcitxModule {
    link: HostLink,
    active: AtomicBool,
}

impl FcitxModule {
    pub fn new(link: HostLink) -> Self {
        Self {
            link,
            active: AtomicBool::new(false),
        }
    }

    pub fn link(&self) -> &HostLink {
        &self.link
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Show the picker. Returns `false` if the module was already active.
    pub fn activate(&self, commit: CommitFn, cursor: CursorRect) -> bool {
        if self.active.swap(true, Ordering::SeqCst) {
            return false;
        }
        debug!("fcitx activate");
        self.link.queue().set_active(true);
        self.link.set_cursor_location(cursor);
        self.link.enable(commit, false);
        true
    }

    /// Hide the picker. Returns `false` if the module was not active.
    pub fn deactivate(&self) -> bool {
        if !self.active.swap(false, Ordering::SeqCst) {
            return false;
        }
        debug!("fcitx deactivate");
        self.link.disable();
        self.link.queue().set_active(false);
        true
    }

    pub fn reset(&self) {
        self.link.reset();
    }

    pub fn set_cursor_location(&self, rect: CursorRect) {
        self.link.set_cursor_location(rect);
    }

    pub fn key_event(&self, key: &FcitxKey<'_>) -> KeyOutcome {
        if !self.is_active() || key.is_modifier {
            return KeyOutcome::default();
        }
        let event = translate(key);
        let refresh_cursor = event.key == Key::Return && event.release;
        KeyOutcome {
            consumed: self.link.submit_key(event),
            refresh_cursor,
        }
    }

    /// Hook for the dispatcher: hiding the window deactivates the module.
    pub fn reset_hook(self: &Arc<Self>) -> ResetHook {
        let module: Weak<Self> = Arc::downgrade(self);
        Arc::new(move || {
            if let Some(module) = module.upgrade() {
                module.deactivate();
            }
        })
    }
}
