//! Input-method host adapters.
//!
//! Adapters run on the host's thread. They translate raw host key data into
//! `RawKeyEvent`s, decide whether the host should consider the key consumed,
//! and push commands. They never touch picker state directly.

pub mod fcitx;
pub mod ibus;

use std::sync::Arc;

use tracing::trace;

use picker_core::key::RawKeyEvent;
use picker_core::keymap::HotkeyMap;
use picker_session::{action_for_key, EmojiAction};

use crate::command::{Command, CommitFn, CursorRect};
use crate::queue::CommandQueue;

pub use fcitx::{FcitxModule, KeyOutcome};
pub use ibus::IbusEngine;

/// Producer side of the command queue, shared by every adapter.
#[derive(Clone)]
pub struct HostLink {
    queue: Arc<CommandQueue>,
    hotkeys: Arc<HotkeyMap>,
}

impl HostLink {
    pub fn new(queue: Arc<CommandQueue>, hotkeys: HotkeyMap) -> Self {
        Self {
            queue,
            hotkeys: Arc::new(hotkeys),
        }
    }

    pub fn queue(&self) -> &Arc<CommandQueue> {
        &self.queue
    }

    pub fn hotkeys(&self) -> &HotkeyMap {
        &self.hotkeys
    }

    /// Push `Enable` and wake the dispatch loop.
    pub fn enable(&self, commit: CommitFn, reset_position: bool) {
        self.queue.push_activating(Command::Enable {
            commit,
            reset_position,
        });
    }

    pub fn disable(&self) {
        self.queue.push(Command::Disable);
    }

    pub fn reset(&self) {
        self.queue.push(Command::Reset);
    }

    pub fn set_cursor_location(&self, rect: CursorRect) {
        self.queue.push(Command::SetCursorLocation(rect));
    }

    /// Remap, map to an action, and enqueue the event if it does anything.
    /// Returns whether the host should treat the key as consumed.
    pub fn submit_key(&self, event: RawKeyEvent) -> bool {
        let event = self.hotkeys.apply(event);
        let action = action_for_key(&event);
        trace!(?event, ?action, "host key");
        if action == EmojiAction::Invalid {
            return false;
        }
        self.queue.push(Command::ProcessKeyEvent {
            event,
            action: Some(action),
        });
        true
    }
}
