//! Commands carried from host threads to the GUI thread.

use std::fmt;

use picker_core::key::RawKeyEvent;
use picker_session::EmojiAction;

/// Delivers committed text to the focused application. Called on the GUI
/// thread.
pub type CommitFn = Box<dyn FnMut(&str) + Send>;

/// Cursor rectangle in host pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl CursorRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Hosts report `(0, 0)` when they have no cursor position.
    pub fn is_unknown(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Window origin just below the cursor, in logical pixels.
    pub fn anchor(&self, scale_factor: Option<f64>) -> (i32, i32) {
        let (x, y) = (self.x, self.y.saturating_add(self.height));
        match scale_factor {
            Some(scale) => (
                (f64::from(x) / scale).round() as i32,
                (f64::from(y) / scale).round() as i32,
            ),
            None => (x, y),
        }
    }
}

pub enum Command {
    Enable {
        commit: CommitFn,
        /// Recenter the window instead of waiting for a cursor location.
        reset_position: bool,
    },
    Disable,
    /// Same as `Disable`.
    Reset,
    SetCursorLocation(CursorRect),
    ProcessKeyEvent {
        event: RawKeyEvent,
        action: Option<EmojiAction>,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Enable { .. } => "enable",
            Command::Disable => "disable",
            Command::Reset => "reset",
            Command::SetCursorLocation(_) => "set_cursor_location",
            Command::ProcessKeyEvent { .. } => "process_key_event",
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Enable { reset_position, .. } => f
                .debug_struct("Enable")
                .field("reset_position", reset_position)
                .finish_non_exhaustive(),
            Command::Disable => f.write_str("Disable"),
            Command::Reset => f.write_str("Reset"),
            Command::SetCursorLocation(rect) => {
                f.debug_tuple("SetCursorLocation").field(rect).finish()
            }
            Command::ProcessKeyEvent { event, action } => f
                .debug_struct("ProcessKeyEvent")
                .field("event", event)
                .field("action", action)
                .finish(),
        }
    }
}
