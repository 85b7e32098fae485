/// Columns per grid row.
pub const ROW_WIDTH: usize = 10;

/// Rows marked shown when the full list is laid out without a query.
pub(crate) const LIST_SHOWN_ROWS: usize = 6;
/// A list search stops scanning once this many rows are filled.
pub(crate) const LIST_SEARCH_ROWS: usize = 5;
pub(crate) const KAOMOJI_SHOWN_ROWS: usize = 7;
pub(crate) const KAOMOJI_SEARCH_ROWS: usize = 6;

/// Rows revealed above and below the selection after a vertical move.
pub(crate) const REVEAL_RADIUS: usize = 5;
pub(crate) const PAGE_ROWS: isize = 4;

/// Completion text longer than this (in display columns) is cut with an ellipsis.
pub const COMPLETION_MAX_WIDTH: usize = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    Mru,
    List,
    Kaomoji,
}

impl ViewMode {
    pub fn next(self) -> Self {
        match self {
            Self::Mru => Self::List,
            Self::List => Self::Kaomoji,
            Self::Kaomoji => Self::Mru,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Mru => Self::Kaomoji,
            Self::List => Self::Mru,
            Self::Kaomoji => Self::List,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mru => "mru",
            Self::List => "list",
            Self::Kaomoji => "kaomoji",
        }
    }

    /// FFI tag.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Mru => 0,
            Self::List => 1,
            Self::Kaomoji => 2,
        }
    }
}

/// Semantic action a key event resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmojiAction {
    Invalid,
    SelectAllInSearch,
    CopySelected,
    CutSelection,
    PageUp,
    PageDown,
    ClearSearch,
    Disable,
    Commit,
    SwitchMode { backwards: bool },
    Up,
    Down,
    Left,
    Right,
    OpenSettings,
    RemoveChar,
    InsertChar,
}

impl EmojiAction {
    pub fn is_valid(self) -> bool {
        self != Self::Invalid
    }
}

/// Completion shown behind the search field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Matched name or alias, possibly truncated.
    pub text: String,
    /// Character offset of the query inside `text`.
    pub offset: usize,
}

/// Result of one key event, for the dispatcher to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerResponse {
    pub action: EmojiAction,
    /// Text to hand to the commit callback.
    pub commit: Option<String>,
    pub clipboard: Option<String>,
    pub open_settings: bool,
    /// Run the disable sequence after this response.
    pub close: bool,
}

impl PickerResponse {
    pub(crate) fn new(action: EmojiAction) -> Self {
        Self {
            action,
            commit: None,
            clipboard: None,
            open_settings: false,
            close: false,
        }
    }

    pub(crate) fn ignored() -> Self {
        Self::new(EmojiAction::Invalid)
    }
}
