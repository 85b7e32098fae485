//! Render-ready copy of the session state.
//!
//! Frontends draw from a snapshot rather than holding references into the
//! session, so the grid can be rebuilt freely between frames.

use super::types::{Completion, ViewMode};
use super::PickerSession;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewItem {
    /// Text drawn in the cell: the emoji code or kaomoji text.
    pub text: String,
    pub name: String,
    pub row: usize,
    pub column: usize,
    pub span: usize,
    pub shown: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub visible: bool,
    pub mode: ViewMode,
    pub search: String,
    pub search_selected: bool,
    pub completion: Option<Completion>,
    pub items: Vec<ViewItem>,
}

impl ViewSnapshot {
    pub fn selected(&self) -> Option<&ViewItem> {
        self.items.iter().find(|i| i.selected)
    }

    pub fn shown(&self) -> impl Iterator<Item = &ViewItem> {
        self.items.iter().filter(|i| i.shown)
    }
}

impl PickerSession {
    pub fn snapshot(&self) -> ViewSnapshot {
        let items = self
            .grid
            .items()
            .iter()
            .map(|g| {
                let entry = self.catalog.entry(g.item);
                ViewItem {
                    text: entry.code.to_string(),
                    name: entry.name.to_string(),
                    row: g.row,
                    column: g.column,
                    span: g.span,
                    shown: g.shown,
                    selected: self.selection == Some((g.row, g.column)),
                }
            })
            .collect();
        ViewSnapshot {
            visible: self.visible,
            mode: self.mode,
            search: self.search.clone(),
            search_selected: self.search_selected,
            completion: self.completion.clone(),
            items,
        }
    }
}
