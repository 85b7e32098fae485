//! Interactive picker state: view mode, search text, grid layout and selection.
//!
//! `PickerSession` owns everything the picker window shows and mutates it in
//! response to semantic actions. It is single-threaded by construction; the
//! engine crate drives it from the GUI thread only.

pub mod actions;
pub mod grid;
pub mod types;

mod commit;
mod completion;
mod key_handlers;
mod lifecycle;
mod navigation;
mod rebuild;
mod view;

#[cfg(test)]
mod tests;

use std::collections::HashSet;
use std::sync::Arc;

use picker_core::alias::AliasIndex;
use picker_core::catalog::{Catalog, EntryView, ItemRef};
use picker_core::mru::MruList;
use picker_core::settings::Settings;

pub use actions::action_for_key;
pub use grid::{Grid, GridItem};
pub use types::{Completion, EmojiAction, PickerResponse, ViewMode, ROW_WIDTH};
pub use view::{ViewItem, ViewSnapshot};

pub struct PickerSession {
    catalog: Arc<Catalog>,

    // Refreshed on every enable
    settings: Settings,
    aliases: AliasIndex,
    mru: MruList,
    /// Codes (kaomoji: texts) hidden for this session.
    disabled: HashSet<String>,

    mode: ViewMode,
    search: String,
    /// Whole query selected; the next edit replaces it.
    search_selected: bool,
    grid: Grid,
    /// Origin cell of the selected item.
    selection: Option<(usize, usize)>,
    completion: Option<Completion>,

    visible: bool,
    /// Set while a disable sequence runs, guarding against re-entry.
    disabling: bool,
}

impl PickerSession {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            settings: Settings::default(),
            aliases: AliasIndex::new(),
            mru: MruList::new(),
            disabled: HashSet::new(),
            mode: ViewMode::Mru,
            search: String::new(),
            search_selected: false,
            grid: Grid::new(),
            selection: None,
            completion: None,
            visible: false,
            disabling: false,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_search_selected(&self) -> bool {
        self.search_selected
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    pub fn completion(&self) -> Option<&Completion> {
        self.completion.as_ref()
    }

    pub fn mru(&self) -> &MruList {
        &self.mru
    }

    pub fn disabled_codes(&self) -> &HashSet<String> {
        &self.disabled
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn selected_item(&self) -> Option<ItemRef> {
        let (row, column) = self.selection?;
        self.grid.item_at(row, column).map(|g| g.item)
    }

    pub fn selected_entry(&self) -> Option<EntryView<'_>> {
        self.selected_item().map(|item| self.catalog.entry(item))
    }

    /// Switch view mode directly, clearing the query.
    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
        self.search.clear();
        self.search_selected = false;
        self.rebuild();
    }

    /// Replace the query and relayout.
    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
        self.search_selected = false;
        self.rebuild();
    }

    fn is_disabled(&self, code: &str) -> bool {
        self.disabled.contains(code)
    }
}
