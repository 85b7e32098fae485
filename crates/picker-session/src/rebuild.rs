use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug_span;

use picker_core::catalog::ItemRef;
use picker_core::search::{find_match, matches, SearchMode, RANKED_PASSES};

use super::types::{
    ViewMode, KAOMOJI_SEARCH_ROWS, KAOMOJI_SHOWN_ROWS, LIST_SEARCH_ROWS, LIST_SHOWN_ROWS,
};
use super::PickerSession;

impl PickerSession {
    /// Lay out the visible items from scratch and reset the selection.
    pub(crate) fn rebuild(&mut self) {
        let _span = debug_span!("rebuild", mode = ?self.mode, search = %self.search).entered();

        self.selection = None;
        self.grid.clear();

        match self.mode {
            ViewMode::Mru if self.search.is_empty() => self.place_mru(),
            // A query in MRU mode searches the full list.
            ViewMode::Mru | ViewMode::List => self.place_list(),
            ViewMode::Kaomoji => self.place_kaomoji(),
        }

        self.selection = self.grid.index_at(0, 0).map(|_| (0, 0));
        self.update_completion();
        tracing::debug!(items = self.grid.len(), rows = self.grid.row_count(), "rebuilt");
    }

    fn place_mru(&mut self) {
        let items: Vec<ItemRef> = self
            .mru
            .codes()
            .filter(|code| !self.is_disabled(code))
            .filter_map(|code| self.catalog.lookup(code))
            .collect();
        for item in items {
            self.grid.place(item, true);
        }
    }

    fn place_list(&mut self) {
        let catalog = Arc::clone(&self.catalog);
        let query = self.search.clone();

        if query.is_empty() {
            for (i, e) in catalog.emojis().iter().enumerate() {
                if self.is_disabled(&e.code) {
                    continue;
                }
                let idx = self.grid.place(ItemRef::Emoji(i), false);
                self.mark_shown_below(idx, LIST_SHOWN_ROWS);
            }
            return;
        }

        let mut seen: HashSet<usize> = HashSet::new();
        'passes: for mode in RANKED_PASSES {
            for (i, e) in catalog.emojis().iter().enumerate() {
                if seen.contains(&i) || self.is_disabled(&e.code) {
                    continue;
                }
                let aliases = self.aliases.aliases_for(&e.code);
                if find_match(&e.name, aliases, &query, mode).is_none() {
                    continue;
                }
                seen.insert(i);
                let idx = self.grid.place(ItemRef::Emoji(i), false);
                self.mark_shown_below(idx, LIST_SHOWN_ROWS);
                if self.grid.cursor_row() >= LIST_SEARCH_ROWS {
                    break 'passes;
                }
            }
        }
    }

    fn place_kaomoji(&mut self) {
        let catalog = Arc::clone(&self.catalog);
        let query = self.search.clone();

        for (i, k) in catalog.kaomojis().iter().enumerate() {
            if self.is_disabled(&k.text) {
                continue;
            }
            if !query.is_empty() && !matches(&k.name, &query, SearchMode::Auto) {
                continue;
            }
            let idx = self.grid.place(ItemRef::Kaomoji(i), false);
            self.mark_shown_below(idx, KAOMOJI_SHOWN_ROWS);
            if !query.is_empty() && self.grid.cursor_row() >= KAOMOJI_SEARCH_ROWS {
                break;
            }
        }
    }

    fn mark_shown_below(&mut self, idx: usize, rows: usize) {
        if let Some(item) = self.grid.get(idx) {
            if item.row < rows {
                self.grid.reveal_item(idx);
            }
        }
    }
}
