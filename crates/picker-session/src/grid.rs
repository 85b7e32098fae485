//! Row-major grid placement with variable column spans.
//!
//! Items are stored in an arena in placement order. Every covered cell maps
//! back to its item's index, so a lookup on the second cell of a wide item
//! resolves to that item.

use std::collections::HashMap;

use picker_core::catalog::ItemRef;

use crate::types::ROW_WIDTH;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridItem {
    pub item: ItemRef,
    pub row: usize,
    pub column: usize,
    pub span: usize,
    /// Marked for rendering. Hidden items are laid out but not drawn yet.
    pub shown: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Grid {
    items: Vec<GridItem>,
    cells: HashMap<(usize, usize), usize>,
    row: usize,
    column: usize,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.cells.clear();
        self.row = 0;
        self.column = 0;
    }

    /// Place `item` at the cursor, wrapping first if it does not fit, and
    /// advance. Returns the new item's index.
    pub fn place(&mut self, item: ItemRef, shown: bool) -> usize {
        let span = item.column_span();
        if self.column + span > ROW_WIDTH {
            self.row += 1;
            self.column = 0;
        }
        let idx = self.items.len();
        for c in self.column..self.column + span {
            self.cells.insert((self.row, c), idx);
        }
        self.items.push(GridItem {
            item,
            row: self.row,
            column: self.column,
            span,
            shown,
        });
        self.column += span;
        if self.column >= ROW_WIDTH {
            self.row += 1;
            self.column = 0;
        }
        idx
    }

    /// Row the next item would start on, before any wrap for its span.
    pub fn cursor_row(&self) -> usize {
        self.row
    }

    pub fn index_at(&self, row: usize, column: usize) -> Option<usize> {
        self.cells.get(&(row, column)).copied()
    }

    pub fn item_at(&self, row: usize, column: usize) -> Option<&GridItem> {
        self.index_at(row, column).map(|i| &self.items[i])
    }

    pub fn get(&self, idx: usize) -> Option<&GridItem> {
        self.items.get(idx)
    }

    pub fn items(&self) -> &[GridItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of rows holding at least one item.
    pub fn row_count(&self) -> usize {
        self.items.last().map_or(0, |last| last.row + 1)
    }

    pub fn reveal_item(&mut self, idx: usize) {
        if let Some(item) = self.items.get_mut(idx) {
            item.shown = true;
        }
    }

    /// Mark every item whose row lies in `first..=last` as shown.
    pub fn reveal_rows(&mut self, first: usize, last: usize) {
        for item in self.items.iter_mut() {
            if item.row >= first && item.row <= last {
                item.shown = true;
            }
        }
    }

    /// `(row, column, span)` per item, in placement order.
    pub fn layout(&self) -> Vec<(usize, usize, usize)> {
        self.items
            .iter()
            .map(|i| (i.row, i.column, i.span))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eleven_single_items_wrap_after_ten() {
        let mut grid = Grid::new();
        for i in 0..11 {
            grid.place(ItemRef::Emoji(i), true);
        }
        for i in 0..10 {
            assert_eq!((grid.items()[i].row, grid.items()[i].column), (0, i));
        }
        assert_eq!((grid.items()[10].row, grid.items()[10].column), (1, 0));
        assert_eq!(grid.row_count(), 2);
    }

    #[test]
    fn wide_item_wraps_before_overflow() {
        let mut grid = Grid::new();
        for i in 0..9 {
            grid.place(ItemRef::Emoji(i), true);
        }
        let k = grid.place(ItemRef::Kaomoji(0), true);
        assert_eq!((grid.items()[k].row, grid.items()[k].column), (1, 0));
        assert_eq!(grid.index_at(0, 8), Some(8));
        assert_eq!(grid.index_at(0, 9), None);
        assert_eq!(grid.index_at(1, 0), Some(k));
        assert_eq!(grid.index_at(1, 1), Some(k));
        assert_eq!(grid.cursor_row(), 1);
    }

    #[test]
    fn five_kaomoji_fill_a_row() {
        let mut grid = Grid::new();
        for i in 0..5 {
            grid.place(ItemRef::Kaomoji(i), true);
        }
        assert_eq!(grid.cursor_row(), 1);
        assert_eq!(grid.items()[4].column, 8);
        assert_eq!(grid.item_at(0, 9).map(|i| i.item), Some(ItemRef::Kaomoji(4)));
    }

    #[test]
    fn reveal_marks_rows() {
        let mut grid = Grid::new();
        for i in 0..30 {
            grid.place(ItemRef::Emoji(i), false);
        }
        grid.reveal_rows(1, 1);
        let shown: Vec<usize> = grid
            .items()
            .iter()
            .filter(|i| i.shown)
            .map(|i| i.row)
            .collect();
        assert_eq!(shown, vec![1; 10]);
    }
}
