use super::types::REVEAL_RADIUS;
use super::PickerSession;

impl PickerSession {
    /// Move the selection by a row/column delta. Returns whether it moved.
    ///
    /// A horizontal step that lands on an empty cell or back on the current
    /// (wide) item retries one column further. Anything still unoccupied is
    /// rejected and the selection stays put.
    pub fn move_selection(&mut self, delta_row: isize, delta_column: isize) -> bool {
        let Some((row, column)) = self.selection else {
            return false;
        };
        let Some(current) = self.grid.index_at(row, column) else {
            self.selection = None;
            return false;
        };

        let mut target = self.index_at_offset(row, column, delta_row, delta_column);
        if delta_row == 0 && target.map_or(true, |t| t == current) {
            target = self.index_at_offset(row, column, 0, delta_column * 2);
        }
        let Some(target) = target.filter(|&t| t != current) else {
            return false;
        };
        let Some(item) = self.grid.get(target) else {
            return false;
        };
        let new_row = item.row;
        self.selection = Some((item.row, item.column));

        if delta_row != 0 {
            self.grid.reveal_rows(
                new_row.saturating_sub(REVEAL_RADIUS),
                new_row + REVEAL_RADIUS,
            );
        }
        self.update_completion();
        true
    }

    fn index_at_offset(
        &self,
        row: usize,
        column: usize,
        delta_row: isize,
        delta_column: isize,
    ) -> Option<usize> {
        let r = row.checked_add_signed(delta_row)?;
        let c = column.checked_add_signed(delta_column)?;
        self.grid.index_at(r, c)
    }
}
