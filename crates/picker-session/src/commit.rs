use super::types::{EmojiAction, PickerResponse};
use super::PickerSession;

impl PickerSession {
    /// Commit the selected entry and record it in the MRU.
    ///
    /// Kaomoji are recorded only with `save_kaomoji_in_mru`. The picker closes
    /// when exactly one of Shift and `close_after_first_input` holds, whether
    /// or not anything was selected.
    pub(crate) fn commit_selected(&mut self, shift: bool) -> PickerResponse {
        let mut resp = PickerResponse::new(EmojiAction::Commit);

        if let Some(item) = self.selected_item() {
            let catalog = std::sync::Arc::clone(&self.catalog);
            let entry = catalog.entry(item);
            resp.commit = Some(entry.code.to_string());
            if entry.real || self.settings.behavior.save_kaomoji_in_mru {
                self.mru.record(entry.name, entry.code);
            }
            tracing::debug!(code = entry.code, real = entry.real, "committed");
        }

        resp.close = shift != self.settings.behavior.close_after_first_input;
        resp
    }
}
