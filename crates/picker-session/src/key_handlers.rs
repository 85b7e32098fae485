use tracing::debug_span;

use picker_core::key::RawKeyEvent;

use super::actions::action_for_key;
use super::types::{EmojiAction, PickerResponse, PAGE_ROWS};
use super::PickerSession;

impl PickerSession {
    /// Process a key event, using `precomputed` when the host adapter already
    /// mapped it. Keys arriving while hidden are ignored.
    pub fn handle_key(
        &mut self,
        event: &RawKeyEvent,
        precomputed: Option<EmojiAction>,
    ) -> PickerResponse {
        let _span = debug_span!("handle_key", ?event).entered();
        if !self.visible {
            return PickerResponse::ignored();
        }
        let action = precomputed.unwrap_or_else(|| action_for_key(event));
        self.apply_action(action, event)
    }

    fn apply_action(&mut self, action: EmojiAction, event: &RawKeyEvent) -> PickerResponse {
        let mut resp = PickerResponse::new(action);
        match action {
            EmojiAction::Invalid => {}

            EmojiAction::SelectAllInSearch => {
                self.search_selected = !self.search.is_empty();
            }

            EmojiAction::CopySelected => {
                resp.clipboard = self.selected_entry().map(|e| e.code.to_string());
            }

            EmojiAction::Disable => resp.close = true,

            EmojiAction::Commit => return self.commit_selected(event.modifiers.shift()),

            EmojiAction::SwitchMode { backwards } => {
                self.mode = if backwards {
                    self.mode.prev()
                } else {
                    self.mode.next()
                };
                self.search.clear();
                self.search_selected = false;
                self.rebuild();
            }

            EmojiAction::Up => {
                self.move_selection(-1, 0);
            }
            EmojiAction::Down => {
                self.move_selection(1, 0);
            }
            EmojiAction::Left => {
                self.move_selection(0, -1);
            }
            EmojiAction::Right => {
                self.move_selection(0, 1);
            }
            EmojiAction::PageUp => {
                self.move_selection(-PAGE_ROWS, 0);
            }
            EmojiAction::PageDown => {
                self.move_selection(PAGE_ROWS, 0);
            }

            EmojiAction::OpenSettings => {
                resp.open_settings = true;
                resp.close = true;
            }

            // Ctrl+A then Ctrl+X empties the field.
            EmojiAction::CutSelection => {
                if self.search_selected {
                    resp.clipboard = Some(std::mem::take(&mut self.search));
                }
                self.search_selected = false;
                self.rebuild();
            }

            EmojiAction::ClearSearch => {
                self.search.clear();
                self.search_selected = false;
                self.rebuild();
            }

            EmojiAction::RemoveChar => {
                self.take_selected_search();
                self.search.pop();
                self.rebuild();
            }

            EmojiAction::InsertChar => {
                self.take_selected_search();
                self.search.push_str(&event.text);
                self.rebuild();
            }
        }
        resp
    }

    /// Drop the query if it is selected, so the next edit replaces it.
    fn take_selected_search(&mut self) {
        if self.search_selected {
            self.search.clear();
            self.search_selected = false;
        }
    }
}
