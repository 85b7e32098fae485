use unicode_width::UnicodeWidthChar;

use picker_core::search::{find_match, match_offset, SearchMode};

use super::types::{Completion, COMPLETION_MAX_WIDTH};
use super::PickerSession;

const ELLIPSIS: char = '…';

impl Completion {
    pub(crate) fn new(matched: &str, query: &str) -> Self {
        Self {
            text: truncate_display(matched, COMPLETION_MAX_WIDTH),
            offset: match_offset(matched, query).unwrap_or(0),
        }
    }
}

/// Cut `text` to at most `max` display columns, ending in an ellipsis when cut.
fn truncate_display(text: &str, max: usize) -> String {
    let width: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if width <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push(ELLIPSIS);
    out
}

impl PickerSession {
    /// Recompute the completion for the selected entry against the query.
    /// With an empty query every entry matches by name.
    pub(crate) fn update_completion(&mut self) {
        self.completion = self.selected_item().and_then(|item| {
            let entry = self.catalog.entry(item);
            let aliases = self.aliases.aliases_for(entry.code);
            find_match(entry.name, aliases, &self.search, SearchMode::Auto)
                .map(|m| Completion::new(m, &self.search))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_untouched() {
        assert_eq!(truncate_display("grinning face", 36), "grinning face");
    }

    #[test]
    fn long_text_cut_with_ellipsis() {
        let long = "a".repeat(50);
        let cut = truncate_display(&long, 36);
        assert_eq!(cut.chars().count(), 36);
        assert!(cut.ends_with(ELLIPSIS));
    }

    #[test]
    fn wide_chars_count_double() {
        let wide = "あ".repeat(20);
        let cut = truncate_display(&wide, 36);
        assert_eq!(cut.chars().count(), 18);
    }

    #[test]
    fn offset_of_query() {
        let c = Completion::new("smiling face", "face");
        assert_eq!(c.offset, 8);
        let c = Completion::new("smiling face", "");
        assert_eq!(c.offset, 0);
    }
}
