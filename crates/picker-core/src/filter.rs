//! Eligibility of catalog entries for display.

use std::collections::HashSet;

use crate::catalog::{Catalog, EmojiEntry, EntryView};
use crate::font::FontProbe;

/// User configuration deciding which entries are hidden for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPolicy {
    /// `None` shows every version.
    pub max_version: Option<i32>,
    pub skin_tones_disabled: bool,
    pub genders_disabled: bool,
    pub use_system_font: bool,
    pub use_system_font_width_heuristics: bool,
}

/// Why an entry was filtered out. The first matching rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisabledReason {
    TooNew,
    SkinTone,
    Gender,
    FontUnsupported,
}

impl FilterPolicy {
    pub fn disabled_reason(
        &self,
        entry: &EmojiEntry,
        probe: &dyn FontProbe,
    ) -> Option<DisabledReason> {
        if let Some(max) = self.max_version {
            if entry.version > max {
                return Some(DisabledReason::TooNew);
            }
        }
        if self.skin_tones_disabled && entry.skin_tone_variant {
            return Some(DisabledReason::SkinTone);
        }
        if self.genders_disabled && entry.gender_variant {
            return Some(DisabledReason::Gender);
        }
        if self.use_system_font
            && self.use_system_font_width_heuristics
            && !probe.can_render(&entry.code)
        {
            return Some(DisabledReason::FontUnsupported);
        }
        None
    }

    pub fn is_disabled(&self, entry: &EmojiEntry, probe: &dyn FontProbe) -> bool {
        self.disabled_reason(entry, probe).is_some()
    }

    /// Kaomoji pseudo-entries carry no variant flags and no version, so only
    /// the version rule could apply, and `-1` never exceeds a valid maximum.
    pub fn is_view_disabled(&self, view: &EntryView<'_>) -> bool {
        matches!(self.max_version, Some(max) if view.version > max)
    }

    /// Evaluate the whole catalog once. Kaomoji are keyed by their text.
    pub fn disabled_codes(&self, catalog: &Catalog, probe: &dyn FontProbe) -> HashSet<String> {
        let mut codes: HashSet<String> = catalog
            .emojis()
            .iter()
            .filter(|e| self.is_disabled(e, probe))
            .map(|e| e.code.clone())
            .collect();
        codes.extend(
            catalog
                .kaomojis()
                .iter()
                .filter(|k| self.is_view_disabled(&k.as_entry()))
                .map(|k| k.text.clone()),
        );
        tracing::debug!(count = codes.len(), "disabled codes computed");
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::KaomojiEntry;
    use crate::font::AnyFont;

    fn all_flags(max: i32) -> FilterPolicy {
        FilterPolicy {
            max_version: Some(max),
            skin_tones_disabled: true,
            genders_disabled: true,
            use_system_font: true,
            use_system_font_width_heuristics: true,
        }
    }

    #[test]
    fn version_rule_wins_over_everything() {
        let entry = EmojiEntry::new("melting face", "🫠", 14)
            .with_skin_tone()
            .with_gender();
        let reject_all = |_: &str| false;
        assert_eq!(
            all_flags(13).disabled_reason(&entry, &reject_all),
            Some(DisabledReason::TooNew)
        );
        let policy = FilterPolicy {
            max_version: Some(13),
            ..Default::default()
        };
        assert!(policy.is_disabled(&entry, &AnyFont));
    }

    #[test]
    fn rule_precedence() {
        let reject_all = |_: &str| false;
        let both = EmojiEntry::new("x", "x", 1).with_skin_tone().with_gender();
        assert_eq!(
            all_flags(15).disabled_reason(&both, &reject_all),
            Some(DisabledReason::SkinTone)
        );
        let gender = EmojiEntry::new("y", "y", 1).with_gender();
        assert_eq!(
            all_flags(15).disabled_reason(&gender, &reject_all),
            Some(DisabledReason::Gender)
        );
        let plain = EmojiEntry::new("z", "z", 1);
        assert_eq!(
            all_flags(15).disabled_reason(&plain, &reject_all),
            Some(DisabledReason::FontUnsupported)
        );
    }

    #[test]
    fn font_rule_needs_both_flags() {
        let reject_all = |_: &str| false;
        let entry = EmojiEntry::new("z", "z", 1);
        let mut policy = FilterPolicy {
            use_system_font: true,
            ..Default::default()
        };
        assert!(!policy.is_disabled(&entry, &reject_all));
        policy.use_system_font_width_heuristics = true;
        assert!(policy.is_disabled(&entry, &reject_all));
        policy.use_system_font = false;
        assert!(!policy.is_disabled(&entry, &reject_all));
    }

    #[test]
    fn unset_max_version_allows_all() {
        let entry = EmojiEntry::new("new", "n", 99);
        assert!(!FilterPolicy::default().is_disabled(&entry, &AnyFont));
    }

    #[test]
    fn disabled_codes_over_catalog() {
        let catalog = Catalog::new(
            vec![
                EmojiEntry::new("grin", "😀", 6),
                EmojiEntry::new("grin variant", "😀🏽", 6).with_skin_tone(),
            ],
            vec![KaomojiEntry::new("shrug", "¯\\_(ツ)_/¯")],
        )
        .unwrap();
        let policy = FilterPolicy {
            skin_tones_disabled: true,
            max_version: Some(0),
            ..Default::default()
        };
        let codes = policy.disabled_codes(&catalog, &AnyFont);
        // Version 6 > 0 disables both emoji; kaomoji (-1) stays.
        assert_eq!(codes.len(), 2);
        assert!(!codes.contains("¯\\_(ツ)_/¯"));
    }
}
