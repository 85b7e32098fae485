mod navigation;
mod proptest_fsm;

use std::sync::Arc;

use picker_core::alias::AliasIndex;
use picker_core::catalog::{Catalog, EmojiEntry, KaomojiEntry};
use picker_core::font::AnyFont;
use picker_core::key::{Key, Modifiers, RawKeyEvent};
use picker_core::mru::MruList;
use picker_core::settings::{parse_settings_toml, Settings};

use super::{PickerResponse, PickerSession};

/// Number of synthetic "animal NN" entries appended after the named ones.
pub(super) const ANIMALS: usize = 70;
pub(super) const NAMED: usize = 10;

pub(super) fn make_test_catalog() -> Arc<Catalog> {
    let mut emojis = vec![
        EmojiEntry::new("grinning face", "😀", 1),
        EmojiEntry::new("grinning face with big eyes", "😃", 1),
        EmojiEntry::new("smiling face with sunglasses", "😎", 1),
        EmojiEntry::new("awesome hand", "🤙", 3),
        EmojiEntry::new("smile", "😄", 1),
        EmojiEntry::new("waving hand", "👋", 1),
        EmojiEntry::new("waving hand: medium skin tone", "👋🏽", 2).with_skin_tone(),
        EmojiEntry::new("person shrugging", "🤷", 3),
        EmojiEntry::new("man shrugging", "🤷‍♂️", 4).with_gender(),
        EmojiEntry::new("melting face", "🫠", 14),
    ];
    for i in 0..ANIMALS {
        emojis.push(EmojiEntry::new(
            &format!("animal {i:02}"),
            &format!("A{i:02}"),
            5,
        ));
    }
    let mut kaomojis = vec![
        KaomojiEntry::new("shrug", "¯\\_(ツ)_/¯"),
        KaomojiEntry::new("bear", "ʕ•ᴥ•ʔ"),
        KaomojiEntry::new("table flip", "(╯°□°)╯︵ ┻━┻"),
        KaomojiEntry::new("happy", "(◕‿◕)"),
        KaomojiEntry::new("sad", "(╥﹏╥)"),
    ];
    for i in 0..10 {
        kaomojis.push(KaomojiEntry::new(&format!("kao {i}"), &format!("(k{i})")));
    }
    Arc::new(Catalog::new(emojis, kaomojis).unwrap())
}

pub(super) fn make_test_aliases() -> AliasIndex {
    let mut aliases = AliasIndex::new();
    aliases.insert("😀", "happy");
    aliases.insert("😀", "grin");
    aliases.insert("😎", "cool");
    aliases
}

pub(super) fn settings_from(toml: &str) -> Settings {
    parse_settings_toml(toml).unwrap()
}

/// Enabled session over the test catalog with default settings.
pub(super) fn make_test_session() -> PickerSession {
    make_session_with(Settings::default(), MruList::new())
}

pub(super) fn make_session_with(settings: Settings, mru: MruList) -> PickerSession {
    let mut session = PickerSession::new(make_test_catalog());
    session.enable(settings, make_test_aliases(), mru, &AnyFont);
    session
}

pub(super) fn mru_of(codes: &[(&str, &str)]) -> MruList {
    let mut mru = MruList::new();
    for (name, code) in codes.iter().rev() {
        mru.record(name, code);
    }
    mru
}

pub(super) fn press(session: &mut PickerSession, key: Key) -> PickerResponse {
    session.handle_key(&RawKeyEvent::press(key, Modifiers::NONE), None)
}

pub(super) fn press_with(
    session: &mut PickerSession,
    key: Key,
    modifiers: Modifiers,
) -> PickerResponse {
    session.handle_key(&RawKeyEvent::press(key, modifiers), None)
}

// Helper: simulate typing a string one character at a time
pub(super) fn type_string(session: &mut PickerSession, s: &str) -> Vec<PickerResponse> {
    s.chars()
        .map(|ch| session.handle_key(&RawKeyEvent::text(&ch.to_string()), None))
        .collect()
}

pub(super) fn selected_code(session: &PickerSession) -> Option<String> {
    session.selected_entry().map(|e| e.code.to_string())
}

pub(super) fn grid_codes(session: &PickerSession) -> Vec<String> {
    session
        .snapshot()
        .items
        .into_iter()
        .map(|i| i.text)
        .collect()
}
