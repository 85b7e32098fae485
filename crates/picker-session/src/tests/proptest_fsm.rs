//! Property-based tests for the picker state machine.
//!
//! Generates random key sequences via proptest and verifies that structural
//! invariants hold after every action.

use std::collections::HashSet;

use proptest::prelude::*;

use picker_core::key::{Key, Modifiers, RawKeyEvent};
use picker_core::mru::MRU_CAPACITY;

use super::*;
use crate::PickerResponse;

// ---------------------------------------------------------------------------
// Action enum: models every user-facing operation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Action {
    Type(char),
    Backspace,
    Tab,
    ShiftTab,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Enter,
    ShiftEnter,
    SelectAll,
    Cut,
    Copy,
    ClearSearch,
    Escape,
    /// Simulate the dispatcher re-enabling after a close.
    Reenable,
}

fn arb_search_char() -> impl Strategy<Value = char> {
    prop::sample::select(vec![
        'g', 'r', 'i', 'n', 'a', 'm', 'l', 's', 'f', 'c', 'e', 'h', 'o', ' ', 'k', 'z', '0',
        '1',
    ])
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        30 => arb_search_char().prop_map(Action::Type),
        8 => Just(Action::Backspace),
        5 => Just(Action::Tab),
        2 => Just(Action::ShiftTab),
        6 => Just(Action::Up),
        6 => Just(Action::Down),
        6 => Just(Action::Left),
        6 => Just(Action::Right),
        3 => Just(Action::PageUp),
        3 => Just(Action::PageDown),
        8 => Just(Action::Enter),
        3 => Just(Action::ShiftEnter),
        2 => Just(Action::SelectAll),
        2 => Just(Action::Cut),
        1 => Just(Action::Copy),
        2 => Just(Action::ClearSearch),
        2 => Just(Action::Escape),
        2 => Just(Action::Reenable),
    ]
}

// ---------------------------------------------------------------------------
// Execute an Action against the session
// ---------------------------------------------------------------------------

fn key(session: &mut PickerSession, key: Key, modifiers: Modifiers) -> PickerResponse {
    session.handle_key(&RawKeyEvent::press(key, modifiers), None)
}

fn execute_action(
    session: &mut PickerSession,
    action: &Action,
    settings: &Settings,
) -> Option<PickerResponse> {
    let none = Modifiers::NONE;
    let resp = match action {
        Action::Type(ch) => session.handle_key(&RawKeyEvent::text(&ch.to_string()), None),
        Action::Backspace => key(session, Key::Backspace, none),
        Action::Tab => key(session, Key::Tab, none),
        Action::ShiftTab => key(session, Key::Tab, Modifiers::SHIFT),
        Action::Up => key(session, Key::Up, none),
        Action::Down => key(session, Key::Down, none),
        Action::Left => key(session, Key::Left, none),
        Action::Right => key(session, Key::Right, none),
        Action::PageUp => key(session, Key::PageUp, none),
        Action::PageDown => key(session, Key::PageDown, none),
        Action::Enter => key(session, Key::Return, none),
        Action::ShiftEnter => key(session, Key::Return, Modifiers::SHIFT),
        Action::SelectAll => key(session, Key::Char('a'), Modifiers::CTRL),
        Action::Cut => key(session, Key::Char('x'), Modifiers::CTRL),
        Action::Copy => key(session, Key::Char('c'), Modifiers::CTRL),
        Action::ClearSearch => key(session, Key::Backspace, Modifiers::CTRL),
        Action::Escape => key(session, Key::Escape, none),
        Action::Reenable => {
            if !session.is_visible() {
                let mru = session.mru().clone();
                session.enable(settings.clone(), make_test_aliases(), mru, &AnyFont);
            }
            return None;
        }
    };
    if resp.close && session.begin_disable().is_some() {
        session.finish_disable();
    }
    Some(resp)
}

// ---------------------------------------------------------------------------
// Invariant checks, run after every action
// ---------------------------------------------------------------------------

fn assert_invariants(session: &PickerSession, resp: &PickerResponse, action: &Action) {
    // 1. Selection is none or the origin of an occupied cell
    if let Some((row, column)) = session.selection() {
        let item = session.grid().item_at(row, column);
        assert!(
            item.is_some_and(|i| i.row == row && i.column == column),
            "selection {:?} not on an item origin after {:?}",
            (row, column),
            action,
        );
    }

    // 2. Disabled codes never reach the grid
    for text in session.snapshot().items.iter().map(|i| &i.text) {
        assert!(
            !session.disabled_codes().contains(text),
            "disabled {:?} listed after {:?}",
            text,
            action,
        );
    }

    // 3. MRU unique and bounded
    let codes: Vec<&str> = session.mru().codes().collect();
    let unique: HashSet<&str> = codes.iter().copied().collect();
    assert_eq!(unique.len(), codes.len(), "MRU duplicates after {:?}", action);
    assert!(codes.len() <= MRU_CAPACITY, "MRU overflow after {:?}", action);

    // 4. A committed real emoji is at the MRU front
    if let Some(code) = &resp.commit {
        assert!(!code.is_empty(), "empty commit after {:?}", action);
        if session.catalog().emoji_by_code(code).is_some() {
            assert_eq!(codes.first().copied(), Some(code.as_str()), "after {:?}", action);
        }
    }

    // 5. Cells never overlap and never exceed the row width
    let mut cells = HashSet::new();
    for item in session.grid().items() {
        assert!(item.column + item.span <= crate::ROW_WIDTH, "overflow after {:?}", action);
        for c in item.column..item.column + item.span {
            assert!(cells.insert((item.row, c)), "overlap after {:?}", action);
        }
    }

    // 6. Completion only with a selection
    if session.selection().is_none() {
        assert!(session.completion().is_none(), "stray completion after {:?}", action);
    }
}

fn filtered_settings() -> Settings {
    settings_from(
        "[filter]\nmax_emoji_version = 13\nskin_tones_disabled = true\ngenders_disabled = true\n\n[behavior]\nsave_kaomoji_in_mru = true\n",
    )
}

fn run(settings: Settings, actions: &[Action]) {
    let mut session = make_session_with(settings.clone(), MruList::new());
    for action in actions {
        if let Some(resp) = execute_action(&mut session, action, &settings) {
            assert_invariants(&session, &resp, action);
        }
    }

    // Relayout from identical inputs gives the identical layout.
    if session.is_visible() {
        let layout = session.grid().layout();
        let search = session.search().to_string();
        session.set_search(&search);
        assert_eq!(layout, session.grid().layout());
    }
}

// ---------------------------------------------------------------------------
// proptest entry point
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn session_invariants_hold(actions in prop::collection::vec(arb_action(), 1..120)) {
        run(Settings::default(), &actions);
    }

    #[test]
    fn session_invariants_with_filters(actions in prop::collection::vec(arb_action(), 1..120)) {
        run(filtered_settings(), &actions);
    }

    #[test]
    fn auto_matches_prefix_for_short_queries(
        name in "[a-z ]{0,12}",
        query in "[a-z]{1,2}",
    ) {
        use picker_core::search::{matches, SearchMode};
        prop_assert_eq!(
            matches(&name, &query, SearchMode::Auto),
            matches(&name, &query, SearchMode::StartsWith)
        );
    }
}
