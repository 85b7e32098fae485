use super::*;
use crate::ViewMode;

fn list_session() -> PickerSession {
    let mut s = make_test_session();
    s.set_mode(ViewMode::List);
    s
}

#[test]
fn arrows_move_within_grid() {
    let mut s = list_session();
    press(&mut s, Key::Right);
    press(&mut s, Key::Right);
    assert_eq!(s.selection(), Some((0, 2)));
    press(&mut s, Key::Down);
    assert_eq!(s.selection(), Some((1, 2)));
    press(&mut s, Key::Left);
    assert_eq!(s.selection(), Some((1, 1)));
    press(&mut s, Key::Up);
    assert_eq!(s.selection(), Some((0, 1)));
}

#[test]
fn moves_off_the_grid_are_rejected() {
    let mut s = list_session();
    assert!(!s.move_selection(0, -1));
    assert!(!s.move_selection(-1, 0));
    assert_eq!(s.selection(), Some((0, 0)));

    for _ in 0..9 {
        press(&mut s, Key::Right);
    }
    assert_eq!(s.selection(), Some((0, 9)));
    // No wrap to the next row.
    assert!(!s.move_selection(0, 1));
    assert_eq!(s.selection(), Some((0, 9)));
}

#[test]
fn vertical_move_into_short_row_is_rejected() {
    let codes: Vec<(String, String)> = (0..12)
        .map(|i| (format!("animal {i:02}"), format!("A{i:02}")))
        .collect();
    let pairs: Vec<(&str, &str)> = codes.iter().map(|(n, c)| (n.as_str(), c.as_str())).collect();
    let mut s = make_session_with(Settings::default(), mru_of(&pairs));
    assert_eq!(s.grid().row_count(), 2);

    assert!(s.move_selection(0, 5));
    assert_eq!(s.selection(), Some((0, 5)));
    assert!(!s.move_selection(1, 0));
    assert_eq!(s.selection(), Some((0, 5)));

    assert!(s.move_selection(0, -4));
    assert!(s.move_selection(1, 0));
    assert_eq!(s.selection(), Some((1, 1)));
}

#[test]
fn kaomoji_steps_over_double_cells() {
    let mut s = make_test_session();
    s.set_mode(ViewMode::Kaomoji);
    press(&mut s, Key::Right);
    assert_eq!(s.selection(), Some((0, 2)));
    press(&mut s, Key::Right);
    assert_eq!(s.selection(), Some((0, 4)));
    press(&mut s, Key::Left);
    assert_eq!(s.selection(), Some((0, 2)));

    for _ in 0..5 {
        press(&mut s, Key::Right);
    }
    assert_eq!(s.selection(), Some((0, 8)));
    press(&mut s, Key::Down);
    assert_eq!(s.selection(), Some((1, 8)));
}

#[test]
fn mixed_row_resolves_covered_cells() {
    // With kaomoji saved to the MRU: emoji, kaomoji (2 wide), emoji.
    let settings = settings_from("[behavior]\nsave_kaomoji_in_mru = true\n");
    let mru = mru_of(&[("grin", "😀"), ("bear", "ʕ•ᴥ•ʔ"), ("cool", "😎")]);
    let mut s = make_session_with(settings, mru);
    let layout = s.grid().layout();
    assert_eq!(layout, vec![(0, 0, 1), (0, 1, 2), (0, 3, 1)]);

    assert!(s.move_selection(0, 1));
    assert_eq!(s.selection(), Some((0, 1)));
    assert!(s.move_selection(0, 1));
    assert_eq!(s.selection(), Some((0, 3)));
    // Left lands on the kaomoji's second cell and snaps to its origin.
    assert!(s.move_selection(0, -1));
    assert_eq!(s.selection(), Some((0, 1)));
    assert_eq!(selected_code(&s).as_deref(), Some("ʕ•ᴥ•ʔ"));
}

#[test]
fn vertical_move_snaps_to_wide_item_origin() {
    let settings = settings_from("[behavior]\nsave_kaomoji_in_mru = true\n");
    let mut pairs: Vec<(String, String)> = (0..10)
        .map(|i| (format!("animal {i:02}"), format!("A{i:02}")))
        .collect();
    pairs.push(("bear".into(), "ʕ•ᴥ•ʔ".into()));
    let pairs: Vec<(&str, &str)> = pairs.iter().map(|(n, c)| (n.as_str(), c.as_str())).collect();
    let mut s = make_session_with(settings, mru_of(&pairs));

    assert!(s.move_selection(0, 1));
    assert!(s.move_selection(1, 0));
    assert_eq!(s.selection(), Some((1, 0)));
    assert_eq!(selected_code(&s).as_deref(), Some("ʕ•ᴥ•ʔ"));
}

#[test]
fn page_down_reveals_hidden_rows() {
    let mut s = list_session();
    let hidden_before = s.grid().items().iter().filter(|i| !i.shown).count();
    assert!(hidden_before > 0);

    press(&mut s, Key::PageDown);
    assert_eq!(s.selection(), Some((4, 0)));
    assert!(s.grid().items().iter().all(|i| i.shown));

    // Row 8 does not exist.
    press(&mut s, Key::PageDown);
    assert_eq!(s.selection(), Some((4, 0)));

    press_with(&mut s, Key::Up, Modifiers::CTRL);
    assert_eq!(s.selection(), Some((0, 0)));
}

#[test]
fn horizontal_move_does_not_reveal() {
    let mut s = list_session();
    press(&mut s, Key::Right);
    assert!(s.grid().items().iter().any(|i| !i.shown));
}

#[test]
fn completion_follows_selection() {
    let mut s = list_session();
    assert_eq!(s.completion().unwrap().text, "grinning face");
    press(&mut s, Key::Right);
    assert_eq!(s.completion().unwrap().text, "grinning face with big eyes");
}

#[test]
fn no_selection_means_no_move() {
    let mut s = make_test_session();
    assert_eq!(s.selection(), None);
    assert!(!s.move_selection(1, 0));
    assert_eq!(s.selection(), None);
}
