use crate::common::harness::EditorTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use scribe::model::buffer::Position;

fn harness_with(text: &str) -> EditorTestHarness {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    let path = harness.create_file("search.txt", text);
    harness.open_file(&path).unwrap();
    harness
}

fn search_for(harness: &mut EditorTestHarness, query: &str) {
    harness
        .send_key(KeyCode::Char('f'), KeyModifiers::CONTROL)
        .unwrap();
    harness.type_text(query).unwrap();
}

#[test]
fn test_search_prompt_is_shown() {
    let mut harness = harness_with("abcabc\nxabcy");
    search_for(&mut harness, "ab");
    harness.render().unwrap();

    assert!(harness.get_prompt_line().starts_with("Search: ab"));
    assert_eq!(harness.editor().state().search().matches().len(), 3);
}

/// Enter jumps to the first match; F3 walks forward with wrap-around
#[test]
fn test_find_next_visits_matches_in_order() {
    let mut harness = harness_with("abcabc\nxabcy");
    search_for(&mut harness, "abc");
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    let selection = harness.editor().state().cursor().selection();
    assert_eq!(
        selection,
        Some((Position::new(0, 0), Position::new(0, 3)))
    );
    assert_eq!(harness.cursor_position(), Position::new(0, 0));
    assert_eq!(harness.editor().status_message(), Some("Match 1 of 3"));

    harness.send_key(KeyCode::F(3), KeyModifiers::NONE).unwrap();
    assert_eq!(harness.cursor_position(), Position::new(0, 3));
    assert_eq!(harness.editor().status_message(), Some("Match 2 of 3"));

    harness.send_key(KeyCode::F(3), KeyModifiers::NONE).unwrap();
    assert_eq!(harness.cursor_position(), Position::new(1, 1));
    assert_eq!(harness.editor().status_message(), Some("Match 3 of 3"));

    harness.send_key(KeyCode::F(3), KeyModifiers::NONE).unwrap();
    assert_eq!(harness.cursor_position(), Position::new(0, 0));
    assert_eq!(harness.editor().status_message(), Some("Match 1 of 3"));
}

#[test]
fn test_find_previous_wraps_to_last() {
    let mut harness = harness_with("abcabc\nxabcy");
    search_for(&mut harness, "abc");
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    harness.send_key(KeyCode::F(3), KeyModifiers::SHIFT).unwrap();
    assert_eq!(
        harness.editor().state().cursor().selection(),
        Some((Position::new(1, 1), Position::new(1, 4)))
    );
    assert_eq!(harness.editor().status_message(), Some("Match 3 of 3"));
}

#[test]
fn test_no_matches_message() {
    let mut harness = harness_with("hello");
    search_for(&mut harness, "zzz");
    assert_eq!(
        harness.editor().status_message(),
        Some("No matches found for 'zzz'")
    );

    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.cursor_position(), Position::new(0, 0));
    assert_eq!(
        harness.editor().status_message(),
        Some("No matches found for 'zzz'")
    );
}

#[test]
fn test_find_next_without_search() {
    let mut harness = harness_with("hello");
    harness.send_key(KeyCode::F(3), KeyModifiers::NONE).unwrap();
    assert_eq!(harness.editor().status_message(), Some("No active search"));
}

#[test]
fn test_escape_cancels_search() {
    let mut harness = harness_with("abc abc");
    search_for(&mut harness, "abc");
    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();
    harness.render().unwrap();

    assert!(harness.editor().prompt().is_none());
    assert!(!harness.editor().state().search().is_active());
    assert!(harness.get_prompt_line().starts_with("Cancelled"));
}

#[test]
fn test_prompt_backspace_updates_matches() {
    let mut harness = harness_with("ab ax");
    search_for(&mut harness, "ab");
    assert_eq!(harness.editor().state().search().matches().len(), 1);

    harness
        .send_key(KeyCode::Backspace, KeyModifiers::NONE)
        .unwrap();
    assert_eq!(harness.editor().state().search().query(), "a");
    assert_eq!(harness.editor().state().search().matches().len(), 2);
}

/// Matches follow edits made while a search is active
#[test]
fn test_matches_refresh_after_edit() {
    let mut harness = harness_with("foo bar");
    search_for(&mut harness, "foo");
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    harness.send_key(KeyCode::End, KeyModifiers::NONE).unwrap();
    harness.type_text(" foo").unwrap();
    assert_eq!(harness.editor().state().search().matches().len(), 2);
}

#[test]
fn test_reopening_prompt_keeps_query() {
    let mut harness = harness_with("needle");
    search_for(&mut harness, "need");
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    harness
        .send_key(KeyCode::Char('f'), KeyModifiers::CONTROL)
        .unwrap();
    harness.render().unwrap();
    assert!(harness.get_prompt_line().starts_with("Search: need"));
}

#[test]
fn test_matches_are_highlighted() {
    let mut harness = harness_with("xx ab ab");
    search_for(&mut harness, "ab");
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
    harness.render().unwrap();

    let theme = harness.editor().theme().clone();
    // Gutter ">  1 " is five columns wide
    let current = harness.get_cell_style(5 + 3, 0).unwrap();
    let other = harness.get_cell_style(5 + 6, 0).unwrap();
    // The current match is also the selection
    assert_eq!(current.bg, Some(theme.selection_bg));
    assert_eq!(other.bg, Some(theme.search_match_bg));
}
