use crate::common::harness::EditorTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use scribe::model::buffer::Position;

fn undo(harness: &mut EditorTestHarness) {
    harness
        .send_key(KeyCode::Char('z'), KeyModifiers::CONTROL)
        .unwrap();
}

fn redo(harness: &mut EditorTestHarness) {
    harness
        .send_key(KeyCode::Char('y'), KeyModifiers::CONTROL)
        .unwrap();
}

/// A run of typing is one undo step and the dirty marker follows history
#[test]
fn test_undo_typing_restores_clean_state() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.type_text("hello").unwrap();
    harness.type_text("!").unwrap();
    harness.render().unwrap();
    assert!(harness.get_status_bar().contains("[●]"));

    undo(&mut harness);
    harness.render().unwrap();
    harness.assert_buffer_content("");
    harness.assert_screen_not_contains("hello!");
    assert_eq!(harness.cursor_position(), Position::new(0, 0));
    assert!(!harness.get_status_bar().contains("[●]"));

    redo(&mut harness);
    harness.render().unwrap();
    harness.assert_buffer_content("hello!");
    assert_eq!(harness.cursor_position(), Position::new(0, 6));
    assert!(harness.get_status_bar().contains("[●]"));
}

#[test]
fn test_words_are_separate_undo_steps() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.type_text("hello world").unwrap();

    undo(&mut harness);
    harness.assert_buffer_content("hello ");
    undo(&mut harness);
    harness.assert_buffer_content("");
}

#[test]
fn test_cursor_movement_ends_typing_step() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.type_text("ab").unwrap();
    harness.send_key(KeyCode::Left, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::Right, KeyModifiers::NONE).unwrap();
    harness.type_text("cd").unwrap();

    undo(&mut harness);
    harness.assert_buffer_content("ab");
    assert_eq!(harness.cursor_position(), Position::new(0, 2));
}

#[test]
fn test_undo_newline_and_join() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.type_text("one").unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
    harness.type_text("two").unwrap();
    harness
        .send_key(KeyCode::Home, KeyModifiers::NONE)
        .unwrap();
    harness
        .send_key(KeyCode::Backspace, KeyModifiers::NONE)
        .unwrap();
    harness.assert_buffer_content("onetwo");

    undo(&mut harness);
    harness.assert_buffer_content("one\ntwo");
    assert_eq!(harness.cursor_position(), Position::new(1, 0));
}

#[test]
fn test_new_edit_discards_redo() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.type_text("ab").unwrap();
    undo(&mut harness);
    harness.type_text("c").unwrap();

    redo(&mut harness);
    harness.assert_buffer_content("c");
    assert_eq!(harness.editor().status_message(), Some("Nothing to redo"));
}

#[test]
fn test_nothing_to_undo_message() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    undo(&mut harness);
    harness.render().unwrap();
    assert!(harness.get_prompt_line().starts_with("Nothing to undo"));
}

#[test]
fn test_ctrl_shift_z_redoes() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.type_text("x").unwrap();
    undo(&mut harness);
    harness
        .send_key(
            KeyCode::Char('z'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        )
        .unwrap();
    harness.assert_buffer_content("x");
}

/// Returning to the saved point by undo makes the buffer clean again
#[test]
fn test_undo_back_to_saved_point_is_clean() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    let path = harness.create_file("notes.txt", "base");
    harness.open_file(&path).unwrap();

    harness.send_key(KeyCode::End, KeyModifiers::NONE).unwrap();
    harness.type_text("1").unwrap();
    harness
        .send_key(KeyCode::Char('s'), KeyModifiers::CONTROL)
        .unwrap();
    assert!(!harness.is_dirty());

    harness.type_text("23").unwrap();
    assert!(harness.is_dirty());
    undo(&mut harness);
    assert!(!harness.is_dirty());
    harness.assert_buffer_content("base1");

    undo(&mut harness);
    assert!(harness.is_dirty());
    harness.assert_buffer_content("base");
}

#[test]
fn test_undo_selection_replacement() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.type_text("cat").unwrap();
    harness
        .send_key(KeyCode::Home, KeyModifiers::SHIFT)
        .unwrap();
    harness.type_text("dog").unwrap();
    harness.assert_buffer_content("dog");

    undo(&mut harness);
    harness.assert_buffer_content("cat");
}
