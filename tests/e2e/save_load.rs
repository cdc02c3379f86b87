use crate::common::harness::EditorTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use scribe::app::UNTITLED_FILE_NAME;
use scribe::model::buffer::Position;

fn save(harness: &mut EditorTestHarness) {
    harness
        .send_key(KeyCode::Char('s'), KeyModifiers::CONTROL)
        .unwrap();
}

fn quit(harness: &mut EditorTestHarness) {
    harness
        .send_key(KeyCode::Char('q'), KeyModifiers::CONTROL)
        .unwrap();
}

#[test]
fn test_open_shows_file_contents() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    let path = harness.create_file("hello.txt", "first\nsecond\nthird\n");
    harness.open_file(&path).unwrap();

    harness.assert_screen_contains(">  1 first");
    harness.assert_screen_contains("   2 second");
    harness.assert_screen_contains("   4 ");
    assert!(harness
        .get_status_bar()
        .starts_with("hello.txt | Line 1, Col 1 | Text"));
    assert!(!harness.is_dirty());
}

#[test]
fn test_edit_and_save_round_trip() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    let path = harness.create_file("doc.txt", "alpha\nbeta");
    harness.open_file(&path).unwrap();

    harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::End, KeyModifiers::NONE).unwrap();
    harness.type_text("!").unwrap();
    assert!(harness.get_status_bar().starts_with("doc.txt [●]"));

    save(&mut harness);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "alpha\nbeta!");
    assert!(!harness.is_dirty());
    assert!(harness.get_status_bar().starts_with("doc.txt | Line 2, Col 6"));
    assert!(harness.get_prompt_line().starts_with("Saved: "));
}

#[test]
fn test_crlf_file_keeps_line_endings() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    let path = harness.create_file("dos.txt", "one\r\ntwo\r\n");
    harness.open_file(&path).unwrap();

    harness.assert_buffer_content("one\ntwo\n");
    assert!(harness.get_status_bar().trim_end().ends_with("CRLF"));

    harness.send_key(KeyCode::End, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
    harness.type_text("mid").unwrap();
    save(&mut harness);

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "one\r\nmid\r\ntwo\r\n"
    );
}

/// A path that does not exist opens as an empty buffer bound to that path
#[test]
fn test_open_nonexistent_file() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    let path = harness.project_dir().join("fresh.py");
    harness.open_file(&path).unwrap();

    harness.assert_buffer_content("");
    assert!(harness
        .get_status_bar()
        .starts_with("fresh.py | Line 1, Col 1 | Python"));
    assert!(!path.exists());

    harness.type_text("x = 1").unwrap();
    save(&mut harness);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "x = 1");
}

#[test]
fn test_save_untitled_buffer() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.type_text("draft").unwrap();
    save(&mut harness);

    let path = harness.project_dir().join(UNTITLED_FILE_NAME);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "draft");
    assert_eq!(harness.editor().file_path(), Some(path.as_path()));
    assert!(harness.get_status_bar().starts_with("untitled.txt | "));
}

#[test]
fn test_open_file_prompt() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.create_file("target.txt", "found me");

    harness
        .send_key(KeyCode::Char('o'), KeyModifiers::CONTROL)
        .unwrap();
    let expected_prefix = format!("Open file: {}/", harness.project_dir().display());
    assert!(harness.get_prompt_line().starts_with(&expected_prefix));

    harness.type_text("target.txt").unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    harness.assert_buffer_content("found me");
    assert!(harness.editor().prompt().is_none());
    assert!(harness.get_status_bar().starts_with("target.txt | "));
}

#[test]
fn test_open_replaces_history_and_cursor() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.type_text("scratch").unwrap();
    let path = harness.create_file("other.txt", "other");
    harness.open_file(&path).unwrap();

    assert_eq!(harness.cursor_position(), Position::new(0, 0));
    assert!(!harness.editor().state().history().can_undo());
    harness
        .send_key(KeyCode::Char('z'), KeyModifiers::CONTROL)
        .unwrap();
    harness.assert_buffer_content("other");
}

#[test]
fn test_open_directory_reports_error() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.type_text("keep").unwrap();
    let dir = harness.project_dir();
    harness.open_file(&dir).unwrap();

    harness.assert_buffer_content("keep");
    assert!(harness.get_prompt_line().starts_with("Error loading file: "));
}

#[test]
fn test_quit_flow_with_unsaved_changes() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    let path = harness.create_file("q.txt", "");
    harness.open_file(&path).unwrap();
    harness.type_text("unsaved").unwrap();

    quit(&mut harness);
    assert!(!harness.should_quit());
    assert!(harness
        .get_prompt_line()
        .starts_with("Unsaved changes! Press Ctrl+Q again to quit"));

    save(&mut harness);
    quit(&mut harness);
    assert!(harness.should_quit());
}

#[test]
fn test_second_quit_discards_changes() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.type_text("gone").unwrap();
    quit(&mut harness);
    quit(&mut harness);
    assert!(harness.should_quit());
    assert!(!harness.project_dir().join(UNTITLED_FILE_NAME).exists());
}

/// `file:line:col` from the command line lands the cursor after loading
#[test]
fn test_goto_after_open() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    let path = harness.create_file("jump.txt", "first\nsecond line\nthird");
    harness.open_file(&path).unwrap();

    harness.editor_mut().goto(2, 8);
    harness.render().unwrap();
    assert_eq!(harness.cursor_position(), Position::new(1, 7));
    assert!(harness.get_status_bar().contains("Line 2, Col 8"));
    harness.assert_screen_contains(">  2 second line");

    harness.editor_mut().goto(99, 99);
    assert_eq!(harness.cursor_position(), Position::new(2, 5));
}
