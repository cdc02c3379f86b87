use crate::common::harness::{layout, EditorTestHarness};
use crossterm::event::{KeyCode, KeyModifiers};
use scribe::config::Config;

fn numbered_lines(count: usize) -> String {
    (1..=count)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_layout_rows() {
    let mut harness = EditorTestHarness::new(40, 8).unwrap();
    harness.type_text("hi").unwrap();

    assert_eq!(harness.get_row_text(0).trim_end(), ">  1 hi");
    assert!(harness.get_row_text(1).trim().is_empty());
    assert_eq!(layout::status_bar_row(8), 6);
    assert!(harness.get_status_bar().starts_with("Untitled [●]"));
    assert!(harness.get_status_bar().trim_end().ends_with("LF"));
    assert!(harness.get_prompt_line().trim().is_empty());
}

/// Moving down keeps `scroll_offset` lines of context below the cursor
#[test]
fn test_scrolling_keeps_context() {
    let mut harness = EditorTestHarness::new(40, 12).unwrap();
    let path = harness.create_file("lines.txt", &numbered_lines(50));
    harness.open_file(&path).unwrap();

    harness
        .send_key_repeat(KeyCode::Down, KeyModifiers::NONE, 20)
        .unwrap();
    assert_eq!(harness.editor().viewport().top_line, 14);
    assert_eq!(harness.get_row_text(0).trim_end(), "  15 line 15");
    assert_eq!(harness.get_row_text(6).trim_end(), "> 21 line 21");
    assert_eq!(harness.screen_cursor_position(), (5, 6));

    harness.send_key(KeyCode::End, KeyModifiers::CONTROL).unwrap();
    assert_eq!(harness.editor().viewport().top_line, 40);
    let last_content_row = layout::content_row_count(12) as u16 - 1;
    assert_eq!(
        harness.get_row_text(last_content_row).trim_end(),
        "> 50 line 50"
    );

    harness
        .send_key(KeyCode::Home, KeyModifiers::CONTROL)
        .unwrap();
    assert_eq!(harness.editor().viewport().top_line, 0);
}

#[test]
fn test_page_down_moves_by_viewport_height() {
    let mut harness = EditorTestHarness::new(40, 12).unwrap();
    let path = harness.create_file("lines.txt", &numbered_lines(50));
    harness.open_file(&path).unwrap();

    harness
        .send_key(KeyCode::PageDown, KeyModifiers::NONE)
        .unwrap();
    assert_eq!(harness.cursor_position().line, 10);
}

#[test]
fn test_tab_expansion() {
    let mut harness = EditorTestHarness::new(40, 6).unwrap();
    harness.type_text("a\tb").unwrap();

    assert_eq!(harness.get_row_text(0).trim_end(), ">  1 a   b");
    assert_eq!(harness.screen_cursor_position(), (10, 0));
}

#[test]
fn test_wide_characters_take_two_cells() {
    let mut harness = EditorTestHarness::new(40, 6).unwrap();
    harness.type_text("日本語x").unwrap();

    assert_eq!(harness.buffer()[(5, 0)].symbol(), "日");
    assert_eq!(harness.buffer()[(7, 0)].symbol(), "本");
    assert_eq!(harness.buffer()[(11, 0)].symbol(), "x");
    assert_eq!(harness.screen_cursor_position(), (12, 0));
    assert!(harness.get_status_bar().contains("Line 1, Col 5"));
}

#[test]
fn test_horizontal_scroll_follows_cursor() {
    let mut harness = EditorTestHarness::new(20, 6).unwrap();
    let path = harness.create_file("wide.txt", &"0123456789".repeat(4));
    harness.open_file(&path).unwrap();

    harness.send_key(KeyCode::End, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.editor().viewport().left_column, 31);
    assert!(harness.get_row_text(0).starts_with(">  1 123456789"));
    assert_eq!(harness.screen_cursor_position(), (14, 0));

    harness.send_key(KeyCode::Home, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.editor().viewport().left_column, 0);
    assert_eq!(harness.get_row_text(0), ">  1 012345678901234");
}

#[test]
fn test_line_numbers_can_be_disabled() {
    let mut config = Config::default();
    config.editor.line_numbers = false;
    let mut harness = EditorTestHarness::with_config(30, 6, config).unwrap();
    harness.type_text("plain").unwrap();

    assert_eq!(harness.get_row_text(0).trim_end(), "plain");
    assert_eq!(harness.screen_cursor_position(), (5, 0));
}

#[test]
fn test_gutter_grows_with_line_count() {
    let mut harness = EditorTestHarness::new(40, 12).unwrap();
    let path = harness.create_file("many.txt", &numbered_lines(1200));
    harness.open_file(&path).unwrap();

    assert_eq!(harness.get_row_text(0).trim_end(), ">   1 line 1");
}

#[test]
fn test_resize_moves_status_bar() {
    let mut harness = EditorTestHarness::new(40, 10).unwrap();
    harness.type_text("x").unwrap();
    harness.resize(50, 6).unwrap();

    assert!(harness.get_row_text(4).starts_with("Untitled [●]"));
    assert!(harness.get_status_bar().starts_with("Untitled [●]"));
}

#[test]
fn test_rust_keywords_are_colored() {
    let mut harness = EditorTestHarness::new(40, 6).unwrap();
    let path = harness.create_file("main.rs", "fn main() {}");
    harness.open_file(&path).unwrap();

    assert!(harness.get_status_bar().contains("| Rust"));
    let theme = harness.editor().theme().clone();
    let style = harness.get_cell_style(5, 0).unwrap();
    assert_eq!(style.fg, Some(theme.syntax_keyword));
}

#[test]
fn test_highlighting_disabled_uses_plain_color() {
    let mut config = Config::default();
    config.editor.syntax_highlighting = false;
    let mut harness = EditorTestHarness::with_config(40, 6, config).unwrap();
    let path = harness.create_file("main.rs", "fn main() {}");
    harness.open_file(&path).unwrap();

    let theme = harness.editor().theme().clone();
    let style = harness.get_cell_style(5, 0).unwrap();
    assert_eq!(style.fg, Some(theme.editor_fg));
}

#[test]
fn test_selection_is_highlighted() {
    let mut harness = EditorTestHarness::new(40, 6).unwrap();
    harness.type_text("abcd").unwrap();
    harness
        .send_key_repeat(KeyCode::Left, KeyModifiers::SHIFT, 2)
        .unwrap();

    let theme = harness.editor().theme().clone();
    assert_eq!(
        harness.get_cell_style(5 + 2, 0).unwrap().bg,
        Some(theme.selection_bg)
    );
    assert_eq!(
        harness.get_cell_style(5 + 1, 0).unwrap().bg,
        Some(theme.editor_bg)
    );
}
