// EditorTestHarness - Virtual terminal environment for E2E testing

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use scribe::app::Editor;
use scribe::config::Config;
use scribe::model::buffer::Position;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Terminal layout constants
/// The editor draws the text area from row 0, then a status bar and a
/// message/prompt line at the bottom
pub mod layout {
    /// Number of rows reserved at the bottom (status bar + prompt line)
    pub const BOTTOM_RESERVED_ROWS: usize = 2;

    /// Get the status bar row for a given terminal height
    #[inline]
    pub const fn status_bar_row(terminal_height: usize) -> usize {
        terminal_height - 2
    }

    /// Get the prompt line row for a given terminal height
    #[inline]
    pub const fn prompt_line_row(terminal_height: usize) -> usize {
        terminal_height - 1
    }

    /// Get the number of content rows for a given terminal height
    #[inline]
    pub const fn content_row_count(terminal_height: usize) -> usize {
        terminal_height.saturating_sub(BOTTOM_RESERVED_ROWS)
    }
}

/// Virtual editor environment for testing
/// Captures all rendering output without displaying to actual terminal
pub struct EditorTestHarness {
    editor: Editor,
    terminal: Terminal<TestBackend>,

    /// Working directory for the editor, removed when the harness drops
    temp_dir: TempDir,

    term_height: u16,
}

impl EditorTestHarness {
    /// Create new test harness with virtual terminal
    /// The editor's working directory is a fresh temp dir
    pub fn new(width: u16, height: u16) -> anyhow::Result<Self> {
        Self::with_config(width, height, Config::default())
    }

    /// Create with custom config
    pub fn with_config(width: u16, height: u16, config: Config) -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let editor =
            Editor::with_working_dir(config, width, height, Some(temp_dir.path().to_path_buf()));

        Ok(EditorTestHarness {
            editor,
            terminal,
            temp_dir,
            term_height: height,
        })
    }

    /// The editor's working directory
    pub fn project_dir(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    /// Create a file in the working directory and return its path
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, content).expect("failed to write test file");
        path
    }

    /// Open a file in the editor
    pub fn open_file(&mut self, path: &Path) -> anyhow::Result<()> {
        self.editor.open_file(path);
        self.render()
    }

    /// Simulate a key press
    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> anyhow::Result<()> {
        // Delegate to the editor's handle_key method (just like main.rs does)
        self.editor.handle_key(code, modifiers);
        self.render()
    }

    /// Send the same key press multiple times, rendering once at the end
    pub fn send_key_repeat(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        count: usize,
    ) -> anyhow::Result<()> {
        for _ in 0..count {
            self.editor.handle_key(code, modifiers);
        }
        self.render()
    }

    /// Type a string of text (one key press per character)
    pub fn type_text(&mut self, text: &str) -> anyhow::Result<()> {
        for ch in text.chars() {
            let code = match ch {
                '\n' => KeyCode::Enter,
                '\t' => KeyCode::Tab,
                c => KeyCode::Char(c),
            };
            self.editor.handle_key(code, KeyModifiers::NONE);
        }
        self.render()
    }

    /// Render the editor to the virtual terminal
    pub fn render(&mut self) -> anyhow::Result<()> {
        self.terminal.draw(|frame| self.editor.render(frame))?;
        Ok(())
    }

    /// Resize the virtual terminal and the editor
    pub fn resize(&mut self, width: u16, height: u16) -> anyhow::Result<()> {
        self.terminal.backend_mut().resize(width, height);
        self.editor.resize(width, height);
        self.term_height = height;
        self.render()
    }

    /// Get the current screen buffer
    pub fn buffer(&self) -> &ratatui::buffer::Buffer {
        self.terminal.backend().buffer()
    }

    /// Get the style of a single cell
    pub fn get_cell_style(&self, x: u16, y: u16) -> Option<ratatui::style::Style> {
        let buffer = self.buffer();
        let pos = buffer.index_of(x, y);
        buffer.content.get(pos).map(|cell| cell.style())
    }

    /// Get text of a single screen row
    pub fn get_row_text(&self, y: u16) -> String {
        let buffer = self.buffer();
        let width = buffer.area.width;
        let mut row_text = String::new();

        for x in 0..width {
            let pos = buffer.index_of(x, y);
            if let Some(cell) = buffer.content.get(pos) {
                row_text.push_str(cell.symbol());
            }
        }

        row_text
    }

    /// Get entire screen as string (for debugging)
    pub fn screen_to_string(&self) -> String {
        let height = self.buffer().area.height;
        (0..height)
            .map(|y| self.get_row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Verify text appears on screen
    pub fn assert_screen_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            screen.contains(text),
            "Expected screen to contain '{text}'\nScreen content:\n{screen}"
        );
    }

    /// Verify text does not appear on screen
    pub fn assert_screen_not_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            !screen.contains(text),
            "Expected screen to not contain '{text}'\nScreen content:\n{screen}"
        );
    }

    /// Get the buffer content (not screen, actual buffer text)
    pub fn get_buffer_content(&self) -> String {
        self.editor.state().buffer().to_string()
    }

    /// Verify buffer content matches expected
    pub fn assert_buffer_content(&self, expected: &str) {
        let actual = self.get_buffer_content();
        assert_eq!(
            actual, expected,
            "Buffer content mismatch\nExpected: {expected:?}\nActual: {actual:?}",
        );
    }

    /// Access the editor directly (for advanced testing)
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn should_quit(&self) -> bool {
        self.editor.should_quit()
    }

    /// Cursor position in the buffer (line, column)
    pub fn cursor_position(&self) -> Position {
        self.editor.state().cursor().position
    }

    /// Get the screen cursor position (x, y) from the terminal
    pub fn screen_cursor_position(&mut self) -> (u16, u16) {
        let pos = self.terminal.get_cursor_position().unwrap_or_default();
        (pos.x, pos.y)
    }

    pub fn get_status_bar(&self) -> String {
        self.get_row_text(layout::status_bar_row(self.term_height as usize) as u16)
    }

    pub fn get_prompt_line(&self) -> String {
        self.get_row_text(layout::prompt_line_row(self.term_height as usize) as u16)
    }

    /// Whether the buffer has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.editor.state().is_dirty()
    }
}
