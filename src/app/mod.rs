//! The editor session
//!
//! [`Editor`] owns one [`EditorState`] plus everything around it: the file
//! it is bound to, highlighting, the viewport, the prompt and status line.
//! Key presses become [`Command`]s, and each command runs through
//! [`Editor::handle_command`].

mod file_operations;
mod input;
mod render;

use crate::config::Config;
use crate::input::commands::Command;
use crate::input::keybindings::{Action, KeyContext, KeybindingResolver};
use crate::model::filesystem::{FileSystem, StdFileSystem};
use crate::model::search::SearchMatch;
use crate::primitives::highlighter::{HighlighterRegistry, Language, LineHighlightCache};
use crate::state::{EditorState, RenderHint};
use crate::view::prompt::Prompt;
use crate::view::theme::Theme;
use crate::view::viewport::Viewport;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Rows reserved below the text area: status bar and message/prompt line
const CHROME_ROWS: u16 = 2;

/// Name shown for a buffer with no file
pub const UNTITLED_NAME: &str = "Untitled";

/// File name used when saving a buffer that has no path yet
pub const UNTITLED_FILE_NAME: &str = "untitled.txt";

pub struct Editor {
    config: Config,

    /// Buffer, cursor, history and search
    state: EditorState,

    /// File the buffer is bound to; `None` for an untitled buffer
    file_path: Option<PathBuf>,
    language: Language,

    highlighters: HighlighterRegistry,
    highlight_cache: LineHighlightCache,

    viewport: Viewport,
    theme: Theme,
    keybindings: KeybindingResolver,
    filesystem: Arc<dyn FileSystem>,

    /// Terminal dimensions
    terminal_width: u16,
    terminal_height: u16,

    status_message: Option<String>,
    prompt: Option<Prompt>,

    should_quit: bool,
    /// Set by a Quit refused because of unsaved changes; the next Quit exits
    quit_pending: bool,

    /// Directory untitled buffers are saved into
    working_dir: PathBuf,
}

impl Editor {
    /// Create a new editor with the given configuration and terminal dimensions
    pub fn new(config: Config, width: u16, height: u16) -> Self {
        Self::with_working_dir(config, width, height, None)
    }

    /// Create a new editor with an explicit working directory
    /// If working_dir is None, uses the current working directory
    pub fn with_working_dir(
        config: Config,
        width: u16,
        height: u16,
        working_dir: Option<PathBuf>,
    ) -> Self {
        Self::with_filesystem(config, width, height, working_dir, Arc::new(StdFileSystem))
    }

    /// Create a new editor reading and writing files through `filesystem`
    pub fn with_filesystem(
        config: Config,
        width: u16,
        height: u16,
        working_dir: Option<PathBuf>,
        filesystem: Arc<dyn FileSystem>,
    ) -> Self {
        tracing::info!("Editor::new called with width={}, height={}", width, height);

        let working_dir = working_dir
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

        let theme = Theme::from_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!("Unknown theme '{}', using default", config.theme);
            Theme::default()
        });

        let highlighters = if config.editor.syntax_highlighting {
            HighlighterRegistry::with_defaults()
        } else {
            HighlighterRegistry::new()
        };

        let state = EditorState::new(
            config.editor.page_lines,
            config.editor.undo_coalesce_limit,
        );
        let highlight_cache = LineHighlightCache::new(state.buffer().line_count());

        let mut viewport = Viewport::new(width, height.saturating_sub(CHROME_ROWS));
        viewport.set_scroll_offset(config.editor.scroll_offset);

        let mut editor = Self {
            config,
            state,
            file_path: None,
            language: Language::PlainText,
            highlighters,
            highlight_cache,
            viewport,
            theme,
            keybindings: KeybindingResolver::new(),
            filesystem,
            terminal_width: width,
            terminal_height: height,
            status_message: None,
            prompt: None,
            should_quit: false,
            quit_pending: false,
            working_dir,
        };
        editor.sync_viewport();
        editor
    }

    /// Run one command through the engine and refresh everything that depends on it
    pub fn handle_command(&mut self, command: Command) -> RenderHint {
        tracing::debug!("command: {}", command.name());
        if command != Command::Quit {
            self.quit_pending = false;
        }

        let hint = match command {
            Command::MoveCursor { movement, extend } => self.state.move_cursor(movement, extend),
            Command::InsertChar(ch) => self.state.insert_char(ch),
            Command::InsertNewline => self.state.insert_newline(),
            Command::DeleteBackward => self.state.delete_backward(),
            Command::DeleteForward => self.state.delete_forward(),
            Command::Undo => self.state.undo().unwrap_or_else(|| {
                self.set_status_message("Nothing to undo".to_string());
                self.state.current_hint()
            }),
            Command::Redo => self.state.redo().unwrap_or_else(|| {
                self.set_status_message("Nothing to redo".to_string());
                self.state.current_hint()
            }),
            Command::SetSearchQuery(query) => {
                let hint = self.state.set_search_query(&query);
                self.report_match_count();
                hint
            }
            Command::FindNext => {
                let found = self.state.find_next();
                self.report_match(found);
                self.state.current_hint()
            }
            Command::FindPrevious => {
                let found = self.state.find_previous();
                self.report_match(found);
                self.state.current_hint()
            }
            Command::Save => {
                self.save();
                self.state.current_hint()
            }
            Command::Open(path) => self.open_file(&path),
            Command::Quit => {
                self.quit();
                self.state.current_hint()
            }
        };

        for change in &hint.changes {
            self.highlight_cache.invalidate(change);
        }
        self.sync_viewport();
        hint
    }

    /// Request the editor to quit; refused once while there are unsaved changes
    pub fn quit(&mut self) {
        if self.state.is_dirty() && !self.quit_pending {
            tracing::info!("quit refused: unsaved changes");
            self.quit_pending = true;
            let msg = match self.keybindings.describe(&Action::Quit, KeyContext::Normal) {
                Some(key) => format!("Unsaved changes! Press {key} again to quit"),
                None => "Unsaved changes!".to_string(),
            };
            self.set_status_message(msg);
            return;
        }
        tracing::info!("quitting");
        self.should_quit = true;
    }

    /// Check if the editor should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Resize to match new terminal size
    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_width = width;
        self.terminal_height = height;
        self.sync_viewport();
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Set a status message to display on the message line
    pub fn set_status_message(&mut self, message: String) {
        tracing::debug!("status: {}", message);
        self.status_message = Some(message);
    }

    /// File name shown in the status bar
    pub fn display_name(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED_NAME.to_string())
    }

    /// Fit the viewport to the terminal and scroll the cursor into view
    fn sync_viewport(&mut self) {
        let buffer = self.state.buffer();
        let gutter = crate::view::ui::buffer_rendering::gutter_width(
            &buffer,
            self.config.editor.line_numbers,
        ) as u16;
        let height = self.terminal_height.saturating_sub(CHROME_ROWS);
        self.viewport
            .resize(self.terminal_width.saturating_sub(gutter), height);
        self.viewport
            .ensure_visible(&buffer, self.state.cursor(), self.config.editor.tab_size);
        let page_lines = if height > 0 {
            height as usize
        } else {
            self.config.editor.page_lines
        };
        self.state.set_page_lines(page_lines);
    }

    fn report_match_count(&mut self) {
        let search = self.state.search();
        let query = search.query().to_string();
        if query.is_empty() {
            self.status_message = None;
            return;
        }
        let num_matches = search.matches().len();
        let msg = if num_matches == 0 {
            format!("No matches found for '{}'", query)
        } else {
            format!(
                "Found {} match{} for '{}'",
                num_matches,
                if num_matches == 1 { "" } else { "es" },
                query
            )
        };
        self.set_status_message(msg);
    }

    fn report_match(&mut self, found: Option<SearchMatch>) {
        let search = self.state.search();
        let msg = match (found, search.current_index()) {
            (Some(_), Some(index)) => format!("Match {} of {}", index + 1, search.matches().len()),
            _ if search.query().is_empty() => "No active search".to_string(),
            _ => format!("No matches found for '{}'", search.query()),
        };
        self.set_status_message(msg);
    }
}
