//! Opening and saving files

use super::{Editor, UNTITLED_FILE_NAME};
use crate::model::buffer::{Buffer, Position};
use crate::primitives::highlighter::Language;
use crate::state::RenderHint;
use std::path::Path;

impl Editor {
    /// Load `path` into the editor
    ///
    /// A missing file starts an empty buffer bound to the path. Any other
    /// read failure leaves the current buffer untouched.
    pub fn open_file(&mut self, path: &Path) -> RenderHint {
        let path = if path.is_relative() {
            self.working_dir.join(path)
        } else {
            path.to_path_buf()
        };

        let buffer = match self.filesystem.load(&path) {
            Ok(text) => Buffer::from_text(&text),
            Err(e) if e.is_not_found() => {
                tracing::info!("{} does not exist yet, starting empty", path.display());
                Buffer::new()
            }
            Err(e) => {
                tracing::warn!("open failed: {}", e);
                self.set_status_message(format!("Error loading file: {}", e));
                return self.state.current_hint();
            }
        };

        tracing::info!(
            "opened {} ({} lines, {})",
            path.display(),
            buffer.line_count(),
            buffer.line_ending().display_name()
        );

        let hint = self.state.replace_contents(buffer);
        self.language = Language::from_path(&path);
        self.file_path = Some(path);
        self.highlight_cache.reset(self.state.buffer().line_count());
        self.viewport.reset();
        self.status_message = None;
        hint
    }

    /// Write the buffer to its file, or to `untitled.txt` in the working directory
    pub fn save(&mut self) {
        let path = match &self.file_path {
            Some(path) => path.clone(),
            None => self.working_dir.join(UNTITLED_FILE_NAME),
        };

        let line_ending = self
            .config
            .editor
            .line_ending
            .resolve(self.state.buffer().line_ending());
        let text = self.state.buffer().serialize(line_ending);

        match self.filesystem.save(&path, &text) {
            Ok(()) => {
                tracing::info!("saved {} ({} bytes)", path.display(), text.len());
                self.state.mark_saved();
                if self.file_path.is_none() {
                    self.language = Language::from_path(&path);
                    self.highlight_cache
                        .reset(self.state.buffer().line_count());
                }
                self.set_status_message(format!("Saved: {}", path.display()));
                self.file_path = Some(path);
            }
            Err(e) => {
                tracing::error!("save failed: {}", e);
                self.set_status_message(format!("Error saving: {}", e));
            }
        }
    }

    /// Place the cursor at a one-based line and column, clamped into the buffer
    pub fn goto(&mut self, line: usize, column: usize) -> RenderHint {
        let target = Position::new(line.saturating_sub(1), column.saturating_sub(1));
        let hint = self.state.move_to(target);
        self.sync_viewport();
        hint
    }
}
