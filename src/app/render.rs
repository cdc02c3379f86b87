use super::Editor;
use crate::view::ui::{BufferRenderInput, BufferRenderer, StatusBarRenderer, StatusInfo};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

impl Editor {
    /// Render the editor to the terminal
    pub fn render(&mut self, frame: &mut Frame) {
        let _span = tracing::trace_span!("render").entered();
        let size = frame.area();

        // [text area, status bar, message/prompt line]
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(size);

        if size.width != self.terminal_width || size.height != self.terminal_height {
            self.resize(size.width, size.height);
        }

        self.prepare_highlights();

        let editor_config = &self.config.editor;
        let buffer = self.state.buffer();
        let input = BufferRenderInput {
            buffer: &buffer,
            cursor: self.state.cursor(),
            search: self.state.search(),
            highlights: &self.highlight_cache,
            viewport: &self.viewport,
            theme: &self.theme,
            tab_size: editor_config.tab_size,
            line_numbers: editor_config.line_numbers,
        };
        let cursor_position = BufferRenderer::render(frame, chunks[0], &input);

        let display_name = self.display_name();
        let info = StatusInfo {
            display_name: &display_name,
            modified: self.state.is_dirty(),
            cursor: self.state.cursor().position,
            language: self.language,
            line_ending: buffer.line_ending(),
        };
        StatusBarRenderer::render_status_bar(frame, chunks[1], &info, &self.theme);

        match &self.prompt {
            Some(prompt) => StatusBarRenderer::render_prompt(frame, chunks[2], prompt, &self.theme),
            None => {
                StatusBarRenderer::render_message(
                    frame,
                    chunks[2],
                    self.status_message.as_deref(),
                    &self.theme,
                );
                if let Some(position) = cursor_position {
                    frame.set_cursor_position(position);
                }
            }
        }
    }

    /// Tokenize the visible lines plus a margin on either side
    fn prepare_highlights(&mut self) {
        if !self.config.editor.syntax_highlighting {
            return;
        }
        let buffer = self.state.buffer();
        let visible = self.viewport.visible_range(&buffer);
        let margin = self.config.editor.highlight_margin_lines;
        let range = visible.start.saturating_sub(margin)..visible.end + margin;
        self.highlight_cache
            .ensure(&buffer, range, &self.highlighters, self.language);
    }
}
