use crate::model::buffer::Buffer;
use crate::model::cursor::Cursor;
use unicode_width::UnicodeWidthChar;

/// Display width of one character at display column `column`
///
/// Tabs advance to the next multiple of `tab_size`; control characters and
/// zero-width marks take no space.
pub fn char_display_width(ch: char, column: usize, tab_size: usize) -> usize {
    if ch == '\t' {
        let tab_size = tab_size.max(1);
        tab_size - (column % tab_size)
    } else {
        ch.width().unwrap_or(0)
    }
}

/// Display column of the char at `char_column` in `line`
pub fn display_column(line: &str, char_column: usize, tab_size: usize) -> usize {
    line.chars()
        .take(char_column)
        .fold(0, |col, ch| col + char_display_width(ch, col, tab_size))
}

/// The viewport - what portion of the buffer is visible
#[derive(Debug, Clone)]
pub struct Viewport {
    /// First visible buffer line
    pub top_line: usize,

    /// Left display column (horizontal scroll position)
    pub left_column: usize,

    /// Text area dimensions, excluding the gutter
    pub width: u16,
    pub height: u16,

    /// Lines to keep visible above/below cursor
    pub scroll_offset: usize,

    /// Columns to keep visible left/right of cursor
    pub horizontal_scroll_offset: usize,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            top_line: 0,
            left_column: 0,
            width,
            height,
            scroll_offset: 3,
            horizontal_scroll_offset: 5,
        }
    }

    pub fn set_scroll_offset(&mut self, offset: usize) {
        self.scroll_offset = offset;
    }

    /// Update text area dimensions
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Get the number of visible lines
    pub fn visible_line_count(&self) -> usize {
        self.height as usize
    }

    /// Buffer lines currently on screen
    pub fn visible_range(&self, buffer: &Buffer) -> std::ops::Range<usize> {
        let end = (self.top_line + self.visible_line_count()).min(buffer.line_count());
        self.top_line.min(end)..end
    }

    /// Back to the top-left corner, e.g. after loading a new file
    pub fn reset(&mut self) {
        self.top_line = 0;
        self.left_column = 0;
    }

    /// Scroll so the cursor is on screen with `scroll_offset` lines of context
    pub fn ensure_visible(&mut self, buffer: &Buffer, cursor: &Cursor, tab_size: usize) {
        let height = self.visible_line_count();
        if height == 0 {
            return;
        }
        let line = cursor.position.line;

        // Shrink the context margin on tiny viewports so it can't oscillate
        let offset = self.scroll_offset.min(height.saturating_sub(1) / 2);

        if line < self.top_line + offset {
            self.top_line = line.saturating_sub(offset);
        } else if line + offset >= self.top_line + height {
            self.top_line = line + offset + 1 - height;
        }

        // Never scroll past the point where the last line sits at the bottom
        let max_top = buffer.line_count().saturating_sub(height);
        self.top_line = self.top_line.min(max_top.max(line.saturating_sub(height - 1)));

        self.ensure_column_visible(buffer, cursor, tab_size);
    }

    /// Scroll horizontally so the cursor column is on screen
    pub fn ensure_column_visible(&mut self, buffer: &Buffer, cursor: &Cursor, tab_size: usize) {
        let width = self.width as usize;
        if width == 0 {
            return;
        }
        let text = buffer.line_text(cursor.position.line).unwrap_or_default();
        let column = display_column(text, cursor.position.column, tab_size);
        let offset = self.horizontal_scroll_offset.min(width.saturating_sub(1) / 2);

        if column < self.left_column + offset {
            self.left_column = column.saturating_sub(offset);
        } else if column + offset >= self.left_column + width {
            self.left_column = column + offset + 1 - width;
        }
    }

    /// Screen position (x, y) of the cursor relative to the text area, if visible
    pub fn cursor_screen_position(
        &self,
        buffer: &Buffer,
        cursor: &Cursor,
        tab_size: usize,
    ) -> Option<(u16, u16)> {
        let line = cursor.position.line;
        if line < self.top_line || line >= self.top_line + self.visible_line_count() {
            return None;
        }
        let text = buffer.line_text(line).unwrap_or_default();
        let column = display_column(text, cursor.position.column, tab_size);
        if column < self.left_column || column >= self.left_column + self.width as usize {
            return None;
        }
        Some((
            (column - self.left_column) as u16,
            (line - self.top_line) as u16,
        ))
    }
}
