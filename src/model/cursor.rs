//! Cursor and selection tracking
//!
//! A cursor is a position plus an optional selection anchor. The selection
//! runs between the anchor and the position in whatever direction the user
//! extended it; [`Cursor::selection`] normalizes it to document order.

use crate::model::buffer::{Buffer, BufferChange, Position};

/// Cursor movements the editor can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
    DocumentStart,
    DocumentEnd,
}

impl Movement {
    fn is_vertical(self) -> bool {
        matches!(
            self,
            Self::Up | Self::Down | Self::PageUp | Self::PageDown
        )
    }
}

/// The single editing cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Where edits happen (the selection head)
    pub position: Position,

    /// Fixed end of the selection, if any
    pub anchor: Option<Position>,

    /// Column to return to when moving vertically across shorter lines
    pub sticky_column: Option<usize>,
}

impl Cursor {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            anchor: None,
            sticky_column: None,
        }
    }

    /// A cursor with `anchor..head` selected and the caret at `head`
    pub fn with_selection(anchor: Position, head: Position) -> Self {
        Self {
            position: head,
            anchor: (anchor != head).then_some(anchor),
            sticky_column: None,
        }
    }

    /// Normalized `(start, end)` of the selection, if one is active
    pub fn selection(&self) -> Option<(Position, Position)> {
        let anchor = self.anchor?;
        if anchor == self.position {
            None
        } else if anchor < self.position {
            Some((anchor, self.position))
        } else {
            Some((self.position, anchor))
        }
    }

    pub fn has_selection(&self) -> bool {
        self.selection().is_some()
    }

    pub fn is_valid(&self, buffer: &Buffer) -> bool {
        buffer.is_valid(self.position) && self.anchor.is_none_or(|anchor| buffer.is_valid(anchor))
    }

    /// Jump to `pos` (clamped into the buffer), dropping any selection
    pub fn move_to(&mut self, buffer: &Buffer, pos: Position) {
        self.position = buffer.clamp(pos);
        self.anchor = None;
        self.sticky_column = None;
    }

    /// Move by a line and column delta, clamping at the buffer edges
    ///
    /// Columns never wrap onto neighbouring lines.
    pub fn move_by(&mut self, buffer: &Buffer, delta_lines: isize, delta_columns: isize) {
        let line = self.position.line.saturating_add_signed(delta_lines);
        let column = self.position.column.saturating_add_signed(delta_columns);
        self.move_to(buffer, Position::new(line, column));
    }

    /// Move the head to `pos`, starting a selection at the old position if
    /// there was none
    pub fn extend_selection(&mut self, buffer: &Buffer, pos: Position) {
        if self.anchor.is_none() {
            self.anchor = Some(self.position);
        }
        self.position = buffer.clamp(pos);
        self.sticky_column = None;
        self.drop_empty_selection();
    }

    pub fn collapse_selection(&mut self) {
        self.anchor = None;
    }

    /// Select `anchor..head`, leaving the caret at `head`
    pub fn select(&mut self, buffer: &Buffer, anchor: Position, head: Position) {
        self.anchor = Some(buffer.clamp(anchor));
        self.position = buffer.clamp(head);
        self.sticky_column = None;
        self.drop_empty_selection();
    }

    /// Apply a navigation command
    ///
    /// `page` is the number of lines a page movement covers. With `extend`
    /// the selection grows from its anchor; without it, a horizontal move
    /// over an active selection collapses to the selection edge.
    pub fn apply_movement(&mut self, buffer: &Buffer, movement: Movement, page: usize, extend: bool) {
        if !extend {
            if let Some((start, end)) = self.selection() {
                match movement {
                    Movement::Left => {
                        self.move_to(buffer, start);
                        return;
                    }
                    Movement::Right => {
                        self.move_to(buffer, end);
                        return;
                    }
                    _ => {}
                }
            }
        }

        let pos = self.position;
        let last_line = buffer.line_count() - 1;
        let target = match movement {
            Movement::Left => Position::new(pos.line, pos.column.saturating_sub(1)),
            Movement::Right => Position::new(pos.line, (pos.column + 1).min(buffer.line_len(pos.line))),
            Movement::Up => self.vertical_target(buffer, pos.line.saturating_sub(1)),
            Movement::Down => self.vertical_target(buffer, (pos.line + 1).min(last_line)),
            Movement::PageUp => self.vertical_target(buffer, pos.line.saturating_sub(page)),
            Movement::PageDown => self.vertical_target(buffer, (pos.line + page).min(last_line)),
            Movement::LineStart => Position::new(pos.line, 0),
            Movement::LineEnd => Position::new(pos.line, buffer.line_len(pos.line)),
            Movement::DocumentStart => Position::default(),
            Movement::DocumentEnd => buffer.end_position(),
        };

        let sticky = if movement.is_vertical() {
            Some(self.sticky_column.unwrap_or(pos.column))
        } else {
            None
        };

        if extend {
            self.extend_selection(buffer, target);
        } else {
            self.move_to(buffer, target);
        }
        self.sticky_column = sticky;
    }

    /// Keep the cursor on the same text after a buffer edit
    pub fn adjust_for_edit(&mut self, change: &BufferChange) {
        self.position = change.adjust(self.position);
        self.anchor = self.anchor.map(|anchor| change.adjust(anchor));
        self.sticky_column = None;
        self.drop_empty_selection();
    }

    fn vertical_target(&self, buffer: &Buffer, line: usize) -> Position {
        let preferred = self.sticky_column.unwrap_or(self.position.column);
        Position::new(line, preferred.min(buffer.line_len(line)))
    }

    fn drop_empty_selection(&mut self) {
        if self.anchor == Some(self.position) {
            self.anchor = None;
        }
    }
}
