use crate::model::buffer::{Buffer, BufferChange, BufferView, Position};
use crate::model::cursor::{Cursor, Movement};
use crate::model::event::Event;
use crate::model::history::{EditKind, History};
use crate::model::search::{SearchMatch, SearchState};
use std::ops::Range;

/// What changed as the result of one editing command
///
/// The event loop uses it to decide how much of the screen and highlight
/// cache to refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderHint {
    /// Buffer changes in the order they were applied
    pub changes: Vec<BufferChange>,
    /// Cursor position after the command
    pub cursor: Position,
    /// Whether the buffer now differs from the last save
    pub dirty: bool,
    /// Everything needs repainting (new buffer, search highlights changed)
    pub full_redraw: bool,
}

impl RenderHint {
    /// Smallest line range covering every changed line, in post-edit indices
    pub fn changed_lines(&self) -> Option<Range<usize>> {
        let mut changes = self.changes.iter().map(BufferChange::changed_lines);
        let first = changes.next()?;
        Some(changes.fold(first, |acc, r| acc.start.min(r.start)..acc.end.max(r.end)))
    }

    /// Whether any change added or removed lines
    pub fn lines_shifted(&self) -> bool {
        self.changes.iter().any(|c| c.line_delta() != 0)
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// The complete editing state of one buffer
///
/// Every mutation goes through [`EditorState::commit`], which records it in
/// the history, moves the cursor and re-runs the active search.
pub struct EditorState {
    buffer: Buffer,
    cursor: Cursor,
    history: History,
    search: SearchState,

    /// Lines moved by Page Up/Down
    page_lines: usize,
}

impl EditorState {
    /// Create a new editor state with an empty buffer
    pub fn new(page_lines: usize, coalesce_limit: usize) -> Self {
        Self::with_buffer(Buffer::new(), page_lines, coalesce_limit)
    }

    pub fn with_buffer(buffer: Buffer, page_lines: usize, coalesce_limit: usize) -> Self {
        Self {
            buffer,
            cursor: Cursor::default(),
            history: History::new(coalesce_limit),
            search: SearchState::default(),
            page_lines: page_lines.max(1),
        }
    }

    pub fn buffer(&self) -> BufferView<'_> {
        self.buffer.view()
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_dirty(&self) -> bool {
        self.history.is_dirty()
    }

    pub fn page_lines(&self) -> usize {
        self.page_lines
    }

    /// Follow the viewport height for page movements
    pub fn set_page_lines(&mut self, page_lines: usize) {
        self.page_lines = page_lines.max(1);
    }

    /// Swap in freshly loaded content, resetting cursor, history and search
    pub fn replace_contents(&mut self, buffer: Buffer) -> RenderHint {
        self.buffer = buffer;
        self.cursor = Cursor::default();
        self.history.clear();
        self.search.clear();
        tracing::debug!("buffer replaced: {} lines", self.buffer.line_count());
        RenderHint {
            full_redraw: true,
            ..self.hint(Vec::new())
        }
    }

    /// Hint describing the current state without any buffer change
    pub fn current_hint(&self) -> RenderHint {
        self.hint(Vec::new())
    }

    /// Record that the buffer was written to disk
    pub fn mark_saved(&mut self) {
        self.history.mark_saved();
    }

    pub fn move_cursor(&mut self, movement: Movement, extend: bool) -> RenderHint {
        self.history.break_coalescing();
        self.cursor
            .apply_movement(&self.buffer, movement, self.page_lines, extend);
        self.hint(Vec::new())
    }

    /// Jump to a position, clamped into the buffer
    pub fn move_to(&mut self, pos: Position) -> RenderHint {
        self.history.break_coalescing();
        self.cursor.move_to(&self.buffer, pos);
        self.hint(Vec::new())
    }

    /// Type one character, replacing the selection if there is one
    pub fn insert_char(&mut self, ch: char) -> RenderHint {
        if ch == '\n' {
            return self.insert_newline();
        }
        let mut events = self.selection_delete().into_iter().collect::<Vec<_>>();
        let position = self.edit_start();
        events.push(Event::Insert {
            position,
            text: ch.to_string(),
        });
        self.commit(events, EditKind::Typing)
    }

    pub fn insert_newline(&mut self) -> RenderHint {
        self.insert_text("\n")
    }

    /// Insert a block of text as a single undo step
    pub fn insert_text(&mut self, text: &str) -> RenderHint {
        let mut events = self.selection_delete().into_iter().collect::<Vec<_>>();
        let position = self.edit_start();
        events.push(Event::Insert {
            position,
            text: text.to_string(),
        });
        self.commit(events, EditKind::Other)
    }

    /// Backspace: delete the selection, or the character before the cursor
    ///
    /// At the start of a line this joins it onto the previous line.
    pub fn delete_backward(&mut self) -> RenderHint {
        if let Some(event) = self.selection_delete() {
            return self.commit(vec![event], EditKind::Other);
        }
        let end = self.cursor.position;
        let start = if end.column > 0 {
            Position::new(end.line, end.column - 1)
        } else if end.line > 0 {
            Position::new(end.line - 1, self.buffer.line_len(end.line - 1))
        } else {
            self.history.break_coalescing();
            return self.hint(Vec::new());
        };
        self.delete_range(start, end)
    }

    /// Delete: remove the selection, or the character under the cursor
    ///
    /// At the end of a line this joins the next line onto it.
    pub fn delete_forward(&mut self) -> RenderHint {
        if let Some(event) = self.selection_delete() {
            return self.commit(vec![event], EditKind::Other);
        }
        let start = self.cursor.position;
        let end = if start.column < self.buffer.line_len(start.line) {
            Position::new(start.line, start.column + 1)
        } else if start.line + 1 < self.buffer.line_count() {
            Position::new(start.line + 1, 0)
        } else {
            self.history.break_coalescing();
            return self.hint(Vec::new());
        };
        self.delete_range(start, end)
    }

    /// Delete an explicit range (clamped into the buffer)
    pub fn delete_range(&mut self, start: Position, end: Position) -> RenderHint {
        let (start, end) = {
            let a = self.buffer.clamp(start);
            let b = self.buffer.clamp(end);
            (a.min(b), a.max(b))
        };
        match Event::delete(&self.buffer, start, end) {
            Ok(event) => self.commit(vec![event], EditKind::Other),
            Err(e) => {
                tracing::error!("delete {}..{} rejected: {}", start, end, e);
                self.hint(Vec::new())
            }
        }
    }

    /// Undo the last transaction; `None` when there is nothing to undo
    pub fn undo(&mut self) -> Option<RenderHint> {
        let result = self.history.undo(&mut self.buffer, &mut self.cursor);
        self.after_history_step("undo", result)
    }

    /// Redo the last undone transaction; `None` when there is nothing to redo
    pub fn redo(&mut self) -> Option<RenderHint> {
        let result = self.history.redo(&mut self.buffer, &mut self.cursor);
        self.after_history_step("redo", result)
    }

    /// Start, change or (with an empty query) clear the search
    pub fn set_search_query(&mut self, query: &str) -> RenderHint {
        self.search.set_query(&self.buffer, query);
        RenderHint {
            full_redraw: true,
            ..self.hint(Vec::new())
        }
    }

    /// Move to and select the next match
    pub fn find_next(&mut self) -> Option<SearchMatch> {
        let found = self.search.find_next(self.cursor.position);
        self.select_match(found)
    }

    /// Move to and select the previous match
    pub fn find_previous(&mut self) -> Option<SearchMatch> {
        let from = self
            .cursor
            .selection()
            .map_or(self.cursor.position, |(start, _)| start);
        let found = self.search.find_previous(from);
        self.select_match(found)
    }

    fn select_match(&mut self, found: Option<SearchMatch>) -> Option<SearchMatch> {
        self.history.break_coalescing();
        let found = found?;
        // Caret at the match start, selection spanning the match
        self.cursor.select(&self.buffer, found.end(), found.start());
        Some(found)
    }

    fn after_history_step(
        &mut self,
        what: &str,
        result: Result<Option<Vec<BufferChange>>, crate::model::buffer::BufferError>,
    ) -> Option<RenderHint> {
        match result {
            Ok(Some(changes)) => {
                self.search.refresh(&self.buffer, &changes);
                Some(self.hint(changes))
            }
            Ok(None) => None,
            Err(e) => {
                tracing::error!("{} failed: {}", what, e);
                debug_assert!(false, "{what} failed: {e}");
                Some(self.hint(Vec::new()))
            }
        }
    }

    /// Delete event for the active selection, if any
    fn selection_delete(&self) -> Option<Event> {
        let (start, end) = self.cursor.selection()?;
        Event::delete(&self.buffer, start, end).ok()
    }

    /// Where inserted text lands: the selection start, or the cursor
    fn edit_start(&self) -> Position {
        self.cursor
            .selection()
            .map_or(self.cursor.position, |(start, _)| start)
    }

    /// The single mutation path: apply, record and re-run the search
    fn commit(&mut self, events: Vec<Event>, kind: EditKind) -> RenderHint {
        match self
            .history
            .apply(&mut self.buffer, &mut self.cursor, events, kind)
        {
            Ok(changes) => {
                self.search.refresh(&self.buffer, &changes);
                debug_assert!(self.cursor.is_valid(&self.buffer));
                self.hint(changes)
            }
            Err(e) => {
                tracing::error!("edit rejected: {}", e);
                debug_assert!(false, "edit rejected: {e}");
                self.hint(Vec::new())
            }
        }
    }

    fn hint(&self, changes: Vec<BufferChange>) -> RenderHint {
        RenderHint {
            changes,
            cursor: self.cursor.position,
            dirty: self.history.is_dirty(),
            full_redraw: false,
        }
    }
}
