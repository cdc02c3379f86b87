//! Undo/redo history
//!
//! History is a pair of stacks of [`Transaction`]s. A transaction is one undo
//! step: the events it applied plus the cursor before and after, so undo and
//! redo put the caret back exactly where the user left it.
//!
//! Modification tracking works like the event log it grew out of: the history
//! remembers the undo depth at which the buffer was last saved, and the buffer
//! is clean exactly when the current depth matches it.

use crate::model::buffer::{Buffer, BufferChange, BufferError};
use crate::model::cursor::Cursor;
use crate::model::event::Event;

/// Default number of typed characters merged into one undo step
pub const DEFAULT_COALESCE_LIMIT: usize = 64;

/// What produced a transaction; only typing is ever coalesced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Typing,
    Other,
}

/// One undo step
#[derive(Debug, Clone)]
pub struct Transaction {
    pub events: Vec<Event>,
    pub cursor_before: Cursor,
    pub cursor_after: Cursor,
    pub kind: EditKind,
    typed_chars: usize,
}

impl Transaction {
    /// Last character of the most recent insert, used for word boundaries
    fn last_typed_char(&self) -> Option<char> {
        match self.events.last()? {
            Event::Insert { text, .. } => text.chars().last(),
            Event::Delete { .. } => None,
        }
    }
}

/// Undo and redo stacks plus the saved marker
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<Transaction>,
    redo_stack: Vec<Transaction>,

    /// Undo depth at the last save; `None` once that state is unreachable
    saved_at: Option<usize>,

    coalesce_limit: usize,

    /// Whether the top transaction may still absorb typed characters
    typing_open: bool,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_COALESCE_LIMIT)
    }
}

impl History {
    pub fn new(coalesce_limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            saved_at: Some(0), // New buffer starts at "saved" state
            coalesce_limit: coalesce_limit.max(1),
            typing_open: false,
        }
    }

    /// Apply `events` in order as one undo step
    ///
    /// The cursor follows every change. If any event fails, the ones already
    /// applied are rolled back, the cursor is restored and the error returned.
    pub fn apply(
        &mut self,
        buffer: &mut Buffer,
        cursor: &mut Cursor,
        events: Vec<Event>,
        kind: EditKind,
    ) -> Result<Vec<BufferChange>, BufferError> {
        let events: Vec<Event> = events.into_iter().filter(|e| !e.is_noop()).collect();
        if events.is_empty() {
            return Ok(Vec::new());
        }

        let cursor_before = *cursor;
        let changes = match apply_all(buffer, &events, cursor) {
            Ok(changes) => changes,
            Err(e) => {
                *cursor = cursor_before;
                return Err(e);
            }
        };

        self.discard_redo();

        if kind == EditKind::Typing && self.try_coalesce(&events, *cursor) {
            tracing::debug!("coalesced typing into undo step {}", self.undo_stack.len());
            return Ok(changes);
        }

        let typed_chars = match kind {
            EditKind::Typing => typed_len(&events),
            EditKind::Other => 0,
        };
        self.undo_stack.push(Transaction {
            events,
            cursor_before,
            cursor_after: *cursor,
            kind,
            typed_chars,
        });
        self.typing_open = kind == EditKind::Typing;
        tracing::debug!("pushed undo step {}", self.undo_stack.len());

        Ok(changes)
    }

    /// Revert the most recent transaction
    ///
    /// Returns `Ok(None)` when there is nothing to undo.
    pub fn undo(
        &mut self,
        buffer: &mut Buffer,
        cursor: &mut Cursor,
    ) -> Result<Option<Vec<BufferChange>>, BufferError> {
        self.typing_open = false;
        let Some(transaction) = self.undo_stack.pop() else {
            return Ok(None);
        };

        let inverses: Vec<Event> = transaction.events.iter().rev().map(Event::inverse).collect();
        let mut scratch = *cursor;
        match apply_all(buffer, &inverses, &mut scratch) {
            Ok(changes) => {
                *cursor = transaction.cursor_before;
                self.redo_stack.push(transaction);
                tracing::debug!("undo to depth {}", self.undo_stack.len());
                Ok(Some(changes))
            }
            Err(e) => {
                self.undo_stack.push(transaction);
                Err(e)
            }
        }
    }

    /// Re-apply the most recently undone transaction
    ///
    /// Returns `Ok(None)` when there is nothing to redo.
    pub fn redo(
        &mut self,
        buffer: &mut Buffer,
        cursor: &mut Cursor,
    ) -> Result<Option<Vec<BufferChange>>, BufferError> {
        self.typing_open = false;
        let Some(transaction) = self.redo_stack.pop() else {
            return Ok(None);
        };

        let mut scratch = *cursor;
        match apply_all(buffer, &transaction.events, &mut scratch) {
            Ok(changes) => {
                *cursor = transaction.cursor_after;
                self.undo_stack.push(transaction);
                tracing::debug!("redo to depth {}", self.undo_stack.len());
                Ok(Some(changes))
            }
            Err(e) => {
                self.redo_stack.push(transaction);
                Err(e)
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Current undo depth
    pub fn depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Mark the current position as the saved point
    pub fn mark_saved(&mut self) {
        self.saved_at = Some(self.undo_stack.len());
        self.typing_open = false;
    }

    /// True when the buffer differs from what was last saved
    pub fn is_dirty(&self) -> bool {
        self.saved_at != Some(self.undo_stack.len())
    }

    /// End the current typing run so the next keystroke starts a new step
    pub fn break_coalescing(&mut self) {
        self.typing_open = false;
    }

    /// Forget everything; the current buffer becomes the saved state
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.saved_at = Some(0);
        self.typing_open = false;
    }

    pub fn set_coalesce_limit(&mut self, limit: usize) {
        self.coalesce_limit = limit.max(1);
    }

    fn discard_redo(&mut self) {
        if self.redo_stack.is_empty() {
            return;
        }
        self.redo_stack.clear();
        if self.saved_at.is_some_and(|saved| saved > self.undo_stack.len()) {
            self.saved_at = None;
        }
    }

    /// Merge a single typed character into the open typing step
    fn try_coalesce(&mut self, events: &[Event], cursor_after: Cursor) -> bool {
        if !self.typing_open {
            return false;
        }
        let [Event::Insert { position, text }] = events else {
            return false;
        };
        let mut chars = text.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return false;
        };
        if ch == '\n' {
            return false;
        }

        let limit = self.coalesce_limit;
        let Some(top) = self.undo_stack.last_mut() else {
            return false;
        };
        if top.kind != EditKind::Typing
            || top.typed_chars >= limit
            || top.cursor_after.position != *position
        {
            return false;
        }
        // A word starts a new step
        if !ch.is_whitespace() && top.last_typed_char().is_some_and(char::is_whitespace) {
            return false;
        }

        match top.events.last_mut() {
            Some(Event::Insert {
                position: last_position,
                text: last_text,
            }) if last_position.advanced_by(last_text) == *position => last_text.push(ch),
            _ => top.events.push(events[0].clone()),
        }
        top.typed_chars += 1;
        top.cursor_after = cursor_after;
        true
    }
}

fn typed_len(events: &[Event]) -> usize {
    events
        .iter()
        .map(|event| match event {
            Event::Insert { text, .. } => text.chars().count(),
            Event::Delete { .. } => 0,
        })
        .sum()
}

/// Apply events in order, moving the cursor with each change
///
/// On failure the already-applied events are reverted so the buffer is left
/// as it was.
fn apply_all(
    buffer: &mut Buffer,
    events: &[Event],
    cursor: &mut Cursor,
) -> Result<Vec<BufferChange>, BufferError> {
    let mut changes = Vec::with_capacity(events.len());
    for (i, event) in events.iter().enumerate() {
        match event.apply_to(buffer) {
            Ok(change) => {
                cursor.adjust_for_edit(&change);
                changes.push(change);
            }
            Err(e) => {
                tracing::error!("failed to apply {:?}: {}", event, e);
                for applied in events[..i].iter().rev() {
                    if let Err(rollback) = applied.inverse().apply_to(buffer) {
                        tracing::error!("rollback failed: {}", rollback);
                    }
                }
                return Err(e);
            }
        }
    }
    Ok(changes)
}
