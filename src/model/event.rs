use crate::model::buffer::{Buffer, BufferChange, BufferError, Position};

/// An atomic, invertible buffer mutation
///
/// Events are the only way buffer content changes. Each one carries enough
/// information to build its own inverse, so history never has to consult the
/// buffer to undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Insert text at a position
    Insert { position: Position, text: String },

    /// Delete a range of text
    Delete {
        start: Position,
        end: Position,
        deleted_text: String,
    },
}

impl Event {
    /// Build a delete event for `start..end`, capturing the text it removes
    pub fn delete(buffer: &Buffer, start: Position, end: Position) -> Result<Self, BufferError> {
        Ok(Self::Delete {
            start,
            end,
            deleted_text: buffer.text_range(start, end)?,
        })
    }

    /// Returns the inverse event for undo functionality
    pub fn inverse(&self) -> Self {
        match self {
            Self::Insert { position, text } => Self::Delete {
                start: *position,
                end: position.advanced_by(text),
                deleted_text: text.clone(),
            },
            Self::Delete {
                start,
                deleted_text,
                ..
            } => Self::Insert {
                position: *start,
                text: deleted_text.clone(),
            },
        }
    }

    /// Whether applying this event would leave the buffer unchanged
    pub fn is_noop(&self) -> bool {
        match self {
            Self::Insert { text, .. } => text.is_empty(),
            Self::Delete { start, end, .. } => start == end,
        }
    }

    /// Position where the event starts
    pub fn start(&self) -> Position {
        match self {
            Self::Insert { position, .. } => *position,
            Self::Delete { start, .. } => *start,
        }
    }

    pub(crate) fn apply_to(&self, buffer: &mut Buffer) -> Result<BufferChange, BufferError> {
        match self {
            Self::Insert { position, text } => buffer.insert(*position, text),
            Self::Delete {
                start,
                end,
                deleted_text,
            } => {
                let (removed, change) = buffer.delete(*start, *end)?;
                debug_assert_eq!(&removed, deleted_text, "delete event out of sync with buffer");
                Ok(change)
            }
        }
    }
}
