//! Line-oriented text storage
//!
//! The buffer is an ordered list of lines with their terminators stripped.
//! It always holds at least one line, so an empty document is a single empty
//! line. Columns are counted in `char`s, never bytes.
//!
//! Mutation goes through [`Buffer::insert`] and [`Buffer::delete`], both of
//! which are crate-private: outside code edits the buffer by applying
//! [`Event`](crate::model::event::Event)s through the editor state, and reads
//! it through a [`BufferView`].

use std::fmt;
use std::ops::{Deref, Range};

/// A location in the buffer: zero-based line and zero-based char column.
///
/// Ordering is document order (line first, then column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The position just past `text` if `text` were inserted here.
    pub fn advanced_by(self, text: &str) -> Self {
        match text.rfind('\n') {
            None => Self::new(self.line, self.column + text.chars().count()),
            Some(last_newline) => Self::new(
                self.line + text.matches('\n').count(),
                text[last_newline + 1..].chars().count(),
            ),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Line ending format used when the buffer is serialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix/Linux/Mac format (\n)
    #[default]
    LF,
    /// Windows format (\r\n)
    CRLF,
}

impl LineEnding {
    /// Get the string representation of this line ending
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LF => "\n",
            Self::CRLF => "\r\n",
        }
    }

    /// Get the display name for status bar
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::LF => "LF",
            Self::CRLF => "CRLF",
        }
    }

    /// Detect the line ending format of `text`
    ///
    /// Looks at the first 8KB and picks CRLF only when it outnumbers bare LF.
    pub fn detect(text: &str) -> Self {
        let sample = &text.as_bytes()[..text.len().min(8 * 1024)];

        let mut crlf_count = 0;
        let mut lf_only_count = 0;
        for (i, byte) in sample.iter().enumerate() {
            if *byte == b'\n' {
                if i > 0 && sample[i - 1] == b'\r' {
                    crlf_count += 1;
                } else {
                    lf_only_count += 1;
                }
            }
        }

        if crlf_count > lf_only_count {
            Self::CRLF
        } else {
            Self::LF
        }
    }
}

/// Errors reported by buffer operations.
///
/// Both variants mean the caller computed a coordinate that does not exist in
/// the current buffer, which is a bug in the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// A position outside the buffer bounds
    InvalidPosition {
        position: Position,
        line_count: usize,
    },
    /// A range whose end comes before its start
    InvalidRange { start: Position, end: Position },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPosition {
                position,
                line_count,
            } => write!(
                f,
                "invalid position {position} (buffer has {line_count} lines)"
            ),
            Self::InvalidRange { start, end } => {
                write!(f, "invalid range {start}..{end}: end precedes start")
            }
        }
    }
}

impl std::error::Error for BufferError {}

/// Description of one applied mutation
///
/// An insert has `old_end == start`; a delete has `new_end == start`. The
/// change is all the cursor tracker, search engine and highlight cache need to
/// re-synchronize with the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferChange {
    /// Where the edit starts
    pub start: Position,
    /// End of the replaced region, in pre-edit coordinates
    pub old_end: Position,
    /// End of the new content, in post-edit coordinates
    pub new_end: Position,
}

impl BufferChange {
    /// Net change in line count
    pub fn line_delta(&self) -> isize {
        self.new_end.line as isize - self.old_end.line as isize
    }

    /// Net column shift for text that followed the edit on its last line
    pub fn column_delta(&self) -> isize {
        self.new_end.column as isize - self.old_end.column as isize
    }

    /// Lines whose content changed, in post-edit indices
    pub fn changed_lines(&self) -> Range<usize> {
        self.start.line..self.new_end.line + 1
    }

    /// Map a pre-edit position to where the same text sits after the edit.
    ///
    /// Positions before the edit are untouched, positions strictly inside a
    /// deleted region collapse to its start, and everything at or after the
    /// old end moves with the text that followed the edit.
    pub fn adjust(&self, pos: Position) -> Position {
        if pos < self.start {
            return pos;
        }
        if pos < self.old_end {
            return self.start;
        }
        if pos.line == self.old_end.line {
            Position::new(
                self.new_end.line,
                self.new_end.column + (pos.column - self.old_end.column),
            )
        } else {
            Position::new(pos.line.saturating_add_signed(self.line_delta()), pos.column)
        }
    }
}

/// The line store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<String>,
    line_ending: LineEnding,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// Create an empty buffer (one empty line)
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            line_ending: LineEnding::default(),
        }
    }

    /// Split loaded file content into lines, remembering its line ending
    pub fn from_text(text: &str) -> Self {
        let line_ending = LineEnding::detect(text);
        let lines = text
            .split('\n')
            .map(|line| match line_ending {
                LineEnding::CRLF => line.strip_suffix('\r').unwrap_or(line).to_string(),
                LineEnding::LF => line.to_string(),
            })
            .collect();
        Self { lines, line_ending }
    }

    /// Read-only handle for renderers and highlighters
    pub fn view(&self) -> BufferView<'_> {
        BufferView { buffer: self }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line_text(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Length of a line in chars; zero for lines that do not exist
    pub fn line_len(&self, index: usize) -> usize {
        self.lines.get(index).map_or(0, |line| line.chars().count())
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(String::as_str)
    }

    /// Total length in chars, counting each line break as one
    pub fn total_length(&self) -> usize {
        let chars: usize = self.lines.iter().map(|line| line.chars().count()).sum();
        chars + self.lines.len() - 1
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn set_line_ending(&mut self, line_ending: LineEnding) {
        self.line_ending = line_ending;
    }

    pub fn is_valid(&self, pos: Position) -> bool {
        pos.line < self.lines.len() && pos.column <= self.line_len(pos.line)
    }

    /// Nearest valid position
    pub fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.lines.len() - 1);
        Position::new(line, pos.column.min(self.line_len(line)))
    }

    /// Position after the last character
    pub fn end_position(&self) -> Position {
        let last = self.lines.len() - 1;
        Position::new(last, self.line_len(last))
    }

    /// Serialize with an explicit line terminator
    pub fn serialize(&self, line_ending: LineEnding) -> String {
        self.lines.join(line_ending.as_str())
    }

    /// Text between two positions, joined with `\n`
    pub fn text_range(&self, start: Position, end: Position) -> Result<String, BufferError> {
        self.check_range(start, end)?;

        let first = &self.lines[start.line];
        let from = byte_offset(first, start.column);
        if start.line == end.line {
            return Ok(first[from..byte_offset(first, end.column)].to_string());
        }

        let mut text = first[from..].to_string();
        for line in &self.lines[start.line + 1..end.line] {
            text.push('\n');
            text.push_str(line);
        }
        let last = &self.lines[end.line];
        text.push('\n');
        text.push_str(&last[..byte_offset(last, end.column)]);
        Ok(text)
    }

    /// Insert `text` at `pos`, splitting the line at every `\n` in `text`
    pub(crate) fn insert(&mut self, pos: Position, text: &str) -> Result<BufferChange, BufferError> {
        self.check(pos)?;

        let line = &mut self.lines[pos.line];
        let at = byte_offset(line, pos.column);
        if !text.contains('\n') {
            line.insert_str(at, text);
        } else {
            let suffix = line.split_off(at);
            let mut pieces = text.split('\n');
            line.push_str(pieces.next().unwrap_or_default());

            let mut new_lines: Vec<String> = pieces.map(str::to_string).collect();
            if let Some(last) = new_lines.last_mut() {
                last.push_str(&suffix);
            }
            self.lines.splice(pos.line + 1..pos.line + 1, new_lines);
        }

        Ok(BufferChange {
            start: pos,
            old_end: pos,
            new_end: pos.advanced_by(text),
        })
    }

    /// Remove the text between `start` and `end`, returning it
    pub(crate) fn delete(
        &mut self,
        start: Position,
        end: Position,
    ) -> Result<(String, BufferChange), BufferError> {
        let removed = self.text_range(start, end)?;

        if start.line == end.line {
            let line = &mut self.lines[start.line];
            let from = byte_offset(line, start.column);
            let to = byte_offset(line, end.column);
            line.replace_range(from..to, "");
        } else {
            let tail = {
                let last = &self.lines[end.line];
                last[byte_offset(last, end.column)..].to_string()
            };
            let first = &mut self.lines[start.line];
            first.truncate(byte_offset(first, start.column));
            first.push_str(&tail);
            self.lines.drain(start.line + 1..=end.line);
        }

        Ok((
            removed,
            BufferChange {
                start,
                old_end: end,
                new_end: start,
            },
        ))
    }

    fn check(&self, pos: Position) -> Result<(), BufferError> {
        if self.is_valid(pos) {
            Ok(())
        } else {
            Err(BufferError::InvalidPosition {
                position: pos,
                line_count: self.lines.len(),
            })
        }
    }

    fn check_range(&self, start: Position, end: Position) -> Result<(), BufferError> {
        self.check(start)?;
        self.check(end)?;
        if end < start {
            return Err(BufferError::InvalidRange { start, end });
        }
        Ok(())
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize(LineEnding::LF))
    }
}

/// Read-only view of a [`Buffer`]
///
/// Handed to the renderer and highlighter; it can query lines but offers no
/// way to mutate them.
#[derive(Debug, Clone, Copy)]
pub struct BufferView<'a> {
    buffer: &'a Buffer,
}

impl Deref for BufferView<'_> {
    type Target = Buffer;

    fn deref(&self) -> &Buffer {
        self.buffer
    }
}

/// Byte offset of char column `column` in `line` (end of line if past it)
fn byte_offset(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map_or(line.len(), |(offset, _)| offset)
}
