//! Literal text search over the buffer
//!
//! Matches are computed for the whole buffer whenever the query changes and
//! again after every edit. The state keeps an index into the match list that
//! find-next and find-previous walk with wrap-around.

use crate::model::buffer::{Buffer, BufferChange, Position};

/// One search hit, in char columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchMatch {
    pub line: usize,
    pub column: usize,
    pub len: usize,
}

impl SearchMatch {
    pub fn start(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn end(&self) -> Position {
        Position::new(self.line, self.column + self.len)
    }
}

/// Find every occurrence of `query`, ordered by line then column
///
/// Search is case-sensitive and overlapping: scanning resumes one character
/// after the start of each hit. An empty query never matches.
pub fn find_all(buffer: &Buffer, query: &str) -> Vec<SearchMatch> {
    if query.is_empty() {
        return Vec::new();
    }
    let len = query.chars().count();

    buffer
        .lines()
        .enumerate()
        .flat_map(|(line_idx, line)| {
            line.char_indices()
                .enumerate()
                .filter(|(_, (offset, _))| line[*offset..].starts_with(query))
                .map(move |(column, _)| SearchMatch {
                    line: line_idx,
                    column,
                    len,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Search state for find functionality
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// The search query; empty means no active search
    query: String,
    /// All matches in the buffer
    matches: Vec<SearchMatch>,
    /// Index of the currently selected match
    current: Option<usize>,
}

impl SearchState {
    /// Replace the query and recompute matches
    ///
    /// An empty query clears the search. No match is current until the
    /// first find-next or find-previous.
    pub fn set_query(&mut self, buffer: &Buffer, query: &str) {
        if query.is_empty() {
            self.clear();
            return;
        }
        self.query = query.to_string();
        self.matches = find_all(buffer, query);
        self.current = None;
        tracing::debug!("search for {:?}: {} matches", self.query, self.matches.len());
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.matches.clear();
        self.current = None;
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_match(&self) -> Option<SearchMatch> {
        self.current.and_then(|i| self.matches.get(i).copied())
    }

    /// Advance to the next match, wrapping at the end
    ///
    /// With no current match, picks the first match at or after `from`.
    pub fn find_next(&mut self, from: Position) -> Option<SearchMatch> {
        if self.matches.is_empty() {
            return None;
        }
        let next = match self.current {
            Some(i) => (i + 1) % self.matches.len(),
            None => self
                .matches
                .iter()
                .position(|m| m.start() >= from)
                .unwrap_or(0),
        };
        self.current = Some(next);
        self.current_match()
    }

    /// Step back to the previous match, wrapping at the start
    ///
    /// With no current match, picks the last match strictly before `from`.
    pub fn find_previous(&mut self, from: Position) -> Option<SearchMatch> {
        if self.matches.is_empty() {
            return None;
        }
        let last = self.matches.len() - 1;
        let prev = match self.current {
            Some(0) => last,
            Some(i) => i - 1,
            None => self
                .matches
                .iter()
                .rposition(|m| m.start() < from)
                .unwrap_or(last),
        };
        self.current = Some(prev);
        self.current_match()
    }

    /// Re-run the query after the buffer changed
    ///
    /// The current match becomes the first match at or after where the old
    /// current match moved to, or the first match if there is none.
    pub fn refresh(&mut self, buffer: &Buffer, changes: &[BufferChange]) {
        if !self.is_active() {
            return;
        }
        let anchor = self.current_match().map(|m| {
            changes
                .iter()
                .fold(m.start(), |pos, change| change.adjust(pos))
        });

        self.matches = find_all(buffer, &self.query);
        self.current = match anchor {
            Some(_) if self.matches.is_empty() => None,
            Some(pos) => Some(
                self.matches
                    .iter()
                    .position(|m| m.start() >= pos)
                    .unwrap_or(0),
            ),
            None => None,
        };
    }
}
