//! Editing commands
//!
//! A [`Command`] is one user intent for the editing engine. The key handler
//! turns key presses into commands and [`Editor::handle_command`] runs each
//! one through exactly one engine handler.
//!
//! [`Editor::handle_command`]: crate::app::Editor::handle_command

use crate::model::cursor::Movement;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveCursor { movement: Movement, extend: bool },
    InsertChar(char),
    InsertNewline,
    DeleteBackward,
    DeleteForward,
    Undo,
    Redo,
    SetSearchQuery(String),
    FindNext,
    FindPrevious,
    Save,
    Open(PathBuf),
    Quit,
}

impl Command {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::MoveCursor { extend: false, .. } => "move cursor",
            Command::MoveCursor { extend: true, .. } => "extend selection",
            Command::InsertChar(_) => "insert char",
            Command::InsertNewline => "insert newline",
            Command::DeleteBackward => "delete backward",
            Command::DeleteForward => "delete forward",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::SetSearchQuery(_) => "set search query",
            Command::FindNext => "find next",
            Command::FindPrevious => "find previous",
            Command::Save => "save",
            Command::Open(_) => "open",
            Command::Quit => "quit",
        }
    }
}
