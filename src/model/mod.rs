//! Core data model: the line store, cursor, edit events, history and search

pub mod buffer;
pub mod cursor;
pub mod event;
pub mod filesystem;
pub mod history;
pub mod search;
