//! Input handling: editing commands and key bindings

pub mod commands;
pub mod keybindings;
