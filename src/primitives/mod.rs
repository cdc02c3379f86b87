//! Low-level primitives
//!
//! This module contains syntax highlighting.

pub mod highlighter;
