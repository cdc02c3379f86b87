//! UI rendering modules
//!
//! - `buffer_rendering` - Gutter and text area
//! - `status_bar` - Status bar and prompt/minibuffer display

pub mod buffer_rendering;
pub mod status_bar;

pub use buffer_rendering::{BufferRenderInput, BufferRenderer};
pub use status_bar::{StatusBarRenderer, StatusInfo};
