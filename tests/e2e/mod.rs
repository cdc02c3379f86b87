pub mod rendering;
pub mod save_load;
pub mod search;
pub mod undo_redo;
