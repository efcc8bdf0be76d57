pub mod data;
pub mod picker;
pub mod tui;
