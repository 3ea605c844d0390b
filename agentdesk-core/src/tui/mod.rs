//! Terminal agent editor built on Ratatui
//!
//! A list pane with every stored agent next to a form pane for the open one.

pub mod screens;
mod terminal;
pub mod theme;
pub mod widgets;

pub use screens::editor::run_editor;
pub use terminal::{Tui, init_terminal, restore_terminal};
