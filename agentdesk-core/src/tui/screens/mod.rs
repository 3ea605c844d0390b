//! TUI screens

pub mod editor;
