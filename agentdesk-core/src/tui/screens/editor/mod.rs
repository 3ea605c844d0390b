//! Agent editor screen
//!
//! - focus.rs: the form flattened into selectable rows
//! - view.rs: pane focus, row cursor and the active text input
//! - input.rs: key handling
//! - ui.rs: rendering
//! - runner.rs: event loop and API calls

mod focus;
mod input;
mod runner;
mod ui;
mod view;

pub use focus::{FieldRef, field_rows};
pub use input::{InputAction, handle_input};
pub use runner::run_editor;
pub use view::{EditorView, Pane};
