//! Screen-local state that the editor logic does not care about

use super::focus::FieldRef;
use crate::tui::widgets::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Agents,
    Form,
}

#[derive(Debug, Clone, Default)]
pub struct EditorView {
    pub pane: Pane,
    /// Selected row of the form pane.
    pub row: usize,
    /// Row being typed into, with its buffer.
    pub input: Option<(FieldRef, TextInput)>,
    /// Loading animation frame
    pub spinner: usize,
}

impl EditorView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_up(&mut self) {
        self.row = self.row.saturating_sub(1);
    }

    pub fn move_down(&mut self, rows: usize) {
        if self.row + 1 < rows {
            self.row += 1;
        }
    }

    /// Keeps the row cursor on an existing row after the form shrinks.
    pub fn clamp(&mut self, rows: usize) {
        self.row = self.row.min(rows.saturating_sub(1));
    }

    pub fn begin_input(&mut self, field: FieldRef, value: impl Into<String>) {
        let input = TextInput::new(field.label())
            .with_multiline(field.is_multiline())
            .with_value(value);
        self.input = Some((field, input));
    }

    pub fn is_typing(&self) -> bool {
        self.input.is_some()
    }

    /// Drops any open input and returns to the top of the form.
    pub fn reset_form(&mut self) {
        self.input = None;
        self.row = 0;
    }

    pub fn tick(&mut self) {
        self.spinner = (self.spinner + 1) % 4;
    }
}
