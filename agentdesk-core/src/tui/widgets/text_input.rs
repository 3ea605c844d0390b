//! Text input with a cursor, single- or multi-line

use super::super::theme;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

/// Lines shown at once before the box scrolls.
pub const MAX_VISIBLE_LINES: usize = 6;

/// Text input widget for form fields. `cursor_pos` counts characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    pub value: String,
    pub label: String,
    pub cursor_pos: usize,
    /// Accepts line breaks; otherwise they are replaced by spaces.
    pub multiline: bool,
}

impl TextInput {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            label: label.into(),
            cursor_pos: 0,
            multiline: false,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.cursor_pos = self.value.chars().count();
        self
    }

    pub fn with_multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    fn byte_pos(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn line_count(&self) -> usize {
        self.value.split('\n').count()
    }

    /// Zero-based line and column of the cursor.
    pub fn line_col(&self) -> (usize, usize) {
        self.value
            .chars()
            .take(self.cursor_pos)
            .fold((0, 0), |(line, col), c| {
                if c == '\n' { (line + 1, 0) } else { (line, col + 1) }
            })
    }

    /// Character index of `col` on `line`, clamped to the line's end.
    fn position_at(&self, line: usize, col: usize) -> usize {
        let mut start = 0;
        for (index, text) in self.value.split('\n').enumerate() {
            let len = text.chars().count();
            if index == line {
                return start + col.min(len);
            }
            start += len + 1;
        }
        self.char_len()
    }

    pub fn handle_char(&mut self, c: char) {
        let at = self.byte_pos();
        self.value.insert(at, c);
        self.cursor_pos += 1;
    }

    pub fn handle_newline(&mut self) {
        if self.multiline {
            self.handle_char('\n');
        }
    }

    /// Inserts pasted text at the cursor. Carriage returns are dropped.
    pub fn handle_paste(&mut self, text: &str) {
        for c in text.chars().filter(|c| *c != '\r') {
            match c {
                '\n' if !self.multiline => self.handle_char(' '),
                c => self.handle_char(c),
            }
        }
    }

    pub fn handle_backspace(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
            let at = self.byte_pos();
            self.value.remove(at);
        }
    }

    pub fn handle_delete(&mut self) {
        if self.cursor_pos < self.char_len() {
            let at = self.byte_pos();
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor_pos < self.char_len() {
            self.cursor_pos += 1;
        }
    }

    pub fn move_up(&mut self) {
        let (line, col) = self.line_col();
        if line > 0 {
            self.cursor_pos = self.position_at(line - 1, col);
        }
    }

    pub fn move_down(&mut self) {
        let (line, col) = self.line_col();
        if line + 1 < self.line_count() {
            self.cursor_pos = self.position_at(line + 1, col);
        }
    }

    /// Start of the current line.
    pub fn move_home(&mut self) {
        let (line, _) = self.line_col();
        self.cursor_pos = self.position_at(line, 0);
    }

    /// End of the current line.
    pub fn move_end(&mut self) {
        let (line, _) = self.line_col();
        self.cursor_pos = self.position_at(line, usize::MAX);
    }

    /// Rows needed for the label and the bordered box.
    pub fn height(&self) -> u16 {
        let lines = self.line_count().clamp(1, MAX_VISIBLE_LINES);
        1 + lines as u16 + 2
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Label
            Constraint::Min(3),    // Input box
        ])
        .split(area);

        let label = Paragraph::new(self.label.clone()).style(theme::label());
        frame.render_widget(label, chunks[0]);

        // Keep the cursor inside the box on long or tall values.
        let (line, col) = self.line_col();
        let width = chunks[1].width.saturating_sub(2) as usize;
        let rows = (chunks[1].height.saturating_sub(2) as usize).max(1);
        let skip = col.saturating_sub(width.saturating_sub(1));
        let top = line.saturating_sub(rows - 1);

        let visible: Vec<Line> = self
            .value
            .split('\n')
            .skip(top)
            .take(rows)
            .map(|text| Line::from(text.chars().skip(skip).collect::<String>()))
            .collect();

        let input = Paragraph::new(visible).style(theme::input()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border_active()),
        );
        frame.render_widget(input, chunks[1]);

        let x = chunks[1].x + 1 + (col - skip) as u16;
        let y = chunks[1].y + 1 + (line - top) as u16;
        frame.set_cursor_position((x, y));
    }
}
