//! Editor palette
//!
//! Panes are framed in blue when focused, field names are violet, and
//! anything that adds rows is green. Amber marks in-flight requests.

use ratatui::style::{Color, Modifier, Style};

/// Focused pane frame and screen title
pub const FRAME: Color = Color::Rgb(88, 166, 255);

pub const FIELD: Color = Color::Rgb(210, 168, 255);

pub const VALUE: Color = Color::Rgb(230, 237, 243);

/// "+ Add ..." rows and save confirmations
pub const ADD: Color = Color::Rgb(63, 185, 80);

pub const BUSY: Color = Color::Rgb(210, 153, 34);

pub const DANGER: Color = Color::Rgb(248, 81, 73);

pub const DIM: Color = Color::Rgb(125, 133, 144);

pub const IDLE_FRAME: Color = Color::Rgb(48, 54, 61);

pub const CURSOR_ROW: Color = Color::Rgb(31, 58, 95);

/// Background of the open text input
pub const EDIT_BG: Color = Color::Rgb(22, 27, 34);

pub fn title() -> Style {
    Style::default().fg(FRAME).add_modifier(Modifier::BOLD)
}

/// DNA / X / Telegram headers in the form pane
pub fn section() -> Style {
    Style::default()
        .fg(FRAME)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn label() -> Style {
    Style::default().fg(FIELD)
}

pub fn text() -> Style {
    Style::default().fg(VALUE)
}

pub fn input() -> Style {
    Style::default().fg(VALUE).bg(EDIT_BG)
}

pub fn muted() -> Style {
    Style::default().fg(DIM)
}

/// Masked secret params
pub fn secret() -> Style {
    Style::default().fg(DIM).add_modifier(Modifier::DIM)
}

pub fn selected() -> Style {
    Style::default()
        .bg(CURSOR_ROW)
        .fg(VALUE)
        .add_modifier(Modifier::BOLD)
}

pub fn action() -> Style {
    Style::default().fg(ADD).add_modifier(Modifier::ITALIC)
}

pub fn border() -> Style {
    Style::default().fg(IDLE_FRAME)
}

pub fn border_active() -> Style {
    Style::default().fg(FRAME)
}

pub fn loading() -> Style {
    Style::default().fg(BUSY)
}

pub fn success() -> Style {
    Style::default().fg(ADD).add_modifier(Modifier::BOLD)
}

pub fn error() -> Style {
    Style::default().fg(DANGER).add_modifier(Modifier::BOLD)
}

pub fn key_hint() -> Style {
    Style::default().fg(FRAME).add_modifier(Modifier::BOLD)
}

pub fn key_destructive() -> Style {
    Style::default().fg(DANGER).add_modifier(Modifier::BOLD)
}
