//! Editor UI rendering

use super::focus::{FieldRef, field_rows, field_value};
use super::view::{EditorView, Pane};
use crate::domain::Channel;
use crate::editor::{EditorForm, EditorPhase, EditorState, Notice, TextField};
use crate::tui::theme;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];
const SECRET_MASK: &str = "••••••";

pub struct EditorUI;

impl EditorUI {
    pub fn render(frame: &mut Frame, state: &EditorState, view: &EditorView, api_url: &str) {
        let input_height = view.input.as_ref().map_or(0, |(_, input)| input.height());
        let chunks = Layout::vertical([
            Constraint::Length(2),            // Status bar
            Constraint::Min(5),               // Panes
            Constraint::Length(input_height), // Active input
            Constraint::Length(1),            // Help bar
        ])
        .split(frame.area());

        Self::render_status_bar(frame, chunks[0], state, view, api_url);

        let panes = Layout::horizontal([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(chunks[1]);
        Self::render_agent_list(frame, panes[0], state, view);
        Self::render_form(frame, panes[1], state, view);

        if let Some((_, input)) = &view.input {
            input.render(frame, chunks[2]);
        }
        Self::render_help_bar(frame, chunks[3], view);
    }

    fn render_status_bar(
        frame: &mut Frame,
        area: Rect,
        state: &EditorState,
        view: &EditorView,
        api_url: &str,
    ) {
        let mut spans = vec![
            Span::styled(" agentdesk ", theme::title()),
            Span::styled("│ ", theme::muted()),
            Span::styled(api_url.to_string(), theme::muted()),
        ];

        let busy = match &state.phase {
            EditorPhase::LoadingAgents => Some("Loading agents".to_string()),
            EditorPhase::LoadingDetail { id } => Some(format!("Loading {id}")),
            EditorPhase::Saving { .. } => Some("Saving".to_string()),
            EditorPhase::Browsing | EditorPhase::Editing => None,
        };
        if let Some(busy) = busy {
            spans.push(Span::styled(
                format!(" │ {} {busy}...", SPINNER[view.spinner % SPINNER.len()]),
                theme::loading(),
            ));
        }

        match &state.notice {
            Some(Notice::Success(message)) => {
                spans.push(Span::styled(format!(" │ {message}"), theme::success()));
            }
            Some(Notice::Failure(message)) => {
                spans.push(Span::styled(format!(" │ {message}"), theme::error()));
            }
            None => {}
        }

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(theme::border());
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn render_agent_list(frame: &mut Frame, area: Rect, state: &EditorState, view: &EditorView) {
        let block = Block::default()
            .title(format!(" Agents ({}) ", state.agents.len()))
            .borders(Borders::ALL)
            .border_style(pane_border(view, Pane::Agents));

        if state.agents.is_empty() && state.phase != EditorPhase::LoadingAgents {
            let empty = Paragraph::new("No agents found").style(theme::muted()).block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = state
            .agents
            .iter()
            .map(|agent| {
                ListItem::new(Line::from(vec![
                    Span::styled(agent.id.clone(), theme::text()),
                    Span::styled(format!("  {}", agent.dna.name), theme::muted()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(theme::selected())
            .highlight_symbol("▶ ");
        let mut list_state = ListState::default().with_selected(Some(state.cursor));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_form(frame: &mut Frame, area: Rect, state: &EditorState, view: &EditorView) {
        let title = match &state.selected {
            Some(agent) => format!(" {} ", agent.id),
            None => " Agent ".to_string(),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(pane_border(view, Pane::Form));

        let Some(form) = &state.form else {
            let hint = match state.phase {
                EditorPhase::LoadingDetail { .. } => "Loading...",
                _ => "Select an agent and press Enter",
            };
            frame.render_widget(Paragraph::new(hint).style(theme::muted()).block(block), area);
            return;
        };

        let (lines, selected_line) = form_lines(form, view);
        let height = area.height.saturating_sub(2) as usize;
        let scroll = selected_line.saturating_sub(height.saturating_sub(1)) as u16;

        frame.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);
    }

    fn render_help_bar(frame: &mut Frame, area: Rect, view: &EditorView) {
        let keys: &[(&str, &str)] = if let Some((_, input)) = &view.input {
            if input.multiline {
                &[
                    ("Enter", "apply"),
                    ("Alt+Enter", "new line"),
                    ("Esc", "cancel"),
                    ("Ctrl+S", "apply & save"),
                ]
            } else {
                &[("Enter", "apply"), ("Esc", "cancel"), ("Ctrl+S", "apply & save")]
            }
        } else {
            match view.pane {
                Pane::Agents => &[
                    ("↑↓", "move"),
                    ("Enter", "open"),
                    ("Tab", "form"),
                    ("Ctrl+R", "reload"),
                    ("q", "quit"),
                ],
                Pane::Form => &[
                    ("↑↓", "move"),
                    ("Enter", "edit/add"),
                    ("Del", "remove"),
                    ("Ctrl+S", "save"),
                    ("Tab", "agents"),
                    ("q", "quit"),
                ],
            }
        };

        let mut spans = Vec::new();
        for (key, action) in keys {
            let style = if *action == "remove" {
                theme::key_destructive()
            } else {
                theme::key_hint()
            };
            spans.push(Span::styled(format!(" {key}"), style));
            spans.push(Span::styled(format!(" {action} "), theme::muted()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn pane_border(view: &EditorView, pane: Pane) -> ratatui::style::Style {
    if view.pane == pane {
        theme::border_active()
    } else {
        theme::border()
    }
}

/// Form rows as lines, with section headers, plus the line of the selected row.
fn form_lines(form: &EditorForm, view: &EditorView) -> (Vec<Line<'static>>, usize) {
    let mut lines = vec![section("DNA")];
    let mut selected_line = 0;

    for (index, field) in field_rows(form).into_iter().enumerate() {
        match field {
            FieldRef::Text(TextField::XPrompt) => lines.push(section(Channel::X.tag())),
            FieldRef::Text(TextField::TgPrompt) => lines.push(section("Telegram")),
            _ => {}
        }

        let selected = view.pane == Pane::Form && index == view.row;
        if selected {
            selected_line = lines.len();
        }
        lines.push(row_line(form, field, selected));
    }

    (lines, selected_line)
}

fn section(name: &str) -> Line<'static> {
    Line::from(Span::styled(format!("─ {name} "), theme::section()))
}

fn row_line(form: &EditorForm, field: FieldRef, selected: bool) -> Line<'static> {
    let indent = match field {
        FieldRef::Param { .. } | FieldRef::AddParam { .. } => "    ",
        FieldRef::Follow(_)
        | FieldRef::ToolItem { .. }
        | FieldRef::AddFollow
        | FieldRef::AddTool(_) => "  ",
        FieldRef::Text(_) => "",
    };

    let mut spans = vec![Span::raw(indent)];
    if field.is_editable() {
        spans.push(Span::styled(format!("{}: ", field.label()), theme::label()));
        let secret = matches!(field, FieldRef::Param { list, tool, param }
            if form.is_secret_param(list, tool, param));
        if secret {
            spans.push(Span::styled(SECRET_MASK, theme::secret()));
        } else {
            let value = field_value(form, field).unwrap_or_default();
            spans.push(Span::styled(single_line(&value), theme::text()));
        }
    } else {
        spans.push(Span::styled(field.label(), theme::action()));
    }

    let line = Line::from(spans);
    if selected {
        line.style(theme::selected())
    } else {
        line
    }
}

/// Multi-line prompts are shown on one row.
fn single_line(value: &str) -> String {
    value.replace('\n', " ⏎ ")
}
