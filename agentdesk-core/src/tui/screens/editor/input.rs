//! Editor input handling

use super::focus::{FieldRef, field_rows, field_value};
use super::view::{EditorView, Pane};
use crate::domain::UpdateAgentRequest;
use crate::editor::{EditError, EditorState, Notice};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the runner must do after a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    None,
    Exit,
    FetchAgents,
    FetchAgent(String),
    Save(UpdateAgentRequest),
}

/// Handle keyboard input and update state
pub fn handle_input(state: &mut EditorState, view: &mut EditorView, event: Event) -> InputAction {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(state, view, key),
        Event::Paste(text) => {
            if let Some((_, input)) = view.input.as_mut() {
                input.handle_paste(&text);
            }
            InputAction::None
        }
        _ => InputAction::None,
    }
}

fn handle_key(state: &mut EditorState, view: &mut EditorView, key: KeyEvent) -> InputAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('q') {
        return InputAction::Exit;
    }

    if view.is_typing() {
        return handle_text_key(state, view, key);
    }

    if ctrl {
        return match key.code {
            KeyCode::Char('s') => save(state),
            KeyCode::Char('r') => {
                if state.reload() {
                    InputAction::FetchAgents
                } else {
                    InputAction::None
                }
            }
            KeyCode::Char('d') => {
                remove_row(state, view);
                InputAction::None
            }
            _ => InputAction::None,
        };
    }

    if key.code == KeyCode::Char('q') {
        return InputAction::Exit;
    }

    match view.pane {
        Pane::Agents => handle_list_key(state, view, key),
        Pane::Form => handle_form_key(state, view, key),
    }
}

fn handle_list_key(state: &mut EditorState, view: &mut EditorView, key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => state.cursor_down(),
        KeyCode::Enter | KeyCode::Right => {
            if let Some(id) = state.select_highlighted() {
                view.reset_form();
                view.pane = Pane::Form;
                return InputAction::FetchAgent(id);
            }
        }
        KeyCode::Tab if state.form.is_some() => view.pane = Pane::Form,
        _ => {}
    }
    InputAction::None
}

fn handle_form_key(state: &mut EditorState, view: &mut EditorView, key: KeyEvent) -> InputAction {
    let rows = state.form.as_ref().map(field_rows).unwrap_or_default();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => view.move_up(),
        KeyCode::Down | KeyCode::Char('j') => view.move_down(rows.len()),
        KeyCode::Tab | KeyCode::Esc | KeyCode::Left => view.pane = Pane::Agents,
        KeyCode::Delete => remove_row(state, view),
        KeyCode::Enter => {
            if let Some(&field) = rows.get(view.row) {
                activate(state, view, field);
            }
        }
        _ => {}
    }
    InputAction::None
}

/// Enter applies the input. Alt+Enter, Shift+Enter or Ctrl+J break the line
/// in free-text fields.
fn handle_text_key(state: &mut EditorState, view: &mut EditorView, key: KeyEvent) -> InputAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let line_break = key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::SHIFT);
    if ctrl && key.code == KeyCode::Char('s') {
        commit(state, view);
        return save(state);
    }

    let Some((_, input)) = view.input.as_mut() else {
        return InputAction::None;
    };
    match key.code {
        KeyCode::Enter if line_break => input.handle_newline(),
        KeyCode::Char('j') if ctrl => input.handle_newline(),
        KeyCode::Enter => commit(state, view),
        KeyCode::Esc => view.input = None,
        KeyCode::Backspace => input.handle_backspace(),
        KeyCode::Delete => input.handle_delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Up => input.move_up(),
        KeyCode::Down => input.move_down(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        KeyCode::Char(c) if !ctrl => input.handle_char(c),
        _ => {}
    }
    InputAction::None
}

fn save(state: &mut EditorState) -> InputAction {
    state
        .begin_save()
        .map(InputAction::Save)
        .unwrap_or(InputAction::None)
}

/// Enter on a row: open an input on editable rows, append on "+ Add" rows.
fn activate(state: &mut EditorState, view: &mut EditorView, field: FieldRef) {
    let Some(form) = state.form.as_mut() else {
        return;
    };

    if let FieldRef::Param { list, tool, param } = field
        && form.is_secret_param(list, tool, param)
    {
        state.notice = Some(Notice::Failure(EditError::SecretParam { index: param }.to_string()));
        return;
    }

    let appended = match field {
        FieldRef::AddFollow => form
            .push_follow("")
            .map(|_| FieldRef::Follow(form.follow().len() - 1)),
        FieldRef::AddParam { list, tool } => form.push_param(list, tool).map(|_| FieldRef::Param {
            list,
            tool,
            param: form.tools(list)[tool].params.len() - 1,
        }),
        FieldRef::AddTool(list) => form.push_tool(list).map(|_| FieldRef::ToolItem {
            list,
            tool: form.tools(list).len() - 1,
        }),
        editable => Ok(editable),
    };

    match appended {
        Ok(target) => {
            if let Some(row) = field_rows(form).iter().position(|r| *r == target) {
                view.row = row;
            }
            if let Some(value) = field_value(form, target) {
                view.begin_input(target, value);
            }
        }
        Err(err) => state.notice = Some(Notice::Failure(err.to_string())),
    }
}

fn commit(state: &mut EditorState, view: &mut EditorView) {
    let Some((field, input)) = view.input.take() else {
        return;
    };
    let Some(form) = state.form.as_mut() else {
        return;
    };

    let value = input.value;
    let result = match field {
        FieldRef::Text(text) => form.set_text(text, value),
        FieldRef::Follow(index) => form.set_follow(index, value),
        FieldRef::ToolItem { list, tool } => form.set_tool_item(list, tool, value),
        FieldRef::Param { list, tool, param } => form.set_param(list, tool, param, value),
        _ => Ok(()),
    };
    if let Err(err) = result {
        state.notice = Some(Notice::Failure(err.to_string()));
    }
}

fn remove_row(state: &mut EditorState, view: &mut EditorView) {
    if view.pane != Pane::Form {
        return;
    }
    let Some(form) = state.form.as_mut() else {
        return;
    };
    let Some(&field) = field_rows(form).get(view.row) else {
        return;
    };

    let result = match field {
        FieldRef::Follow(index) => form.remove_follow(index),
        FieldRef::ToolItem { list, tool } => form.remove_tool(list, tool),
        FieldRef::Param { list, tool, param } => form.remove_param(list, tool, param),
        _ => return,
    };
    match result {
        Ok(()) => view.clamp(field_rows(form).len()),
        Err(err) => state.notice = Some(Notice::Failure(err.to_string())),
    }
}
