//! Editor screen tests: form rows and key handling, without a terminal

#[path = "../common/mod.rs"]
mod common;

use agentdesk_core::domain::Agent;
use agentdesk_core::editor::{EditorPhase, EditorState, Notice, TextField, ToolList};
use agentdesk_core::tui::screens::editor::{
    EditorView, FieldRef, InputAction, Pane, field_rows, handle_input,
};
use common::{bot_a1, full_agent};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

fn alt_enter() -> Event {
    Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT))
}

fn type_text(state: &mut EditorState, view: &mut EditorView, text: &str) {
    for c in text.chars() {
        assert_eq!(handle_input(state, view, key(KeyCode::Char(c))), InputAction::None);
    }
}

/// State and view with `n1` open in the form pane.
fn editing() -> (EditorState, EditorView) {
    let mut state = EditorState::new();
    let mut view = EditorView::new();
    state.agents_loaded(Ok(vec![bot_a1(), full_agent("n1")]));

    handle_input(&mut state, &mut view, key(KeyCode::Down));
    let action = handle_input(&mut state, &mut view, key(KeyCode::Enter));
    assert_eq!(action, InputAction::FetchAgent("n1".into()));
    state.detail_loaded("n1", Ok(full_agent("n1")));
    (state, view)
}

fn focus(state: &EditorState, view: &mut EditorView, target: FieldRef) {
    let form = state.form.as_ref().expect("form");
    view.row = field_rows(form)
        .iter()
        .position(|row| *row == target)
        .expect("row present");
}

#[test]
fn rows_cover_every_field_and_add_row() {
    let (state, _) = editing();
    let rows = field_rows(state.form.as_ref().expect("form"));

    assert_eq!(rows[0], FieldRef::Text(TextField::Id));
    assert!(rows.contains(&FieldRef::Follow(1)));
    assert!(rows.contains(&FieldRef::AddFollow));
    assert!(rows.contains(&FieldRef::Param {
        list: ToolList::X,
        tool: 0,
        param: 0
    }));
    assert!(rows.contains(&FieldRef::AddParam {
        list: ToolList::Telegram,
        tool: 0
    }));
    assert_eq!(rows.last(), Some(&FieldRef::AddTool(ToolList::Telegram)));
}

#[test]
fn rows_skip_missing_channels() {
    let mut state = EditorState::new();
    state.agents_loaded(Ok(vec![Agent::new("bare")]));
    let id = state.select_highlighted().expect("select");
    state.detail_loaded(&id, Ok(Agent::new("bare")));

    let rows = field_rows(state.form.as_ref().expect("form"));
    assert_eq!(rows.len(), 5);
}

#[test]
fn opening_an_agent_moves_to_form_pane() {
    let (state, view) = editing();
    assert_eq!(view.pane, Pane::Form);
    assert_eq!(view.row, 0);
    assert!(state.is_editing());
}

#[test]
fn typed_text_is_applied_on_enter() {
    let (mut state, mut view) = editing();
    focus(&state, &mut view, FieldRef::Text(TextField::Name));

    handle_input(&mut state, &mut view, key(KeyCode::Enter));
    assert!(view.is_typing());
    handle_input(&mut state, &mut view, key(KeyCode::Backspace));
    type_text(&mut state, &mut view, "q 2");
    handle_input(&mut state, &mut view, key(KeyCode::Enter));

    assert!(!view.is_typing());
    assert_eq!(state.form.as_ref().map(|f| f.name.as_str()), Some("Novq 2"));
}

#[test]
fn escape_discards_typed_text() {
    let (mut state, mut view) = editing();
    focus(&state, &mut view, FieldRef::Text(TextField::Style));

    handle_input(&mut state, &mut view, key(KeyCode::Enter));
    type_text(&mut state, &mut view, "!!!");
    handle_input(&mut state, &mut view, key(KeyCode::Esc));

    assert!(!view.is_typing());
    assert_eq!(state.form.as_ref().map(|f| f.style.as_str()), Some("short"));
}

#[test]
fn add_row_appends_and_opens_input() {
    let (mut state, mut view) = editing();
    focus(&state, &mut view, FieldRef::AddFollow);

    handle_input(&mut state, &mut view, key(KeyCode::Enter));
    assert_eq!(view.input.as_ref().map(|(field, _)| *field), Some(FieldRef::Follow(2)));
    type_text(&mut state, &mut view, "carol");
    handle_input(&mut state, &mut view, key(KeyCode::Enter));

    let form = state.form.as_ref().expect("form");
    assert_eq!(form.follow(), ["alice", "bob", "carol"]);
    assert_eq!(field_rows(form)[view.row], FieldRef::Follow(2));
}

#[test]
fn delete_removes_focused_entry() {
    let (mut state, mut view) = editing();
    focus(&state, &mut view, FieldRef::Follow(0));

    handle_input(&mut state, &mut view, ctrl('d'));

    assert_eq!(state.form.as_ref().expect("form").follow(), ["bob"]);
}

#[test]
fn secret_param_refuses_edit_and_delete() {
    let (mut state, mut view) = editing();
    let secret = FieldRef::Param {
        list: ToolList::Telegram,
        tool: 0,
        param: 0,
    };
    focus(&state, &mut view, secret);

    handle_input(&mut state, &mut view, key(KeyCode::Enter));
    assert!(!view.is_typing());
    assert!(matches!(state.notice, Some(Notice::Failure(_))));

    state.notice = None;
    handle_input(&mut state, &mut view, key(KeyCode::Delete));
    assert!(matches!(state.notice, Some(Notice::Failure(_))));
    assert_eq!(
        state.form.as_ref().expect("form").tools(ToolList::Telegram)[0].params,
        ["0xkey", "mainnet"]
    );
}

#[test]
fn ctrl_s_applies_input_and_saves() {
    let (mut state, mut view) = editing();
    focus(&state, &mut view, FieldRef::Text(TextField::Id));

    handle_input(&mut state, &mut view, key(KeyCode::Enter));
    type_text(&mut state, &mut view, "-v2");
    let action = handle_input(&mut state, &mut view, ctrl('s'));

    let InputAction::Save(request) = action else {
        panic!("expected a save, got {action:?}");
    };
    assert_eq!(request.old_id, "n1");
    assert_eq!(request.new_id.as_deref(), Some("n1-v2"));
    assert_eq!(
        state.phase,
        EditorPhase::Saving {
            target_id: "n1-v2".into()
        }
    );
    assert_eq!(handle_input(&mut state, &mut view, ctrl('s')), InputAction::None);
}

#[test]
fn q_quits_unless_typing() {
    let (mut state, mut view) = editing();
    focus(&state, &mut view, FieldRef::Text(TextField::Persona));

    handle_input(&mut state, &mut view, key(KeyCode::Enter));
    assert_eq!(
        handle_input(&mut state, &mut view, key(KeyCode::Char('q'))),
        InputAction::None
    );
    handle_input(&mut state, &mut view, key(KeyCode::Enter));
    assert_eq!(
        state.form.as_ref().map(|f| f.persona.as_str()),
        Some("analystq")
    );

    assert_eq!(
        handle_input(&mut state, &mut view, key(KeyCode::Char('q'))),
        InputAction::Exit
    );
    assert_eq!(handle_input(&mut state, &mut view, ctrl('q')), InputAction::Exit);
}

#[test]
fn tab_switches_panes_and_reload_refetches() {
    let (mut state, mut view) = editing();

    handle_input(&mut state, &mut view, key(KeyCode::Tab));
    assert_eq!(view.pane, Pane::Agents);
    handle_input(&mut state, &mut view, key(KeyCode::Tab));
    assert_eq!(view.pane, Pane::Form);

    assert_eq!(handle_input(&mut state, &mut view, ctrl('r')), InputAction::FetchAgents);
    assert_eq!(state.phase, EditorPhase::LoadingAgents);
}

#[test]
fn prompts_accept_line_breaks() {
    let (mut state, mut view) = editing();
    state
        .form
        .as_mut()
        .expect("form")
        .set_text(TextField::TgPrompt, "line1\nline2")
        .expect("seed prompt");
    focus(&state, &mut view, FieldRef::Text(TextField::TgPrompt));

    handle_input(&mut state, &mut view, key(KeyCode::Enter));
    assert!(view.input.as_ref().is_some_and(|(_, input)| input.multiline));
    handle_input(&mut state, &mut view, key(KeyCode::End));
    handle_input(&mut state, &mut view, alt_enter());
    type_text(&mut state, &mut view, "line3");
    assert!(view.is_typing());

    handle_input(&mut state, &mut view, key(KeyCode::Up));
    handle_input(&mut state, &mut view, key(KeyCode::Home));
    type_text(&mut state, &mut view, ">");
    handle_input(&mut state, &mut view, ctrl('j'));
    handle_input(&mut state, &mut view, key(KeyCode::Enter));

    assert!(!view.is_typing());
    assert_eq!(
        state.form.as_ref().and_then(|f| f.text(TextField::TgPrompt)),
        Some("line1\n>\nline2\nline3")
    );
}

#[test]
fn pasted_text_keeps_line_breaks_only_in_free_text() {
    let (mut state, mut view) = editing();
    focus(&state, &mut view, FieldRef::Text(TextField::Persona));
    handle_input(&mut state, &mut view, key(KeyCode::Enter));
    handle_input(&mut state, &mut view, Event::Paste("\nsecond line".into()));
    handle_input(&mut state, &mut view, key(KeyCode::Enter));
    assert_eq!(
        state.form.as_ref().map(|f| f.persona.as_str()),
        Some("analyst\nsecond line")
    );

    focus(&state, &mut view, FieldRef::Text(TextField::Name));
    handle_input(&mut state, &mut view, key(KeyCode::Enter));
    handle_input(&mut state, &mut view, alt_enter());
    handle_input(&mut state, &mut view, Event::Paste("\r\nBot".into()));
    assert!(view.is_typing());
    handle_input(&mut state, &mut view, key(KeyCode::Enter));
    assert_eq!(state.form.as_ref().map(|f| f.name.as_str()), Some("Nova Bot"));
}
