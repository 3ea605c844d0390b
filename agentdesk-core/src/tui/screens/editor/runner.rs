//! Editor runner - main event loop coordinator

use super::input::{InputAction, handle_input};
use super::ui::EditorUI;
use super::view::{EditorView, Pane};
use crate::domain::Agent;
use crate::editor::{AgentApi, ApiClientError, EditorState};
use crate::tui::terminal::{Tui, init_terminal, restore_terminal};
use crossterm::event;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Results of API calls made off the UI loop
enum ApiEvent {
    Agents(Result<Vec<Agent>, ApiClientError>),
    Agent {
        id: String,
        result: Result<Agent, ApiClientError>,
    },
    Saved(Result<String, ApiClientError>),
}

/// Run the editor until the user quits.
pub async fn run_editor(api: Arc<dyn AgentApi>, api_url: &str) -> Result<(), Box<dyn Error>> {
    let mut terminal = init_terminal()?;
    let result = run_editor_loop(&mut terminal, api, api_url).await;
    restore_terminal()?;
    result
}

async fn run_editor_loop(
    terminal: &mut Tui,
    api: Arc<dyn AgentApi>,
    api_url: &str,
) -> Result<(), Box<dyn Error>> {
    let (event_tx, mut event_rx) = mpsc::channel::<ApiEvent>(16);
    let mut state = EditorState::new();
    let mut view = EditorView::new();

    dispatch(&api, &event_tx, InputAction::FetchAgents);

    loop {
        terminal.draw(|frame| EditorUI::render(frame, &state, &view, api_url))?;

        while let Ok(event) = event_rx.try_recv() {
            apply(&mut state, &mut view, event);
        }

        let timeout = if state.is_busy() {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(50)
        };

        if event::poll(timeout)? {
            match handle_input(&mut state, &mut view, event::read()?) {
                InputAction::Exit => return Ok(()),
                InputAction::None => {}
                action => dispatch(&api, &event_tx, action),
            }
        } else if state.is_busy() {
            view.tick();
        }
    }
}

fn dispatch(api: &Arc<dyn AgentApi>, tx: &mpsc::Sender<ApiEvent>, action: InputAction) {
    let api = api.clone();
    let tx = tx.clone();
    match action {
        InputAction::FetchAgents => {
            tokio::spawn(async move {
                let _ = tx.send(ApiEvent::Agents(api.list_agents().await)).await;
            });
        }
        InputAction::FetchAgent(id) => {
            tokio::spawn(async move {
                let result = api.get_agent(&id).await;
                let _ = tx.send(ApiEvent::Agent { id, result }).await;
            });
        }
        InputAction::Save(request) => {
            tokio::spawn(async move {
                let _ = tx.send(ApiEvent::Saved(api.update_agent(&request).await)).await;
            });
        }
        InputAction::Exit | InputAction::None => {}
    }
}

fn apply(state: &mut EditorState, view: &mut EditorView, event: ApiEvent) {
    match event {
        ApiEvent::Agents(result) => state.agents_loaded(result),
        ApiEvent::Agent { id, result } => {
            let before = state.phase.clone();
            state.detail_loaded(&id, result);
            if state.phase != before {
                debug!(id, "Agent detail applied");
                view.reset_form();
                if state.form.is_none() {
                    view.pane = Pane::Agents;
                }
            }
        }
        ApiEvent::Saved(result) => state.save_finished(result),
    }
}
