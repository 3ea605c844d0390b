//! Editor state machine.
//!
//! Network calls happen elsewhere; this type only records what was asked for
//! and folds the results back in. Every transition that starts a request
//! returns what the caller should send, or `None` when the request is not
//! allowed in the current phase.

use super::api::ApiClientError;
use super::form::EditorForm;
use crate::domain::{Agent, UpdateAgentRequest};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorPhase {
    /// Initial list fetch in flight.
    LoadingAgents,
    /// List shown, nothing open.
    Browsing,
    /// Detail fetch in flight for `id`.
    LoadingDetail { id: String },
    /// Form open on the selected agent.
    Editing,
    /// Save in flight; `target_id` is the id the agent will have afterwards.
    Saving { target_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

#[derive(Debug, Clone)]
pub struct EditorState {
    pub phase: EditorPhase,
    pub agents: Vec<Agent>,
    /// Highlighted row of the agent list.
    pub cursor: usize,
    /// Agent as last loaded from (or saved to) the API.
    pub selected: Option<Agent>,
    pub form: Option<EditorForm>,
    pub notice: Option<Notice>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            phase: EditorPhase::LoadingAgents,
            agents: Vec::new(),
            cursor: 0,
            selected: None,
            form: None,
            notice: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            EditorPhase::LoadingAgents
                | EditorPhase::LoadingDetail { .. }
                | EditorPhase::Saving { .. }
        )
    }

    pub fn is_editing(&self) -> bool {
        self.phase == EditorPhase::Editing
    }

    /// Starts a list refresh.
    pub fn reload(&mut self) -> bool {
        if self.is_busy() && self.phase != EditorPhase::LoadingAgents {
            return false;
        }
        self.phase = EditorPhase::LoadingAgents;
        true
    }

    /// Folds in the list fetch. A failure leaves an empty list and a notice.
    pub fn agents_loaded(&mut self, result: Result<Vec<Agent>, ApiClientError>) {
        match result {
            Ok(agents) => {
                debug!(count = agents.len(), "Agent list loaded");
                self.agents = agents;
            }
            Err(err) => {
                self.agents.clear();
                self.notice = Some(Notice::Failure(err.user_message()));
            }
        }
        self.cursor = self.cursor.min(self.agents.len().saturating_sub(1));
        self.phase = if self.form.is_some() {
            EditorPhase::Editing
        } else {
            EditorPhase::Browsing
        };
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.agents.len() {
            self.cursor += 1;
        }
    }

    pub fn highlighted(&self) -> Option<&Agent> {
        self.agents.get(self.cursor)
    }

    /// Opens the highlighted agent. Returns the id to fetch.
    ///
    /// Selecting while editing discards unsaved edits.
    pub fn select_highlighted(&mut self) -> Option<String> {
        if !matches!(self.phase, EditorPhase::Browsing | EditorPhase::Editing) {
            return None;
        }
        let id = self.highlighted()?.id.clone();
        self.phase = EditorPhase::LoadingDetail { id: id.clone() };
        self.notice = None;
        Some(id)
    }

    /// Folds in the detail fetch for the pending selection. Stale results
    /// (for an id no longer being loaded) are dropped.
    pub fn detail_loaded(&mut self, id: &str, result: Result<Agent, ApiClientError>) {
        let pending = matches!(
            &self.phase,
            EditorPhase::LoadingDetail { id: pending } if pending == id
        );
        if !pending {
            debug!(id, "Ignoring stale agent detail");
            return;
        }

        match result {
            Ok(agent) => {
                self.form = Some(EditorForm::from_agent(&agent));
                self.selected = Some(agent);
                self.phase = EditorPhase::Editing;
            }
            Err(err) => {
                self.form = None;
                self.selected = None;
                self.notice = Some(Notice::Failure(err.user_message()));
                self.phase = EditorPhase::Browsing;
            }
        }
    }

    /// Starts a save of the open form. Returns the request to send.
    pub fn begin_save(&mut self) -> Option<UpdateAgentRequest> {
        if self.phase != EditorPhase::Editing {
            return None;
        }
        let selected = self.selected.as_ref()?;
        let form = self.form.as_ref()?;
        let request = form.to_request(&selected.id);

        let target_id = match request.new_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => selected.id.clone(),
        };
        self.phase = EditorPhase::Saving { target_id };
        self.notice = None;
        Some(request)
    }

    /// Folds in the save result. Edits are kept either way; on success the
    /// selection follows a renamed agent so the next save addresses it.
    pub fn save_finished(&mut self, result: Result<String, ApiClientError>) {
        let EditorPhase::Saving { target_id } = &self.phase else {
            return;
        };
        let target_id = target_id.clone();
        self.phase = EditorPhase::Editing;

        match result {
            Ok(message) => {
                if let Some(selected) = self.selected.as_mut() {
                    let old_id = std::mem::replace(&mut selected.id, target_id.clone());
                    if let Some(entry) = self.agents.iter_mut().find(|a| a.id == old_id) {
                        entry.id = target_id;
                    }
                }
                self.notice = Some(Notice::Success(message));
            }
            Err(err) => {
                self.notice = Some(Notice::Failure(err.user_message()));
            }
        }
    }

    /// Drops the open form and returns to the list.
    pub fn close(&mut self) {
        if self.phase == EditorPhase::Editing {
            self.form = None;
            self.selected = None;
            self.phase = EditorPhase::Browsing;
        }
    }
}
