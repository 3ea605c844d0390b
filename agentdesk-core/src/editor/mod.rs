//! Editor logic shared by every front end.
//!
//! - api.rs: the operations the editor needs from the agent API
//! - form.rs: the editable copy of one agent
//! - state.rs: loading, browsing, editing and saving phases

pub mod api;
pub mod form;
pub mod state;

pub use api::{AgentApi, ApiClientError};
pub use form::{EditError, EditorForm, TelegramForm, TextField, ToolList, XForm};
pub use state::{EditorPhase, EditorState, Notice};
