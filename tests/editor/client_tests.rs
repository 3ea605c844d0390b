// Editor client tests
//
// Drives HttpAgentApi and EditorState against a real server, the way the
// terminal editor does, minus the terminal.

#[path = "../common/mod.rs"]
mod common;

use agentdesk_core::editor::{
    AgentApi, ApiClientError, EditError, EditorPhase, EditorState, Notice, TextField, ToolList,
};
use agentdesk_core::http_client::HttpAgentApi;
use common::{TestServer, bot_a1, full_agent};

async fn open(api: &HttpAgentApi, state: &mut EditorState, id: &str) {
    state.agents_loaded(api.list_agents().await);
    while state.highlighted().map(|a| a.id.as_str()) != Some(id) {
        let before = state.cursor;
        state.cursor_down();
        assert_ne!(state.cursor, before, "agent {id} not listed");
    }
    let id = state.select_highlighted().expect("select");
    let result = api.get_agent(&id).await;
    state.detail_loaded(&id, result);
    assert!(state.is_editing());
}

async fn save(api: &HttpAgentApi, state: &mut EditorState) {
    let request = state.begin_save().expect("save request");
    let result = api.update_agent(&request).await;
    state.save_finished(result);
}

#[tokio::test]
async fn empty_collection_lists_as_no_agents() {
    let server = TestServer::start(Vec::new()).await;
    let api = HttpAgentApi::new(&server.base_url).expect("client");

    let agents = api.list_agents().await.expect("list");
    assert!(agents.is_empty());
}

#[tokio::test]
async fn unknown_agent_is_not_found() {
    let server = TestServer::start(vec![bot_a1()]).await;
    let api = HttpAgentApi::new(&server.base_url).expect("client");

    let result = api.get_agent("missing").await;
    assert!(matches!(result, Err(ApiClientError::NotFound)));
}

#[tokio::test]
async fn unreachable_api_is_a_transport_error() {
    let api = HttpAgentApi::new("http://127.0.0.1:9").expect("client");

    let mut state = EditorState::new();
    state.agents_loaded(api.list_agents().await);

    assert_eq!(state.phase, EditorPhase::Browsing);
    assert_eq!(
        state.notice,
        Some(Notice::Failure("Could not reach the agent API.".into()))
    );
}

#[tokio::test]
async fn edits_are_saved_through_the_api() {
    let server = TestServer::start(vec![bot_a1(), full_agent("n1")]).await;
    let api = HttpAgentApi::new(&server.base_url).expect("client");
    let mut state = EditorState::new();
    open(&api, &mut state, "n1").await;

    let form = state.form.as_mut().expect("form");
    form.set_text(TextField::Persona, "critic").expect("persona");
    form.push_follow("carol").expect("follow");
    form.push_param(ToolList::X, 0).expect("param");
    form.set_param(ToolList::X, 0, 1, "limit").expect("param value");
    form.set_text(TextField::TgFirstMessage, "gm").expect("first message");

    save(&api, &mut state).await;
    assert_eq!(
        state.notice,
        Some(Notice::Success("Agent updated successfully!".into()))
    );

    let stored = api.get_agent("n1").await.expect("stored");
    assert_eq!(stored.dna.persona, "critic");
    assert_eq!(
        stored.apps[0].follow,
        Some(vec!["alice".to_string(), "bob".into(), "carol".into()])
    );
    assert_eq!(
        stored.apps[0].tools.as_ref().map(|t| t[0].params.clone()),
        Some(vec!["query".to_string(), "limit".into()])
    );
    assert_eq!(stored.apps[1].first_message.as_deref(), Some("gm"));
    // The secret stays as stored.
    assert_eq!(
        stored.apps[1].tools.as_ref().map(|t| t[0].params[0].clone()),
        Some("0xkey".to_string())
    );
}

#[tokio::test]
async fn secret_params_cannot_be_touched() {
    let server = TestServer::start(vec![full_agent("n1")]).await;
    let api = HttpAgentApi::new(&server.base_url).expect("client");
    let mut state = EditorState::new();
    open(&api, &mut state, "n1").await;

    let form = state.form.as_mut().expect("form");
    assert_eq!(
        form.set_param(ToolList::Telegram, 0, 0, "stolen"),
        Err(EditError::SecretParam { index: 0 })
    );
    assert_eq!(
        form.remove_param(ToolList::Telegram, 0, 0),
        Err(EditError::SecretParam { index: 0 })
    );
}

#[tokio::test]
async fn rename_then_save_again_addresses_new_id() {
    let server = TestServer::start(vec![bot_a1()]).await;
    let api = HttpAgentApi::new(&server.base_url).expect("client");
    let mut state = EditorState::new();
    open(&api, &mut state, "a1").await;

    let form = state.form.as_mut().expect("form");
    form.set_text(TextField::Id, "a2").expect("id");
    save(&api, &mut state).await;
    assert!(matches!(state.notice, Some(Notice::Success(_))));
    assert_eq!(state.agents[0].id, "a2");

    let form = state.form.as_mut().expect("form");
    form.set_text(TextField::Name, "Bot 2").expect("name");
    save(&api, &mut state).await;
    assert!(matches!(state.notice, Some(Notice::Success(_))));

    assert!(matches!(api.get_agent("a1").await, Err(ApiClientError::NotFound)));
    assert_eq!(api.get_agent("a2").await.expect("a2").dna.name, "Bot 2");
}

#[tokio::test]
async fn failed_save_keeps_edits() {
    let server = TestServer::start(vec![bot_a1(), full_agent("n1")]).await;
    let api = HttpAgentApi::new(&server.base_url).expect("client");
    let mut state = EditorState::new();
    open(&api, &mut state, "a1").await;

    let form = state.form.as_mut().expect("form");
    form.set_text(TextField::Id, "n1").expect("id");
    form.set_text(TextField::Name, "Taken").expect("name");
    save(&api, &mut state).await;

    assert!(state.is_editing());
    assert_eq!(
        state.notice,
        Some(Notice::Failure("Agent id already exists".into()))
    );
    let form = state.form.as_ref().expect("form");
    assert_eq!(form.agent_id, "n1");
    assert_eq!(form.name, "Taken");
    assert_eq!(state.selected.as_ref().map(|a| a.id.as_str()), Some("a1"));
    assert_eq!(api.get_agent("a1").await.expect("a1").dna.name, "Bot");
}
