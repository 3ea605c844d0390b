// REST API read-path tests
//
// Every test binds a real server on an ephemeral port over an in-memory store
// and talks to it with reqwest.

#[path = "../common/mod.rs"]
mod common;

use agentdesk_core::domain::Agent;
use common::{TestServer, bot_a1, full_agent};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn listed_agents_match_fetch_by_id() {
    let server = TestServer::start(vec![bot_a1(), full_agent("n1"), full_agent("n2")]).await;
    let http = reqwest::Client::new();

    let response = http.get(server.agent_url()).send().await.expect("list");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("list body");
    let listed: Vec<Agent> = serde_json::from_value(body["agents"].clone()).expect("agents");
    assert_eq!(listed.len(), 3);

    for agent in listed {
        let response = http
            .post(server.agent_url())
            .json(&json!({"id": agent.id}))
            .send()
            .await
            .expect("get");
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.expect("get body");
        let fetched: Agent = serde_json::from_value(body["agent"].clone()).expect("agent");
        assert_eq!(fetched, agent);
    }
}

#[tokio::test]
async fn list_is_sorted_by_id() {
    let server = TestServer::start(vec![full_agent("zeta"), bot_a1(), full_agent("mid")]).await;

    let body: Value = reqwest::get(server.agent_url())
        .await
        .expect("list")
        .json()
        .await
        .expect("body");
    let ids: Vec<&str> = body["agents"]
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|a| a["id"].as_str())
        .collect();
    assert_eq!(ids, ["a1", "mid", "zeta"]);
}

#[tokio::test]
async fn unmodelled_fields_are_returned() {
    let server = TestServer::start(vec![full_agent("n1")]).await;

    let body: Value = reqwest::Client::new()
        .post(server.agent_url())
        .json(&json!({"id": "n1"}))
        .send()
        .await
        .expect("get")
        .json()
        .await
        .expect("body");

    assert_eq!(body["agent"]["owner"], "team-a");
    assert_eq!(body["agent"]["knowledge"], json!({"docs": ["faq.md"]}));
    assert_eq!(body["agent"]["apps"][1]["tools"][0]["secrets"], 1);
}

#[tokio::test]
async fn empty_collection_lists_as_not_found() {
    let server = TestServer::start(Vec::new()).await;

    let response = reqwest::get(server.agent_url()).await.expect("list");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("body");
    assert_eq!(body, json!({"error": "Agents not found"}));
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let server = TestServer::start(vec![bot_a1()]).await;

    let response = reqwest::Client::new()
        .post(server.agent_url())
        .json(&json!({"id": "missing"}))
        .send()
        .await
        .expect("get");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("body");
    assert_eq!(body, json!({"error": "Agent not found"}));
}

#[tokio::test]
async fn malformed_lookup_body_is_internal_error() {
    let server = TestServer::start(vec![bot_a1()]).await;

    let response = reqwest::Client::new()
        .post(server.agent_url())
        .header("content-type", "application/json")
        .body("{\"id\": ")
        .send()
        .await
        .expect("get");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.expect("body");
    assert_eq!(body, json!({"error": "Internal server error"}));
}

#[tokio::test]
async fn health_reports_ok() {
    let server = TestServer::start(Vec::new()).await;

    let response = reqwest::get(format!("{}/health", server.base_url))
        .await
        .expect("health");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("body");
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn openapi_document_lists_agent_routes() {
    let server = TestServer::start(Vec::new()).await;

    let doc: Value = reqwest::get(format!("{}/api-doc/openapi.json", server.base_url))
        .await
        .expect("openapi")
        .json()
        .await
        .expect("body");

    let agent_path = &doc["paths"]["/api/agent"];
    assert!(agent_path["get"].is_object());
    assert!(agent_path["post"].is_object());
    assert!(agent_path["put"].is_object());
    assert!(doc["paths"]["/health"]["get"].is_object());
}
