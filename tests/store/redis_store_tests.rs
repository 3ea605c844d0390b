// Redis store tests
//
// Run against the server named by AGENT_STORE_URL; skipped when it is not a
// redis:// or rediss:// URL. Each test uses its own hash and deletes it.
// The unreachable-server case needs no server and always runs.

use agentdesk_core::config::STORE_URL_ENV;
use agentdesk_core::domain::{Agent, App, Dna};
use agentdesk_core::store::{AgentStore, RedisAgentStore, StoreError};
use std::time::{Duration, Instant};

fn redis_url() -> Option<String> {
    std::env::var(STORE_URL_ENV)
        .ok()
        .filter(|url| url.starts_with("redis://") || url.starts_with("rediss://"))
}

async fn raw_connection(url: &str) -> redis::aio::MultiplexedConnection {
    let client = redis::Client::open(url).expect("client");
    client
        .get_multiplexed_async_connection()
        .await
        .expect("connection")
}

async fn hash_fields(url: &str, key: &str) -> Vec<String> {
    let mut conn = raw_connection(url).await;
    let mut fields: Vec<String> = redis::cmd("HKEYS")
        .arg(key)
        .query_async(&mut conn)
        .await
        .expect("HKEYS");
    fields.sort();
    fields
}

async fn drop_hash(url: &str, key: &str) {
    let mut conn = raw_connection(url).await;
    let _: () = redis::cmd("DEL")
        .arg(key)
        .query_async(&mut conn)
        .await
        .expect("DEL");
}

fn agent(id: &str, name: &str) -> Agent {
    Agent::new(id)
        .with_dna(Dna {
            name: name.into(),
            ..Dna::default()
        })
        .with_app(App::new("X", "prompt"))
}

#[tokio::test]
async fn stores_lists_and_renames_documents() {
    let Some(url) = redis_url() else {
        eprintln!("SKIPPED: {STORE_URL_ENV} is not a redis URL");
        return;
    };
    let key = format!("agentdesk-test-{}-rename", std::process::id());
    let store = RedisAgentStore::connect(&url, &key).await.expect("connect");

    store.replace("b2", &agent("b2", "Second")).await.expect("b2");
    store.replace("a1", &agent("a1", "First")).await.expect("a1");

    let ids: Vec<String> = store
        .list()
        .await
        .expect("list")
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(ids, ["a1", "b2"]);

    store.replace("a1", &agent("a9", "First")).await.expect("rename");
    assert!(store.find("a1").await.expect("find a1").is_none());
    assert_eq!(
        store.find("a9").await.expect("find a9").map(|a| a.dna.name),
        Some("First".to_string())
    );

    drop_hash(&url, &key).await;
}

#[tokio::test]
async fn rename_onto_existing_id_is_refused() {
    let Some(url) = redis_url() else {
        eprintln!("SKIPPED: {STORE_URL_ENV} is not a redis URL");
        return;
    };
    let key = format!("agentdesk-test-{}-conflict", std::process::id());
    let store = RedisAgentStore::connect(&url, &key).await.expect("connect");

    store.replace("a1", &agent("a1", "First")).await.expect("a1");
    store.replace("b2", &agent("b2", "Second")).await.expect("b2");

    let result = store.replace("a1", &agent("b2", "Clobber")).await;
    assert!(matches!(result, Err(StoreError::DuplicateId { .. })));
    assert_eq!(
        store.find("b2").await.expect("find").map(|a| a.dna.name),
        Some("Second".to_string())
    );
    assert!(store.find("a1").await.expect("find").is_some());

    drop_hash(&url, &key).await;
}

#[tokio::test]
async fn rename_moves_the_document_in_one_step() {
    let Some(url) = redis_url() else {
        eprintln!("SKIPPED: {STORE_URL_ENV} is not a redis URL");
        return;
    };
    let key = format!("agentdesk-test-{}-move", std::process::id());
    let store = RedisAgentStore::connect(&url, &key).await.expect("connect");

    store.replace("a1", &agent("a1", "First")).await.expect("a1");
    store.replace("c3", &agent("c3", "Third")).await.expect("c3");
    store.replace("a1", &agent("a2", "First")).await.expect("rename");
    assert_eq!(hash_fields(&url, &key).await, ["a2", "c3"]);

    let refused = store.replace("a2", &agent("c3", "First")).await;
    assert!(matches!(refused, Err(StoreError::DuplicateId { id }) if id == "c3"));
    assert_eq!(hash_fields(&url, &key).await, ["a2", "c3"]);

    drop_hash(&url, &key).await;
}

#[tokio::test]
async fn unreachable_server_fails_without_retrying() {
    let started = Instant::now();
    let result = RedisAgentStore::connect("redis://127.0.0.1:1/", "agent").await;

    assert!(matches!(result, Err(StoreError::Connect(_))));
    assert!(
        started.elapsed() < Duration::from_secs(2),
        "connect took {:?}",
        started.elapsed()
    );
}
