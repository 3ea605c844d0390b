//! Shared fixtures: a real REST server on an ephemeral port over an in-memory store.

#![allow(dead_code)]

use agentdesk_core::application::AgentRepository;
use agentdesk_core::config::RestConfig;
use agentdesk_core::domain::{Agent, App, BlankPolicy, Dna, Tool};
use agentdesk_core::server::{build_router, serve_listener};
use agentdesk_core::store::MemoryAgentStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryAgentStore>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(agents: Vec<Agent>) -> Self {
        Self::start_with_policy(agents, BlankPolicy::Ignore).await
    }

    pub async fn start_with_policy(agents: Vec<Agent>, policy: BlankPolicy) -> Self {
        let store = Arc::new(MemoryAgentStore::with_agents(agents));
        let repository = AgentRepository::new(store.clone()).with_blank_policy(policy);
        let app = build_router(repository, &RestConfig::default()).expect("router");

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            let _ = serve_listener(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}"),
            store,
            handle,
        }
    }

    pub fn agent_url(&self) -> String {
        format!("{}/api/agent", self.base_url)
    }

    pub async fn stored(&self) -> Vec<Agent> {
        use agentdesk_core::store::AgentStore;
        self.store.list().await.expect("store list")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// `{id:"a1", dna:{name:"Bot"}, apps:[{type:"X", prompt:"p1", follow:["u1"], tools:[]}]}`
pub fn bot_a1() -> Agent {
    Agent::new("a1")
        .with_dna(Dna {
            name: "Bot".into(),
            ..Dna::default()
        })
        .with_app(
            App::new("X", "p1")
                .with_follow(vec!["u1".into()])
                .with_tools(Vec::new()),
        )
}

/// Agent with both channels, a secret-bearing Telegram tool and extra fields.
pub fn full_agent(id: &str) -> Agent {
    let mut agent = Agent::new(id)
        .with_dna(Dna {
            behavior: "calm".into(),
            name: "Nova".into(),
            persona: "analyst".into(),
            style: "short".into(),
        })
        .with_app(
            App::new("X", "x prompt")
                .with_follow(vec!["alice".into(), "bob".into()])
                .with_tools(vec![Tool::new("search", vec!["query".into()])]),
        )
        .with_app(
            App::new("TG", "tg prompt")
                .with_first_message("hello")
                .with_chat_message("hi there")
                .with_tools(vec![
                    Tool::new("wallet", vec!["0xkey".into(), "mainnet".into()]).with_secrets(1),
                ]),
        );
    agent.knowledge = Some(serde_json::json!({"docs": ["faq.md"]}));
    agent
        .extra
        .insert("owner".into(), serde_json::json!("team-a"));
    agent
}
