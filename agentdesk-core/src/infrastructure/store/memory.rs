use super::{AgentStore, StoreError};
use crate::domain::Agent;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::debug;

/// In-process agent collection. Backs `memory://` URLs and the test suites.
#[derive(Debug, Default)]
pub struct MemoryAgentStore {
    agents: RwLock<BTreeMap<String, Agent>>,
}

impl MemoryAgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store holding `agents`. A later duplicate id replaces an
    /// earlier one.
    pub fn with_agents(agents: impl IntoIterator<Item = Agent>) -> Self {
        let agents = agents
            .into_iter()
            .map(|agent| (agent.id.clone(), agent))
            .collect();
        Self {
            agents: RwLock::new(agents),
        }
    }

    /// Reads a JSON array of agents.
    pub fn from_seed_file(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Seed {
            path: path.to_path_buf(),
            source,
        })?;
        let agents: Vec<Agent> =
            serde_json::from_str(&content).map_err(|source| StoreError::SeedFormat {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), count = agents.len(), "Seeding memory store");
        Ok(Self::with_agents(agents))
    }

    pub async fn len(&self) -> usize {
        self.agents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.agents.read().await.is_empty()
    }
}

#[async_trait]
impl AgentStore for MemoryAgentStore {
    async fn list(&self) -> Result<Vec<Agent>, StoreError> {
        Ok(self.agents.read().await.values().cloned().collect())
    }

    async fn find(&self, id: &str) -> Result<Option<Agent>, StoreError> {
        Ok(self.agents.read().await.get(id).cloned())
    }

    async fn replace(&self, old_id: &str, agent: &Agent) -> Result<(), StoreError> {
        let mut agents = self.agents.write().await;
        if agent.id != old_id {
            if agents.contains_key(&agent.id) {
                return Err(StoreError::DuplicateId {
                    id: agent.id.clone(),
                });
            }
            agents.remove(old_id);
        }
        agents.insert(agent.id.clone(), agent.clone());
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
