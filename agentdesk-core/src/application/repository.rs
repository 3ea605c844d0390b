//! Agent repository: list, fetch and update on top of an [`AgentStore`].

use crate::domain::{Agent, AgentUpdate, AppliedChannels, BlankPolicy, UpdateAgentRequest};
use crate::infrastructure::store::{AgentStore, StoreError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("no agents stored")]
    Empty,
    #[error("agent '{0}' not found")]
    NotFound(String),
    #[error("an agent with id '{0}' already exists")]
    Conflict(String),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for RepositoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateId { id } => RepositoryError::Conflict(id),
            other => RepositoryError::Store(other),
        }
    }
}

/// Outcome of a successful update.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub agent: Agent,
    pub channels: AppliedChannels,
}

#[derive(Clone)]
pub struct AgentRepository {
    store: Arc<dyn AgentStore>,
    blank_policy: BlankPolicy,
}

impl AgentRepository {
    pub fn new(store: Arc<dyn AgentStore>) -> Self {
        Self {
            store,
            blank_policy: BlankPolicy::default(),
        }
    }

    pub fn with_blank_policy(mut self, policy: BlankPolicy) -> Self {
        self.blank_policy = policy;
        self
    }

    /// All agents. An empty collection is reported as [`RepositoryError::Empty`].
    pub async fn list(&self) -> Result<Vec<Agent>, RepositoryError> {
        let agents = self.store.list().await?;
        debug!(count = agents.len(), "Fetched agents");
        if agents.is_empty() {
            return Err(RepositoryError::Empty);
        }
        Ok(agents)
    }

    pub async fn get(&self, id: &str) -> Result<Agent, RepositoryError> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    /// Decodes a wire payload with the configured blank policy and applies it.
    pub async fn update_from_request(
        &self,
        request: UpdateAgentRequest,
    ) -> Result<UpdateOutcome, RepositoryError> {
        self.update(AgentUpdate::from_request(request, self.blank_policy))
            .await
    }

    /// Loads the agent under `update.old_id`, merges the update and writes the
    /// whole record back in one store call. Nothing is written when the agent
    /// does not exist.
    pub async fn update(&self, update: AgentUpdate) -> Result<UpdateOutcome, RepositoryError> {
        let mut agent = self.get(&update.old_id).await?;
        let channels = update.apply_to(&mut agent);

        self.store.replace(&update.old_id, &agent).await?;

        info!(
            old_id = %update.old_id,
            id = %agent.id,
            renamed = update.renames(),
            x = channels.x,
            telegram = channels.telegram,
            "Agent updated"
        );
        Ok(UpdateOutcome { agent, channels })
    }
}
