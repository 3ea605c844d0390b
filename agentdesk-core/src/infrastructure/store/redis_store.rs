use super::{AgentStore, StoreError, redact};
use crate::domain::Agent;
use async_trait::async_trait;
use redis::Script;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use std::collections::HashMap;
use tracing::{debug, info};

/// Moves a document to a new field of the hash unless that field is taken.
/// KEYS[1] = hash, ARGV = new id, document, old id. Returns 0 on conflict.
const RENAME_SCRIPT: &str = r"
if redis.call('HSETNX', KEYS[1], ARGV[1], ARGV[2]) == 0 then
  return 0
end
redis.call('HDEL', KEYS[1], ARGV[3])
return 1
";

/// Agent documents kept as JSON values of one Redis hash, one field per id.
///
/// The connection manager is created once and cloned per call; it multiplexes
/// requests over a single connection and reconnects on its own once running.
/// The initial connection is tried exactly once.
#[derive(Clone)]
pub struct RedisAgentStore {
    connection: ConnectionManager,
    key: String,
    rename: Script,
}

impl RedisAgentStore {
    pub async fn connect(url: &str, collection: &str) -> Result<Self, StoreError> {
        info!(url = %redact(url), "Connecting to Redis");
        let client = redis::Client::open(url)
            .map_err(|err| StoreError::Connect(format!("{}: {err}", redact(url))))?;
        let config = ConnectionManagerConfig::new().set_number_of_retries(0);
        let connection = ConnectionManager::new_with_config(client, config)
            .await
            .map_err(|err| StoreError::Connect(format!("{}: {err}", redact(url))))?;

        Ok(Self {
            connection,
            key: collection.to_string(),
            rename: Script::new(RENAME_SCRIPT),
        })
    }

    fn decode(id: &str, raw: &str) -> Result<Agent, StoreError> {
        serde_json::from_str(raw).map_err(|source| StoreError::Corrupt {
            id: id.to_string(),
            source,
        })
    }

    fn encode(agent: &Agent) -> Result<String, StoreError> {
        serde_json::to_string(agent).map_err(|source| StoreError::Encode {
            id: agent.id.clone(),
            source,
        })
    }
}

fn backend_error(err: redis::RedisError) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl AgentStore for RedisAgentStore {
    async fn list(&self) -> Result<Vec<Agent>, StoreError> {
        let mut conn = self.connection.clone();
        let entries: HashMap<String, String> = redis::cmd("HGETALL")
            .arg(&self.key)
            .query_async(&mut conn)
            .await
            .map_err(backend_error)?;

        let mut agents = entries
            .iter()
            .map(|(id, raw)| Self::decode(id, raw))
            .collect::<Result<Vec<_>, _>>()?;
        agents.sort_by(|a, b| a.id.cmp(&b.id));
        debug!(count = agents.len(), key = %self.key, "Listed agents from Redis");
        Ok(agents)
    }

    async fn find(&self, id: &str) -> Result<Option<Agent>, StoreError> {
        let mut conn = self.connection.clone();
        let raw: Option<String> = redis::cmd("HGET")
            .arg(&self.key)
            .arg(id)
            .query_async(&mut conn)
            .await
            .map_err(backend_error)?;

        raw.map(|raw| Self::decode(id, &raw)).transpose()
    }

    async fn replace(&self, old_id: &str, agent: &Agent) -> Result<(), StoreError> {
        let document = Self::encode(agent)?;
        let mut conn = self.connection.clone();

        if agent.id == old_id {
            redis::cmd("HSET")
                .arg(&self.key)
                .arg(&agent.id)
                .arg(&document)
                .query_async::<()>(&mut conn)
                .await
                .map_err(backend_error)?;
            return Ok(());
        }

        let renamed: bool = self
            .rename
            .key(&self.key)
            .arg(&agent.id)
            .arg(&document)
            .arg(old_id)
            .invoke_async(&mut conn)
            .await
            .map_err(backend_error)?;
        if !renamed {
            return Err(StoreError::DuplicateId {
                id: agent.id.clone(),
            });
        }
        debug!(old_id, new_id = %agent.id, "Renamed agent document");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
