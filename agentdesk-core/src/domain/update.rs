//! Partial updates of an agent record.
//!
//! The wire payload ([`UpdateAgentRequest`]) is a flat bag of optional fields.
//! It is converted once into [`AgentUpdate`], which says exactly which parts of
//! the record change, and only that typed form is ever applied.

use super::agent::{Agent, Channel, Tool};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utoipa::ToSchema;

/// Body of `PUT /api/agent`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAgentRequest {
    pub old_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_follow: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_tools: Option<Vec<Tool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tg_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tg_tools: Option<Vec<Tool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tg_first_message: Option<String>,
}

/// How blank strings for the id and dna fields are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlankPolicy {
    /// An empty string means "not provided" and leaves the stored value alone.
    #[default]
    Ignore,
    /// An empty string is stored like any other value.
    Persist,
}

impl BlankPolicy {
    fn keep(self, value: Option<String>) -> Option<String> {
        match self {
            BlankPolicy::Ignore => value.filter(|v| !v.is_empty()),
            BlankPolicy::Persist => value,
        }
    }
}

/// Replacement values for the dna fields. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnaPatch {
    pub behavior: Option<String>,
    pub name: Option<String>,
    pub persona: Option<String>,
    pub style: Option<String>,
}

impl DnaPatch {
    pub fn is_empty(&self) -> bool {
        self.behavior.is_none()
            && self.name.is_none()
            && self.persona.is_none()
            && self.style.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XUpdate {
    pub prompt: String,
    pub follow: Option<Vec<String>>,
    pub tools: Option<Vec<Tool>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramUpdate {
    pub prompt: String,
    pub chat_message: Option<String>,
    pub first_message: Option<String>,
    pub tools: Option<Vec<Tool>>,
}

/// A validated partial update addressed to the agent stored under `old_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentUpdate {
    pub old_id: String,
    pub new_id: Option<String>,
    pub dna: DnaPatch,
    pub x: Option<XUpdate>,
    pub telegram: Option<TelegramUpdate>,
}

impl AgentUpdate {
    pub fn new(old_id: impl Into<String>) -> Self {
        Self {
            old_id: old_id.into(),
            new_id: None,
            dna: DnaPatch::default(),
            x: None,
            telegram: None,
        }
    }

    /// Converts the wire payload. Channel blocks exist only when their prompt
    /// was sent; an empty id is never applied whatever the policy.
    pub fn from_request(request: UpdateAgentRequest, policy: BlankPolicy) -> Self {
        let x = request.x_prompt.map(|prompt| XUpdate {
            prompt,
            follow: request.x_follow,
            tools: request.x_tools,
        });
        let telegram = request.tg_prompt.map(|prompt| TelegramUpdate {
            prompt,
            chat_message: request.chat_message,
            first_message: request.tg_first_message,
            tools: request.tg_tools,
        });

        Self {
            old_id: request.old_id,
            new_id: request.new_id.filter(|id| !id.is_empty()),
            dna: DnaPatch {
                behavior: policy.keep(request.behavior),
                name: policy.keep(request.name),
                persona: policy.keep(request.persona),
                style: policy.keep(request.style),
            },
            x,
            telegram,
        }
    }

    /// Id the record is stored under once the update is applied.
    pub fn target_id(&self) -> &str {
        self.new_id.as_deref().unwrap_or(&self.old_id)
    }

    pub fn renames(&self) -> bool {
        self.target_id() != self.old_id
    }

    /// Merges the update into `agent` and reports which channels were written.
    pub fn apply_to(&self, agent: &mut Agent) -> AppliedChannels {
        if let Some(id) = &self.new_id {
            agent.id = id.clone();
        }

        let dna = &mut agent.dna;
        if let Some(behavior) = &self.dna.behavior {
            dna.behavior = behavior.clone();
        }
        if let Some(name) = &self.dna.name {
            dna.name = name.clone();
        }
        if let Some(persona) = &self.dna.persona {
            dna.persona = persona.clone();
        }
        if let Some(style) = &self.dna.style {
            dna.style = style.clone();
        }

        let mut applied = AppliedChannels::default();

        if let Some(update) = &self.x {
            warn_on_duplicates(agent, Channel::X);
            match agent.app_mut(Channel::X) {
                Some(app) => {
                    app.prompt = update.prompt.clone();
                    if let Some(follow) = &update.follow {
                        app.follow = Some(follow.clone());
                    }
                    if let Some(tools) = &update.tools {
                        app.tools = Some(tools.clone());
                    }
                    applied.x = true;
                }
                None => debug!(agent = %agent.id, "Agent has no X app; skipping X update"),
            }
        }

        if let Some(update) = &self.telegram {
            warn_on_duplicates(agent, Channel::Telegram);
            match agent.app_mut(Channel::Telegram) {
                Some(app) => {
                    app.prompt = update.prompt.clone();
                    if let Some(message) = &update.chat_message {
                        app.chat_message = Some(message.clone());
                    }
                    if let Some(message) = &update.first_message {
                        app.first_message = Some(message.clone());
                    }
                    if let Some(tools) = &update.tools {
                        app.tools = Some(tools.clone());
                    }
                    applied.telegram = true;
                }
                None => debug!(agent = %agent.id, "Agent has no TG app; skipping TG update"),
            }
        }

        applied
    }
}

/// Which channel blocks an update actually wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppliedChannels {
    pub x: bool,
    pub telegram: bool,
}

fn warn_on_duplicates(agent: &Agent, channel: Channel) {
    let count = agent.channel_count(channel);
    if count > 1 {
        warn!(
            agent = %agent.id,
            channel = %channel,
            count,
            "Agent has several apps for one channel; only the first is updated"
        );
    }
}
