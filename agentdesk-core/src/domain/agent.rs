//! Agent record types as stored in the `agent` collection.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use utoipa::ToSchema;

/// Tag used by X apps.
pub const X_APP_TYPE: &str = "X";
/// Tag used by Telegram apps.
pub const TELEGRAM_APP_TYPE: &str = "TG";

/// A configured persona with per-channel behavior.
///
/// Fields this crate does not model are kept in `extra` so a read followed by
/// an update never drops data written by other tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    #[serde(default)]
    pub dna: Dna,
    #[serde(default)]
    pub apps: Vec<App>,
    /// `None` when absent from the document; a stored `null` is `Some(Null)`.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub knowledge: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Agent {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            dna: Dna::default(),
            apps: Vec::new(),
            knowledge: None,
            meta: None,
            extra: Map::new(),
        }
    }

    pub fn with_dna(mut self, dna: Dna) -> Self {
        self.dna = dna;
        self
    }

    pub fn with_app(mut self, app: App) -> Self {
        self.apps.push(app);
        self
    }

    /// First app carrying the channel's tag.
    pub fn app(&self, channel: Channel) -> Option<&App> {
        self.apps.iter().find(|app| app.channel() == Some(channel))
    }

    pub fn app_mut(&mut self, channel: Channel) -> Option<&mut App> {
        self.apps
            .iter_mut()
            .find(|app| app.channel() == Some(channel))
    }

    /// Number of apps tagged with `channel`. Anything above one is a data problem:
    /// only the first entry is ever read or written.
    pub fn channel_count(&self, channel: Channel) -> usize {
        self.apps
            .iter()
            .filter(|app| app.channel() == Some(channel))
            .count()
    }
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Core personality fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Dna {
    #[serde(default)]
    pub behavior: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub persona: String,
    #[serde(default)]
    pub style: String,
}

/// Channel-specific configuration block of an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct App {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl App {
    pub fn new(kind: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            prompt: prompt.into(),
            sys_prompt: None,
            follow: None,
            first_message: None,
            chat_message: None,
            bearer_token: None,
            api_key: None,
            api_secret: None,
            access_token: None,
            token_secret: None,
            tools: None,
            extra: Map::new(),
        }
    }

    pub fn channel(&self) -> Option<Channel> {
        Channel::from_tag(&self.kind)
    }

    pub fn with_follow(mut self, follow: Vec<String>) -> Self {
        self.follow = Some(follow);
        self
    }

    pub fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn with_chat_message(mut self, message: impl Into<String>) -> Self {
        self.chat_message = Some(message.into());
        self
    }

    pub fn with_first_message(mut self, message: impl Into<String>) -> Self {
        self.first_message = Some(message.into());
        self
    }
}

/// A named capability with ordered string parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Tool {
    pub item: String,
    #[serde(default)]
    pub params: Vec<String>,
    /// Leading params hidden from the editor (credentials and the like).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secrets: Option<usize>,
}

impl Tool {
    pub fn new(item: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            item: item.into(),
            params,
            secrets: None,
        }
    }

    pub fn with_secrets(mut self, secrets: usize) -> Self {
        self.secrets = Some(secrets);
        self
    }

    pub fn secret_count(&self) -> usize {
        self.secrets.unwrap_or(0)
    }

    pub fn is_secret(&self, index: usize) -> bool {
        index < self.secret_count()
    }
}

/// App types the editor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    X,
    Telegram,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::X, Channel::Telegram];

    pub fn tag(self) -> &'static str {
        match self {
            Channel::X => X_APP_TYPE,
            Channel::Telegram => TELEGRAM_APP_TYPE,
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            X_APP_TYPE => Some(Channel::X),
            TELEGRAM_APP_TYPE => Some(Channel::Telegram),
            _ => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
