pub mod agent;
pub mod update;

pub use agent::{Agent, App, Channel, Dna, TELEGRAM_APP_TYPE, Tool, X_APP_TYPE};
pub use update::{
    AgentUpdate, AppliedChannels, BlankPolicy, DnaPatch, TelegramUpdate, UpdateAgentRequest,
    XUpdate,
};
