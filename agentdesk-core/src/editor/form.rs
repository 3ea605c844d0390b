//! Editable copy of one agent.
//!
//! List edits never mutate a vector in place: every append, edit and delete
//! builds the replacement vector and swaps it in, so a failed edit leaves the
//! form exactly as it was.

use crate::domain::{Agent, Channel, Tool, UpdateAgentRequest};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("{what} index {index} is out of range (len {len})")]
    OutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
    #[error("parameter {index} is a secret and cannot be edited here")]
    SecretParam { index: usize },
    #[error("agent has no {0} app")]
    MissingChannel(Channel),
}

/// Single-line or free-text fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Id,
    Behavior,
    Name,
    Persona,
    Style,
    XPrompt,
    TgPrompt,
    TgFirstMessage,
    ChatMessage,
}

impl TextField {
    pub fn label(self) -> &'static str {
        match self {
            TextField::Id => "ID",
            TextField::Behavior => "Behavior",
            TextField::Name => "Name",
            TextField::Persona => "Persona",
            TextField::Style => "Style",
            TextField::XPrompt => "X Prompt",
            TextField::TgPrompt => "Telegram Prompt",
            TextField::TgFirstMessage => "First Message",
            TextField::ChatMessage => "Chat Message",
        }
    }
}

/// Which tool list an edit addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolList {
    X,
    Telegram,
}

impl ToolList {
    pub fn channel(self) -> Channel {
        match self {
            ToolList::X => Channel::X,
            ToolList::Telegram => Channel::Telegram,
        }
    }

    /// Only Telegram tools hide their leading params.
    pub fn honors_secrets(self) -> bool {
        matches!(self, ToolList::Telegram)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XForm {
    pub prompt: String,
    pub follow: Vec<String>,
    pub tools: Vec<Tool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelegramForm {
    pub prompt: String,
    pub first_message: String,
    pub chat_message: String,
    pub tools: Vec<Tool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorForm {
    pub agent_id: String,
    pub behavior: String,
    pub name: String,
    pub persona: String,
    pub style: String,
    /// `None` when the agent has no X app.
    pub x: Option<XForm>,
    /// `None` when the agent has no Telegram app.
    pub telegram: Option<TelegramForm>,
}

impl EditorForm {
    /// Fills the form from the first app of each channel.
    pub fn from_agent(agent: &Agent) -> Self {
        let x = agent.app(Channel::X).map(|app| XForm {
            prompt: app.prompt.clone(),
            follow: app.follow.clone().unwrap_or_default(),
            tools: app.tools.clone().unwrap_or_default(),
        });
        let telegram = agent.app(Channel::Telegram).map(|app| TelegramForm {
            prompt: app.prompt.clone(),
            first_message: app.first_message.clone().unwrap_or_default(),
            chat_message: app.chat_message.clone().unwrap_or_default(),
            tools: app.tools.clone().unwrap_or_default(),
        });

        Self {
            agent_id: agent.id.clone(),
            behavior: agent.dna.behavior.clone(),
            name: agent.dna.name.clone(),
            persona: agent.dna.persona.clone(),
            style: agent.dna.style.clone(),
            x,
            telegram,
        }
    }

    /// Save payload for the agent currently stored under `old_id`.
    pub fn to_request(&self, old_id: &str) -> UpdateAgentRequest {
        let mut request = UpdateAgentRequest {
            old_id: old_id.to_string(),
            new_id: Some(self.agent_id.clone()),
            behavior: Some(self.behavior.clone()),
            name: Some(self.name.clone()),
            persona: Some(self.persona.clone()),
            style: Some(self.style.clone()),
            ..Default::default()
        };
        if let Some(x) = &self.x {
            request.x_prompt = Some(x.prompt.clone());
            request.x_follow = Some(x.follow.clone());
            request.x_tools = Some(x.tools.clone());
        }
        if let Some(tg) = &self.telegram {
            request.tg_prompt = Some(tg.prompt.clone());
            request.tg_first_message = Some(tg.first_message.clone());
            request.chat_message = Some(tg.chat_message.clone());
            request.tg_tools = Some(tg.tools.clone());
        }
        request
    }

    pub fn has_channel(&self, channel: Channel) -> bool {
        match channel {
            Channel::X => self.x.is_some(),
            Channel::Telegram => self.telegram.is_some(),
        }
    }

    pub fn text(&self, field: TextField) -> Option<&str> {
        let value = match field {
            TextField::Id => &self.agent_id,
            TextField::Behavior => &self.behavior,
            TextField::Name => &self.name,
            TextField::Persona => &self.persona,
            TextField::Style => &self.style,
            TextField::XPrompt => &self.x.as_ref()?.prompt,
            TextField::TgPrompt => &self.telegram.as_ref()?.prompt,
            TextField::TgFirstMessage => &self.telegram.as_ref()?.first_message,
            TextField::ChatMessage => &self.telegram.as_ref()?.chat_message,
        };
        Some(value.as_str())
    }

    pub fn set_text(
        &mut self,
        field: TextField,
        value: impl Into<String>,
    ) -> Result<(), EditError> {
        let value = value.into();
        match field {
            TextField::Id => self.agent_id = value,
            TextField::Behavior => self.behavior = value,
            TextField::Name => self.name = value,
            TextField::Persona => self.persona = value,
            TextField::Style => self.style = value,
            TextField::XPrompt => self.x_form()?.prompt = value,
            TextField::TgPrompt => self.telegram_form()?.prompt = value,
            TextField::TgFirstMessage => self.telegram_form()?.first_message = value,
            TextField::ChatMessage => self.telegram_form()?.chat_message = value,
        }
        Ok(())
    }

    pub fn follow(&self) -> &[String] {
        self.x.as_ref().map(|x| x.follow.as_slice()).unwrap_or(&[])
    }

    pub fn push_follow(&mut self, account: impl Into<String>) -> Result<(), EditError> {
        let x = self.x_form()?;
        x.follow = appended(&x.follow, account.into());
        Ok(())
    }

    pub fn set_follow(
        &mut self,
        index: usize,
        account: impl Into<String>,
    ) -> Result<(), EditError> {
        let x = self.x_form()?;
        x.follow = replaced(&x.follow, index, account.into(), "follow")?;
        Ok(())
    }

    pub fn remove_follow(&mut self, index: usize) -> Result<(), EditError> {
        let x = self.x_form()?;
        x.follow = removed(&x.follow, index, "follow")?;
        Ok(())
    }

    pub fn tools(&self, list: ToolList) -> &[Tool] {
        match list {
            ToolList::X => self.x.as_ref().map(|x| x.tools.as_slice()),
            ToolList::Telegram => self.telegram.as_ref().map(|tg| tg.tools.as_slice()),
        }
        .unwrap_or(&[])
    }

    /// Appends an empty tool.
    pub fn push_tool(&mut self, list: ToolList) -> Result<(), EditError> {
        let tools = self.tools_mut(list)?;
        *tools = appended(tools, Tool::default());
        Ok(())
    }

    pub fn set_tool_item(
        &mut self,
        list: ToolList,
        index: usize,
        item: impl Into<String>,
    ) -> Result<(), EditError> {
        let tools = self.tools_mut(list)?;
        let tool = tools.get(index).ok_or(EditError::OutOfRange {
            what: "tool",
            index,
            len: tools.len(),
        })?;
        let updated = Tool {
            item: item.into(),
            ..tool.clone()
        };
        *tools = replaced(tools, index, updated, "tool")?;
        Ok(())
    }

    pub fn remove_tool(&mut self, list: ToolList, index: usize) -> Result<(), EditError> {
        let tools = self.tools_mut(list)?;
        *tools = removed(tools, index, "tool")?;
        Ok(())
    }

    /// Appends an empty parameter to the tool at `tool`.
    pub fn push_param(&mut self, list: ToolList, tool: usize) -> Result<(), EditError> {
        self.rewrite_params(list, tool, |params| Ok(appended(params, String::new())))
    }

    pub fn set_param(
        &mut self,
        list: ToolList,
        tool: usize,
        param: usize,
        value: impl Into<String>,
    ) -> Result<(), EditError> {
        self.check_secret(list, tool, param)?;
        let value = value.into();
        self.rewrite_params(list, tool, |params| replaced(params, param, value, "parameter"))
    }

    pub fn remove_param(
        &mut self,
        list: ToolList,
        tool: usize,
        param: usize,
    ) -> Result<(), EditError> {
        self.check_secret(list, tool, param)?;
        self.rewrite_params(list, tool, |params| removed(params, param, "parameter"))
    }

    /// Whether the param is hidden from editing.
    pub fn is_secret_param(&self, list: ToolList, tool: usize, param: usize) -> bool {
        list.honors_secrets()
            && self
                .tools(list)
                .get(tool)
                .is_some_and(|tool| tool.is_secret(param))
    }

    fn check_secret(&self, list: ToolList, tool: usize, param: usize) -> Result<(), EditError> {
        if self.is_secret_param(list, tool, param) {
            return Err(EditError::SecretParam { index: param });
        }
        Ok(())
    }

    fn rewrite_params<F>(&mut self, list: ToolList, tool: usize, rewrite: F) -> Result<(), EditError>
    where
        F: FnOnce(&[String]) -> Result<Vec<String>, EditError>,
    {
        let tools = self.tools_mut(list)?;
        let current = tools.get(tool).ok_or(EditError::OutOfRange {
            what: "tool",
            index: tool,
            len: tools.len(),
        })?;
        let updated = Tool {
            params: rewrite(&current.params)?,
            ..current.clone()
        };
        *tools = replaced(tools, tool, updated, "tool")?;
        Ok(())
    }

    fn x_form(&mut self) -> Result<&mut XForm, EditError> {
        self.x.as_mut().ok_or(EditError::MissingChannel(Channel::X))
    }

    fn telegram_form(&mut self) -> Result<&mut TelegramForm, EditError> {
        self.telegram
            .as_mut()
            .ok_or(EditError::MissingChannel(Channel::Telegram))
    }

    fn tools_mut(&mut self, list: ToolList) -> Result<&mut Vec<Tool>, EditError> {
        match list {
            ToolList::X => Ok(&mut self.x_form()?.tools),
            ToolList::Telegram => Ok(&mut self.telegram_form()?.tools),
        }
    }
}

fn appended<T: Clone>(items: &[T], value: T) -> Vec<T> {
    items.iter().cloned().chain(std::iter::once(value)).collect()
}

fn replaced<T: Clone>(
    items: &[T],
    index: usize,
    value: T,
    what: &'static str,
) -> Result<Vec<T>, EditError> {
    if index >= items.len() {
        return Err(EditError::OutOfRange {
            what,
            index,
            len: items.len(),
        });
    }
    let mut value = Some(value);
    Ok(items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if i == index {
                value.take().unwrap_or_else(|| item.clone())
            } else {
                item.clone()
            }
        })
        .collect())
}

fn removed<T: Clone>(items: &[T], index: usize, what: &'static str) -> Result<Vec<T>, EditError> {
    if index >= items.len() {
        return Err(EditError::OutOfRange {
            what,
            index,
            len: items.len(),
        });
    }
    Ok(items
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, item)| item.clone())
        .collect())
}
