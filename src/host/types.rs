use std::collections::BTreeMap;

use crate::pagination::RenderedPage;

pub type ChannelId = u64;
pub type MessageId = u64;
pub type UserId = u64;

/// Where an inbound event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventContext {
    pub channel_id: ChannelId,
    /// Message the event is attached to (the clicked message for buttons).
    pub message_id: Option<MessageId>,
    pub user_id: UserId,
}

/// A typed slash-command option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Integer(i64),
    String(String),
    User(UserId),
}

/// Structured input of a slash-command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlashInvocation {
    pub command: String,
    pub subcommand: Option<String>,
    pub options: BTreeMap<String, OptionValue>,
    pub context: EventContext,
}

impl SlashInvocation {
    pub fn new(command: impl Into<String>, context: EventContext) -> Self {
        Self {
            command: command.into(),
            subcommand: None,
            options: BTreeMap::new(),
            context,
        }
    }

    pub fn with_subcommand(mut self, subcommand: impl Into<String>) -> Self {
        self.subcommand = Some(subcommand.into());
        self
    }

    pub fn with_option(mut self, name: impl Into<String>, value: OptionValue) -> Self {
        self.options.insert(name.into(), value);
        self
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.options.get(name) {
            Some(OptionValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.options.get(name) {
            Some(OptionValue::String(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn user(&self, name: &str) -> Option<UserId> {
        match self.options.get(name) {
            Some(OptionValue::User(value)) => Some(*value),
            _ => None,
        }
    }
}

/// A button click, carrying the identifier exactly as it was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonClick {
    pub identifier: String,
    pub context: EventContext,
}

/// Any event delivered by the chat host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Command(SlashInvocation),
    Button(ButtonClick),
}

impl InboundEvent {
    pub fn context(&self) -> &EventContext {
        match self {
            InboundEvent::Command(invocation) => &invocation.context,
            InboundEvent::Button(click) => &click.context,
        }
    }
}

/// What a handler wants the host to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text visible only to the invoking user.
    Ephemeral(String),
    /// Acknowledge privately, then post the page publicly in the channel.
    Publish { notice: String, page: RenderedPage },
    /// Delete the clicked message and post the page in its place.
    Replace { page: RenderedPage },
    /// Delete the clicked message.
    DeleteOrigin,
}
