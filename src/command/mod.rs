//! Slash commands and their registry.
//!
//! A command is any value implementing [`SlashCommand`]; the registry is a
//! plain name → handler map.

mod track_index;

pub use track_index::TrackIndexCommand;

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use crate::host::{ButtonClick, InboundEvent, Reply, SlashInvocation};
use crate::pagination::CLOSE_COMMAND;

/// A command reachable by slash invocation and by its own buttons.
pub trait SlashCommand: Send + Sync {
    /// Name users type, also written into this command's button identifiers.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Handle a slash invocation addressed to this command.
    fn execute(&self, invocation: &SlashInvocation) -> Reply;

    /// Handle a button click. `None` means the click is not for this command.
    fn on_button(&self, click: &ButtonClick) -> Option<Reply>;
}

/// Errors that can occur when registering a command.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Command '{0}' is already registered")]
    Duplicate(String),

    #[error("Command name '{0}' is reserved")]
    Reserved(String),

    #[error("Command name must not be empty")]
    EmptyName,
}

#[derive(Default, Clone)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Arc<dyn SlashCommand>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under its lowercased name.
    pub fn register(&mut self, command: Arc<dyn SlashCommand>) -> Result<(), RegistryError> {
        let key = command.name().to_lowercase();
        if key.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if key == CLOSE_COMMAND {
            return Err(RegistryError::Reserved(key));
        }
        if self.commands.contains_key(&key) {
            return Err(RegistryError::Duplicate(key));
        }
        tracing::debug!(command = %key, "Registered command");
        self.commands.insert(key, command);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn SlashCommand>> {
        self.commands.get(&name.to_lowercase())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// One `/name  description` line per command, in name order.
    pub fn help(&self) -> String {
        self.commands
            .iter()
            .map(|(name, command)| format!("/{}  {}", name, command.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Route an event to its handler.
    ///
    /// Invocations go to the command they name. Clicks are offered to each
    /// command in name order until one answers; a click nobody claims
    /// produces no reply.
    pub fn handle(&self, event: &InboundEvent) -> Option<Reply> {
        match event {
            InboundEvent::Command(invocation) => match self.get(&invocation.command) {
                Some(command) => Some(command.execute(invocation)),
                None => {
                    tracing::warn!(command = %invocation.command, "Invocation for unknown command");
                    Some(Reply::Ephemeral(format!(
                        "Unknown command `{}`",
                        invocation.command
                    )))
                }
            },
            InboundEvent::Button(click) => self
                .commands
                .values()
                .find_map(|command| command.on_button(click)),
        }
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::EventContext;

    struct Echo {
        name: &'static str,
    }

    impl SlashCommand for Echo {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "Echo the subcommand"
        }

        fn execute(&self, invocation: &SlashInvocation) -> Reply {
            Reply::Ephemeral(invocation.subcommand.clone().unwrap_or_default())
        }

        fn on_button(&self, click: &ButtonClick) -> Option<Reply> {
            click
                .identifier
                .starts_with(self.name)
                .then(|| Reply::Ephemeral(self.name.to_string()))
        }
    }

    fn context() -> EventContext {
        EventContext {
            channel_id: 1,
            message_id: Some(2),
            user_id: 3,
        }
    }

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(Echo { name: "alpha" })).unwrap();
        registry.register(Arc::new(Echo { name: "beta" })).unwrap();
        registry
    }

    #[test]
    fn rejects_duplicate_and_reserved_names() {
        let mut registry = registry();
        assert!(matches!(
            registry.register(Arc::new(Echo { name: "ALPHA" })),
            Err(RegistryError::Duplicate(_))
        ));
        assert!(matches!(
            registry.register(Arc::new(Echo { name: "close" })),
            Err(RegistryError::Reserved(_))
        ));
        assert!(matches!(
            registry.register(Arc::new(Echo { name: "" })),
            Err(RegistryError::EmptyName)
        ));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn invocation_routes_by_name() {
        let event = InboundEvent::Command(
            SlashInvocation::new("Beta", context()).with_subcommand("hello"),
        );
        assert_eq!(
            registry().handle(&event),
            Some(Reply::Ephemeral("hello".into()))
        );
    }

    #[test]
    fn unknown_invocation_gets_a_reply() {
        let event = InboundEvent::Command(SlashInvocation::new("gamma", context()));
        assert_eq!(
            registry().handle(&event),
            Some(Reply::Ephemeral("Unknown command `gamma`".into()))
        );
    }

    #[test]
    fn click_goes_to_the_claiming_command() {
        let click = |identifier: &str| {
            InboundEvent::Button(ButtonClick {
                identifier: identifier.to_string(),
                context: context(),
            })
        };
        assert_eq!(
            registry().handle(&click("beta:1")),
            Some(Reply::Ephemeral("beta".into()))
        );
        assert_eq!(registry().handle(&click("gamma:1")), None);
    }

    #[test]
    fn names_are_sorted() {
        assert_eq!(registry().names().collect::<Vec<_>>(), vec!["alpha", "beta"]);
    }

    #[test]
    fn help_lists_descriptions_in_name_order() {
        assert_eq!(
            registry().help(),
            "/alpha  Echo the subcommand\n/beta  Echo the subcommand"
        );
    }
}
