use crate::config::Config;
use crate::host::{ButtonClick, Reply, SlashInvocation};
use crate::interaction::{Interaction, InteractionState};
use crate::pagination::{ButtonCodec, PageRenderer};
use crate::store::TrackStore;

use super::SlashCommand;

/// `/trackindex`: browse tracks page by page.
///
/// Subcommands: `all`, `name <name>`, `user <user>`, each with an optional
/// one-based `page`.
#[derive(Debug)]
pub struct TrackIndexCommand<S> {
    interaction: Interaction<S>,
}

impl<S: TrackStore> TrackIndexCommand<S> {
    pub fn new(interaction: Interaction<S>) -> Self {
        Self { interaction }
    }

    pub fn from_config(config: &Config, store: S) -> Self {
        let codec = ButtonCodec::new(config.bot.max_identifier_len);
        let renderer = PageRenderer::new(codec, config.bot.embed_color);
        Self::new(Interaction::new(
            config.bot.command_name.clone(),
            store,
            renderer,
        ))
    }
}

impl<S: TrackStore> SlashCommand for TrackIndexCommand<S> {
    fn name(&self) -> &str {
        self.interaction.command()
    }

    fn description(&self) -> &str {
        "List all the tracks"
    }

    fn execute(&self, invocation: &SlashInvocation) -> Reply {
        match self.interaction.invoke(invocation).into_reply() {
            Some(reply) => reply,
            None => {
                // Invocations never reach Ignored.
                tracing::error!(command = %invocation.command, "Invocation ended without a reply");
                Reply::Ephemeral("Something went wrong".to_string())
            }
        }
    }

    fn on_button(&self, click: &ButtonClick) -> Option<Reply> {
        match self.interaction.click(&click.identifier) {
            InteractionState::Ignored => None,
            outcome => outcome.into_reply(),
        }
    }
}
