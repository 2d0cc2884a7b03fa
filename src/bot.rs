//! Event loop: every inbound event is handled by its own task.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::command::CommandRegistry;
use crate::host::{deliver, ChatHost, InboundEvent};

/// Capacity of the inbound event channel.
pub const EVENT_BUFFER: usize = 64;

/// Routes inbound events to commands and delivers their replies.
pub struct Bot<H> {
    registry: Arc<CommandRegistry>,
    host: Arc<H>,
}

impl<H> Clone for Bot<H> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            host: Arc::clone(&self.host),
        }
    }
}

impl<H: ChatHost> Bot<H> {
    pub fn new(registry: CommandRegistry, host: Arc<H>) -> Self {
        Self {
            registry: Arc::new(registry),
            host,
        }
    }

    /// Handle one event to completion.
    ///
    /// Returns whether a reply was delivered. Delivery failures are logged
    /// and dropped.
    pub async fn handle(&self, event: InboundEvent) -> bool {
        let Some(reply) = self.registry.handle(&event) else {
            tracing::trace!("No handler claimed the event");
            return false;
        };

        match deliver(self.host.as_ref(), event.context(), reply).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to deliver reply");
                false
            }
        }
    }

    /// Consume events until the channel closes or `shutdown` resolves.
    ///
    /// Events are handled concurrently and in no particular order. Tasks
    /// already running are awaited before returning.
    pub async fn run<F>(self, mut events: mpsc::Receiver<InboundEvent>, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut tasks = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else { break };
                    let span = event_span(&event);
                    let bot = self.clone();
                    tasks.spawn(async move { bot.handle(event).await }.instrument(span));
                }
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    if let Err(err) = joined {
                        tracing::error!(error = %err, "Event task failed");
                    }
                }
                () = &mut shutdown => {
                    tracing::info!("Shutdown requested");
                    break;
                }
            }
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(err) = joined {
                tracing::error!(error = %err, "Event task failed");
            }
        }
        tracing::debug!("Event loop stopped");
    }
}

fn event_span(event: &InboundEvent) -> tracing::Span {
    let context = event.context();
    match event {
        InboundEvent::Command(invocation) => tracing::debug_span!(
            "command",
            command = %invocation.command,
            channel = context.channel_id,
            user = context.user_id,
        ),
        InboundEvent::Button(_) => tracing::debug_span!(
            "button",
            channel = context.channel_id,
            message = ?context.message_id,
            user = context.user_id,
        ),
    }
}
