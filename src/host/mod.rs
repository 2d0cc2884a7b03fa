//! Chat host collaborator.
//!
//! The host delivers inbound events and carries out replies. Handlers never
//! talk to the host directly: they return a [`Reply`] value and [`deliver`]
//! applies it.

mod types;

pub use types::{
    ButtonClick, ChannelId, EventContext, InboundEvent, MessageId, OptionValue, Reply,
    SlashInvocation, UserId,
};

use std::future::Future;

use thiserror::Error;

use crate::pagination::RenderedPage;

/// Errors reported by a chat host.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("event has no originating message")]
    MissingMessage,

    #[error("message {0} not found")]
    UnknownMessage(MessageId),

    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Operations a chat host must support.
pub trait ChatHost: Send + Sync + 'static {
    /// Reply to the event described by `context`.
    fn reply(
        &self,
        context: &EventContext,
        text: &str,
        ephemeral: bool,
    ) -> impl Future<Output = Result<(), HostError>> + Send;

    /// Post a new message with the page's buttons attached.
    fn send_page(
        &self,
        channel_id: ChannelId,
        page: &RenderedPage,
    ) -> impl Future<Output = Result<MessageId, HostError>> + Send;

    fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> impl Future<Output = Result<(), HostError>> + Send;
}

/// Apply a reply through the host.
pub async fn deliver<H: ChatHost>(
    host: &H,
    context: &EventContext,
    reply: Reply,
) -> Result<(), HostError> {
    match reply {
        Reply::Ephemeral(text) => host.reply(context, &text, true).await,
        Reply::Publish { notice, page } => {
            host.reply(context, &notice, true).await?;
            host.send_page(context.channel_id, &page).await?;
            Ok(())
        }
        Reply::Replace { page } => {
            let message_id = context.message_id.ok_or(HostError::MissingMessage)?;
            // Replaced, never edited.
            let (deleted, sent) = tokio::join!(
                host.delete_message(context.channel_id, message_id),
                host.send_page(context.channel_id, &page),
            );
            deleted?;
            sent?;
            Ok(())
        }
        Reply::DeleteOrigin => {
            let message_id = context.message_id.ok_or(HostError::MissingMessage)?;
            host.delete_message(context.channel_id, message_id).await
        }
    }
}
