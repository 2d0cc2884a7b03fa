//! Shared test utilities: a recording track store and a recording chat host.

#![allow(dead_code, unused_imports)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use trackindex::command::{CommandRegistry, TrackIndexCommand};
use trackindex::config::Config;
use trackindex::host::{
    ButtonClick, ChannelId, ChatHost, EventContext, HostError, InboundEvent, MessageId,
    OptionValue, SlashInvocation,
};
use trackindex::pagination::RenderedPage;
use trackindex::store::{
    InMemoryTrackStore, Page, PageRequest, StoreError, Track, TrackStore, TrackSummary,
};

pub const CHANNEL: ChannelId = 10;
pub const USER: u64 = 77;

/// Tracks `1..=count`, uploaded alternately by users 42 and 43.
pub fn tracks(count: u64) -> Vec<Track> {
    (1..=count)
        .map(|id| Track {
            id,
            name: format!("Track {id}"),
            uploader_id: if id % 2 == 0 { 42 } else { 43 },
        })
        .collect()
}

/// A store that records every query and can be told to fail.
#[derive(Default)]
pub struct RecordingStore {
    inner: InMemoryTrackStore,
    calls: Mutex<Vec<String>>,
    fail: std::sync::atomic::AtomicBool,
}

impl RecordingStore {
    pub fn with_tracks(count: u64) -> Self {
        Self {
            inner: InMemoryTrackStore::from_tracks(tracks(count)),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        let store = Self::default();
        store.fail.store(true, Ordering::SeqCst);
        store
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: String) -> Result<(), StoreError> {
        self.calls.lock().push(call);
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".into()));
        }
        Ok(())
    }
}

impl TrackStore for RecordingStore {
    fn find_all(&self, request: PageRequest) -> Result<Page<TrackSummary>, StoreError> {
        self.record(format!("all page={} size={}", request.page_index, request.page_size))?;
        self.inner.find_all(request)
    }

    fn find_by_name_like(
        &self,
        fragment: &str,
        request: PageRequest,
    ) -> Result<Page<TrackSummary>, StoreError> {
        self.record(format!("name={} page={}", fragment, request.page_index))?;
        self.inner.find_by_name_like(fragment, request)
    }

    fn find_by_uploader(
        &self,
        uploader_id: u64,
        request: PageRequest,
    ) -> Result<Page<TrackSummary>, StoreError> {
        self.record(format!("user={} page={}", uploader_id, request.page_index))?;
        self.inner.find_by_uploader(uploader_id, request)
    }
}

/// Everything a host was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    Reply { text: String, ephemeral: bool },
    Send { message_id: MessageId, page: RenderedPage },
    Delete { message_id: MessageId },
}

#[derive(Default)]
pub struct RecordingHost {
    actions: Mutex<Vec<HostAction>>,
    next_id: AtomicUsize,
}

impl RecordingHost {
    pub fn actions(&self) -> Vec<HostAction> {
        self.actions.lock().clone()
    }

    /// The last page sent, with its message id.
    pub fn last_page(&self) -> Option<(MessageId, RenderedPage)> {
        self.actions.lock().iter().rev().find_map(|action| match action {
            HostAction::Send { message_id, page } => Some((*message_id, page.clone())),
            _ => None,
        })
    }
}

impl ChatHost for RecordingHost {
    async fn reply(
        &self,
        _context: &EventContext,
        text: &str,
        ephemeral: bool,
    ) -> Result<(), HostError> {
        self.actions.lock().push(HostAction::Reply {
            text: text.to_string(),
            ephemeral,
        });
        Ok(())
    }

    async fn send_page(
        &self,
        _channel_id: ChannelId,
        page: &RenderedPage,
    ) -> Result<MessageId, HostError> {
        let message_id = self.next_id.fetch_add(1, Ordering::SeqCst) as MessageId + 100;
        self.actions.lock().push(HostAction::Send {
            message_id,
            page: page.clone(),
        });
        Ok(message_id)
    }

    async fn delete_message(
        &self,
        _channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), HostError> {
        self.actions.lock().push(HostAction::Delete { message_id });
        Ok(())
    }
}

/// Registry holding one track index command over `store`.
pub fn registry(store: Arc<RecordingStore>) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry
        .register(Arc::new(TrackIndexCommand::from_config(
            &Config::default(),
            store,
        )))
        .expect("register trackindex");
    registry
}

pub fn invocation(subcommand: &str) -> SlashInvocation {
    SlashInvocation::new(
        "trackindex",
        EventContext {
            channel_id: CHANNEL,
            message_id: None,
            user_id: USER,
        },
    )
    .with_subcommand(subcommand)
}

pub fn invocation_with(subcommand: &str, options: &[(&str, OptionValue)]) -> SlashInvocation {
    options
        .iter()
        .fold(invocation(subcommand), |inv, (name, value)| {
            inv.with_option(*name, value.clone())
        })
}

pub fn click(identifier: &str, message_id: MessageId) -> InboundEvent {
    InboundEvent::Button(ButtonClick {
        identifier: identifier.to_string(),
        context: EventContext {
            channel_id: CHANNEL,
            message_id: Some(message_id),
            user_id: USER,
        },
    })
}
