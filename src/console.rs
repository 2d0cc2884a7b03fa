//! Console chat host used by the binary.
//!
//! Messages are printed to a writer; slash invocations and button clicks are
//! typed on stdin:
//!
//! ```text
//! /trackindex all [page]
//! /trackindex name <text> [page]
//! /trackindex user <id> [page]
//! click <n>
//! quit
//! ```

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::host::{
    ButtonClick, ChannelId, ChatHost, EventContext, HostError, InboundEvent, MessageId,
    OptionValue, SlashInvocation, UserId,
};
use crate::interaction::{NAME_OPTION, PAGE_OPTION, USER_OPTION};
use crate::pagination::RenderedPage;

/// The single channel of the console.
pub const CONSOLE_CHANNEL: ChannelId = 1;

/// Chat host that renders messages as text.
pub struct ConsoleHost<W> {
    out: Mutex<W>,
    messages: Mutex<BTreeMap<MessageId, RenderedPage>>,
    next_id: AtomicU64,
}

impl<W: Write + Send + 'static> ConsoleHost<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            messages: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// The most recently posted message still on screen.
    pub fn latest(&self) -> Option<(MessageId, RenderedPage)> {
        self.messages
            .lock()
            .iter()
            .next_back()
            .map(|(id, page)| (*id, page.clone()))
    }

    pub fn message_count(&self) -> usize {
        self.messages.lock().len()
    }

    /// Resolve `click <n>` against the latest message.
    pub fn click(&self, button: usize, user_id: UserId) -> Result<InboundEvent, String> {
        let (message_id, page) = self
            .latest()
            .ok_or_else(|| "No message to click on".to_string())?;
        let target = button
            .checked_sub(1)
            .and_then(|index| page.buttons.get(index))
            .ok_or_else(|| format!("Message {} has no button {}", message_id, button))?;
        if target.disabled {
            return Err(format!("Button {} is disabled", button));
        }

        Ok(InboundEvent::Button(ButtonClick {
            identifier: target.identifier.clone(),
            context: EventContext {
                channel_id: CONSOLE_CHANNEL,
                message_id: Some(message_id),
                user_id,
            },
        }))
    }

    /// Consume the host and return its writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn print(&self, text: &str) -> Result<(), HostError> {
        let mut out = self.out.lock();
        writeln!(out, "{}", text)
            .and_then(|()| out.flush())
            .map_err(|e| HostError::Delivery(e.to_string()))
    }
}

impl<W: Write + Send + 'static> ChatHost for ConsoleHost<W> {
    async fn reply(
        &self,
        _context: &EventContext,
        text: &str,
        ephemeral: bool,
    ) -> Result<(), HostError> {
        if ephemeral {
            self.print(&format!("(only you) {}", text))
        } else {
            self.print(text)
        }
    }

    async fn send_page(
        &self,
        _channel_id: ChannelId,
        page: &RenderedPage,
    ) -> Result<MessageId, HostError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.print(&format_page(id, page))?;
        self.messages.lock().insert(id, page.clone());
        Ok(id)
    }

    async fn delete_message(
        &self,
        _channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), HostError> {
        if self.messages.lock().remove(&message_id).is_none() {
            return Err(HostError::UnknownMessage(message_id));
        }
        self.print(&format!("(message #{} deleted)", message_id))
    }
}

/// Text rendering of a posted page.
pub fn format_page(id: MessageId, page: &RenderedPage) -> String {
    let buttons = page
        .buttons
        .iter()
        .enumerate()
        .map(|(index, button)| {
            if button.disabled {
                format!("[{} {} ·]", index + 1, button.control.label())
            } else {
                format!("[{} {}]", index + 1, button.control.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "── #{} {} ──\n{}\n{}\n{}",
        id, page.title, page.description, page.footer, buttons
    )
}

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    Invoke(SlashInvocation),
    Click(usize),
    Help,
    Quit,
    Empty,
}

pub const HELP: &str = "\
Commands:
  /<command> all [page]
  /<command> name <text> [page]
  /<command> user <id> [page]
  click <n>    click the n-th button of the latest message
  help
  quit";

/// Parse one console line.
///
/// A trailing integer after the subcommand's required argument is taken as
/// the page; for `name` the rest of the line is the name.
pub fn parse_line(line: &str, user_id: UserId) -> Result<ConsoleInput, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ConsoleInput::Empty);
    }

    if let Some(rest) = line.strip_prefix('/') {
        return parse_invocation(rest, user_id).map(ConsoleInput::Invoke);
    }

    let mut words = line.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some("quit" | "exit"), None, None) => Ok(ConsoleInput::Quit),
        (Some("help"), None, None) => Ok(ConsoleInput::Help),
        (Some("click"), Some(n), None) => n
            .parse()
            .map(ConsoleInput::Click)
            .map_err(|_| format!("Not a button number: {}", n)),
        _ => Err(format!("Unrecognized input: {}", line)),
    }
}

fn parse_invocation(rest: &str, user_id: UserId) -> Result<SlashInvocation, String> {
    let mut words: Vec<&str> = rest.split_whitespace().collect();
    if words.is_empty() {
        return Err("Missing command name".to_string());
    }
    let command = words.remove(0);

    let mut invocation = SlashInvocation::new(
        command,
        EventContext {
            channel_id: CONSOLE_CHANNEL,
            message_id: None,
            user_id,
        },
    );
    if words.is_empty() {
        return Ok(invocation);
    }
    let subcommand = words.remove(0);
    invocation = invocation.with_subcommand(subcommand);

    let required = match subcommand {
        "name" | "user" => 1,
        _ => 0,
    };
    if words.len() > required {
        if let Ok(page) = words[words.len() - 1].parse::<i64>() {
            words.pop();
            invocation = invocation.with_option(PAGE_OPTION, OptionValue::Integer(page));
        }
    }

    match subcommand {
        "name" if !words.is_empty() => {
            invocation = invocation.with_option(NAME_OPTION, OptionValue::String(words.join(" ")));
        }
        "user" if !words.is_empty() => {
            let user = words[0]
                .parse()
                .map_err(|_| format!("Not a user id: {}", words[0]))?;
            invocation = invocation.with_option(USER_OPTION, OptionValue::User(user));
        }
        _ => {}
    }

    Ok(invocation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Reply;
    use crate::pagination::{Button, Control};

    fn page(disabled_next: bool) -> RenderedPage {
        RenderedPage {
            title: "Track Index".into(),
            description: "**#1** *One*".into(),
            footer: "Page 1/1".into(),
            color: 0xFF,
            buttons: vec![
                Button {
                    control: Control::Previous,
                    identifier: "prev".into(),
                    disabled: true,
                },
                Button {
                    control: Control::Next,
                    identifier: "next".into(),
                    disabled: disabled_next,
                },
            ],
        }
    }

    fn output(host: ConsoleHost<Vec<u8>>) -> String {
        String::from_utf8(host.into_inner()).unwrap()
    }

    #[test]
    fn parses_invocations() {
        let ConsoleInput::Invoke(invocation) = parse_line("/trackindex name lo fi 2", 5).unwrap()
        else {
            panic!("expected invocation");
        };
        assert_eq!(invocation.command, "trackindex");
        assert_eq!(invocation.subcommand.as_deref(), Some("name"));
        assert_eq!(invocation.string(NAME_OPTION), Some("lo fi"));
        assert_eq!(invocation.integer(PAGE_OPTION), Some(2));
        assert_eq!(invocation.context.user_id, 5);
    }

    #[test]
    fn numeric_name_is_not_a_page() {
        let ConsoleInput::Invoke(invocation) = parse_line("/trackindex name 1999", 1).unwrap()
        else {
            panic!("expected invocation");
        };
        assert_eq!(invocation.string(NAME_OPTION), Some("1999"));
        assert_eq!(invocation.integer(PAGE_OPTION), None);
    }

    #[test]
    fn parses_user_and_negative_page() {
        let ConsoleInput::Invoke(invocation) = parse_line("/trackindex user 42 -1", 1).unwrap()
        else {
            panic!("expected invocation");
        };
        assert_eq!(invocation.user(USER_OPTION), Some(42));
        assert_eq!(invocation.integer(PAGE_OPTION), Some(-1));
    }

    #[test]
    fn parses_plain_commands() {
        assert_eq!(parse_line("  ", 1), Ok(ConsoleInput::Empty));
        assert_eq!(parse_line("quit", 1), Ok(ConsoleInput::Quit));
        assert_eq!(parse_line("click 3", 1), Ok(ConsoleInput::Click(3)));
        assert!(parse_line("click x", 1).is_err());
        assert!(parse_line("dance", 1).is_err());
        assert!(parse_line("/trackindex user bob", 1).is_err());
    }

    #[tokio::test]
    async fn send_then_click_then_delete() {
        let host = ConsoleHost::new(Vec::new());
        let id = host.send_page(CONSOLE_CHANNEL, &page(false)).await.unwrap();

        match host.click(2, 7).unwrap() {
            InboundEvent::Button(click) => {
                assert_eq!(click.identifier, "next");
                assert_eq!(click.context.message_id, Some(id));
            }
            other => panic!("expected click, got {other:?}"),
        }
        assert_eq!(host.click(1, 7).unwrap_err(), "Button 1 is disabled");
        assert!(host.click(9, 7).is_err());
        assert!(host.click(0, 7).is_err());

        host.delete_message(CONSOLE_CHANNEL, id).await.unwrap();
        assert_eq!(host.message_count(), 0);
        assert!(host.click(1, 7).is_err());

        let text = output(host);
        assert!(text.contains("Page 1/1"));
        assert!(text.contains("[1 ◀ ·] [2 ▶]"));
        assert!(text.contains("deleted"));
    }

    #[tokio::test]
    async fn deleting_unknown_message_fails() {
        let host = ConsoleHost::new(Vec::new());
        assert!(matches!(
            host.delete_message(CONSOLE_CHANNEL, 99).await,
            Err(HostError::UnknownMessage(99))
        ));
    }

    #[tokio::test]
    async fn ephemeral_replies_are_marked() {
        let host = ConsoleHost::new(Vec::new());
        let context = EventContext {
            channel_id: CONSOLE_CHANNEL,
            message_id: None,
            user_id: 1,
        };
        crate::host::deliver(&host, &context, Reply::Ephemeral("Empty page".into()))
            .await
            .unwrap();
        assert_eq!(output(host), "(only you) Empty page\n");
    }
}
