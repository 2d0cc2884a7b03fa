//! Turns a page of tracks into display text and a row of navigation buttons.

use super::codec::{ButtonCodec, EncodeError};
use super::state::{PageResult, PageState};

/// Default accent colour of rendered pages (blue).
pub const DEFAULT_EMBED_COLOR: u32 = 0x0000FF;

const TITLE: &str = "Track Index";

/// Navigation controls, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Previous,
    Next,
    Reload,
    Close,
}

impl Control {
    pub fn label(self) -> &'static str {
        match self {
            Control::Previous => "◀",
            Control::Next => "▶",
            Control::Reload => "🔄",
            Control::Close => "✖",
        }
    }
}

/// An interactive button attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub control: Control,
    /// Encoded identifier returned by the host on click.
    pub identifier: String,
    pub disabled: bool,
}

/// A rendered page ready to be sent by a chat host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub title: String,
    pub description: String,
    pub footer: String,
    pub color: u32,
    pub buttons: Vec<Button>,
}

impl RenderedPage {
    pub fn button(&self, control: Control) -> Option<&Button> {
        self.buttons.iter().find(|b| b.control == control)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PageRenderer {
    codec: ButtonCodec,
    color: u32,
}

impl PageRenderer {
    pub fn new(codec: ButtonCodec, color: u32) -> Self {
        Self { codec, color }
    }

    pub fn codec(&self) -> &ButtonCodec {
        &self.codec
    }

    pub fn render(&self, result: &PageResult, state: &PageState) -> Result<RenderedPage, EncodeError> {
        Ok(RenderedPage {
            title: TITLE.to_string(),
            description: listing(result),
            footer: format!("Page {}/{}", result.display_page(), result.total_pages),
            color: self.color,
            buttons: self.buttons(result, state)?,
        })
    }

    fn buttons(&self, result: &PageResult, state: &PageState) -> Result<Vec<Button>, EncodeError> {
        let current = state.at_page(result.page_index);

        Ok(vec![
            Button {
                control: Control::Previous,
                identifier: self.codec.encode(&current.previous())?,
                disabled: !result.has_previous,
            },
            Button {
                control: Control::Next,
                identifier: self.codec.encode(&current.next())?,
                disabled: !result.has_next,
            },
            Button {
                control: Control::Reload,
                identifier: self.codec.encode(&current)?,
                disabled: false,
            },
            Button {
                control: Control::Close,
                identifier: self.codec.encode_close()?,
                disabled: false,
            },
        ])
    }
}

fn listing(result: &PageResult) -> String {
    result
        .items
        .iter()
        .map(|track| format!("**#{}** *{}*", track.id, track.name))
        .collect::<Vec<_>>()
        .join("\n")
}
