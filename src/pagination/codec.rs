//! Button identifier codec.
//!
//! A [`PageState`] is written into the button's own identifier as a compact
//! JSON object of string values, keys in sorted order:
//!
//! ```text
//! {"command":"trackindex","page":"1","subcommand":"user","user_id":"42"}
//! {"command":"close"}
//! ```
//!
//! Decoding runs in two stages so callers can route on the command before
//! validating the rest: [`ButtonCodec::parse`] checks syntax and the command
//! field, [`RawButton::into_page_state`] validates everything else. Both
//! stages accept arbitrary input without panicking.

use std::collections::BTreeMap;

use thiserror::Error;

use super::state::{
    PageState, Subcommand, TrackQuery, CLOSE_COMMAND, TRACK_NAME_FILTER, USER_ID_FILTER,
};

/// Identifier length limit of the usual chat hosts.
pub const DEFAULT_MAX_IDENTIFIER_LEN: usize = 100;

const COMMAND_KEY: &str = "command";
const SUBCOMMAND_KEY: &str = "subcommand";
const PAGE_KEY: &str = "page";

/// Errors produced while encoding a state into an identifier.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("identifier is {len} characters, limit is {max}")]
    TooLong { len: usize, max: usize },

    #[error("page state has an empty command")]
    EmptyCommand,

    #[error("command '{0}' is reserved")]
    ReservedCommand(String),

    #[error("failed to serialize identifier: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors produced while decoding an identifier, classified by the field
/// that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("identifier is not a JSON object of strings")]
    Malformed,

    #[error("identifier has no command")]
    MissingCommand,

    #[error("identifier has no subcommand")]
    MissingSubcommand,

    #[error("identifier has a missing or invalid page")]
    InvalidPage,

    #[error("identifier is missing filter '{0}'")]
    MissingFilter(&'static str),

    #[error("unknown subcommand '{0}'")]
    UnknownSubcommand(String),
}

/// An identifier that passed the syntax stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawButton {
    command: String,
    fields: BTreeMap<String, String>,
}

impl RawButton {
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Whether this is the close control.
    pub fn is_close(&self) -> bool {
        self.command.eq_ignore_ascii_case(CLOSE_COMMAND)
    }

    /// Whether the command names `owner`. Case-insensitive.
    pub fn is_owned_by(&self, owner: &str) -> bool {
        self.command.eq_ignore_ascii_case(owner)
    }

    /// Validation stage: rebuild the full page state.
    pub fn into_page_state(mut self) -> Result<PageState, DecodeError> {
        let subcommand = self
            .fields
            .remove(SUBCOMMAND_KEY)
            .ok_or(DecodeError::MissingSubcommand)?;

        let page_index = self
            .fields
            .get(PAGE_KEY)
            .ok_or(DecodeError::InvalidPage)
            .and_then(|raw| parse_page(raw))?;

        let query = match Subcommand::from_name(&subcommand) {
            Some(Subcommand::All) => TrackQuery::All,
            Some(Subcommand::ByName) => TrackQuery::ByName {
                track_name: self.take_filter(TRACK_NAME_FILTER)?,
            },
            Some(Subcommand::ByUser) => TrackQuery::ByUser {
                user_id: self.take_filter(USER_ID_FILTER)?,
            },
            None => return Err(DecodeError::UnknownSubcommand(subcommand)),
        };

        Ok(PageState {
            command: self.command,
            query,
            page_index,
        })
    }

    fn take_filter(&mut self, key: &'static str) -> Result<String, DecodeError> {
        self.fields
            .remove(key)
            .ok_or(DecodeError::MissingFilter(key))
    }
}

/// Accepts only what the encoder writes: ASCII digits, no sign or padding.
fn parse_page(raw: &str) -> Result<u32, DecodeError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::InvalidPage);
    }
    raw.parse().map_err(|_| DecodeError::InvalidPage)
}

/// Stateless encoder/decoder for button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonCodec {
    max_len: usize,
}

impl Default for ButtonCodec {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IDENTIFIER_LEN)
    }
}

impl ButtonCodec {
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Encode a page state. Fails rather than truncating when the result
    /// would exceed the identifier limit.
    pub fn encode(&self, state: &PageState) -> Result<String, EncodeError> {
        if state.command.is_empty() {
            return Err(EncodeError::EmptyCommand);
        }
        if state.command.eq_ignore_ascii_case(CLOSE_COMMAND) {
            return Err(EncodeError::ReservedCommand(state.command.clone()));
        }

        let mut fields: BTreeMap<&str, &str> = BTreeMap::new();
        let page = state.page_index.to_string();
        fields.insert(COMMAND_KEY, &state.command);
        fields.insert(SUBCOMMAND_KEY, state.subcommand().as_str());
        fields.insert(PAGE_KEY, &page);
        if let Some((key, value)) = state.query.filter() {
            fields.insert(key, value);
        }

        self.bounded(serde_json::to_string(&fields)?)
    }

    /// Identifier of the close control.
    pub fn encode_close(&self) -> Result<String, EncodeError> {
        let fields = BTreeMap::from([(COMMAND_KEY, CLOSE_COMMAND)]);
        self.bounded(serde_json::to_string(&fields)?)
    }

    /// Syntax stage: a JSON object of strings with a non-empty command.
    pub fn parse(&self, identifier: &str) -> Result<RawButton, DecodeError> {
        let mut fields: BTreeMap<String, String> =
            serde_json::from_str(identifier).map_err(|_| DecodeError::Malformed)?;

        let command = fields
            .remove(COMMAND_KEY)
            .filter(|command| !command.is_empty())
            .ok_or(DecodeError::MissingCommand)?;

        Ok(RawButton { command, fields })
    }

    /// Both stages in one call.
    pub fn decode(&self, identifier: &str) -> Result<PageState, DecodeError> {
        self.parse(identifier)?.into_page_state()
    }

    fn bounded(&self, identifier: String) -> Result<String, EncodeError> {
        let len = identifier.chars().count();
        if len > self.max_len {
            return Err(EncodeError::TooLong {
                len,
                max: self.max_len,
            });
        }
        Ok(identifier)
    }
}
