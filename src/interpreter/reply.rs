//! Reply Selector
//!
//! Maps the terminal result of a command to the fixed ASCII text sent back
//! on the line.

use anyhow::{bail, Result};
use serde::Deserialize;

use super::engine::Terminal;
use crate::error::InterpretError;
use crate::menu::{MenuState, RootNode};

/// Upper bound for any reply sent on the line
pub const MAX_REPLY_LEN: usize = 256;

pub const DEFAULT_IDENTIFICATION: &str =
    "Antenna Rotator Controller v0.1; University of Utah; Nov. 2019";
pub const DEFAULT_COMMAND_REPLY: &str = "command accepted";
pub const DEFAULT_QUERY_REPLY: &str = "query accepted";
pub const DEFAULT_ERROR_REPLY: &str = "error";
pub const DEFAULT_PARTIAL_ERROR_REPLY: &str = "partial error";

/// The closed set of reply strings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReplySet {
    /// Answer to `*IDN?`
    pub identification: String,
    pub command: String,
    pub query: String,
    pub error: String,
    pub partial_error: String,
}

impl Default for ReplySet {
    fn default() -> Self {
        Self {
            identification: DEFAULT_IDENTIFICATION.to_string(),
            command: DEFAULT_COMMAND_REPLY.to_string(),
            query: DEFAULT_QUERY_REPLY.to_string(),
            error: DEFAULT_ERROR_REPLY.to_string(),
            partial_error: DEFAULT_PARTIAL_ERROR_REPLY.to_string(),
        }
    }
}

impl ReplySet {
    /// Reply for a finished interpretation
    pub fn select(&self, outcome: &Result<Terminal, InterpretError>, event: MenuState) -> &str {
        match outcome {
            Ok(Terminal::Query) if event == MenuState::Root(RootNode::Identify) => {
                &self.identification
            }
            Ok(Terminal::Query) => &self.query,
            Ok(Terminal::Command) => &self.command,
            Err(err) if err.is_partial() => &self.partial_error,
            Err(_) => &self.error,
        }
    }

    /// Every reply must be non-empty printable ASCII within [`MAX_REPLY_LEN`]
    pub fn validate(&self) -> Result<()> {
        let entries = [
            ("identification", &self.identification),
            ("command", &self.command),
            ("query", &self.query),
            ("error", &self.error),
            ("partial_error", &self.partial_error),
        ];

        for (name, text) in entries {
            if text.is_empty() {
                bail!("reply '{}' is empty", name);
            }
            if text.len() > MAX_REPLY_LEN {
                bail!(
                    "reply '{}' is {} bytes, longer than {}",
                    name,
                    text.len(),
                    MAX_REPLY_LEN
                );
            }
            if !text.bytes().all(|b| b.is_ascii() && !b.is_ascii_control()) {
                bail!("reply '{}' must be printable ASCII", name);
            }
        }

        Ok(())
    }
}
