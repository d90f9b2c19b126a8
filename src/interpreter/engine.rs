//! Interpreter Driver
//!
//! Walks a command line level by level: tokenize, match against the table
//! of the current state, descend or stop. Keeps no state between calls.

use log::debug;
use serde::Serialize;

use super::reply::ReplySet;
use crate::error::{InterpretError, PartialCause};
use crate::menu::{transition_for, MenuState, Verdict};
use crate::parser::{extract_level, Keyword, MIN_INPUT_LEN};

/// Default bound on the bytes of a command line that are considered
pub const DEFAULT_MAX_INPUT_LEN: usize = 256;

/// No command path in the tree is deeper than this
const MAX_DEPTH: usize = 8;

/// Successful end of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Query,
    Command,
}

/// Classification reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Command,
    Query,
    Error,
    PartialError,
}

/// Result of one interpreter call. Owns its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub outcome: Result<Terminal, InterpretError>,
    /// Deepest resolved state; `MenuState::None` when nothing matched
    pub event: MenuState,
    pub reply: String,
}

impl Interpretation {
    pub fn kind(&self) -> Kind {
        match &self.outcome {
            Ok(Terminal::Query) => Kind::Query,
            Ok(Terminal::Command) => Kind::Command,
            Err(err) if err.is_partial() => Kind::PartialError,
            Err(_) => Kind::Error,
        }
    }

    /// `1` for queries, `2` for commands, negative for failures
    pub fn code(&self) -> i32 {
        match &self.outcome {
            Ok(Terminal::Query) => Verdict::Query.code(),
            Ok(Terminal::Command) => Verdict::Command.code(),
            Err(err) => err.code(),
        }
    }

    pub fn event_id(&self) -> u32 {
        self.event.event_id()
    }
}

/// Command-line interpreter for the rotator command tree
#[derive(Debug, Clone)]
pub struct Interpreter {
    replies: ReplySet,
    max_input_len: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(ReplySet::default(), DEFAULT_MAX_INPUT_LEN)
    }
}

impl Interpreter {
    /// `max_input_len` is raised to the minimum command length if smaller
    pub fn new(replies: ReplySet, max_input_len: usize) -> Self {
        Self {
            replies,
            max_input_len: max_input_len.max(MIN_INPUT_LEN),
        }
    }

    pub fn max_input_len(&self) -> usize {
        self.max_input_len
    }

    /// Interpret one command line
    pub fn interpret(&self, input: &[u8]) -> Interpretation {
        let (outcome, event) = self.resolve(input);
        let reply = self.replies.select(&outcome, event).to_string();

        Interpretation {
            outcome,
            event,
            reply,
        }
    }

    fn resolve(&self, input: &[u8]) -> (Result<Terminal, InterpretError>, MenuState) {
        if input.len() < MIN_INPUT_LEN {
            return (
                Err(InterpretError::MalformedInput { min: MIN_INPUT_LEN }),
                MenuState::None,
            );
        }

        let buffer = self.normalize(input);
        let mut state = MenuState::None;

        for depth in 0..MAX_DEPTH {
            let token = match extract_level(&buffer, depth) {
                Ok(token) => token,
                Err(err) if depth == 0 => return (Err(err.into()), MenuState::None),
                Err(err) => {
                    debug!("level {} missing after {}: {}", depth, state, err);
                    return (Err(err.into()), state);
                }
            };

            let Some(step) = transition_for(state) else {
                debug!("{} has no submenu", state);
                return (
                    Err(InterpretError::PartialMatch {
                        cause: PartialCause::NoSubmenu,
                    }),
                    state,
                );
            };

            let transition = step(state, token);
            debug!(
                "level {} token {:?}: {:?} -> {:?}",
                depth,
                String::from_utf8_lossy(token),
                transition.verdict,
                transition.next
            );

            match transition.verdict {
                Verdict::Continue => state = transition.next,
                Verdict::Query => return (Ok(Terminal::Query), transition.next),
                Verdict::Command => return (Ok(Terminal::Command), transition.next),
                Verdict::Error => return (Err(InterpretError::NoRootMatch), MenuState::None),
                Verdict::PartialError => {
                    let cause = if token.is_empty() {
                        PartialCause::MissingLevel
                    } else {
                        match std::str::from_utf8(token).ok().and_then(Keyword::lookup) {
                            Some(keyword) => debug!("{:?} is not valid after {}", keyword, state),
                            None => debug!("unknown keyword after {}", state),
                        }
                        PartialCause::UnmatchedKeyword
                    };
                    return (Err(InterpretError::PartialMatch { cause }), transition.next);
                }
            }
        }

        (Err(InterpretError::Internal), state)
    }

    /// Bounded lowercase copy of the input
    fn normalize(&self, input: &[u8]) -> Vec<u8> {
        if input.len() > self.max_input_len {
            debug!(
                "truncating {} byte command to {} bytes",
                input.len(),
                self.max_input_len
            );
        }

        input
            .iter()
            .take(self.max_input_len)
            .map(u8::to_ascii_lowercase)
            .collect()
    }
}

/// Interpret with the default replies and input bound
pub fn interpret(input: &[u8]) -> Interpretation {
    Interpreter::default().interpret(input)
}
