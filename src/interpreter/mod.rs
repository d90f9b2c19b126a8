//! Command Interpreter
//!
//! Turns a raw command line into a classification, an event and a reply.

pub mod engine;
pub mod reply;

pub use engine::{interpret, Interpretation, Interpreter, Kind, Terminal, DEFAULT_MAX_INPUT_LEN};
pub use reply::{ReplySet, MAX_REPLY_LEN};
