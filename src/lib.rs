//! SCPI Interpreter
//!
//! Command interpreter for the antenna rotator controller's SCPI-style
//! command tree.
//!
//! This library provides:
//! - Keyword matching and level extraction
//! - Per-submenu transition tables
//! - The interpreter driver and reply selection
//! - Line-oriented TCP / stdio front end
//! - Configuration management

pub mod config;
pub mod error;
pub mod interpreter;
pub mod menu;
pub mod parser;
pub mod server;

// Re-exports for clean public API
pub use config::Config;
pub use error::{InterpretError, PartialCause, TokenizeError};
pub use interpreter::{interpret, Interpretation, Interpreter, Kind, ReplySet};
pub use menu::{Axis, MenuState};
