//! Transport Front End
//!
//! Line-oriented TCP and stdio transports feeding the interpreter.
//! One command per line, one reply per line.

pub mod session;
pub mod sink;
pub mod transport;

pub use session::{OutputFormat, Record, Session};
pub use sink::{EventSink, LogSink};
pub use transport::{
    read_bounded_line, run_commands, serve, serve_connections, serve_lines, serve_tcp,
};
