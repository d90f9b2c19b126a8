//! Line-level protocol handling shared by every transport.

use std::sync::Arc;

use log::warn;
use serde::Serialize;

use super::sink::{EventSink, LogSink};
use crate::interpreter::{Interpretation, Interpreter, Kind};

/// How replies are rendered on the line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The bare reply string
    #[default]
    Text,
    /// One JSON record per line
    Json,
}

/// JSON form of an interpretation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub code: i32,
    pub kind: Kind,
    pub event: u32,
    pub path: String,
    pub axis: Option<u8>,
    pub reply: String,
}

impl From<&Interpretation> for Record {
    fn from(interpretation: &Interpretation) -> Self {
        Self {
            code: interpretation.code(),
            kind: interpretation.kind(),
            event: interpretation.event_id(),
            path: interpretation.event.path(),
            axis: interpretation.event.axis().map(|axis| axis.index()),
            reply: interpretation.reply.clone(),
        }
    }
}

/// Interprets lines and hands results to an [`EventSink`]
#[derive(Clone)]
pub struct Session {
    interpreter: Arc<Interpreter>,
    sink: Arc<dyn EventSink>,
    format: OutputFormat,
}

impl Session {
    pub fn new(interpreter: Interpreter, format: OutputFormat) -> Self {
        Self::with_sink(interpreter, format, Arc::new(LogSink))
    }

    pub fn with_sink(
        interpreter: Interpreter,
        format: OutputFormat,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            interpreter: Arc::new(interpreter),
            sink,
            format,
        }
    }

    /// Bytes of a command line the interpreter looks at
    pub fn max_input_len(&self) -> usize {
        self.interpreter.max_input_len()
    }

    /// Interpret one received line and render the answer.
    ///
    /// Surrounding whitespace and line endings are stripped; blank lines get
    /// no answer.
    pub fn handle_line(&self, line: &str) -> Option<String> {
        let command = line.trim();
        if command.is_empty() {
            return None;
        }

        let interpretation = self.interpreter.interpret(command.as_bytes());
        if let Err(e) = self.sink.dispatch(&interpretation) {
            warn!("Failed to dispatch event {}: {}", interpretation.event, e);
        }

        Some(self.render(&interpretation))
    }

    pub fn render(&self, interpretation: &Interpretation) -> String {
        match self.format {
            OutputFormat::Text => interpretation.reply.clone(),
            OutputFormat::Json => match serde_json::to_string(&Record::from(interpretation)) {
                Ok(json) => json,
                Err(e) => {
                    warn!("Failed to encode reply as JSON: {}", e);
                    interpretation.reply.clone()
                }
            },
        }
    }
}
