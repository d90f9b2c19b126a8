//! Event dispatch seam between the interpreter and device-control logic.

use anyhow::Result;
use log::{debug, info};

use crate::interpreter::{Interpretation, Kind};

/// Receives every interpreted command line.
///
/// Implementations drive the hardware (axis motion, limit switches, VNA
/// trigger) from `interpretation.event`. Errors are logged by the session
/// and never change the reply already chosen by the interpreter.
pub trait EventSink: Send + Sync {
    fn dispatch(&self, interpretation: &Interpretation) -> Result<()>;
}

/// Records events in the log and does nothing else
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn dispatch(&self, interpretation: &Interpretation) -> Result<()> {
        match interpretation.kind() {
            Kind::Command | Kind::Query => info!(
                "{:?} {} (event {:#06x})",
                interpretation.kind(),
                interpretation.event,
                interpretation.event_id()
            ),
            Kind::Error | Kind::PartialError => debug!(
                "rejected at {}: {:?}",
                interpretation.event, interpretation.outcome
            ),
        }
        Ok(())
    }
}
