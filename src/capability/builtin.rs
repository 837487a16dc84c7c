//! The host's own capability implementations.

use chrono::Local;

use super::context::HostContext;
use super::{DisplayError, MessageDisplayer, MessageProducer, ProduceError};
use crate::constants::{CLOCK_TIME_FORMAT, EPOCH_SUFFIX, MESSAGE_PREFIX, RECORD_PREFIX};
use crate::record::PodRecord;

/// Produces the current wall-clock time, human-readable on the first line
/// and as a raw epoch-second count on the second.
pub struct ClockProducer;

impl ClockProducer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ClockProducer {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageProducer for ClockProducer {
    fn produce(&self) -> Result<String, ProduceError> {
        let now = Local::now();
        let epoch = now.timestamp();
        if epoch < 0 {
            return Err(ProduceError::Clock(format!(
                "system clock reports {} (before the Unix epoch)",
                epoch
            )));
        }
        Ok(format!(
            "{}\n{}{}",
            now.format(CLOCK_TIME_FORMAT),
            epoch,
            EPOCH_SUFFIX
        ))
    }

    fn name(&self) -> &str {
        "Clock Producer"
    }
}

/// Prints messages and record values to the context's output sink.
pub struct ConsoleDisplayer;

impl ConsoleDisplayer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleDisplayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageDisplayer for ConsoleDisplayer {
    fn display(&self, message: &str, ctx: &HostContext) -> Result<(), DisplayError> {
        ctx.output
            .write_line(&format!("{}{}", MESSAGE_PREFIX, message))?;
        Ok(())
    }

    fn show_record(&self, record: &mut PodRecord, ctx: &HostContext) -> Result<(), DisplayError> {
        let value = record.grid.get(0, 0)?;
        ctx.output
            .write_line(&format!("{}{}", RECORD_PREFIX, value))?;
        Ok(())
    }

    fn name(&self) -> &str {
        "Console Displayer"
    }
}
