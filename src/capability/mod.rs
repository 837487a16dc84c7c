pub mod builtin;
pub mod context;
pub mod hub;

pub use builtin::{ClockProducer, ConsoleDisplayer};
pub use context::{HostContext, MemoryOutput, OutputSink};
pub use hub::{DemoError, DemoReport, MessageHub};

use crate::record::{GridError, PodRecord};

/// Capability that yields a text message on demand.
pub trait MessageProducer: Send + Sync {
    fn produce(&self) -> Result<String, ProduceError>;

    /// Human-readable name, also the source of the capability's code.
    fn name(&self) -> &str;
}

/// Capability that consumes a message and a data record for display.
pub trait MessageDisplayer: Send + Sync {
    fn display(&self, message: &str, ctx: &HostContext) -> Result<(), DisplayError>;

    /// Called with a fresh record after each message. Displayers that only
    /// care about the message text can leave this as the default no-op.
    fn show_record(&self, record: &mut PodRecord, ctx: &HostContext) -> Result<(), DisplayError> {
        let _ = (record, ctx);
        Ok(())
    }

    /// Human-readable name, also the source of the capability's code.
    fn name(&self) -> &str;
}

/// Trait passed to plugins so they can register their capabilities.
pub trait CapabilityRegistrar {
    fn register_producer(&mut self, producer: Box<dyn MessageProducer>);
    fn register_displayer(&mut self, displayer: Box<dyn MessageDisplayer>);
}

#[derive(Debug)]
pub enum ProduceError {
    Clock(String),
    Failed(String),
}

impl std::fmt::Display for ProduceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProduceError::Clock(detail) => write!(f, "clock unavailable: {}", detail),
            ProduceError::Failed(detail) => write!(f, "producer failed: {}", detail),
        }
    }
}

impl std::error::Error for ProduceError {}

#[derive(Debug)]
pub enum DisplayError {
    Io(std::io::Error),
    Record(GridError),
    Failed(String),
}

impl std::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayError::Io(e) => write!(f, "output write failed: {}", e),
            DisplayError::Record(e) => write!(f, "record access failed: {}", e),
            DisplayError::Failed(detail) => write!(f, "displayer failed: {}", detail),
        }
    }
}

impl std::error::Error for DisplayError {}

impl From<std::io::Error> for DisplayError {
    fn from(e: std::io::Error) -> Self {
        DisplayError::Io(e)
    }
}

impl From<GridError> for DisplayError {
    fn from(e: GridError) -> Self {
        DisplayError::Record(e)
    }
}
