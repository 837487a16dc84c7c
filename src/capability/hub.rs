use std::sync::Arc;

use super::context::HostContext;
use super::{
    CapabilityRegistrar, ClockProducer, ConsoleDisplayer, DisplayError, MessageDisplayer,
    MessageProducer, ProduceError,
};
use crate::events::dispatcher;
use crate::events::model::{DemoEvent, LogEvent, LogLevel};
use crate::record::PodRecord;
use crate::utils::naming::capability_code;
use crate::{emit_capability_event, emit_demo_event};

/// Owns the two capability registries and the context displayers run against.
///
/// Registration order is dispatch order, and entries are never removed.
/// Registered capabilities are held as owning handles, so the hub keeps
/// them alive for as long as it exists.
pub struct MessageHub {
    producers: Vec<Arc<dyn MessageProducer>>,
    displayers: Vec<Arc<dyn MessageDisplayer>>,
    context: HostContext,
}

/// Counts reported by a completed demo run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoReport {
    pub producers: usize,
    pub displayers: usize,
    pub pairs: usize,
}

impl Default for MessageHub {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageHub {
    /// Hub writing demo output to stdout.
    pub fn new() -> Self {
        Self::with_context(HostContext::default())
    }

    pub fn with_context(context: HostContext) -> Self {
        Self {
            producers: Vec::new(),
            displayers: Vec::new(),
            context,
        }
    }

    pub fn register_producer(&mut self, producer: Arc<dyn MessageProducer>) {
        emit_capability_event!(
            CapabilityRole::Producer,
            producer.name(),
            "registered",
            self.producers.len()
        );
        self.producers.push(producer);
    }

    pub fn register_displayer(&mut self, displayer: Arc<dyn MessageDisplayer>) {
        emit_capability_event!(
            CapabilityRole::Displayer,
            displayer.name(),
            "registered",
            self.displayers.len()
        );
        self.displayers.push(displayer);
    }

    /// Registers the host's own capabilities: the clock producer and the
    /// console displayer, one of each.
    pub fn register_builtins(&mut self) {
        self.register_producer(Arc::new(ClockProducer::new()));
        self.register_displayer(Arc::new(ConsoleDisplayer::new()));
    }

    pub fn context(&self) -> &HostContext {
        &self.context
    }

    pub fn producer_count(&self) -> usize {
        self.producers.len()
    }

    pub fn displayer_count(&self) -> usize {
        self.displayers.len()
    }

    pub fn producer_names(&self) -> Vec<String> {
        self.producers.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn displayer_names(&self) -> Vec<String> {
        self.displayers.iter().map(|d| d.name().to_string()).collect()
    }

    /// Kebab-case codes for every registered capability, producers first,
    /// in registration order. Used for completion and listings.
    pub fn capability_codes(&self) -> Vec<String> {
        self.producers
            .iter()
            .map(|p| capability_code(p.name()))
            .chain(self.displayers.iter().map(|d| capability_code(d.name())))
            .collect()
    }

    /// Forwards one message to every displayer in registration order.
    /// No records and no separators, just the message lines.
    pub fn dispatch_message(&self, message: &str) -> Result<(), DemoError> {
        for displayer in &self.displayers {
            displayer
                .display(message, &self.context)
                .map_err(|source| self.displayer_failure(displayer.name(), source))?;
        }
        Ok(())
    }

    /// Runs the nested demo dispatch.
    ///
    /// For each producer in registration order its message is computed once,
    /// then forwarded to each displayer in registration order together with a
    /// fresh demo record. A blank line follows every displayer call and every
    /// producer's displayer loop. The first failing capability aborts the run.
    pub fn run_demo(&self) -> Result<DemoReport, DemoError> {
        self.emit_quiet_demo_event(
            "run_started",
            format!(
                "{} producers, {} displayers",
                self.producers.len(),
                self.displayers.len()
            ),
        );

        let mut pairs = 0usize;
        for producer in &self.producers {
            let message = producer.produce().map_err(|source| {
                emit_demo_event!(
                    "producer_failed",
                    Some(producer.name().to_string()),
                    None,
                    Some(source.to_string())
                );
                DemoError::Produce {
                    producer: producer.name().to_string(),
                    source,
                }
            })?;

            for displayer in &self.displayers {
                displayer
                    .display(&message, &self.context)
                    .map_err(|source| self.displayer_failure(displayer.name(), source))?;

                let mut record = PodRecord::demo();
                displayer
                    .show_record(&mut record, &self.context)
                    .map_err(|source| self.displayer_failure(displayer.name(), source))?;

                self.context.output.blank_line().map_err(DemoError::Output)?;
                pairs += 1;
            }
            self.context.output.blank_line().map_err(DemoError::Output)?;
        }

        self.emit_quiet_demo_event("run_finished", format!("{} pairs dispatched", pairs));
        Ok(DemoReport {
            producers: self.producers.len(),
            displayers: self.displayers.len(),
            pairs,
        })
    }

    fn displayer_failure(&self, name: &str, source: DisplayError) -> DemoError {
        emit_demo_event!(
            "displayer_failed",
            None,
            Some(name.to_string()),
            Some(source.to_string())
        );
        DemoError::Display {
            displayer: name.to_string(),
            source,
        }
    }

    // Run lifecycle events are kept out of the console sink so telemetry
    // never interleaves with demo output on stdout.
    fn emit_quiet_demo_event(&self, action: &str, detail: String) {
        let mut meta = dispatcher::meta("demo", LogLevel::Info);
        meta.corr_id = Some(dispatcher::correlation_id());
        meta.suppress_console = true;
        dispatcher::emit(LogEvent::Demo(DemoEvent {
            meta,
            action: action.to_string(),
            producer: None,
            displayer: None,
            detail: Some(detail),
        }));
    }
}

impl CapabilityRegistrar for MessageHub {
    fn register_producer(&mut self, producer: Box<dyn MessageProducer>) {
        MessageHub::register_producer(self, Arc::from(producer));
    }

    fn register_displayer(&mut self, displayer: Box<dyn MessageDisplayer>) {
        MessageHub::register_displayer(self, Arc::from(displayer));
    }
}

#[derive(Debug)]
pub enum DemoError {
    Produce {
        producer: String,
        source: ProduceError,
    },
    Display {
        displayer: String,
        source: DisplayError,
    },
    Output(std::io::Error),
}

impl std::fmt::Display for DemoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DemoError::Produce { producer, source } => {
                write!(f, "producer '{}' failed: {}", producer, source)
            }
            DemoError::Display { displayer, source } => {
                write!(f, "displayer '{}' failed: {}", displayer, source)
            }
            DemoError::Output(e) => write!(f, "demo output write failed: {}", e),
        }
    }
}

impl std::error::Error for DemoError {}
