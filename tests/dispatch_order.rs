use std::sync::Arc;

use parking_lot::Mutex;

use crier::capability::{
    DisplayError, HostContext, MessageDisplayer, MessageProducer, MessageHub, OutputSink,
    ProduceError,
};
use crier::record::PodRecord;

type CallLog = Arc<Mutex<Vec<String>>>;

struct RecordingProducer {
    name: String,
    message: String,
    log: CallLog,
}

impl MessageProducer for RecordingProducer {
    fn produce(&self) -> Result<String, ProduceError> {
        self.log.lock().push(format!("produce:{}", self.name));
        Ok(self.message.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

struct RecordingDisplayer {
    name: String,
    log: CallLog,
}

impl MessageDisplayer for RecordingDisplayer {
    fn display(&self, message: &str, _ctx: &HostContext) -> Result<(), DisplayError> {
        self.log
            .lock()
            .push(format!("display:{}:{}", self.name, message));
        Ok(())
    }

    fn show_record(&self, record: &mut PodRecord, _ctx: &HostContext) -> Result<(), DisplayError> {
        let value = record.grid.get(0, 0)?;
        self.log
            .lock()
            .push(format!("record:{}:{}", self.name, value));
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn hub_with_memory_output() -> (MessageHub, crier::capability::MemoryOutput) {
    let (sink, mem) = OutputSink::memory();
    (MessageHub::with_context(HostContext::new(sink)), mem)
}

fn producer(name: &str, message: &str, log: &CallLog) -> Arc<RecordingProducer> {
    Arc::new(RecordingProducer {
        name: name.to_string(),
        message: message.to_string(),
        log: log.clone(),
    })
}

fn displayer(name: &str, log: &CallLog) -> Arc<RecordingDisplayer> {
    Arc::new(RecordingDisplayer {
        name: name.to_string(),
        log: log.clone(),
    })
}

#[test]
fn producers_outer_displayers_inner_in_registration_order() {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let (mut hub, _mem) = hub_with_memory_output();

    hub.register_producer(producer("p1", "alpha", &log));
    hub.register_producer(producer("p2", "beta", &log));
    hub.register_displayer(displayer("d1", &log));
    hub.register_displayer(displayer("d2", &log));

    let report = hub.run_demo().unwrap();
    assert_eq!(report.producers, 2);
    assert_eq!(report.displayers, 2);
    assert_eq!(report.pairs, 4);

    // Each producer's message is computed once, then every displayer sees it
    // in registration order before the next producer runs.
    let calls = log.lock();
    assert_eq!(
        *calls,
        vec![
            "produce:p1",
            "display:d1:alpha",
            "record:d1:101",
            "display:d2:alpha",
            "record:d2:101",
            "produce:p2",
            "display:d1:beta",
            "record:d1:101",
            "display:d2:beta",
            "record:d2:101",
        ]
    );
}

#[test]
fn zero_producers_produce_no_output() {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let (mut hub, mem) = hub_with_memory_output();

    hub.register_displayer(displayer("d1", &log));
    hub.register_displayer(displayer("d2", &log));

    let report = hub.run_demo().unwrap();
    assert_eq!(report.pairs, 0);
    assert!(log.lock().is_empty());
    assert_eq!(mem.as_string(), "");
}

#[test]
fn zero_displayers_still_runs_every_producer() {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let (mut hub, mem) = hub_with_memory_output();

    hub.register_producer(producer("p1", "alpha", &log));
    hub.register_producer(producer("p2", "beta", &log));

    let report = hub.run_demo().unwrap();
    assert_eq!(report.pairs, 0);
    assert_eq!(*log.lock(), vec!["produce:p1", "produce:p2"]);
    // One separator per producer's (empty) displayer loop.
    assert_eq!(mem.as_string(), "\n\n");
}

#[test]
fn dispatch_message_reaches_every_displayer_in_order() {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let (mut hub, _mem) = hub_with_memory_output();

    hub.register_displayer(displayer("d1", &log));
    hub.register_displayer(displayer("d2", &log));

    hub.dispatch_message("hello").unwrap();
    assert_eq!(*log.lock(), vec!["display:d1:hello", "display:d2:hello"]);
}

#[test]
fn capability_codes_follow_registration_order() {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let (mut hub, _mem) = hub_with_memory_output();

    hub.register_producer(producer("Late Riser", "x", &log));
    hub.register_displayer(displayer("Loud Speaker", &log));

    assert_eq!(hub.capability_codes(), vec!["late-riser", "loud-speaker"]);
    assert_eq!(hub.producer_names(), vec!["Late Riser"]);
    assert_eq!(hub.displayer_names(), vec!["Loud Speaker"]);
}
