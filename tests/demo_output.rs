use std::sync::Arc;

use crier::capability::{
    ConsoleDisplayer, DisplayError, DemoError, HostContext, MessageDisplayer, MessageProducer,
    MessageHub, OutputSink, ProduceError,
};

struct FixedProducer {
    message: &'static str,
}

impl MessageProducer for FixedProducer {
    fn produce(&self) -> Result<String, ProduceError> {
        Ok(self.message.to_string())
    }

    fn name(&self) -> &str {
        "Fixed Producer"
    }
}

struct FailingDisplayer;

impl MessageDisplayer for FailingDisplayer {
    fn display(&self, _message: &str, _ctx: &HostContext) -> Result<(), DisplayError> {
        Err(DisplayError::Failed("screen on fire".into()))
    }

    fn name(&self) -> &str {
        "Failing Displayer"
    }
}

fn hub_with_memory_output() -> (MessageHub, crier::capability::MemoryOutput) {
    let (sink, mem) = OutputSink::memory();
    (MessageHub::with_context(HostContext::new(sink)), mem)
}

#[test]
fn one_producer_two_displayers_exact_output() {
    let (mut hub, mem) = hub_with_memory_output();
    hub.register_producer(Arc::new(FixedProducer {
        message: "fixed message",
    }));
    hub.register_displayer(Arc::new(ConsoleDisplayer::new()));
    hub.register_displayer(Arc::new(ConsoleDisplayer::new()));

    let report = hub.run_demo().unwrap();
    assert_eq!(report.pairs, 2);

    assert_eq!(
        mem.as_string(),
        "Message: fixed message\nFrom C++: 101\n\nMessage: fixed message\nFrom C++: 101\n\n\n"
    );
}

#[test]
fn single_pair_output_ends_with_two_separators() {
    let (mut hub, mem) = hub_with_memory_output();
    hub.register_producer(Arc::new(FixedProducer { message: "hello" }));
    hub.register_displayer(Arc::new(ConsoleDisplayer::new()));

    hub.run_demo().unwrap();
    assert_eq!(mem.as_string(), "Message: hello\nFrom C++: 101\n\n\n");
}

#[test]
fn dispatch_message_writes_one_line_per_displayer() {
    let (mut hub, mem) = hub_with_memory_output();
    hub.register_displayer(Arc::new(ConsoleDisplayer::new()));
    hub.register_displayer(Arc::new(ConsoleDisplayer::new()));

    hub.dispatch_message("hi").unwrap();
    assert_eq!(mem.as_string(), "Message: hi\nMessage: hi\n");
}

#[test]
fn failing_displayer_aborts_the_run_with_partial_output() {
    let (mut hub, mem) = hub_with_memory_output();
    hub.register_producer(Arc::new(FixedProducer { message: "doomed" }));
    hub.register_displayer(Arc::new(ConsoleDisplayer::new()));
    hub.register_displayer(Arc::new(FailingDisplayer));

    let err = hub.run_demo().unwrap_err();
    assert!(matches!(
        err,
        DemoError::Display { ref displayer, .. } if displayer == "Failing Displayer"
    ));

    // The first displayer completed its pair before the failure stopped the run.
    assert_eq!(mem.as_string(), "Message: doomed\nFrom C++: 101\n\n");
}
