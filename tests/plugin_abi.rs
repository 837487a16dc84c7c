use std::path::Path;

use crier::capability::{
    CapabilityRegistrar, DisplayError, HostContext, MessageDisplayer, MessageProducer, MessageHub,
    OutputSink, ProduceError,
};
use crier::plugin_host::{
    check_plugin, CapabilityApi, CapabilityApiError, DisplayerHandle, ProducerHandle,
};

struct EchoProducer;

impl MessageProducer for EchoProducer {
    fn produce(&self) -> Result<String, ProduceError> {
        Ok("echo".to_string())
    }

    fn name(&self) -> &str {
        "Echo Producer"
    }
}

struct SilentDisplayer;

impl MessageDisplayer for SilentDisplayer {
    fn display(&self, _message: &str, _ctx: &HostContext) -> Result<(), DisplayError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "Silent Displayer"
    }
}

#[test]
fn producer_handle_round_trips_across_the_boundary() {
    let handle = ProducerHandle::from_producer(Box::new(EchoProducer));
    let producer = unsafe { handle.into_producer() };
    assert_eq!(producer.name(), "Echo Producer");
    assert_eq!(producer.produce().unwrap(), "echo");
}

#[test]
fn displayer_handle_round_trips_across_the_boundary() {
    let handle = DisplayerHandle::from_displayer(Box::new(SilentDisplayer));
    let displayer = unsafe { handle.into_displayer() };
    assert_eq!(displayer.name(), "Silent Displayer");
}

#[test]
fn null_api_pointer_is_reported_not_dereferenced() {
    let result = unsafe { CapabilityApi::from_raw(std::ptr::null()) };
    assert!(matches!(result, Err(CapabilityApiError::NullApi)));
}

#[test]
fn hub_accepts_boxed_capabilities_through_the_registrar_trait() {
    let (output, _mem) = OutputSink::memory();
    let mut hub = MessageHub::with_context(HostContext::new(output));

    CapabilityRegistrar::register_producer(&mut hub, Box::new(EchoProducer));
    CapabilityRegistrar::register_displayer(&mut hub, Box::new(SilentDisplayer));

    assert_eq!(hub.producer_count(), 1);
    assert_eq!(hub.displayer_count(), 1);
    assert_eq!(hub.producer_names(), vec!["Echo Producer"]);
    assert_eq!(hub.displayer_names(), vec!["Silent Displayer"]);
}

#[test]
fn check_plugin_rejects_non_library_paths() {
    let err = check_plugin(Path::new("notes.txt")).unwrap_err();
    assert!(err.to_string().contains("not a dynamic library"));
}
