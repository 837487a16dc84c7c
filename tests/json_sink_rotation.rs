use crier::events::{
    dispatcher,
    model::{LogEvent, LogLevel, SystemEvent},
    sink::{JsonFileSink, LogSink},
};

#[tokio::test]
async fn events_are_written_as_json_lines_and_rotated() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("events.jsonl");

    // Tiny size cap so a handful of events forces a rotation.
    let sink = JsonFileSink::new(path.clone(), true, 200, 2).await.unwrap();

    for i in 0..10 {
        let event = LogEvent::System(SystemEvent {
            meta: dispatcher::meta("test", LogLevel::Info),
            action: "tick".to_string(),
            detail: Some(format!("iteration {}", i)),
        });
        sink.handle(&event).await;
    }
    sink.flush().await;

    let live = std::fs::read_to_string(&path).unwrap();
    assert!(!live.is_empty());
    for line in live.lines() {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["type"], "system");
        assert_eq!(value["action"], "tick");
    }

    let backup = path.with_extension("jsonl.1");
    assert!(backup.exists(), "expected at least one rotated backup");
    let rotated = std::fs::read_to_string(&backup).unwrap();
    for line in rotated.lines() {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["type"], "system");
    }
}
