#[macro_export]
macro_rules! emit_capability_event {
    ($role:expr, $name:expr, $action:expr, $position:expr) => {{
        use $crate::events::{dispatcher, model::*};
        let mut meta = dispatcher::meta("capability", LogLevel::Info);
        meta.corr_id = Some(dispatcher::correlation_id());
        let evt = CapabilityEvent {
            meta,
            role: $role,
            name: $name.to_string(),
            action: $action.to_string(),
            position: $position,
            detail: None,
        };
        dispatcher::emit(LogEvent::Capability(evt));
    }};
}

#[macro_export]
macro_rules! emit_demo_event {
    ($action:expr, $producer:expr, $displayer:expr, $detail:expr) => {{
        use $crate::events::{dispatcher, model::*};
        let mut meta = dispatcher::meta("demo", LogLevel::Info);
        meta.corr_id = Some(dispatcher::correlation_id());
        let evt = DemoEvent {
            meta,
            action: $action.to_string(),
            producer: $producer,
            displayer: $displayer,
            detail: $detail,
        };
        dispatcher::emit(LogEvent::Demo(evt));
    }};
}
