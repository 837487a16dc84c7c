use serde::Serialize;
use std::time::SystemTime;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityRole {
    Producer,
    Displayer,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventMeta {
    pub ts: SystemTime,
    pub level: LogLevel,
    pub corr_id: Option<String>,
    pub session_id: String,
    pub component: &'static str,
    pub suppress_console: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CapabilityEvent {
    pub meta: EventMeta,
    pub role: CapabilityRole,
    pub name: String,
    pub action: String,
    /// Index in the role's registry, which is also the dispatch position.
    pub position: usize,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoEvent {
    pub meta: EventMeta,
    pub action: String,
    pub producer: Option<String>,
    pub displayer: Option<String>,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PluginEvent {
    pub meta: EventMeta,
    pub plugin: String,
    pub action: String,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemEvent {
    pub meta: EventMeta,
    pub action: String,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEvent {
    Capability(CapabilityEvent),
    Demo(DemoEvent),
    Plugin(PluginEvent),
    System(SystemEvent),
}
