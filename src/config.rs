use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app_name: Option<String>,
    /// Logging / events configuration
    pub logging: Option<LoggingConfig>,
    /// Plugin loading configuration
    pub plugins: Option<PluginsConfig>,
    /// Demo dispatch configuration
    pub demo: Option<DemoConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: None,
            logging: None,
            plugins: Some(PluginsConfig::default()),
            demo: Some(DemoConfig::default()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Path to JSON line event log (rotated). If unset, defaults to logs/crier_events.jsonl
    pub json_path: Option<String>,
    /// Max size in bytes before rotation (default 5MB)
    pub json_max_bytes: Option<usize>,
    /// Number of rotated files to retain (default 3)
    pub json_rotate: Option<u32>,
    /// Disable console sink (default false)
    pub disable_console: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PluginsConfig {
    /// Enable plugin loading (default true)
    pub enabled: Option<bool>,
    /// Directory scanned for dynamic libraries at startup (default "plugins")
    pub dir: Option<String>,
    /// Explicit plugin library paths, loaded before the directory scan
    pub paths: Option<Vec<String>>,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            enabled: Some(true),
            dir: Some("plugins".to_string()),
            paths: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    /// Skip registering the built-in clock producer and console displayer
    pub skip_builtins: Option<bool>,
    /// Run the demo dispatch once at startup (default true)
    pub run_on_start: Option<bool>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            skip_builtins: Some(false),
            run_on_start: Some(true),
        }
    }
}
