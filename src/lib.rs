//! # Crier Core Library
//!
//! Plugin-driven message dispatch host supporting two operation modes:
//!
//! * **Host mode:** The `crier` binary loads capability plugins at runtime and
//!   runs the demo dispatch against them.
//! * **Embedded mode:** Link the crate and drive a [`capability::MessageHub`]
//!   (or the [`Crier`] facade) from your own application.
//!
//! ## Design Principles
//! * Deterministic dispatch: producers and displayers run in registration
//!   order, synchronously, so output is reproducible.
//! * Owning registries: the hub holds shared handles to its capabilities, no
//!   dangling registrations.
//! * Validated records: the data record crossing the capability boundary
//!   carries its dimensions and refuses out-of-range access.
//! * Event-driven instrumentation (JSON line event log + console) kept off the
//!   dispatch path.
//!
//! ## Key Modules
//! * `capability` – Producer/displayer traits, the hub, built-in capabilities.
//! * `record` – The validated data record handed to displayers.
//! * `plugin_host` – Dynamic plugin loading across a C ABI.
//! * `config` – Runtime configuration (TOML).
//! * `events` – Structured logging/events dispatcher.
//! * `prompt` – Optional interactive prompt integration.
//!
//! ## Status
//! Pre-initial public release. APIs may change without notice until version
//! 0.1.0 is tagged.

pub mod capability;
pub mod config;
pub mod constants;
pub mod events;
pub mod plugin_host;
pub mod prelude; // curated stable-intent re-exports
pub mod prompt;
pub mod record;
pub mod utils; // common helpers (naming, etc.)

use capability::{DemoReport, HostContext, MessageHub, OutputSink};
use plugin_host::PluginLoader;

/// A configured hub together with the loader keeping its plugin libraries
/// mapped. Field order matters: the hub must drop before the loader, since
/// capabilities registered by plugins point into the loaded libraries.
pub struct Host {
    pub hub: MessageHub,
    loader: PluginLoader,
}

impl Host {
    pub fn loaded_plugins(&self) -> usize {
        self.loader.loaded_count()
    }
}

/// Crier Core Struct
pub struct Crier {
    pub config: config::Config,
}

impl Crier {
    /// Initializes the host with the given configuration.
    pub fn new(config: config::Config) -> Self {
        Self { config }
    }

    /// Builds a hub from the configuration and runs the demo dispatch once.
    ///
    /// Convenience entry point for embedding. Initializes the event
    /// dispatcher if the embedding application has not done so already.
    pub async fn run(&self) -> anyhow::Result<DemoReport> {
        if events::dispatcher::EventDispatcher::global().is_none() {
            events::init_events_from_config(self.config.logging.as_ref()).await;
        }
        let host = self.build_host(OutputSink::stdout())?;
        let report = host.hub.run_demo()?;
        Ok(report)
    }

    /// Builds a hub the same way [`run`](Self::run) does, without running the
    /// demo: built-ins registered unless disabled, then plugins loaded from
    /// the configured paths and directory.
    pub fn build_host(&self, output: OutputSink) -> anyhow::Result<Host> {
        let mut loader = PluginLoader::new();
        let mut hub = MessageHub::with_context(HostContext::new(output));

        let demo_cfg = self.config.demo.clone().unwrap_or_default();
        if !demo_cfg.skip_builtins.unwrap_or(false) {
            hub.register_builtins();
        }

        let plugins_cfg = self.config.plugins.clone().unwrap_or_default();
        if plugins_cfg.enabled.unwrap_or(true) {
            for path in plugins_cfg.paths.iter().flatten() {
                if let Err(e) = loader.load_plugin(std::path::Path::new(path), &mut hub) {
                    eprintln!("⚠️ Skipping plugin {}: {}", path, e);
                }
            }
            if let Some(dir) = plugins_cfg.dir.as_deref() {
                if std::path::Path::new(dir).is_dir() {
                    loader.load_plugins(dir, &mut hub)?;
                }
            }
        }
        Ok(Host { hub, loader })
    }
}
