use clap::Parser;
use std::fs;
use std::sync::Arc;

use crier::{
    capability::{HostContext, MessageHub, OutputSink},
    config::Config,
    constants::*, // Import all constants
    plugin_host::PluginLoader,
    prompt::run_prompt_mode,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Crier Capability Host")]
struct Args {
    /// Optional path to config file (TOML)
    #[arg(short, long)]
    config: Option<String>,

    /// Enable interactive prompt mode
    #[arg(long)]
    prompt: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| "config.toml".to_string());
    let config = match fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str::<Config>(&content) {
            Ok(cfg) => {
                println!("{}Loaded config from: {}", ICON_PLACEHOLDER, config_path);
                cfg
            }
            Err(err) => {
                eprintln!("❌ Failed to parse config file '{}': {}", config_path, err);
                std::process::exit(1);
            }
        },
        Err(_) => {
            println!(
                "⚠️ No config file found at '{}', falling back to default config.",
                config_path
            );
            Config::default()
        }
    };

    // Initialize events AFTER config is loaded so custom logging path can be applied
    if let Some(log_cfg) = config.logging.as_ref() {
        crier::events::init_events_from_config(Some(log_cfg)).await;
    } else {
        crier::events::init_default_events().await;
    }

    let app_name = config
        .app_name
        .as_deref()
        .unwrap_or(DEFAULT_APP_NAME)
        .to_string();
    {
        use crier::events::{
            dispatcher,
            model::{LogEvent, LogLevel, SystemEvent},
        };
        let mut meta = dispatcher::meta("host", LogLevel::Info);
        meta.corr_id = Some(dispatcher::correlation_id());
        dispatcher::emit(LogEvent::System(SystemEvent {
            meta,
            action: "startup".into(),
            detail: Some(format!("app={} {}", app_name, full_version())),
        }));
    }

    let mut hub = MessageHub::with_context(HostContext::new(OutputSink::stdout()));

    let demo_cfg = config.demo.clone().unwrap_or_default();
    if !demo_cfg.skip_builtins.unwrap_or(false) {
        hub.register_builtins();
        println!("{}Registered built-in capabilities.", ICON_PLACEHOLDER);
    }

    // Dynamically load capability plugins
    let mut plugin_loader = PluginLoader::new();
    let plugins_cfg = config.plugins.clone().unwrap_or_default();
    if plugins_cfg.enabled.unwrap_or(true) {
        for path in plugins_cfg.paths.iter().flatten() {
            if let Err(e) = plugin_loader.load_plugin(std::path::Path::new(path), &mut hub) {
                eprintln!("❌ Plugin loading failed for {}: {}", path, e);
            }
        }
        if let Some(dir) = plugins_cfg.dir.as_deref() {
            if std::path::Path::new(dir).is_dir() {
                if let Err(e) = plugin_loader.load_plugins(dir, &mut hub) {
                    eprintln!("❌ Plugin loading failed: {}", e);
                }
            }
        }
    }

    println!(
        "{}Capabilities ready: {} producers, {} displayers.",
        ICON_PLACEHOLDER,
        hub.producer_count(),
        hub.displayer_count()
    );

    let hub = Arc::new(hub);

    // Prompt mode
    if args.prompt {
        println!("🟢 {} prompt ready. Type 'help' to get started.", app_name);
        run_prompt_mode(hub.clone(), config.clone()).await;
        // Avoid unloading dynamic plugin libraries during shutdown, which can segfault
        // if any background tasks or drop glue touch plugin code after dlclose.
        // It's acceptable to leak on process exit.
        std::mem::forget(plugin_loader);
        return;
    }

    if !demo_cfg.run_on_start.unwrap_or(true) {
        println!(
            "{}Nothing to do (demo.run_on_start = false and prompt mode off).",
            ICON_PLACEHOLDER
        );
        std::mem::forget(plugin_loader);
        return;
    }

    println!("🟢 {} is running.", app_name);
    if let Err(e) = hub.run_demo() {
        eprintln!("❌ Demo failed: {}", e);
        std::process::exit(1);
    }
    println!("🛑 {} shutting down gracefully.", app_name);

    // Prevent unloading of dynamic plugin libraries on shutdown to avoid segfaults
    // from destructor ordering or background tasks touching plugin code.
    std::mem::forget(plugin_loader);
}
