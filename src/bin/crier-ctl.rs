use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crier::capability::{HostContext, MessageHub, OutputSink};
use crier::plugin_host::{check_plugin, PluginLoader, PLUGIN_ABI_VERSION};
use crier::utils::naming::capability_code;

/// crier-ctl: Admin CLI for Crier host operations (plugins/capabilities)
///
/// This tool inspects plugin libraries and capability registrations based on
/// a Crier config file. It works offline, without the host running.
#[derive(Parser, Debug)]
#[command(
    name = "crier-ctl",
    version,
    about = "Admin CLI for Crier (plugins/capabilities)"
)]
struct Cli {
    /// Path to Crier config file (TOML)
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Plugin library operations
    Plugins {
        #[command(subcommand)]
        cmd: PluginsCmd,
    },
    /// Capability registry operations
    Capabilities {
        #[command(subcommand)]
        cmd: CapabilitiesCmd,
    },
}

#[derive(Subcommand, Debug)]
enum PluginsCmd {
    /// List plugin libraries the host would load (configured paths + scan dir)
    List,
    /// Probe one plugin library: ABI handshake plus what it registers
    Check { path: PathBuf },
}

#[derive(Subcommand, Debug)]
enum CapabilitiesCmd {
    /// Load everything the way the host would and list registered capabilities
    List,
}

fn load_config(path: &PathBuf) -> crier::config::Config {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str::<crier::config::Config>(&content) {
            Ok(cfg) => cfg,
            Err(err) => {
                eprintln!(
                    "❌ Failed to parse config file '{}': {}",
                    path.display(),
                    err
                );
                std::process::exit(2);
            }
        },
        Err(err) => {
            eprintln!(
                "❌ Failed to read config file '{}': {}",
                path.display(),
                err
            );
            std::process::exit(2);
        }
    }
}

fn has_dynamic_lib_ext(path: &std::path::Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref(),
        Some("so") | Some("dylib") | Some("dll")
    )
}

fn main() {
    let cli = Cli::parse();
    let config = load_config(&cli.config);
    let plugins_cfg = config.plugins.clone().unwrap_or_default();

    match cli.command {
        Commands::Plugins { cmd } => match cmd {
            PluginsCmd::List => {
                let mut any = false;
                for path in plugins_cfg.paths.iter().flatten() {
                    let exists = std::path::Path::new(path).is_file();
                    println!("{}{}", path, if exists { "" } else { " (missing)" });
                    any = true;
                }
                if let Some(dir) = plugins_cfg.dir.as_deref() {
                    match std::fs::read_dir(dir) {
                        Ok(entries) => {
                            for e in entries.flatten() {
                                let path = e.path();
                                if has_dynamic_lib_ext(&path) {
                                    println!("{}", path.display());
                                    any = true;
                                }
                            }
                        }
                        Err(e) => {
                            if plugins_cfg.paths.is_none() {
                                eprintln!("❌ Failed to read {}: {}", dir, e);
                                std::process::exit(1);
                            }
                        }
                    }
                }
                if !any {
                    println!("<none>");
                }
            }
            PluginsCmd::Check { path } => match check_plugin(&path) {
                Ok(probe) => {
                    println!("Plugin OK (host ABI {})", PLUGIN_ABI_VERSION);
                    println!("Producers:  {}", probe.producers);
                    println!("Displayers: {}", probe.displayers);
                }
                Err(err) => {
                    eprintln!("❌ Plugin check failed for {}: {}", path.display(), err);
                    std::process::exit(1);
                }
            },
        },
        Commands::Capabilities { cmd } => match cmd {
            CapabilitiesCmd::List => {
                // Loader declared before the hub so registered capabilities
                // drop before their libraries unload.
                let mut loader = PluginLoader::new();
                let mut hub = MessageHub::with_context(HostContext::new(OutputSink::stdout()));

                let demo_cfg = config.demo.clone().unwrap_or_default();
                if !demo_cfg.skip_builtins.unwrap_or(false) {
                    hub.register_builtins();
                }
                if plugins_cfg.enabled.unwrap_or(true) {
                    for path in plugins_cfg.paths.iter().flatten() {
                        if let Err(e) = loader.load_plugin(std::path::Path::new(path), &mut hub) {
                            eprintln!("⚠️ Skipping plugin {}: {}", path, e);
                        }
                    }
                    if let Some(dir) = plugins_cfg.dir.as_deref() {
                        if std::path::Path::new(dir).is_dir() {
                            if let Err(e) = loader.load_plugins(dir, &mut hub) {
                                eprintln!("❌ Plugin loading failed: {}", e);
                                std::process::exit(1);
                            }
                        }
                    }
                }

                let producers = hub.producer_names();
                let displayers = hub.displayer_names();
                println!("Producers:");
                if producers.is_empty() {
                    println!("  <none>");
                }
                for name in &producers {
                    println!("  {} ({})", name, capability_code(name));
                }
                println!("Displayers:");
                if displayers.is_empty() {
                    println!("  <none>");
                }
                for name in &displayers {
                    println!("  {} ({})", name, capability_code(name));
                }
            }
        },
    }
}
