use std::io::Write;
use std::sync::Arc;

use crate::capability::MessageHub;
use crate::config::Config;
use crate::constants::{build_timestamp, full_version, git_commit, ICON_PLACEHOLDER};
use crate::utils::naming::capability_code;

pub async fn run_prompt_mode(hub: Arc<MessageHub>, config: Config) {
    run_prompt_mode_with_branding(hub, config, None).await
}

/// Branded prompt runner: provide a brand (e.g., "MyApp") to replace the default label.
pub async fn run_prompt_mode_with_branding(
    hub: Arc<MessageHub>,
    config: Config,
    brand: Option<String>,
) {
    let mut stdout = std::io::stdout();

    // Setup line editor with completion
    use rustyline::{CompletionType, Config as RLConfig, Editor};
    let rl_cfg = RLConfig::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .build();
    let mut rl: Editor<PromptCompleter, rustyline::history::DefaultHistory> =
        Editor::with_config(rl_cfg).expect("rustyline init");
    let helper = PromptCompleter {
        capability_codes: hub.capability_codes(),
        builtins: vec![
            "version".into(),
            "/version".into(),
            "about".into(),
            "/about".into(),
            "help".into(),
            "/help".into(),
            "capabilities".into(),
            "/capabilities".into(),
            "run".into(),
            "/run".into(),
            "say".into(),
            "exit".into(),
            "quit".into(),
            "/quit".into(),
        ],
    };
    rl.set_helper(Some(helper));

    // Load history from HOME/USERPROFILE if available; fallback to local file
    let hist_path = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(|home| std::path::PathBuf::from(home).join(".crier_history"))
        .unwrap_or_else(|_| std::path::PathBuf::from(".crier_history"));
    let _ = rl.load_history(hist_path.as_path());

    let prompt_label = format!(
        "{}> ",
        brand
            .or_else(|| config.app_name.clone())
            .unwrap_or_else(|| "Crier".to_string())
    );

    loop {
        stdout.flush().unwrap();
        let readline = rl.readline(&prompt_label);
        let input_owned = match readline {
            Ok(mut l) => {
                l.truncate(l.trim_end().len());
                l
            }
            Err(rustyline::error::ReadlineError::Eof)
            | Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("👋 Exiting.");
                break;
            }
            Err(e) => {
                println!("❌ Read error: {}", e);
                break;
            }
        };
        let input = input_owned.trim();

        if input.is_empty() {
            continue;
        }

        if input == "exit" || input == "/quit" || input == "quit" {
            match rl.readline("Confirm exit? [y/N] ") {
                Ok(ans) => {
                    let a = ans.trim().to_lowercase();
                    if a == "y" || a == "yes" {
                        println!("👋 Exiting.");
                        break;
                    } else {
                        println!("Abort.");
                        continue;
                    }
                }
                Err(_) => {
                    println!("👋 Exiting.");
                    break;
                }
            }
        }

        match input {
            "version" | "/version" | "about" | "/about" => {
                println!(
                    "{}Crier {}\ncommit: {}\nbuilt: {}",
                    ICON_PLACEHOLDER,
                    full_version(),
                    git_commit(),
                    build_timestamp()
                );
                continue;
            }
            "help" | "/help" => {
                let cmds: Vec<&str> = vec![
                    "version, /version             Show version & build info",
                    "about, /about                 Alias of version",
                    "help, /help                   Show this help",
                    "capabilities, /capabilities   List registered capabilities",
                    "run, /run                     Run the demo dispatch once",
                    "say <text>                    Forward <text> to every displayer",
                    "exit                          Confirm + exit app",
                    "quit, /quit                   Confirm + exit app",
                ];
                println!("Available commands:");
                for c in &cmds {
                    println!("  {}", c);
                }
                let codes = hub.capability_codes();
                if !codes.is_empty() {
                    println!("\nCapabilities (enter a code for details):");
                    for c in codes {
                        println!("  {}", c);
                    }
                }
                println!("\nTips: Use Tab to autocomplete commands and capability codes.");
                continue;
            }
            "capabilities" | "/capabilities" => {
                let producers = hub.producer_names();
                let displayers = hub.displayer_names();
                if producers.is_empty() && displayers.is_empty() {
                    println!("No capabilities registered.");
                    continue;
                }
                if !producers.is_empty() {
                    println!("Producers:");
                    for name in &producers {
                        println!("  {} ({})", name, capability_code(name));
                    }
                }
                if !displayers.is_empty() {
                    println!("Displayers:");
                    for name in &displayers {
                        println!("  {} ({})", name, capability_code(name));
                    }
                }
                continue;
            }
            "run" | "/run" => {
                match hub.run_demo() {
                    Ok(report) => println!(
                        "{}Demo complete: {} producers x {} displayers = {} pairs",
                        ICON_PLACEHOLDER, report.producers, report.displayers, report.pairs
                    ),
                    Err(e) => eprintln!("❌ Demo failed: {}", e),
                }
                continue;
            }
            "say" => {
                println!("{}Usage: say <text>", ICON_PLACEHOLDER);
                continue;
            }
            cmd if cmd.starts_with("say ") => {
                let text = cmd["say ".len()..].trim();
                if text.is_empty() {
                    println!("{}Usage: say <text>", ICON_PLACEHOLDER);
                } else if let Err(e) = hub.dispatch_message(text) {
                    eprintln!("❌ Dispatch failed: {}", e);
                }
                continue;
            }
            _ => {}
        }

        // A bare capability code prints that capability's details
        if let Some(line) = describe_capability(&hub, input) {
            println!("{}{}", ICON_PLACEHOLDER, line);
        } else {
            println!(
                "⚠️ Unknown command or capability: '{}'. Available: {:?}",
                input,
                hub.capability_codes()
            );
        }
    }

    // Save history on exit
    let _ = rl.save_history(&hist_path);
}

fn describe_capability(hub: &MessageHub, code: &str) -> Option<String> {
    for name in hub.producer_names() {
        if capability_code(&name) == code {
            return Some(format!("producer '{}' (code {})", name, code));
        }
    }
    for name in hub.displayer_names() {
        if capability_code(&name) == code {
            return Some(format!("displayer '{}' (code {})", name, code));
        }
    }
    None
}

// Simple completer for built-in commands and capability codes
struct PromptCompleter {
    capability_codes: Vec<String>,
    builtins: Vec<String>,
}

impl rustyline::Helper for PromptCompleter {}

impl rustyline::hint::Hinter for PromptCompleter {
    type Hint = String;
    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
        None
    }
}

impl rustyline::highlight::Highlighter for PromptCompleter {}

impl rustyline::validate::Validator for PromptCompleter {}

impl rustyline::completion::Completer for PromptCompleter {
    type Candidate = rustyline::completion::Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> Result<(usize, Vec<Self::Candidate>), rustyline::error::ReadlineError> {
        let before = &line[..pos];
        let mut out: Vec<Self::Candidate> = Vec::new();

        // Determine the current token start position
        let token_start = before
            .rfind(char::is_whitespace)
            .map(|i| i + 1)
            .unwrap_or(0);
        let current = &before[token_start..];

        // First token: offer built-ins + capability codes. Later tokens are
        // free text (say), so no suggestions.
        let first_space = before.find(char::is_whitespace);
        if first_space.is_none() {
            for s in self.builtins.iter().chain(self.capability_codes.iter()) {
                if s.starts_with(current) {
                    out.push(rustyline::completion::Pair {
                        display: s.clone(),
                        replacement: s.clone(),
                    });
                }
            }
        }
        Ok((token_start, out))
    }
}
