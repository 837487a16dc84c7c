use crier::config::Config;

#[test]
fn full_document_parses_every_section() {
    let doc = r#"
app_name = "Town Crier"

[logging]
json_path = "logs/custom.jsonl"
json_max_bytes = 1048576
json_rotate = 5
disable_console = true

[plugins]
enabled = false
dir = "libexec"
paths = ["./a.so", "./b.so"]

[demo]
skip_builtins = true
run_on_start = false
"#;

    let config: Config = toml::from_str(doc).unwrap();
    assert_eq!(config.app_name.as_deref(), Some("Town Crier"));

    let logging = config.logging.unwrap();
    assert_eq!(logging.json_path.as_deref(), Some("logs/custom.jsonl"));
    assert_eq!(logging.json_max_bytes, Some(1_048_576));
    assert_eq!(logging.json_rotate, Some(5));
    assert_eq!(logging.disable_console, Some(true));

    let plugins = config.plugins.unwrap();
    assert_eq!(plugins.enabled, Some(false));
    assert_eq!(plugins.dir.as_deref(), Some("libexec"));
    assert_eq!(
        plugins.paths,
        Some(vec!["./a.so".to_string(), "./b.so".to_string()])
    );

    let demo = config.demo.unwrap();
    assert_eq!(demo.skip_builtins, Some(true));
    assert_eq!(demo.run_on_start, Some(false));
}

#[test]
fn minimal_document_leaves_sections_unset() {
    let config: Config = toml::from_str("app_name = \"Crier\"\n").unwrap();
    assert_eq!(config.app_name.as_deref(), Some("Crier"));
    assert!(config.logging.is_none());
    assert!(config.plugins.is_none());
    assert!(config.demo.is_none());
}

#[test]
fn defaults_enable_plugins_and_the_startup_run() {
    let config = Config::default();
    assert!(config.app_name.is_none());
    assert!(config.logging.is_none());

    let plugins = config.plugins.unwrap();
    assert_eq!(plugins.enabled, Some(true));
    assert_eq!(plugins.dir.as_deref(), Some("plugins"));
    assert!(plugins.paths.is_none());

    let demo = config.demo.unwrap();
    assert_eq!(demo.skip_builtins, Some(false));
    assert_eq!(demo.run_on_start, Some(true));
}

#[test]
fn unknown_keys_are_tolerated() {
    let doc = r#"
app_name = "Crier"
future_flag = true

[demo]
run_on_start = true
"#;
    let config: Config = toml::from_str(doc).unwrap();
    assert_eq!(config.demo.unwrap().run_on_start, Some(true));
}
