//! Central place for application-wide constants and default values.

/// Default application name (can be overridden in config)
pub const DEFAULT_APP_NAME: &str = "Crier";

/// Left padding used to align log lines with those that include emoji prefixes.
/// Keep this to a fixed width matching the emoji prefix you use elsewhere.
pub const ICON_PLACEHOLDER: &str = "   "; // Three spaces for alignment

/// Prefix written by the console displayer before every message line.
pub const MESSAGE_PREFIX: &str = "Message: ";

/// Prefix written by the console displayer before the record value line.
pub const RECORD_PREFIX: &str = "From C++: ";

/// Suffix appended by the clock producer after the raw epoch-second count.
pub const EPOCH_SUFFIX: &str = " seconds since the Epoch";

/// strftime-style format for the human-readable half of the clock message.
pub const CLOCK_TIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Scalar tag carried by every demo record.
pub const DEMO_RECORD_TAG: i32 = 1;

/// Dimensions of the demo record's grid.
pub const DEMO_GRID_ROWS: usize = 1;
pub const DEMO_GRID_COLS: usize = 1;

/// Value stored in the demo grid's single cell.
pub const DEMO_CELL_VALUE: f32 = 101.0;

/// Application / crate version (populated from Cargo.toml via env! macro)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Optional short git commit hash (set via build script or cargo:rustc-env). Falls back to "unknown".
pub fn git_commit() -> &'static str {
    option_env!("GIT_COMMIT").unwrap_or("unknown")
}

/// Optional build timestamp in RFC3339 (set via build script). Falls back to "unknown".
pub fn build_timestamp() -> &'static str {
    option_env!("BUILD_TIMESTAMP").unwrap_or("unknown")
}

/// Human friendly composite version string used in prompts / logs.
pub fn full_version() -> String {
    format!(
        "v{} (plugin abi {})",
        APP_VERSION,
        crate::plugin_host::PLUGIN_ABI_VERSION
    )
}
