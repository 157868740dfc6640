//! CLI library for testing purposes

pub mod config;
pub mod convert;
pub mod view;

pub use config::{CliConfig, DEFAULT_CONFIG_FILE};
pub use xliffgen::Target;

/// Parses a `--target` value for clap.
pub fn parse_target(value: &str) -> Result<Target, String> {
    value.parse().map_err(|e: xliffgen::Error| e.to_string())
}

/// `RUST_LOG`-style directive for the number of `-v` flags.
pub fn log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
