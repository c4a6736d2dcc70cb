//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, output rendering and
//! error hints that support the main entry point.

use confargs::{ConfigError, Namespace};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::cli::OutputFormat;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - unreadable file, missing required flag, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Output error (exit code 2) - the namespace cannot be written in the requested format.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn output_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::MissingArguments { flags } => {
            eprintln!(
                "\nPass them after the config path, e.g. 'confargs <CONFIG> {} <VALUE>'.",
                flags.first().map_or("--key", String::as_str)
            );
        }
        ConfigError::UnknownType { .. } => {
            eprintln!("\nSupported markers: ?:int, ?:float, ?:str, ?:bool, ?:list[int], ?:list[float].");
        }
        _ => {}
    }
}

/// Renders the namespace in the requested format.
///
/// # Errors
///
/// Returns the serializer's message if the namespace has no representation
/// in `format` (TOML cannot hold `null`).
pub fn render(namespace: &Namespace, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(namespace).map_err(|e| e.to_string()),
        OutputFormat::Yaml => serde_yaml::to_string(namespace).map_err(|e| e.to_string()),
        OutputFormat::Toml => toml::to_string_pretty(namespace).map_err(|e| e.to_string()),
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only the rendered configuration.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
