//! confargs: layered configuration resolver
//!
//! Entry point for the confargs application.

use std::process::ExitCode;

mod app;
mod cli;

#[cfg(test)]
mod cli_tests;

use app::{exit_code, print_config_hint, render, setup_tracing};
use cli::Cli;

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();
    setup_tracing(cli.verbose);

    let namespace = match confargs::from_file(&cli.config)
        .and_then(|parser| parser.parse_from(cli.override_args()))
    {
        Ok(namespace) => namespace,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    match render(&namespace, cli.format) {
        Ok(text) => {
            println!("{}", text.trim_end());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Output error: {e}");
            exit_code::output_error()
        }
    }
}
