//! flakedeps command line interface
//!
//! Thin shell around `flakedeps-flake`: argument parsing, configuration
//! resolution, directory scanning and output rendering.

pub mod cli;
pub mod commands;
pub mod output;

pub use cli::{Cli, CliError, Command, OutputFormat};

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins over `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
