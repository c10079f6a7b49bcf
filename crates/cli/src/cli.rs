//! Argument parsing, exit codes and extraction settings resolution

use clap::{Parser, Subcommand, ValueEnum};
use flakedeps_flake::{ConfigOverrides, ExtractConfig, FlakeLockError};
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application
pub const EXIT_OK: i32 = 0;
/// CLI or configuration error exit code
pub const EXIT_CLI: i32 = 2;
/// I/O error exit code
pub const EXIT_IO: i32 = 3;

/// CLI-specific error types with proper exit code mapping
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// CLI or configuration error (exit code 2)
    #[error("CLI/configuration error: {message}")]
    #[diagnostic(code(flakedeps::cli::config))]
    Config {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// Reading input or writing output failed (exit code 3)
    #[error("I/O error: {message}")]
    #[diagnostic(code(flakedeps::cli::io))]
    Io {
        /// The error message
        message: String,
    },
}

impl CliError {
    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new configuration error with help text
    #[must_use]
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a new I/O error
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Exit code this error maps to
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => EXIT_CLI,
            Self::Io { .. } => EXIT_IO,
        }
    }
}

impl From<FlakeLockError> for CliError {
    fn from(err: FlakeLockError) -> Self {
        match &err {
            FlakeLockError::ConfigError { .. } => Self::config_with_help(
                err.to_string(),
                "Known keys are 'allow_custom_host' and 'enforce_version'",
            ),
            _ => Self::io(err.to_string()),
        }
    }
}

/// Output format for extraction results
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    /// JSON, `null` when nothing is updatable
    #[default]
    Json,
    /// One line per dependency
    Text,
}

/// List the updatable inputs of Nix flake lock files
#[derive(Parser, Debug)]
#[command(name = "flakedeps", version, about, long_about = None)]
pub struct Cli {
    /// TOML file with extraction settings
    #[arg(long, global = true, env = "FLAKEDEPS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, env = "FLAKEDEPS_LOG", default_value = "warn")]
    pub log_level: String,

    /// Honour custom forge hosts and classify tarball inputs
    #[arg(long, global = true)]
    pub allow_custom_host: Option<bool>,

    /// Reject lock files whose version is not the supported one
    #[arg(long, global = true)]
    pub enforce_version: Option<bool>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Extract from the flake.lock next to a flake.nix
    Extract {
        /// Path to the flake.nix package file
        package_file: PathBuf,
    },
    /// Extract from a lock file given directly ("-" reads stdin)
    Inline {
        /// Path to the lock file
        lock_file: PathBuf,
    },
    /// Find every flake.nix below a directory and extract each one
    Scan {
        /// Directory to search
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

impl Cli {
    /// Resolve the effective extraction settings for this invocation.
    ///
    /// Starts from the command's preset, applies the keys set in the config
    /// file, then explicit flags.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be loaded
    pub fn extract_config(&self) -> Result<ExtractConfig, CliError> {
        let preset = match self.command {
            Command::Inline { .. } => ExtractConfig::inline(),
            Command::Extract { .. } | Command::Scan { .. } => ExtractConfig::sibling_file(),
        };
        let from_file = match &self.config {
            Some(path) => ConfigOverrides::load(path)?,
            None => ConfigOverrides::default(),
        };
        let flags = ConfigOverrides {
            allow_custom_host: self.allow_custom_host,
            enforce_version: self.enforce_version,
        };
        Ok(flags.apply(from_file.apply(preset)))
    }
}

/// Parse command line arguments
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
