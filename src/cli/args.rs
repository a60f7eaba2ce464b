//! Per-command option definitions using clap
//!
//! Top-level routing is done by the command table; clap only parses the
//! arguments that follow a recognized command.

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

use crate::cli::{CliError, CliResult};

/// Output format for build information
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Three-line text block
    #[default]
    Human,
    /// Single JSON object
    Json,
}

/// Show version information
#[derive(Parser, Debug, Default)]
#[command(name = "version", bin_name = "ghost-town version")]
#[command(disable_version_flag = true)]
pub struct VersionArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Result of parsing a command's trailing arguments.
#[derive(Debug)]
pub enum Parsed<T> {
    Args(T),
    /// `--help` was requested; holds the rendered help text
    Help(String),
}

/// Parse the arguments following a command token.
///
/// Help requests are returned as text instead of exiting the process, so the
/// dispatcher keeps control of output and exit codes.
pub fn parse_command_args<T: Parser>(name: &str, args: &[String]) -> CliResult<Parsed<T>> {
    let argv = std::iter::once(name).chain(args.iter().map(String::as_str));
    match T::try_parse_from(argv) {
        Ok(parsed) => Ok(Parsed::Args(parsed)),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                Ok(Parsed::Help(e.render().to_string()))
            }
            _ => {
                let rendered = e.render().to_string();
                let message = rendered.trim_start_matches("error: ").trim_end();
                Err(CliError::Usage(message.to_string()))
            }
        },
    }
}
