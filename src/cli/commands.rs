//! Built-in command handlers

use std::io::Write;

use tracing::{debug, instrument};

use crate::cli::args::{parse_command_args, OutputFormat, Parsed, VersionArgs};
use crate::cli::dispatch::{CommandTable, Handler, Invocation};
use crate::cli::{CliError, CliResult};
use crate::version::BuildInfo;

/// Tokens routed to the version command.
pub const VERSION_NAMES: [&str; 3] = ["version", "-v", "--version"];

/// Tokens routed to the help command.
pub const HELP_NAMES: [&str; 3] = ["help", "-h", "--help"];

/// Table with every built-in command registered.
pub fn builtin_table(info: BuildInfo) -> CliResult<CommandTable> {
    let mut table = CommandTable::new();
    table
        .register(
            VERSION_NAMES[0],
            &VERSION_NAMES[1..],
            "Show version information",
            VersionCommand::new(info),
        )?
        .register(
            HELP_NAMES[0],
            &HELP_NAMES[1..],
            "Show this help, or help for a command",
            HelpCommand,
        )?;
    Ok(table)
}

/// Prints build information.
#[derive(Debug, Clone)]
pub struct VersionCommand {
    info: BuildInfo,
}

impl VersionCommand {
    pub fn new(info: BuildInfo) -> Self {
        Self { info }
    }
}

impl Handler for VersionCommand {
    #[instrument(level = "debug", skip_all)]
    fn run(&self, ctx: &Invocation<'_>, out: &mut dyn Write) -> CliResult<()> {
        // Arguments that do not parse are ignored: the version always prints
        let args = match parse_command_args::<VersionArgs>(VERSION_NAMES[0], ctx.args()) {
            Ok(Parsed::Args(args)) => args,
            Ok(Parsed::Help(help)) => {
                out.write_all(help.as_bytes())?;
                return Ok(());
            }
            Err(e) => {
                debug!("ignoring version arguments {:?}: {}", ctx.args(), e);
                VersionArgs::default()
            }
        };

        match args.format {
            OutputFormat::Human => writeln!(out, "{}", self.info.build_info())?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&self.info)?)?,
        }
        Ok(())
    }
}

/// Prints usage, or delegates `help <command>` to `<command> --help`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelpCommand;

impl Handler for HelpCommand {
    #[instrument(level = "debug", skip_all)]
    fn run(&self, ctx: &Invocation<'_>, out: &mut dyn Write) -> CliResult<()> {
        let topic = match ctx.args().first() {
            None => None,
            Some(arg) if HELP_NAMES[1..].contains(&arg.as_str()) => None,
            Some(arg) => Some(arg),
        };

        let Some(topic) = topic else {
            out.write_all(ctx.usage().as_bytes())?;
            return Ok(());
        };

        let entry = ctx
            .table()
            .lookup(topic)
            .ok_or_else(|| CliError::InvalidArgs(format!("no help for unknown command: {topic}")))?;
        let help_args = ["--help".to_string()];
        let nested = Invocation::new(&help_args, ctx.table(), ctx.logger());
        entry.handler().run(&nested, out)
    }
}
