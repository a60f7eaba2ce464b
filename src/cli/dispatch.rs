//! Command table and dispatcher
//!
//! The dispatcher maps an argument vector to one handler in a fixed
//! [`CommandTable`]. Every outcome is an (output, exit code) pair:
//!
//! | argv\[1\]              | output                           | exit |
//! |------------------------|----------------------------------|------|
//! | missing                | usage                            | 1    |
//! | registered name/alias  | handler output                   | 0, or the handler error's code |
//! | anything else          | `Unknown command: <token>` + usage | 1  |
//!
//! Matching is exact, case-sensitive string equality.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};

use tracing::{debug, error, instrument};

use crate::cli::{CliError, CliResult};
use crate::exitcode;
use crate::logger::Logger;

/// Tool identity shown in usage text.
pub const TOOL_NAME: &str = "ghost-town";

/// One-line description shown in usage text.
pub const TOOL_DESCRIPTION: &str = "kiro-cli tool based on Gas Town";

const NAME_COLUMN_WIDTH: usize = 12;

/// Context passed to a handler for one invocation.
pub struct Invocation<'a> {
    args: &'a [String],
    table: &'a CommandTable,
    logger: &'a dyn Logger,
}

impl<'a> Invocation<'a> {
    pub fn new(args: &'a [String], table: &'a CommandTable, logger: &'a dyn Logger) -> Self {
        Self {
            args,
            table,
            logger,
        }
    }

    /// Arguments after the command token.
    pub fn args(&self) -> &'a [String] {
        self.args
    }

    pub fn table(&self) -> &'a CommandTable {
        self.table
    }

    pub fn logger(&self) -> &'a dyn Logger {
        self.logger
    }

    pub fn usage(&self) -> String {
        render_usage(self.table)
    }
}

/// A command implementation.
///
/// Handlers write their output to `out` and report failure through the
/// returned error; they never exit the process themselves.
pub trait Handler: Send + Sync {
    fn run(&self, ctx: &Invocation<'_>, out: &mut dyn Write) -> CliResult<()>;
}

impl<F> Handler for F
where
    F: Fn(&Invocation<'_>, &mut dyn Write) -> CliResult<()> + Send + Sync,
{
    fn run(&self, ctx: &Invocation<'_>, out: &mut dyn Write) -> CliResult<()> {
        self(ctx, out)
    }
}

/// A registered command.
pub struct CommandEntry {
    name: String,
    aliases: Vec<String>,
    description: String,
    handler: Box<dyn Handler>,
}

impl CommandEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }
}

impl fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Mapping from command names (and aliases) to handlers.
///
/// Entries keep registration order; names and aliases share one key space.
#[derive(Debug, Default)]
pub struct CommandTable {
    entries: Vec<CommandEntry>,
    index: HashMap<String, usize>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under `name` and `aliases`.
    ///
    /// Fails without modifying the table if any key is empty or taken.
    pub fn register<H>(
        &mut self,
        name: &str,
        aliases: &[&str],
        description: &str,
        handler: H,
    ) -> CliResult<&mut Self>
    where
        H: Handler + 'static,
    {
        let keys: Vec<&str> = std::iter::once(name).chain(aliases.iter().copied()).collect();
        for (i, key) in keys.iter().enumerate() {
            if key.is_empty() {
                return Err(CliError::InvalidArgs("empty command name".to_string()));
            }
            if self.index.contains_key(*key) || keys[..i].contains(key) {
                return Err(CliError::DuplicateCommand(key.to_string()));
            }
        }

        let position = self.entries.len();
        for key in &keys {
            self.index.insert(key.to_string(), position);
        }
        self.entries.push(CommandEntry {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            description: description.to_string(),
            handler: Box::new(handler),
        });
        debug!(name, ?aliases, "registered command");
        Ok(self)
    }

    /// Exact-match lookup by name or alias.
    pub fn lookup(&self, token: &str) -> Option<&CommandEntry> {
        self.index.get(token).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// Entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &CommandEntry> {
        self.entries.iter()
    }

    /// Every key: names and aliases.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Usage text listing every command in `table`.
pub fn render_usage(table: &CommandTable) -> String {
    let width = table
        .entries()
        .map(|e| e.name().len())
        .max()
        .unwrap_or(0)
        .max(NAME_COLUMN_WIDTH);

    let mut usage = format!("{TOOL_NAME} - {TOOL_DESCRIPTION}\n\n");
    usage.push_str("Usage:\n");
    usage.push_str(&format!("  {TOOL_NAME} <command> [options]\n\n"));
    usage.push_str("Commands:\n");
    for entry in table.entries() {
        usage.push_str(&format!(
            "  {:<width$} {}\n",
            entry.name(),
            entry.description()
        ));
    }
    usage.push_str("\nFor more information, run:\n");
    usage.push_str(&format!("  {TOOL_NAME} <command> --help\n"));
    usage
}

/// Where an argument vector leads.
#[derive(Debug)]
pub enum Route<'a> {
    /// No command token
    NoCommand,
    /// Token matched a registered command
    Dispatch {
        entry: &'a CommandEntry,
        args: &'a [String],
    },
    /// Token matched nothing
    Unknown(&'a str),
}

/// Routes argument vectors through a [`CommandTable`].
pub struct Dispatcher {
    table: CommandTable,
    logger: Box<dyn Logger>,
}

impl Dispatcher {
    pub fn new(table: CommandTable, logger: Box<dyn Logger>) -> Self {
        Self { table, logger }
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    pub fn usage(&self) -> String {
        render_usage(&self.table)
    }

    /// Resolve `argv` (program name at index 0) without running anything.
    pub fn resolve<'a>(&'a self, argv: &'a [String]) -> Route<'a> {
        let Some(token) = argv.get(1) else {
            return Route::NoCommand;
        };
        match self.table.lookup(token) {
            Some(entry) => Route::Dispatch {
                entry,
                args: &argv[2..],
            },
            None => Route::Unknown(token),
        }
    }

    /// Run `argv` to completion and return the process exit code.
    pub fn run(&self, argv: &[String], out: &mut dyn Write) -> i32 {
        match self.dispatch(argv, out) {
            Ok(code) => code,
            Err(e) => {
                error!("cannot write output: {}", e);
                exitcode::IOERR
            }
        }
    }

    #[instrument(level = "debug", skip_all, fields(command = argv.get(1).map(String::as_str)))]
    fn dispatch(&self, argv: &[String], out: &mut dyn Write) -> io::Result<i32> {
        match self.resolve(argv) {
            Route::NoCommand => {
                debug!("no command given");
                out.write_all(self.usage().as_bytes())?;
                Ok(exitcode::FAILURE)
            }
            Route::Unknown(token) => {
                debug!(token, "unknown command");
                writeln!(out, "Unknown command: {}\n", token)?;
                out.write_all(self.usage().as_bytes())?;
                Ok(exitcode::FAILURE)
            }
            Route::Dispatch { entry, args } => {
                debug!(name = entry.name(), ?args, "dispatching");
                let ctx = Invocation::new(args, &self.table, self.logger.as_ref());
                match entry.handler().run(&ctx, out) {
                    Ok(()) => Ok(exitcode::OK),
                    Err(CliError::Io(e)) => Err(e),
                    Err(e) => {
                        debug!(name = entry.name(), "handler failed: {}", e);
                        writeln!(out, "Error: {}", e)?;
                        Ok(e.exit_code())
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{ConsoleLogger, LogLevel};

    fn noop(_: &Invocation<'_>, _: &mut dyn Write) -> CliResult<()> {
        Ok(())
    }

    fn argv(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn dispatcher(table: CommandTable) -> Dispatcher {
        Dispatcher::new(table, Box::new(ConsoleLogger::new(LogLevel::Info, Vec::new())))
    }

    #[test]
    fn given_duplicate_alias_when_registering_then_rejected() {
        let mut table = CommandTable::new();
        table.register("one", &["-1"], "first", noop).unwrap();

        let result = table.register("two", &["-1"], "second", noop);

        assert!(matches!(result, Err(CliError::DuplicateCommand(k)) if k == "-1"));
        assert_eq!(table.len(), 1);
        assert!(!table.contains("two"));
    }

    #[test]
    fn given_alias_repeating_name_when_registering_then_rejected() {
        let mut table = CommandTable::new();

        let result = table.register("same", &["same"], "dup", noop);

        assert!(matches!(result, Err(CliError::DuplicateCommand(_))));
        assert!(table.is_empty());
    }

    #[test]
    fn given_empty_name_when_registering_then_rejected() {
        let mut table = CommandTable::new();

        assert!(table.register("", &[], "nothing", noop).is_err());
    }

    #[test]
    fn lookup_is_case_sensitive_and_exact() {
        let mut table = CommandTable::new();
        table.register("status", &[], "show status", noop).unwrap();

        assert!(table.lookup("status").is_some());
        assert!(table.lookup("Status").is_none());
        assert!(table.lookup("stat").is_none());
        assert!(table.lookup("status ").is_none());
    }

    #[test]
    fn given_program_name_only_when_resolving_then_no_command() {
        let d = dispatcher(CommandTable::new());
        let args = argv(&["ghost-town"]);

        assert!(matches!(d.resolve(&args), Route::NoCommand));
        assert!(matches!(d.resolve(&[]), Route::NoCommand));
    }

    #[test]
    fn given_alias_when_resolving_then_dispatches_with_trailing_args() {
        let mut table = CommandTable::new();
        table.register("status", &["st"], "show status", noop).unwrap();
        let d = dispatcher(table);
        let args = argv(&["ghost-town", "st", "--all"]);

        match d.resolve(&args) {
            Route::Dispatch { entry, args } => {
                assert_eq!(entry.name(), "status");
                assert_eq!(args, ["--all".to_string()]);
            }
            other => panic!("unexpected route: {:?}", other),
        }
    }

    #[test]
    fn usage_lists_entries_in_registration_order() {
        let mut table = CommandTable::new();
        table.register("zeta", &[], "last letter", noop).unwrap();
        table.register("alpha", &[], "first letter", noop).unwrap();

        let usage = render_usage(&table);

        let zeta = usage.find("  zeta").unwrap();
        let alpha = usage.find("  alpha").unwrap();
        assert!(zeta < alpha);
        assert!(usage.contains("  zeta         last letter\n"));
    }
}
