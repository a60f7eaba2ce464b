//! CLI layer: command table, dispatch and built-in commands

pub mod args;
pub mod commands;
pub mod dispatch;
pub mod error;
pub mod output;

pub use commands::builtin_table;
pub use dispatch::{CommandTable, Dispatcher, Handler, Invocation, Route};
pub use error::{CliError, CliResult};
