//! ghost-town: kiro-cli tool based on Gas Town
//!
//! The crate is organised around the command-dispatch core:
//!
//! - `version`: build metadata ([`version::BuildInfo`])
//! - `cli`: command table, dispatcher and built-in commands
//! - `logger`: console logger available to command handlers
//! - `config`: runtime settings read from the environment
//! - `exitcode`: process exit codes

pub mod cli;
pub mod config;
pub mod exitcode;
pub mod logger;
pub mod util;
pub mod version;
