//! Process exit codes (BSD sysexits.h compatible where applicable)

/// Successful termination
pub const OK: i32 = 0;

/// No command, or a command the table does not know
pub const FAILURE: i32 = 1;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
