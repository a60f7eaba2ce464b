use std::io::{self, Write};
use std::process;

use ghost_town::cli::{builtin_table, output, Dispatcher};
use ghost_town::config::Settings;
use ghost_town::exitcode;
use ghost_town::logger::ConsoleLogger;
use ghost_town::version::BuildInfo;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let settings = Settings::load().unwrap_or_else(|e| {
        output::warning(&format!("{}; using defaults", e));
        Settings::default()
    });

    setup_logging(&settings);

    process::exit(run(&settings));
}

fn run(settings: &Settings) -> i32 {
    let info = BuildInfo::from_build_env();
    let table = match builtin_table(info) {
        Ok(table) => table,
        Err(e) => {
            output::error(&e);
            return e.exit_code();
        }
    };
    let logger = ConsoleLogger::stdout(settings.log_level());
    let dispatcher = Dispatcher::new(table, Box::new(logger));

    let argv: Vec<String> = std::env::args_os()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let code = dispatcher.run(&argv, &mut out);
    if let Err(e) = out.flush() {
        output::error(&format!("cannot flush output: {}", e));
        return exitcode::IOERR;
    }
    code
}

/// Diagnostics go to stderr; stdout carries command output only.
fn setup_logging(settings: &Settings) {
    let filter = if settings.debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    tracing::debug!(level = %filter, "logging initialised");
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghost_town::util::testing;

    #[ctor::ctor]
    fn init() {
        testing::init_test_setup();
    }

    #[test]
    fn verify_builtin_table() {
        let table = builtin_table(BuildInfo::from_build_env()).unwrap();
        assert!(table.contains("version"));
    }
}
