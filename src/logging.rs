use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "uci_lookup.log";

/// Initializes logging with a JSON file layer and a console layer on stderr.
///
/// The console stays quiet (`warn`) unless `RUST_LOG` says otherwise so it does not
/// interleave with the interactive menu on stdout. The returned guard flushes the file
/// writer when dropped and must be held for the life of the program.
pub fn init_logging() -> WorkerGuard {
    ensure_log_dir(Path::new(LOG_DIR));

    let file_appender = tracing_appender::rolling::daily(LOG_DIR, LOG_FILE);
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .json()
        .with_writer(non_blocking_writer)
        .with_filter(env_filter_or("uci_lookup=info"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter_or("warn"));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    guard
}

/// Create the log directory. The subscriber is not installed yet, so failure goes to stderr;
/// the rolling appender then reports its own write errors.
fn ensure_log_dir(dir: &Path) -> bool {
    match fs::create_dir_all(dir) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Unable to create log directory '{}': {}", dir.display(), e);
            false
        }
    }
}

fn env_filter_or(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}
