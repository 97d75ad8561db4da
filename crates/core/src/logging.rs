//! Process-wide `tracing` setup for the binaries.

use std::path::Path;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

/// Environment variable holding `tracing` filter directives.
pub const LOG_FILTER_ENV: &str = "NAMEBRIDGE_LOG";

/// Installs the global subscriber for `component`.
///
/// Everything passing the filter (`NAMEBRIDGE_LOG`, default `info`) goes to
/// `<log_dir>/<component>.<date>`; with `to_stderr` the same events are
/// echoed to stderr.
///
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init_logging(component: &str, log_dir: &Path, to_stderr: bool) -> WorkerGuard {
    let _ = std::fs::create_dir_all(log_dir);

    let file_appender = tracing_appender::rolling::daily(log_dir, component);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_thread_names(true)
        .with_filter(filter());

    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .with_filter(filter())
    });

    // A second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init();

    guard
}

fn filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(LOG_FILTER_ENV)
        .from_env_lossy()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_repeated_init_keeps_first_subscriber() {
        let dir = tempdir().unwrap();
        let log_dir = dir.path().join("logs");

        let _first = init_logging("test", &log_dir, false);
        let _second = init_logging("test", &log_dir, true);
        tracing::info!("logged once");

        assert!(log_dir.is_dir());
    }
}
