//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, None, None);
}

/// Initialize the logger with optional JSON formatting and file output
///
/// `RUST_LOG` wins over `log_level` when set. With a `log_dir`, output goes to
/// a daily rolling `ops-server.YYYY-MM-DD` file instead of stdout.
pub fn init_logger_with_file(log_level: Option<&str>, json: Option<bool>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let file_appender = log_dir.and_then(|dir| {
        let log_path = Path::new(dir);
        if !log_path.exists()
            && let Err(e) = std::fs::create_dir_all(log_path)
        {
            eprintln!("Failed to create log dir {dir}: {e}");
            return None;
        }
        Some(tracing_appender::rolling::daily(log_path, "ops-server"))
    });

    // try_init: tests may install the subscriber more than once
    let result = match (file_appender, json.unwrap_or(false)) {
        (Some(appender), true) => subscriber
            .json()
            .with_ansi(false)
            .with_writer(appender)
            .try_init(),
        (Some(appender), false) => subscriber.with_ansi(false).with_writer(appender).try_init(),
        (None, true) => subscriber.json().try_init(),
        (None, false) => subscriber.try_init(),
    };
    if let Err(e) = result {
        eprintln!("Logger already initialized: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logger_with_file(Some("debug"), None, None);
        init_logger_with_file(Some("info"), Some(true), None);
    }
}
