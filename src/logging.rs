use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes tracing with a console layer and a daily-rolling JSON file.
///
/// The file layer can be pointed somewhere else with `ETL_LOG_DIR`; the
/// filter honors `RUST_LOG` and defaults the crate to info.
pub fn init_logging() {
    let log_dir = std::env::var("ETL_LOG_DIR").unwrap_or_else(|_| "logs".to_string());
    let _ = fs::create_dir_all(&log_dir);

    let file_appender = tracing_appender::rolling::daily(&log_dir, "etl.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().json().with_writer(file_writer);
    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("socialpulse=info".parse().unwrap()))
        .with(file_layer)
        .with(console_layer)
        .init();

    // Keep the guard alive for the lifetime of the process so buffered
    // log lines are flushed on exit.
    std::mem::forget(guard);
}
