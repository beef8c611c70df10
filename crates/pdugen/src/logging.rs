//! Logging initialization.
//!
//! Standard output carries the generated script, so every log line is
//! written to stderr.

/// Initialize logging with human-readable output on stderr.
///
/// `RUST_LOG` takes precedence over `log_level` when set.
///
/// # Example
/// ```ignore
/// init_logging("warn");
/// ```
pub fn init_logging(log_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(false)
                .with_line_number(false),
        )
        .init();
}
