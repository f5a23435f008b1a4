//! Log output for the `tut` binary
//!
//! Logs go to stderr so command output on stdout stays scriptable.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an explicit filter, e.g. `TUT_LOG=tut=debug`.
pub const LOG_ENV: &str = "TUT_LOG";

/// Filter directive for a count of `-v` flags.
pub fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init_logging(verbosity: u8) {
    let level = default_level(verbosity);
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
