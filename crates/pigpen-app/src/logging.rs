//! Logger setup for the `pigpen` binary and the app tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Level used when `RUST_LOG` is unset: per-shot and per-spawn detail with
/// `--verbose`, session milestones otherwise.
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install `env_logger` with millisecond timestamps. `RUST_LOG` overrides
/// the `--verbose` default.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_level(verbose).to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // A second install (tests, embedding) keeps the first logger.
    if builder.try_init().is_err() {
        log::debug!("logger already installed");
    }
}
