//! Logging setup.
//!
//! `RUST_LOG` wins over the verbosity flags when it is set.

use tracing_subscriber::EnvFilter;

/// Default filter directive for the given CLI flags.
fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "sneakpeek=debug,warn",
        (false, _) => "sneakpeek=trace,info",
    }
}

pub fn init(verbose: u8, quiet: bool, color: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(color)
        .with_target(verbose > 1)
        .try_init();
}
