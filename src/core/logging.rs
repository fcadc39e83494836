//! stderr logging via `tracing`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "REDIS_EDIT_LOG";

/// Install the global subscriber. `$REDIS_EDIT_LOG` takes precedence over
/// the `verbose` default. Safe to call more than once.
pub fn init(verbose: bool) {
    let default = if verbose { "redis_edit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    // No timestamps: these lines share the terminal with the editor.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .try_init();
}
