// tracing subscriber setup (stderr only; stdout is reserved for results)

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "DNACOMPARE_LOG";

/// Install the global subscriber.
///
/// Precedence: `DNACOMPARE_LOG`, then `--verbose` (debug), then the config
/// file's `log.filter`, then `warn`.
pub fn init(config_filter: Option<&str>, verbose: bool) {
    let fallback = if verbose { "debug" } else { config_filter.unwrap_or("warn") };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
