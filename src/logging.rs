//! Diagnostic logging setup.
//!
//! Logs go to stderr through `tracing-subscriber`, leaving stdout to the
//! command transcript.

use anyhow::{Context, anyhow};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive, e.g. `dirtree=debug`.
/// It takes precedence over the level passed on the command line.
pub const LOG_ENV: &str = "DIRTREE_LOG";

/// Level used when neither the environment nor the command line sets one.
pub const DEFAULT_LEVEL: &str = "warn";

/// Build the filter from [`LOG_ENV`], falling back to `level`.
pub fn build_filter(level: &str) -> anyhow::Result<EnvFilter> {
    match std::env::var(LOG_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid {LOG_ENV} value {directives:?}")),
        _ => EnvFilter::try_new(level).with_context(|| format!("invalid log level {level:?}")),
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = build_filter(level)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow!("failed to install log subscriber: {err}"))
}
