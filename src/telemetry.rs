use anyhow::{format_err, Result};
use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber, filtered by `directive`
pub fn init(directive: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directive)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| format_err!("failed to install tracing subscriber: {e}"))
}
