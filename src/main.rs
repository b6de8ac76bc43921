mod config;
mod core;
mod host;
mod protocol;
mod utils;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Stdout belongs to the native-messaging protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tabclip=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = host::load_config();
    info!(
        default_format = ?config.default_format,
        default_scope = ?config.default_scope,
        "tabclip host starting"
    );

    host::run(config)
}
