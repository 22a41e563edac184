//! Entry point for the `spindle` binary.
//!
//! Sets up `tracing` (RUST_LOG overrides the default filter, `-v` raises the
//! default to debug), parses the CLI surface, and hands the parsed command to
//! the dispatcher in `commands`.

mod cli;
mod commands;

use miette::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    commands::dispatch(args).await
}
