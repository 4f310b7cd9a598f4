mod cli;
mod merge;

use anyhow::Result;
use clap::Parser;
use cli::Args;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> Result<()> {
    let args = Args::parse();

    // WARN unless RUST_LOG says otherwise; --verbose forces DEBUG.
    let mut filter = EnvFilter::builder()
        .with_default_directive(Level::WARN.into())
        .from_env_lossy();
    if args.verbose {
        filter = filter.add_directive(Level::DEBUG.into());
    }
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    merge::run(args)
}
