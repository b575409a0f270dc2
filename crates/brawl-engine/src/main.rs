//! # Brawl
//!
//! Plays a headless match against the enemy AI and prints the result.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::Result;
use brawl_engine::{EngineConfig, MatchRunner};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("brawl=info".parse()?))
        .init();

    info!("Brawl starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut config = EngineConfig::load();
    config.validate();

    let mut runner = MatchRunner::new(config);
    let summary = runner.run();
    println!("{summary}");

    info!("Brawl shutdown complete");
    Ok(())
}
