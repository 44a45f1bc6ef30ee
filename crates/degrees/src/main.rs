//! Degrees CLI binary.

use anyhow::Result;
use degrees::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the degrees CLI.
///
/// Log output goes to stderr so `--json` output on stdout stays parseable.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Example: RUST_LOG=degrees=debug degrees degree 42
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("degrees=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting degrees CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Degrees CLI completed successfully");
    Ok(())
}
