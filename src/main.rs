//! CLI entry point for the drivegrab tool.

use anyhow::{Context, Result};
use clap::Parser;
use drivegrab_core::{LinkOutcome, LinkProcessor, RunConfig, read_link_list};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    info!("Drivegrab starting");

    let config = RunConfig::new(args.input, args.out, args.cookies, args.remote);

    // A missing link list is the one fatal error besides argument parsing.
    let links = read_link_list(&config.input)
        .with_context(|| format!("Failed to read link list {}", config.input.display()))?;

    if links.is_empty() {
        info!("No links found in input");
        return Ok(());
    }

    info!(
        links = links.len(),
        out = %config.out.display(),
        cookies = config.cookies.is_some(),
        fallback = config.remote.is_some(),
        "Link list loaded"
    );

    let processor = LinkProcessor::from_config(&config)?;

    let mut downloaded = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    // Strictly sequential: each link finishes (including its blocking
    // external-tool run) before the next starts. One bad link never aborts
    // the batch.
    for url in &links {
        match processor.process_link(url).await {
            LinkOutcome::Downloaded { backend } => {
                downloaded += 1;
                debug!(url = %url, backend, "Link finished");
            }
            LinkOutcome::Skipped => skipped += 1,
            LinkOutcome::Failed => failed += 1,
        }
    }

    info!(
        processed = links.len(),
        downloaded, skipped, failed, "Batch complete"
    );

    // Partial per-link failures do not change the exit status.
    Ok(())
}
