//! Forum-Scribe main entry point
//!
//! This is the command-line interface for the Forum-Scribe discussion archiver.

use anyhow::{bail, Context};
use clap::Parser;
use forum_scribe::config::{load_or_default, validate, Config};
use forum_scribe::harvest::{Coordinator, HarvestRequest};
use forum_scribe::output::print_summary;
use forum_scribe::url::{SortOrder, TimeFilter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Forum-Scribe: a polite discussion archiver
///
/// Forum-Scribe collects discussion threads from a forum listing, resolves
/// each one through the structured API or the rendered page, and saves them
/// as Markdown documents deduplicated by link.
#[derive(Parser, Debug)]
#[command(name = "forum-scribe")]
#[command(version = "1.0.0")]
#[command(about = "A polite discussion archiver", long_about = None)]
struct Cli {
    /// Harvest only this discussion
    #[arg(long, value_name = "URL")]
    link: Option<String>,

    /// Listing sort order (hotness, recent-comments, recently-posted, most-votes, most-comments)
    #[arg(long, default_value = "")]
    sort: String,

    /// Listing time window (last-30-days, last-7-days, today)
    #[arg(long, default_value = "")]
    time_filter: String,

    /// Competition whose forum should be harvested
    #[arg(long, env = "COMPETITION")]
    competition: Option<String>,

    /// Directory the Markdown documents are written to
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Pause between discussions, in seconds
    #[arg(long, value_name = "SECONDS")]
    delay: Option<f64>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; variables already set win.
    dotenvy::from_path(".env").ok();

    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Option strings are checked before any request goes out
    let sort = SortOrder::parse_choice(&cli.sort).context("Invalid --sort")?;
    let time = TimeFilter::parse_choice(&cli.time_filter).context("Invalid --time-filter")?;

    let config = build_config(&cli)?;
    tracing::info!(
        "Writing to {} with {}ms between discussions",
        config.run.output_dir,
        config.run.delay_ms
    );

    let request = HarvestRequest {
        link: cli.link.clone(),
        sort,
        time,
        competition: cli.competition.clone(),
    };

    let coordinator = Coordinator::new(config).context("Failed to set up harvest")?;
    let summary = match coordinator.run(&request).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            return Err(e.into());
        }
    };

    for path in &summary.saved_paths {
        println!("{}", path.display());
    }
    if !cli.quiet {
        println!();
        print_summary(&summary);
    }

    Ok(())
}

/// Loads the configuration file, if any, and layers CLI flags on top
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }
    let mut config = load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(dir) = &cli.output_dir {
        config.run.output_dir = dir.display().to_string();
    }
    if let Some(delay) = cli.delay {
        if !delay.is_finite() || delay < 0.0 {
            bail!("--delay must be a non-negative number of seconds, got {}", delay);
        }
        config.run.delay_ms = (delay * 1000.0).round() as u64;
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("forum_scribe=info,warn"),
            1 => EnvFilter::new("forum_scribe=debug,info"),
            2 => EnvFilter::new("forum_scribe=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
