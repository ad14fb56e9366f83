//! Sumi-Mirror main entry point
//!
//! This is the command-line interface for the Sumi-Mirror offline site mirror.

use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use sumi_mirror::config::{load_config_with_hash, validate, Config};
use sumi_mirror::crawler::{analyze, crawl};
use sumi_mirror::output::{print_report, print_summary};
use tracing_subscriber::EnvFilter;

/// Sumi-Mirror: an offline site mirror
///
/// Sumi-Mirror fetches a site from a root URL up to a depth bound, downloads
/// its images, stylesheets, scripts and fonts once each, and rewrites every
/// reference so the saved copy renders without network access.
#[derive(Parser, Debug)]
#[command(name = "sumi-mirror")]
#[command(version = "1.0.0")]
#[command(about = "An offline site mirror", long_about = None)]
struct Cli {
    /// Root URL to mirror (overrides `root-url` from the config file)
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Directory the mirror is written to
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Maximum link depth from the root page
    #[arg(long)]
    max_depth: Option<u32>,

    /// Only save pages; leave asset references pointing at the site
    #[arg(long)]
    no_assets: bool,

    /// Per-request timeout in milliseconds
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Fetch only the root page and print a report about it
    #[arg(long, conflicts_with = "dry_run")]
    analyze: bool,

    /// Validate config and show what would be mirrored without fetching
    #[arg(long, conflicts_with = "analyze")]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;
    validate(&config).context("Invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.analyze {
        handle_analyze(&config).await?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_mirror=info,warn"),
            1 => EnvFilter::new("sumi_mirror=debug,info"),
            2 => EnvFilter::new("sumi_mirror=trace,debug"),
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

/// Builds the effective configuration from the config file and CLI flags
///
/// Flags take precedence over file values. Without a config file, the URL
/// and `--output` are both required.
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            let (Some(url), Some(output)) = (&cli.url, &cli.output) else {
                bail!("either --config or both URL and --output are required");
            };
            Config::new(url.clone(), output.clone())
        }
    };

    if let Some(url) = &cli.url {
        config.crawler.root_url = url.clone();
    }
    if let Some(output) = &cli.output {
        config.crawler.output_root = output.clone();
    }
    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if cli.no_assets {
        config.crawler.download_assets = false;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.crawler.request_timeout_ms = timeout_ms;
    }

    Ok(config)
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Sumi-Mirror Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Root URL: {}", config.crawler.root_url);
    println!("  Output root: {}", config.crawler.output_root.display());
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Download assets: {}", config.crawler.download_assets);
    println!("  Request timeout: {}ms", config.crawler.request_timeout_ms);

    println!("\nRequest Headers:");
    println!("  User-Agent: {}", config.request.user_agent);
    println!("  Accept-Language: {}", config.request.accept_language);

    println!("\n✓ Configuration is valid");
}

/// Handles the --analyze mode: reports on the root page only
async fn handle_analyze(config: &Config) -> anyhow::Result<()> {
    let report = analyze(config)
        .await
        .with_context(|| format!("Failed to analyze {}", config.crawler.root_url))?;

    print_report(&config.crawler.root_url, &report);
    Ok(())
}

/// Handles the main mirror operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    let root_url = config.crawler.root_url.clone();

    let summary = crawl(config)
        .await
        .with_context(|| format!("Failed to start mirroring {}", root_url))?;

    print_summary(&summary);

    if summary.pages_written == 0 {
        bail!("no pages were saved from {}", root_url);
    }

    Ok(())
}
