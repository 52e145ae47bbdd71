//! Site-Sweep main entry point
//!
//! This is the command-line interface for the Site-Sweep link checker.

use anyhow::Context;
use clap::Parser;
use site_sweep::config::{load_config_with_hash, validate, Config, Traversal};
use site_sweep::crawler::{Coordinator, CrawlOutcome};
use site_sweep::output::print_statistics;
use site_sweep::url::SiteRoot;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Site-Sweep: a single-site broken link and keyword crawler
///
/// Site-Sweep starts at a site's root page, probes every link it finds on
/// same-site pages, and writes a report of links that do not resolve along
/// with the pages that mention a keyword.
#[derive(Parser, Debug)]
#[command(name = "crawl")]
#[command(version = "1.0.0")]
#[command(about = "A single-site broken link and keyword crawler", long_about = None)]
struct Cli {
    /// Root URL of the site to crawl (overrides `site.root` in the config file)
    #[arg(value_name = "ROOT_URL")]
    root_url: Option<String>,

    /// Keyword to count in page text; an empty value disables keyword scanning
    #[arg(short, long)]
    keyword: Option<String>,

    /// Directory for the reports and frontier log
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Visit pending pages oldest-first instead of newest-first
    #[arg(long)]
    breadth_first: bool,

    /// Maximum number of concurrent link probes
    #[arg(long, value_name = "N")]
    concurrency: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(outcome) => {
            for failure in &outcome.write_failures {
                tracing::warn!("Not persisted: {}", failure);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_sweep=info,warn"),
            1 => EnvFilter::new("site_sweep=debug,info"),
            2 => EnvFilter::new("site_sweep=trace,debug"),
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

/// Loads the configuration, applies CLI overrides and runs the crawl
async fn run(cli: Cli) -> anyhow::Result<CrawlOutcome> {
    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid configuration")?;

    let root_url = config
        .site
        .root
        .clone()
        .context("No root URL given on the command line or in the configuration")?;
    let root = SiteRoot::parse(&root_url).context("Invalid root URL")?;

    tracing::info!(
        "Crawling {} (keyword: {:?}, output: {})",
        root,
        config.site.keyword,
        config.output.directory
    );

    let mut coordinator = Coordinator::new(config, root)?;
    if let Some(hash) = config_hash {
        coordinator = coordinator.with_config_hash(hash);
    }

    let outcome = coordinator.run().await?;

    if !cli.quiet {
        print_statistics(&outcome.stats);
    }

    Ok(outcome)
}

/// Command-line values take precedence over the configuration file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(root_url) = &cli.root_url {
        config.site.root = Some(root_url.clone());
    }
    if let Some(keyword) = &cli.keyword {
        config.site.keyword = keyword.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.display().to_string();
    }
    if cli.breadth_first {
        config.crawler.traversal = Traversal::BreadthFirst;
    }
    if let Some(concurrency) = cli.concurrency {
        config.crawler.max_concurrent_probes = concurrency;
    }
}
