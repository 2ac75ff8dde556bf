//! Site-Scribe main entry point
//!
//! This is the command-line interface for the Site-Scribe text harvester.

use clap::Parser;
use site_scribe::config::{read_config_with_hash, validate, Config};
use site_scribe::ConfigError;
use site_scribe::crawler::crawl;
use site_scribe::output::print_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Scribe: a polite single-site text harvester
///
/// Site-Scribe crawls every page of one website, strips each page down to
/// readable text and writes one text file per page for later indexing.
#[derive(Parser, Debug)]
#[command(name = "site-scribe")]
#[command(version = "1.0.0")]
#[command(about = "A polite single-site text harvester", long_about = None)]
struct Cli {
    /// Site root to crawl (overrides the config file)
    #[arg(value_name = "BASE_URL")]
    base_url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory receiving the page text files (overrides the config file)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Number of concurrent fetches (overrides the config file)
    #[arg(short, long)]
    workers: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
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
            0 => EnvFilter::new("site_scribe=info,warn"),
            1 => EnvFilter::new("site_scribe=debug,info"),
            2 => EnvFilter::new("site_scribe=trace,debug"),
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

/// Builds the effective configuration: file (or defaults), then
/// command-line overrides, then a single validation pass
fn resolve_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = read_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, cli);
    validate(&config)?;
    Ok(config)
}

/// Command-line values win over the config file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(base_url) = &cli.base_url {
        config.crawler.base_url = base_url.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }
    if let Some(workers) = cli.workers {
        config.crawler.workers = workers;
    }
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Site-Scribe Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!("  Workers: {}", config.crawler.workers);
    println!("  Polite delay: {}ms", config.crawler.polite_delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!(
        "  Excluded extensions: {}",
        config.crawler.excluded_extensions.join(", ")
    );

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.value);

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Site tag: {}", config.output.site_tag);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
///
/// Page-level failures never change the exit status; only setup failures
/// (such as an unwritable output directory) do.
async fn handle_crawl(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Writing pages to {} (workers: {}, delay: {}ms)",
        config.output.directory,
        config.crawler.workers,
        config.crawler.polite_delay_ms
    );

    match crawl(config).await {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
