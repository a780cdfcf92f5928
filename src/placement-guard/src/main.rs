//! Placement Guard — scheduled placement filter & excluder.
//!
//! Queries placement performance for a trailing date window, matches URLs
//! against the configured term lists, and excludes the hits on their owning
//! ad groups and in a shared exclusion list.

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use placement_core::AppConfig;
use placement_engine::run;
use placement_host::{AccountFixture, MemoryHost};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "placement-guard")]
#[command(about = "Scheduled placement filter & excluder")]
#[command(version)]
struct Cli {
    /// JSON account fixture to run against (demo account when omitted)
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Lookback window in days (overrides config)
    #[arg(long, env = "PLACEMENT_GUARD__DAYS_TO_CHECK")]
    days: Option<u32>,

    /// Impression threshold (overrides config)
    #[arg(long, env = "PLACEMENT_GUARD__IMPRESSION_THRESHOLD")]
    threshold: Option<u64>,

    /// Exclusion list name (overrides config)
    #[arg(long, env = "PLACEMENT_GUARD__EXCLUSIONS_LIST")]
    list: Option<String>,

    /// Treat this date as today when computing the window (YYYY-MM-DD)
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "placement_guard=info,placement_engine=debug".into()),
        )
        .init();

    let cli = Cli::parse();

    info!("Placement Guard starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(days) = cli.days {
        config.days_to_check = days;
    }
    if let Some(threshold) = cli.threshold {
        config.impression_threshold = threshold;
    }
    if let Some(list) = cli.list {
        config.exclusions_list = list;
    }

    info!(
        days = config.days_to_check,
        threshold = config.impression_threshold,
        list = %config.exclusions_list,
        match_mode = ?config.match_mode,
        exclude_terms = config.exclude_terms.len(),
        ignore_terms = config.ignore_terms.len(),
        "Configuration loaded"
    );

    let today = cli.as_of.unwrap_or_else(|| Utc::now().date_naive());

    let host = match cli.fixture {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading fixture {}", path.display()))?;
            let fixture = AccountFixture::from_json(&raw)
                .with_context(|| format!("parsing fixture {}", path.display()))?;
            MemoryHost::from_fixture(fixture)
        }
        None => {
            info!("No fixture given, running against the seeded demo account");
            MemoryHost::with_demo_data(today)
        }
    };

    let summary = run(&config, &host, &host, today)?;

    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
