//! Joy's Landing - terminal product landing page
//!
//! Renders a single product page with ratatui and drives its interactive
//! widgets (review carousel, ingredient tabs, FAQ, variant pills, dosage
//! calculator) from a frontend-agnostic core.

mod config;
mod content;
mod core;
mod effects;
mod frontend;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use frontend::Frontend;
use std::path::PathBuf;
use std::time::Instant;

#[derive(ClapParser)]
#[command(name = "joys-landing")]
#[command(about = "Interactive product landing page for the terminal", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Page content file (default: page.toml in the data directory)
    #[arg(long, value_name = "FILE")]
    page: Option<PathBuf>,

    /// Custom data directory (default: ~/.joys-landing)
    /// Can also be set via JOYS_LANDING_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Disable particles, confetti and animated counters
    #[arg(long)]
    no_effects: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate page content
    ValidatePage {
        /// Page file to validate
        #[arg(value_name = "FILE")]
        page: Option<PathBuf>,
    },
    /// Print the initial widget state as JSON
    Snapshot {
        /// Terminal width to lay the page out for
        #[arg(long, default_value_t = 100)]
        width: u16,
    },
}

fn main() -> Result<()> {
    // TUI apps can't log to stdout, so we write to a file
    // (use RUST_LOG env var to control level, e.g. RUST_LOG=info)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("joys-landing.log")
        .context("Failed to open joys-landing.log")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();

    let cli = Cli::parse();

    // Set custom data directory if specified (via CLI or environment variable)
    if let Some(data_dir) = &cli.data_dir {
        std::env::set_var(config::DATA_DIR_ENV, data_dir);
        tracing::info!("Using custom data directory: {:?}", data_dir);
    } else if let Ok(env_dir) = std::env::var(config::DATA_DIR_ENV) {
        tracing::info!("Using data directory from {}: {}", config::DATA_DIR_ENV, env_dir);
    }

    let config = match &cli.config {
        Some(path) => config::Config::load_from_path(path)?,
        None => config::Config::load()?,
    };

    if let Some(command) = cli.command {
        return match command {
            Commands::ValidatePage { page } => {
                validate_page(&config, page.as_deref().or(cli.page.as_deref()))
            }
            Commands::Snapshot { width } => snapshot(config, cli.page.as_deref(), width),
        };
    }

    let page = content::PageContent::load(cli.page.as_deref())?;
    for issue in page.validate() {
        if issue.is_error() {
            tracing::warn!("Page content: {}", issue.message());
        } else {
            tracing::debug!("Page content: {}", issue.message());
        }
    }

    run_tui(config, page, !cli.no_effects)
}

fn validate_page(config: &config::Config, path: Option<&std::path::Path>) -> Result<()> {
    match path {
        Some(path) => println!("Validating page file: {:?}", path),
        None => println!("Validating default page"),
    }

    let page = match content::PageContent::load(path) {
        Ok(page) => page,
        Err(e) => {
            eprintln!("✗ Failed to load page: {:#}", e);
            std::process::exit(1);
        }
    };
    println!("✓ Page loaded successfully");

    let controllers = core::PageControllers::discover(&page, config, 80, Instant::now());
    let widgets = controllers.initialized();
    if widgets.is_empty() {
        println!("  no interactive widgets");
    } else {
        println!("  widgets: {}", widgets.join(", "));
    }

    let issues = page.validate();
    let errors = issues.iter().filter(|i| i.is_error()).count();
    let warnings = issues.len() - errors;
    for issue in &issues {
        if issue.is_error() {
            eprintln!("✗ Error: {}", issue.message());
        } else {
            println!("⚠ Warning: {}", issue.message());
        }
    }

    if issues.is_empty() {
        println!("✓ Page is valid with no issues");
    } else {
        if errors > 0 {
            eprintln!("\n✗ Found {} error(s)", errors);
        }
        if warnings > 0 {
            println!("⚠ Found {} warning(s)", warnings);
        }
    }

    if errors > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn snapshot(config: config::Config, path: Option<&std::path::Path>, width: u16) -> Result<()> {
    let page = content::PageContent::load(path)?;
    let core = core::AppCore::new(config, page, width, 40, false, Instant::now());
    let json = serde_json::to_string_pretty(&core.controllers.snapshot())
        .context("Failed to serialize snapshot")?;
    println!("{}", json);
    Ok(())
}

/// Run TUI frontend
fn run_tui(config: config::Config, page: content::PageContent, effects: bool) -> Result<()> {
    let mut frontend = frontend::TuiFrontend::new(&config.ui)?;
    let (width, height) = frontend.size();
    let effects = effects && config.effects.enabled;
    let mut app_core = core::AppCore::new(config, page, width, height, effects, Instant::now());

    tracing::info!(
        width,
        height,
        effects,
        widgets = ?app_core.controllers.initialized(),
        "page started"
    );

    while app_core.running {
        for event in frontend.poll_events()? {
            frontend.dispatch(&mut app_core, event, Instant::now());
        }

        let now = Instant::now();
        app_core.tick(now);
        frontend.render(&mut app_core, now)?;
    }

    app_core.teardown();
    frontend.cleanup()?;
    tracing::info!("page closed");
    Ok(())
}
