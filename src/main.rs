//! Blueprint Atelier - Entry Point
//!
//! Loads the configuration, builds the blueprint service and runs a
//! line-oriented console over it.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use blueprint_atelier::blueprints::{BlueprintService, FilterKind};
use blueprint_atelier::command::{CommandExecutor, Outcome, USAGE};
use blueprint_atelier::core::config::AtelierConfig;
use blueprint_atelier::core::error::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Blueprint Atelier - versioned blueprint catalogue
#[derive(Parser, Debug)]
#[command(name = "blueprint-atelier")]
#[command(about = "Create, update and filter point blueprints from a console")]
struct Args {
    /// TOML configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Start with an empty catalogue instead of the samples
    #[arg(long)]
    no_samples: bool,

    /// Point filter used by `filter` (strip-even or dedupe-adjacent)
    #[arg(long)]
    filter: Option<FilterKind>,

    /// Extra blueprint files to load
    #[arg(long = "load", value_name = "FILE")]
    load: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => AtelierConfig::load(path)?,
        None => AtelierConfig::default(),
    };
    if args.no_samples {
        settings.seed_samples = false;
    }
    if let Some(kind) = args.filter {
        settings.default_filter = kind;
    }
    settings.blueprint_files.extend(args.load);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!("Blueprint Atelier starting...");

    let service = BlueprintService::from_config(&settings)?;
    tracing::info!(
        "Catalogue ready: {} blueprints, filter {}",
        service.store().len(),
        service.filter_kind()
    );

    println!("\n=== BLUEPRINT ATELIER ===");
    println!("{}", USAGE);
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let result = CommandExecutor::execute_line(&service, &line);
        match result.outcome {
            Outcome::Exit => {
                println!("{}", result.message);
                break;
            }
            Outcome::NotFound => println!("not found: {}", result.message),
            Outcome::Conflict => println!("conflict: {}", result.message),
            Outcome::Invalid => println!("invalid: {}", result.message),
            Outcome::Failed => println!("error: {}", result.message),
            Outcome::Created => println!("created: {}", result.message),
            Outcome::Ok | Outcome::Updated | Outcome::Deleted => println!("{}", result.message),
        }
    }

    tracing::info!("Blueprint Atelier stopped");
    Ok(())
}
