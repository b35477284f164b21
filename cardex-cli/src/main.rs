use anyhow::{bail, Context, Result};
use cardex_finance::Categorizer;
use cardex_ingest::{CsvParser, SchemaDetector};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod llm;
mod report;
mod state;

use llm::LlmClient;

#[derive(Parser, Debug)]
#[command(name = "cardex", version, about = "Categorize credit card statement exports")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse, categorize, and summarize every CSV in a directory
    Process {
        /// Directory of statement exports
        #[arg(long, default_value = "data")]
        dir: PathBuf,

        /// Uncached transactions per categorization call
        #[arg(long)]
        batch_size: Option<usize>,

        /// Also print the full transaction list
        #[arg(long)]
        detailed: bool,

        /// Restrict the detailed list to one category label
        #[arg(long)]
        category: Option<String>,

        /// Override the cache directory (default: ~/.cardex/cache)
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },

    /// Show the detected schema for one CSV file
    Schema {
        /// Statement export to inspect
        file: PathBuf,

        /// Override the cache directory (default: ~/.cardex/cache)
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },

    /// Write a default ~/.cardex/config.toml
    ConfigInit,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Process { dir, batch_size, detailed, category, cache_dir } => {
            process(dir, batch_size, detailed, category, cache_dir)?;
        }

        Command::Schema { file, cache_dir } => {
            show_schema(file, cache_dir)?;
        }

        Command::ConfigInit => {
            config::init_config()?;
        }
    }

    Ok(())
}

fn process(
    dir: PathBuf,
    batch_size: Option<usize>,
    detailed: bool,
    category: Option<String>,
    cache_dir: Option<PathBuf>,
) -> Result<()> {
    if !dir.is_dir() {
        bail!("data directory not found: {} (pass --dir <path>)", dir.display());
    }

    let cfg = config::load_config()?;
    let client = LlmClient::from_env(&cfg)?;
    let cache_dir = match cache_dir {
        Some(d) => d,
        None => state::cache_dir()?,
    };

    let detector = SchemaDetector::new(client.clone(), state::schema_cache_path(&cache_dir))?
        .with_sample_rows(cfg.ingest.sample_rows);
    let mut parser = CsvParser::new(detector);

    println!("Parsing statements in {}...", dir.display());
    let transactions = parser
        .parse_all(&dir)
        .with_context(|| format!("parsing {}", dir.display()))?;
    println!("Loaded {} transactions", transactions.len());

    let mut categorizer = Categorizer::new(client, state::merchant_cache_path(&cache_dir))?
        .with_batch_size(batch_size.unwrap_or(cfg.ingest.batch_size));

    println!("Categorizing...");
    let transactions = categorizer.categorize(transactions)?;

    report::print_summary(&transactions);
    if detailed || category.is_some() {
        report::print_detailed(&transactions, category.as_deref());
    }

    Ok(())
}

fn show_schema(file: PathBuf, cache_dir: Option<PathBuf>) -> Result<()> {
    if !file.is_file() {
        bail!("file not found: {}", file.display());
    }

    let cfg = config::load_config()?;
    let client = LlmClient::from_env(&cfg)?;
    let cache_dir = match cache_dir {
        Some(d) => d,
        None => state::cache_dir()?,
    };

    let mut detector = SchemaDetector::new(client, state::schema_cache_path(&cache_dir))?
        .with_sample_rows(cfg.ingest.sample_rows);
    let schema = detector.detect(&file)?;

    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
