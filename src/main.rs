use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dsa_sheet::app::Sheet;
use dsa_sheet::catalog::{Difficulty, LinkKind};
use dsa_sheet::{App, Config, cli};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dsa-sheet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List problems, optionally filtered
    List {
        /// Company tag to search for
        #[arg(short, long)]
        company: Option<String>,
        /// Only problems with this link (leetcode, gfg, codingninjas, youtube)
        #[arg(short, long)]
        source: Option<LinkKind>,
        /// Only problems of this difficulty
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
    },
    /// Show progress statistics
    Stats {
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a problem complete, or not complete if it already is
    Toggle {
        /// Problem id, as shown by `list`
        id: String,
    },
    /// Forget all progress
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        None => {
            // Stderr belongs to the terminal UI, so logs go to a file
            init_file_logging(&config)?;
            let mut app = App::new(config).await?;
            app.run().await?;
        }
        Some(command) => {
            init_stderr_logging();
            run_command(command, &config).await?;
        }
    }

    Ok(())
}

async fn run_command(command: Commands, config: &Config) -> Result<()> {
    let mut sheet =
        Sheet::open(config.load_catalog()?, config.backend()?, config.storage_key.clone()).await;

    match command {
        Commands::List { company, source, difficulty } => {
            let filter = sheet.filter_mut();
            filter.company = company.unwrap_or_default();
            filter.source = source;
            filter.difficulty = difficulty;
            print!("{}", cli::render_listing(&sheet));
        }
        Commands::Stats { json } => {
            if json {
                let report = serde_json::to_string_pretty(sheet.report())
                    .context("Failed to encode report")?;
                println!("{}", report);
            } else {
                print!("{}", cli::render_stats(sheet.report()));
            }
        }
        Commands::Toggle { id } => {
            let result = sheet.toggle(&id).await;
            if let Some(e) = result.error {
                bail!("Failed to save progress for {}: {}", id, e);
            }
            if result.orphan {
                eprintln!("Note: {} is not in the sheet", id);
            }
            let state = if result.completed { "complete" } else { "not complete" };
            println!("{} marked {} ({}%)", id, state, sheet.report().rounded_percentage());
        }
        Commands::Reset => {
            sheet.reset().await.context("Failed to clear progress")?;
            println!("Progress cleared");
        }
    }

    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| "dsa_sheet=info".into())
}

fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn init_file_logging(config: &Config) -> Result<()> {
    let path = config.log_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}
