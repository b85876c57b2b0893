//! signalkit CLI - trading signal starter kit
//!
//! Entry point for the `signalkit` command-line tool, which provides:
//! - The HTTP signal API (`serve`)
//! - Manual table helpers (`insert`, `recent`, `count`)

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "signalkit",
    author,
    version,
    about = "Trading signal API and table helpers backed by Postgres"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server (health, summary, signals)
    Serve(commands::serve::ServeArgs),
    /// Insert one signal and print the stored row
    Insert(commands::signals::InsertArgs),
    /// Print the newest signals as JSON
    Recent(commands::signals::RecentArgs),
    /// Print the number of stored signals
    Count(commands::signals::CountArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing so clap's `env = "DATABASE_URL"` sees .env values
    let dotenv = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();
    dotenv.log();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Insert(args) => commands::run_insert(args).await?,
        Commands::Recent(args) => commands::run_recent(args).await?,
        Commands::Count(args) => commands::run_count(args).await?,
    }
    Ok(())
}
