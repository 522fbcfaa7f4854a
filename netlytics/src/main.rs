// netlytics/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug netlytics run ... for per-value detail
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            project_dir,
            skip_missing,
            select,
            concurrency,
        } => commands::run::execute(project_dir, skip_missing, select, concurrency).await?,
        Commands::Clean { project_dir } => commands::clean::execute(project_dir)?,
        Commands::Report { project_dir } => commands::report::execute(project_dir)?,
    }

    Ok(())
}
