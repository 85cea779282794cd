//! Content maintenance CLI: export, inspect and normalize post documents.

use clap::Parser;
use lookbook_infra::PostFileRepository;

mod args;
mod commands;

use args::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,lookbook_infra=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let files = PostFileRepository::new(cli.file_config());

    let problems = match cli.command {
        Commands::Export { prune } => commands::export(&files, prune).await?,
        Commands::Inspect { recent } => commands::inspect(&files, recent).await?,
        Commands::Normalize => commands::normalize(&files).await?,
    };

    if problems > 0 {
        tracing::warn!(problems, "Finished with per-file problems");
        std::process::exit(1);
    }
    Ok(())
}
