use anyhow::Result;
use clap::Parser;

use tinkerpad_core::{FileStorage, ProjectStore, Settings, Storage};

mod commands;

#[derive(Parser)]
#[command(name = "tinkerpad")]
#[command(about = "Tinkerpad - a file-tree-backed code playground")]
#[command(version)]
struct Cli {
    /// State directory (defaults to the configured one, then ~/.tinkerpad)
    #[arg(long)]
    state_dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: commands::Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let settings = Settings::load();

    let storage: Box<dyn Storage> = match cli.state_dir.or(settings.storage_dir) {
        Some(dir) => Box::new(FileStorage::with_dir(dir)?),
        None => Box::new(FileStorage::new()?),
    };
    let mut store = ProjectStore::open(storage)?;

    let outcome = commands::dispatch(&mut store, cli.command).await?;
    println!("{outcome}");

    Ok(())
}
