use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use mot_core::{ChatService, HuggingFaceClient, Settings, TranscriptStore};

mod app;
mod commands;
mod theme;

#[derive(Parser)]
#[command(name = "mot")]
#[command(about = "M.O.T - chat with Mixtral from your terminal")]
#[command(version)]
struct Cli {
    /// Send a single message, print the reply and exit
    #[arg(short, long)]
    prompt: Option<String>,

    /// Path to a config file (default: <config dir>/mot/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory where chats are saved
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Inference endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Color theme (soft, dark, mixtral)
    #[arg(long)]
    theme: Option<String>,

    /// Write the effective settings to the config file and exit
    #[arg(long)]
    write_config: bool,
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

    let config_path = cli.config.clone().unwrap_or_else(Settings::config_path);
    let mut settings = Settings::load_from(&config_path);

    if let Some(ref dir) = cli.storage_dir {
        settings.storage.directory = dir.clone();
    }
    if let Some(ref endpoint) = cli.endpoint {
        settings.inference.endpoint = endpoint.clone();
    }
    if let Some(ref theme) = cli.theme {
        settings.ui.theme = theme.clone();
    }

    if cli.write_config {
        settings
            .save_to(&config_path)
            .with_context(|| format!("writing {}", config_path.display()))?;
        println!("Settings written to {}", config_path.display());
        return Ok(());
    }

    // Fail fast: nothing runs without the token.
    let config = settings.resolve()?;
    let store = TranscriptStore::with_dir(&config.storage_directory)?;
    let client = HuggingFaceClient::from_config(&config)?;
    let service = ChatService::new(Box::new(client));

    if let Some(prompt) = cli.prompt {
        app::run_single_prompt(&service, &prompt).await?;
    } else {
        app::run_tui(service, store, &config, &settings.ui.theme).await?;
    }

    Ok(())
}
