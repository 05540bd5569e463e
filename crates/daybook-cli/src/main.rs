mod board;
mod cli;
mod client;
mod config;
mod diary;
mod tasks;
mod tui;

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use clap::Parser;
use color_eyre::Result;
use daybook_server::AppState;
use daybook_store::{FileDiaryRepo, FileTaskRepo};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{board::TaskBoard, cli::ConfigCommand, client::ApiClient};

/// Entry point wiring the CLI to the server and the TUI.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = cli::Cli::parse();
    let config = config::load()?;
    match cli.command.unwrap_or(cli::Command::Tui) {
        cli::Command::Tui => run_tui(&config).await?,
        cli::Command::Serve { addr } => run_serve(&config, addr).await?,
        cli::Command::Task(cmd) => tasks::handle(cmd, &api_client(&config)).await?,
        cli::Command::Diary(cmd) => diary::handle(cmd, &api_client(&config)).await?,
        cli::Command::Config(ConfigCommand::Init) => init_config(&config)?,
        cli::Command::Health => run_health(&api_client(&config)).await?,
        cli::Command::Version => print_version(),
    }

    Ok(())
}

fn init_tracing() {
    // Respect user-provided filters, default to info to avoid noisy stdout.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn print_version() {
    println!("daybook {}", env!("CARGO_PKG_VERSION"));
}

fn api_client(config: &config::Config) -> ApiClient {
    ApiClient::new(config.server_url())
}

/// Fetch both collections once, then hand control to the dashboard; all
/// later view updates are optimistic local edits.
async fn run_tui(config: &config::Config) -> Result<()> {
    let client = api_client(config);
    let board = TaskBoard::new(client.list_tasks().await?);
    let diary = client.list_diary().await?;
    tui::launch(&client, board, diary).await
}

async fn run_serve(config: &config::Config, addr: Option<String>) -> Result<()> {
    let addr: SocketAddr = addr
        .as_deref()
        .unwrap_or(config.listen_addr())
        .parse()?;
    let data_dir = resolve_data_dir(config)?;
    let tasks = FileTaskRepo::open(data_dir.join("tasks.json"))?;
    let diary = FileDiaryRepo::open(data_dir.join("diary.json"))?;
    let state = AppState::new(Arc::new(tasks), Arc::new(diary));
    daybook_server::serve(addr, state)
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))
}

fn resolve_data_dir(config: &config::Config) -> Result<PathBuf> {
    if let Some(dir) = &config.data_dir {
        return Ok(dir.clone());
    }
    let base =
        dirs::data_dir().ok_or_else(|| color_eyre::eyre::eyre!("no data dir available"))?;
    Ok(base.join("daybook"))
}

fn init_config(config: &config::Config) -> Result<()> {
    let path = config::write_default_if_missing(config)?;
    println!("Config initialized at {}", path.display());
    Ok(())
}

/// Probe both collections through the HTTP surface.
async fn run_health(client: &ApiClient) -> Result<()> {
    let tasks = client.list_tasks().await?;
    let diary = client.list_diary().await?;
    println!(
        "Server at {}: ok ({} tasks, {} diary entries)",
        client.base(),
        tasks.len(),
        diary.len()
    );
    Ok(())
}
