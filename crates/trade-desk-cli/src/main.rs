/*
[INPUT]:  CLI arguments, YAML configuration file
[OUTPUT]: Ticker snapshots and order placements printed as JSON
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or startup flow
*/

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trade_desk_cli::{Command, DeskConfig, run};

#[derive(Parser, Debug)]
#[command(name = "trade-desk", version, about = "Signed REST client for exchange trading")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: PathBuf,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    info!(config_path = %args.config_path.display(), "starting trade-desk");

    let config = load_config(&args.config_path)?;
    info!(url = %config.url, key = %config.key, "configuration loaded");

    let output = run(args.command, &config).await?;
    println!("{output}");
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: &PathBuf) -> Result<DeskConfig> {
    let path_str = path
        .to_str()
        .context("config path must be valid utf-8")?;
    DeskConfig::from_file(path_str).context("load config")
}
