use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::Context as _;
use clap::Parser;

use goonbot::cli::{self, Cli, Command, ServeArgs};
use goonbot::config::{AppConfig, BotSettings};
use goonbot::{logging, runtime};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.or_else(|| env::var("CONFIG_FILE").ok().map(PathBuf::from)))?;

    match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => {
            runtime::run_bot(BotSettings::from_config(&config)?, args.sync_commands).await
        }
        Command::Events(args) => cli::run_events(&args, &config),
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    let path = path.to_string_lossy();
    AppConfig::from_file(&path).with_context(|| format!("loading config from {path}"))
}
