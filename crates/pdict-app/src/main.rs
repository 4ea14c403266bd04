use anyhow::Context;
use clap::Parser;
use pdict_config::Config;
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod render;
pub mod state;


use self::commands::Command;
use self::state::AppState;

#[derive(Parser)]
#[command(name = "pdict")]
#[command(
    author,
    version,
    about = "Personal dictionary of the English words you looked up in online translators"
)]
struct Cli {
    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs);

    colored::control::set_override(atty::is(atty::Stream::Stdout));

    let config = Config::load().context("Cannot load configuration")?;
    let state = AppState::new(config);

    commands::run(&state, cli.command).await
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
