use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::EnvFilter;

use connect4::config::AppConfig;
use connect4::game::GameEngine;
use connect4::ui::App;

/// Play Connect Four in the terminal. Seats without a name are played by
/// the computer.
#[derive(Parser)]
#[command(name = "connect4", about = "Play Connect Four against people or the computer")]
struct Cli {
    /// Name of the first player (omit for a computer player)
    #[arg(long)]
    player1: Option<String>,

    /// Name of the second player (omit for a computer player)
    #[arg(long)]
    player2: Option<String>,

    /// Seed for the random starting player and computer moves
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rounds to play; scores carry over between rounds
    #[arg(long)]
    rounds: Option<usize>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "connect4.toml")]
    config: PathBuf,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if cli.player1.is_some() {
        config.players.player1 = cli.player1;
    }
    if cli.player2.is_some() {
        config.players.player2 = cli.player2;
    }
    if cli.seed.is_some() {
        config.engine.seed = cli.seed;
    }
    if let Some(rounds) = cli.rounds {
        config.client.rounds = rounds;
    }
    config.validate().context("invalid settings")?;

    let mut engine = GameEngine::from_config(&config).context("creating game")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    App::new(stdin.lock(), stdout.lock(), config.client.rounds)
        .run(&mut engine)
        .context("game session ended")?;

    Ok(())
}
