//! Position explorer - browse positions and see how you played them.
//!
//! Starts a line-oriented board session. Moves are entered with `click`,
//! `drag` or `move`; the history can be stepped through with `back` and
//! `forward`. For every displayed position the explorer looks up which
//! moves the configured player chose there in their own games (see
//! [`config`] for where the game library is read from).

use std::sync::Arc;

use anyhow::Context;
use board::BoardController;
use clap::Parser;
use stats_client::GameLibrary;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod command;
mod config;
mod render;
mod session;

use config::{EnvDefaults, ExplorerConfig, Overrides};
use session::Session;

/// Command-line arguments. Flags override the `EXPLORER_*` environment
/// variables.
#[derive(Parser)]
#[command(
    name = "explorer",
    about = "Explore chess positions against your own game history"
)]
struct Cli {
    /// Starting position as FEN. Defaults to the standard start.
    #[arg(long)]
    fen: Option<String>,

    /// Side shown at the bottom and used for statistics (white or black).
    #[arg(long, value_name = "SIDE")]
    play_as: Option<String>,

    /// Game library JSON file.
    #[arg(long, value_name = "PATH")]
    games: Option<std::path::PathBuf>,

    /// Player whose games feed the statistics.
    #[arg(long)]
    username: Option<String>,

    /// Platform the games were played on (chesscom or lichess).
    #[arg(long)]
    platform: Option<String>,

    /// Only count games finished at or after this unix time.
    #[arg(long, value_name = "UNIX_SECS")]
    from: Option<i64>,

    /// Only count games finished at or before this unix time.
    #[arg(long, value_name = "UNIX_SECS")]
    to: Option<i64>,
}

impl From<Cli> for Overrides {
    fn from(cli: Cli) -> Self {
        Overrides {
            fen: cli.fen,
            play_as: cli.play_as,
            games_path: cli.games,
            username: cli.username,
            platform: cli.platform,
            from_unix: cli.from,
            to_unix: cli.to,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ExplorerConfig::resolve(cli.into(), EnvDefaults::from_env())?;

    // Log to a file so output never interleaves with the board
    std::fs::create_dir_all(&config.log_dir).ok();
    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "position-explorer");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Position explorer starting up");

    let board = match &config.start_fen {
        Some(fen) => BoardController::from_fen(fen)
            .with_context(|| format!("invalid starting position {:?}", fen))?,
        None => BoardController::new(),
    }
    .with_orientation(config.play_as);

    let library = GameLibrary::load(&config.games_path)
        .with_context(|| format!("failed to load games from {:?}", config.games_path))?;

    println!("Position explorer - type 'help' for commands");
    match &config.identity {
        Some(identity) => println!(
            "Statistics for {} on {} ({} games in {:?})",
            identity.username,
            identity.platform,
            library.len(),
            config.games_path
        ),
        None => println!("No player configured, statistics are off"),
    }
    println!("Debug logs: {}/position-explorer.YYYY-MM-DD", config.log_dir.display());
    println!();

    let mut session = Session::new(
        board,
        Arc::new(library),
        config.identity.clone(),
        config.time_range,
    );
    session
        .run(tokio::io::BufReader::new(tokio::io::stdin()))
        .await?;

    tracing::info!("Position explorer shutting down");
    Ok(())
}
