//! Casino number guessing game.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! loads the leaderboard from disk (or starts empty), and runs the
//! interactive session on stdin/stdout.

use anyhow::Result;
use std::io;
use tracing::info;

use casino_guess::config::{self, AppConfig};
use casino_guess::console::Console;
use casino_guess::engine::round::{session_rng, RoundEngine};
use casino_guess::engine::session::Session;
use casino_guess::storage::Leaderboard;

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cfg = AppConfig::load_or_default(config::DEFAULT_CONFIG_FILE)?;

    init_logging(&cfg);

    info!(
        starting_balance = cfg.game.starting_balance,
        leaderboard = %cfg.game.leaderboard_path,
        fixed_seed = cfg.game.seed.is_some(),
        "Casino starting up"
    );

    let leaderboard = Leaderboard::load(Some(cfg.game.leaderboard_path.as_str()))?;
    let engine = RoundEngine::new(session_rng(cfg.game.seed));
    let console = Console::new(io::stdin().lock(), io::stdout().lock());

    let mut session = Session::new(console, engine, leaderboard, cfg.game.starting_balance);
    let report = session.run();

    info!(
        players = report.players,
        rounds = report.rounds_played,
        won = report.rounds_won,
        saved = report.saved,
        "Casino shut down cleanly."
    );

    Ok(())
}

/// Initialise the `tracing` subscriber. Logs go to stderr so they never
/// interleave with the game prompts on stdout.
fn init_logging(cfg: &AppConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.logging.filter));

    let json_logging = cfg.logging.json || std::env::var("CASINO_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(io::stderr)
            .init();
    }
}
