//! Round engine — one draw, one guess, one payout.
//!
//! Resolves the chosen difficulty, draws a secret from the injected
//! random source, reads the player's guess and settles the balance.

use std::io::{BufRead, Write};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::console::Console;
use crate::types::{Difficulty, GameError, Player};

// ---------------------------------------------------------------------------
// Random source
// ---------------------------------------------------------------------------

/// Source of secret numbers. Injected so tests can force the draw.
#[cfg_attr(test, mockall::automock)]
pub trait SecretSource {
    /// Draw uniformly from `1..=upper`.
    fn draw(&mut self, upper: u32) -> u32;
}

impl SecretSource for StdRng {
    fn draw(&mut self, upper: u32) -> u32 {
        self.gen_range(1..=upper)
    }
}

/// Build the session RNG. Without a fixed seed, the current time is used.
pub fn session_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| {
        let now = chrono::Utc::now();
        now.timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_micros()) as u64
    });
    debug!(seed, "Seeding session RNG");
    StdRng::seed_from_u64(seed)
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Label did not name a difficulty; nothing was drawn or paid.
    InvalidDifficulty,
    Won { secret: u32, prize: i64 },
    Lost { secret: u32, guess: i64, penalty: i64 },
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

pub struct RoundEngine<S> {
    source: S,
}

impl<S: SecretSource> RoundEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Play one round for `player` at the difficulty named by `label`.
    ///
    /// An unknown label is reported to the player and yields
    /// [`RoundOutcome::InvalidDifficulty`] without touching the balance.
    /// Errors are only returned for terminal I/O failures or end of input.
    pub fn play_round<R: BufRead, W: Write>(
        &mut self,
        player: &mut Player,
        label: &str,
        console: &mut Console<R, W>,
    ) -> Result<RoundOutcome, GameError> {
        let Some(tier) = Difficulty::resolve(label) else {
            warn!(player = player.name(), label, "Round rejected, unknown difficulty");
            writeln!(console.writer(), "\nInvalid difficulty level!\n")?;
            return Ok(RoundOutcome::InvalidDifficulty);
        };

        let secret = self.source.draw(tier.range);
        debug!(player = player.name(), difficulty = label, secret, "Secret drawn");

        let guess = console.prompt_number(&format!(
            "\nGuess a number between 1 and {}: ",
            tier.range
        ))?;

        let outcome = if guess == i64::from(secret) {
            player.adjust_balance(tier.prize);
            writeln!(console.writer(), "\nCongratulations! You guessed correctly!")?;
            writeln!(console.writer(), "You won ${}!", tier.prize)?;
            RoundOutcome::Won {
                secret,
                prize: tier.prize,
            }
        } else {
            let penalty = tier.penalty();
            player.adjust_balance(-penalty);
            writeln!(
                console.writer(),
                "\nWrong guess. The correct number was {secret}."
            )?;
            writeln!(console.writer(), "You lost ${penalty}.")?;
            RoundOutcome::Lost {
                secret,
                guess,
                penalty,
            }
        };

        info!(
            player = player.name(),
            difficulty = label,
            guess,
            secret,
            balance = player.balance(),
            outcome = ?outcome,
            "Round settled"
        );

        writeln!(console.writer(), "\n{}\n", player.status())?;
        Ok(outcome)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
