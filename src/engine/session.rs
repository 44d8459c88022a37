//! Session driver — the per-player and per-round loops.
//!
//! Owns the console, the round engine and the leaderboard for one program
//! run. Each player plays rounds until they decline another, their final
//! standing is appended to the leaderboard, and once nobody else wants to
//! play the leaderboard is shown and written back to disk.

use std::io::{BufRead, Write};

use chrono::{DateTime, Utc};
use tracing::{error, info, info_span};
use uuid::Uuid;

use crate::console::Console;
use crate::engine::round::{RoundEngine, RoundOutcome, SecretSource};
use crate::storage::Leaderboard;
use crate::types::{Difficulty, GameError, Player};

const RULE: &str = "==============================================";

/// Printed on the diagnostic stream when the leaderboard cannot be written.
pub const SAVE_FAILED_MESSAGE: &str = "Error: Could not open leaderboard file for writing.";

/// Counters for a finished session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub players: usize,
    pub rounds_played: usize,
    pub rounds_won: usize,
    pub rounds_rejected: usize,
    /// Whether the leaderboard file was written successfully.
    pub saved: bool,
    /// Cause of a failed save, if any.
    pub save_error: Option<String>,
}

pub struct Session<R, W, S> {
    id: Uuid,
    started: DateTime<Utc>,
    console: Console<R, W>,
    diagnostics: Box<dyn Write>,
    engine: RoundEngine<S>,
    leaderboard: Leaderboard,
    starting_balance: u64,
    report: SessionReport,
}

impl<R: BufRead, W: Write, S: SecretSource> Session<R, W, S> {
    pub fn new(
        console: Console<R, W>,
        engine: RoundEngine<S>,
        leaderboard: Leaderboard,
        starting_balance: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            started: Utc::now(),
            console,
            diagnostics: Box::new(std::io::stderr()),
            engine,
            leaderboard,
            starting_balance,
            report: SessionReport::default(),
        }
    }

    /// Send user-facing error messages somewhere other than stderr.
    pub fn with_diagnostics(mut self, sink: Box<dyn Write>) -> Self {
        self.diagnostics = sink;
        self
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Run every player's turn, then show and save the leaderboard.
    ///
    /// Running out of input, or a terminal error, ends the current turn and
    /// the session; finished players are still ranked and saved.
    pub fn run(&mut self) -> SessionReport {
        let span = info_span!("session", id = %self.id, started = %self.started.to_rfc3339());
        let _guard = span.enter();

        info!(loaded = self.leaderboard.len(), "Session started");

        if let Err(e) = self.play_all() {
            error!(error = %e, "Terminal failed, ending session early");
        }

        self.finish();
        info!(report = ?self.report, "Session finished");
        self.report.clone()
    }

    /// Outer loop: one iteration per player.
    fn play_all(&mut self) -> Result<(), GameError> {
        loop {
            self.show_rules()?;

            let name = match self.console.prompt("Enter your name: ") {
                Ok(name) => name,
                Err(GameError::InputClosed) => return Ok(()),
                Err(e) => return Err(e),
            };

            let mut player = Player::new(name, self.starting_balance);
            let turn = self.play_turn(&mut player);

            // The snapshot is kept no matter how the turn ended.
            info!(player = player.name(), balance = player.balance(), "Turn finished");
            self.leaderboard.append(player.snapshot());
            self.report.players += 1;

            let input_left = turn?;
            writeln!(
                self.console.writer(),
                "Thanks for playing, {}! Final Balance: ${}\n",
                player.name(),
                player.balance()
            )?;
            if !input_left {
                return Ok(());
            }
            if !self.console.confirm("Would another player like to try? (y/n): ")? {
                return Ok(());
            }
        }
    }

    /// Inner loop for one player. Returns `false` if input ran out mid-turn.
    fn play_turn(&mut self, player: &mut Player) -> Result<bool, GameError> {
        writeln!(self.console.writer())?;
        loop {
            let label = match self.console.prompt("Choose difficulty (Easy/Medium/Hard): ") {
                Ok(label) => label,
                Err(GameError::InputClosed) => return Ok(false),
                Err(e) => return Err(e),
            };

            match self.engine.play_round(player, &label, &mut self.console) {
                Ok(outcome) => self.record(outcome),
                Err(GameError::InputClosed) => return Ok(false),
                Err(e) => return Err(e),
            }

            let again = self.console.confirm("Do you want to play again? (y/n): ")?;
            writeln!(self.console.writer())?;
            if !again {
                return Ok(true);
            }
        }
    }

    fn record(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::InvalidDifficulty => self.report.rounds_rejected += 1,
            RoundOutcome::Won { .. } => {
                self.report.rounds_played += 1;
                self.report.rounds_won += 1;
            }
            RoundOutcome::Lost { .. } => self.report.rounds_played += 1,
        }
    }

    /// Display, then save. A broken terminal does not stop the save.
    fn finish(&mut self) {
        if let Err(e) = self.leaderboard.render(self.console.writer()) {
            error!(error = %e, "Failed to display leaderboard");
        }

        match self.leaderboard.save() {
            Ok(()) => {
                self.report.saved = true;
                let shown = writeln!(
                    self.console.writer(),
                    "\nLeaderboard updated in {}\n",
                    self.leaderboard.path().display()
                );
                if let Err(e) = shown {
                    error!(error = %e, "Failed to confirm leaderboard save");
                }
            }
            Err(e) => {
                let cause = format!("{e:#}");
                error!(error = %cause, "Failed to save leaderboard");
                let _ = writeln!(self.diagnostics, "{SAVE_FAILED_MESSAGE}");
                self.report.save_error = Some(cause);
            }
        }
    }

    fn show_rules(&mut self) -> Result<(), GameError> {
        let out = self.console.writer();
        writeln!(out)?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "         CASINO NUMBER GUESSING GAME          ")?;
        writeln!(out, "{RULE}")?;
        writeln!(out)?;
        writeln!(out, "Welcome to the Casino Number Guessing Game!")?;
        writeln!(out)?;
        writeln!(out, "Rules:")?;
        writeln!(out, "1. Choose a difficulty level: Easy, Medium, or Hard.")?;
        writeln!(out, "2. The computer will pick a random number in a given range:")?;
        for d in Difficulty::ALL {
            let tier = d.tier();
            writeln!(
                out,
                "   - {d}: Guess between 1 and {} (Prize: ${})",
                tier.range, tier.prize
            )?;
        }
        writeln!(out, "3. If you guess correctly, you win the prize money!")?;
        writeln!(out, "4. If you guess wrong, you lose half the prize amount.")?;
        writeln!(
            out,
            "5. Your balance starts at ${}. Try to maximize it!",
            self.starting_balance
        )?;
        writeln!(out)?;
        writeln!(out, "Good luck!")?;
        writeln!(out)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
