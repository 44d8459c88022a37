//! Shared types for the casino guessing game.
//!
//! Players, leaderboard snapshots, the difficulty catalog and the
//! domain error enum. The engine, storage and session modules all
//! depend on these without depending on each other.

use std::fmt;

/// Balance every new player starts with.
pub const DEFAULT_STARTING_BALANCE: u64 = 1000;

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A live player taking their turn at the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    balance: u64,
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player: {} | Balance: ${}", self.name, self.balance)
    }
}

impl Player {
    /// Create a player with the given starting balance.
    pub fn new(name: impl Into<String>, balance: u64) -> Self {
        Self {
            name: name.into(),
            balance,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Apply a win (positive) or loss (negative). The balance clamps at zero.
    pub fn adjust_balance(&mut self, delta: i64) {
        self.balance = if delta >= 0 {
            self.balance.saturating_add(delta.unsigned_abs())
        } else {
            self.balance.saturating_sub(delta.unsigned_abs())
        };
    }

    /// One-line status, e.g. `Player: Alice | Balance: $1100`.
    pub fn status(&self) -> String {
        self.to_string()
    }

    /// Freeze the player's current standing for the leaderboard.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            name: self.name.clone(),
            balance: self.balance,
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// A `(name, balance)` leaderboard entry, detached from the live player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub name: String,
    pub balance: u64,
}

impl Snapshot {
    pub fn new(name: impl Into<String>, balance: u64) -> Self {
        Self {
            name: name.into(),
            balance,
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - ${}", self.name, self.balance)
    }
}

// ---------------------------------------------------------------------------
// Difficulty catalog
// ---------------------------------------------------------------------------

/// Selectable difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Guess range and payout for a difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    /// Secrets are drawn from `1..=range`.
    pub range: u32,
    /// Paid in full on a correct guess; half of it is lost on a miss.
    pub prize: i64,
}

impl Tier {
    /// Amount deducted on a wrong guess (integer division, truncates toward zero).
    pub fn penalty(&self) -> i64 {
        self.prize / 2
    }
}

impl Difficulty {
    /// All levels, easiest first.
    pub const ALL: &'static [Difficulty] = &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn tier(&self) -> Tier {
        match self {
            Difficulty::Easy => Tier { range: 5, prize: 100 },
            Difficulty::Medium => Tier { range: 10, prize: 300 },
            Difficulty::Hard => Tier { range: 20, prize: 1000 },
        }
    }

    /// Exact, case-sensitive lookup of a label such as `"Hard"`.
    pub fn resolve(label: &str) -> Option<Tier> {
        label.parse::<Difficulty>().ok().map(|d| d.tier())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Labels must match exactly: `"easy"` is not `"Easy"`.
impl std::str::FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .iter()
            .copied()
            .find(|d| d.label() == s)
            .ok_or_else(|| GameError::UnknownDifficulty(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the game.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Unknown difficulty level: {0}")]
    UnknownDifficulty(String),

    #[error("Input stream closed")]
    InputClosed,

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
