//! Persistence layer.
//!
//! Loads and saves the leaderboard as a flat text file, one
//! `name balance` pair per line, highest balance first.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::types::Snapshot;

/// Default leaderboard file path.
pub const DEFAULT_LEADERBOARD_FILE: &str = "leaderboard.txt";

const RULE: &str = "==============================================";

/// In-memory leaderboard bound to the file it was loaded from.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    path: PathBuf,
    entries: Vec<Snapshot>,
}

impl Leaderboard {
    /// Empty leaderboard that will be saved to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    /// Load the leaderboard from disk.
    /// A missing file gives an empty leaderboard; malformed lines are skipped.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let path = path.unwrap_or(DEFAULT_LEADERBOARD_FILE);
        let mut board = Self::new(path);

        if !Path::new(path).exists() {
            info!(path, "No leaderboard found, starting empty");
            return Ok(board);
        }

        let bytes = std::fs::read(path)
            .context(format!("Failed to read leaderboard from {path}"))?;

        for (idx, raw) in bytes.split(|b| *b == b'\n').enumerate() {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            if raw.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            // Lines are decoded one at a time so a bad byte only costs its own line.
            match std::str::from_utf8(raw).ok().and_then(parse_line) {
                Some(entry) => board.entries.push(entry),
                None => warn!(
                    path,
                    line = idx + 1,
                    content = %String::from_utf8_lossy(raw),
                    "Skipping malformed leaderboard line"
                ),
            }
        }

        info!(path, entries = board.entries.len(), "Leaderboard loaded from disk");
        Ok(board)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a finished player's snapshot. Nothing is written until [`save`](Self::save).
    pub fn append(&mut self, entry: Snapshot) {
        debug!(name = %entry.name, balance = entry.balance, "Leaderboard entry appended");
        self.entries.push(entry);
    }

    /// Highest balance first; equal balances keep their current order.
    pub fn sort_descending(&mut self) {
        self.entries.sort_by(|a, b| b.balance.cmp(&a.balance));
    }

    /// Sort, then print the bordered ranking.
    pub fn render<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        self.sort_descending();

        writeln!(out)?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "                 LEADERBOARD                  ")?;
        writeln!(out, "{RULE}")?;
        for (rank, entry) in self.entries.iter().enumerate() {
            writeln!(out, "{}. {}", rank + 1, entry)?;
        }
        writeln!(out, "{RULE}")?;
        writeln!(out)?;
        Ok(())
    }

    /// Sort, then overwrite the leaderboard file.
    pub fn save(&mut self) -> Result<()> {
        self.sort_descending();

        let body: String = self
            .entries
            .iter()
            .map(|e| format!("{} {}\n", e.name, e.balance))
            .collect();

        std::fs::write(&self.path, body)
            .context(format!("Failed to write leaderboard to {}", self.path.display()))?;

        debug!(path = %self.path.display(), entries = self.entries.len(), "Leaderboard saved");
        Ok(())
    }
}

/// Parse `name balance`. Anything else is rejected.
fn parse_line(line: &str) -> Option<Snapshot> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?;
    let balance = tokens.next()?.parse::<u64>().ok()?;
    if tokens.next().is_some() {
        return None;
    }
    Some(Snapshot::new(name, balance))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
