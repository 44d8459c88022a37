//! Terminal prompts and whitespace-delimited token input.
//!
//! Input is consumed one token at a time, so several answers may be typed
//! on a single line (`Easy 3 y`) and are picked up by successive prompts.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use tracing::debug;

use crate::types::GameError;

/// Prompt/read wrapper over any buffered reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    /// Output sink used for everything the game prints.
    pub fn writer(&mut self) -> &mut W {
        &mut self.output
    }

    /// Give back the output sink (used by tests to inspect the transcript).
    pub fn into_writer(self) -> W {
        self.output
    }

    /// Next whitespace-delimited token, reading more lines as needed.
    pub fn next_token(&mut self) -> Result<String, GameError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }

            let mut line = Vec::new();
            if self.input.read_until(b'\n', &mut line)? == 0 {
                return Err(GameError::InputClosed);
            }
            // Undecodable bytes become U+FFFD and simply fail to match any answer.
            self.pending.extend(
                String::from_utf8_lossy(&line)
                    .split_whitespace()
                    .map(str::to_string),
            );
        }
    }

    /// Print a prompt (no newline) and read one token.
    pub fn prompt(&mut self, text: &str) -> Result<String, GameError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.next_token()
    }

    /// Prompt for an integer, asking again until one is entered.
    pub fn prompt_number(&mut self, text: &str) -> Result<i64, GameError> {
        let mut token = self.prompt(text)?;
        loop {
            match token.parse::<i64>() {
                Ok(n) => return Ok(n),
                Err(_) => {
                    debug!(input = %token, "Rejected non-numeric input");
                    token = self.prompt("Please enter a whole number: ")?;
                }
            }
        }
    }

    /// Yes/no question. Only an answer starting with `y` or `Y` counts as yes;
    /// running out of input counts as no.
    pub fn confirm(&mut self, text: &str) -> Result<bool, GameError> {
        match self.prompt(text) {
            Ok(answer) => Ok(matches!(answer.chars().next(), Some('y' | 'Y'))),
            Err(GameError::InputClosed) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
