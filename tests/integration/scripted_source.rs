//! Scripted secret source for integration testing.
//!
//! Provides a deterministic `SecretSource` that hands out a fixed
//! sequence of secrets and records every draw it was asked for.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use casino_guess::engine::round::SecretSource;

/// A secret source that replays a known sequence.
///
/// The draw log is shared, so tests can keep a handle after the
/// source has been moved into the engine.
#[derive(Clone)]
pub struct ScriptedSource {
    secrets: Arc<Mutex<VecDeque<u32>>>,
    draws: Arc<Mutex<Vec<u32>>>,
}

impl ScriptedSource {
    pub fn new(secrets: &[u32]) -> Self {
        Self {
            secrets: Arc::new(Mutex::new(secrets.iter().copied().collect())),
            draws: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Upper bounds requested so far, in order.
    pub fn draws(&self) -> Vec<u32> {
        self.draws.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.secrets.lock().unwrap().len()
    }
}

impl SecretSource for ScriptedSource {
    fn draw(&mut self, upper: u32) -> u32 {
        self.draws.lock().unwrap().push(upper);
        let secret = self
            .secrets
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted source ran out of secrets");
        assert!(
            (1..=upper).contains(&secret),
            "scripted secret {secret} outside 1..={upper}"
        );
        secret
    }
}
