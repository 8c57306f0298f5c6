//! Ready-made choice providers.
//!
//! - `FirstCandidate`: always the first option
//! - `ScriptedChoices`: replays a fixed answer sequence (tests, replays)
//! - `RandomChoice`: uniform over the options, seeded

use std::collections::VecDeque;

use super::{Choice, ChoiceProvider, ChoiceRequest};
use crate::core::GameRng;

/// Always picks the first candidate; cancels only when there is none.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstCandidate;

impl ChoiceProvider for FirstCandidate {
    fn choose(&mut self, request: &ChoiceRequest) -> Choice {
        if request.candidates.is_empty() {
            Choice::Cancel
        } else {
            Choice::Pick(0)
        }
    }
}

/// Answers from a fixed script, then cancels once it runs out.
#[derive(Clone, Debug, Default)]
pub struct ScriptedChoices {
    script: VecDeque<Choice>,
    asked: usize,
}

impl ScriptedChoices {
    pub fn new(script: impl IntoIterator<Item = Choice>) -> Self {
        Self {
            script: script.into_iter().collect(),
            asked: 0,
        }
    }

    /// Script made only of picks.
    pub fn picks(indices: impl IntoIterator<Item = usize>) -> Self {
        Self::new(indices.into_iter().map(Choice::Pick))
    }

    /// Answers not yet given.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// How many times the provider was asked.
    #[must_use]
    pub fn asked(&self) -> usize {
        self.asked
    }
}

impl ChoiceProvider for ScriptedChoices {
    fn choose(&mut self, _request: &ChoiceRequest) -> Choice {
        self.asked += 1;
        self.script.pop_front().unwrap_or(Choice::Cancel)
    }
}

/// Uniformly random picks from a seeded stream. Never cancels.
#[derive(Clone, Debug)]
pub struct RandomChoice {
    rng: GameRng,
}

impl RandomChoice {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: GameRng::new(seed) }
    }
}

impl ChoiceProvider for RandomChoice {
    fn choose(&mut self, request: &ChoiceRequest) -> Choice {
        match request.candidates.len() {
            0 => Choice::Cancel,
            n => Choice::Pick(self.rng.gen_range_usize(0..n)),
        }
    }
}
