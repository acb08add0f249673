//! Score keeping from the player's perspective.

use serde::{Deserialize, Serialize};

use crate::moves::Outcome;

/// Immutable snapshot of the running score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreState {
    pub wins:   u32,
    pub losses: u32,
    pub ties:   u32,
}

impl ScoreState {
    /// The snapshot that follows `self` after one more round.
    #[must_use]
    pub fn with(self, outcome: Outcome) -> ScoreState {
        let mut next = self;
        match outcome {
            Outcome::Win  => next.wins   += 1,
            Outcome::Lose => next.losses += 1,
            Outcome::Tie  => next.ties   += 1,
        }
        next
    }

    pub fn rounds(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

/// Owns the running [`ScoreState`].  Only outcomes and `reset` change it.
#[derive(Debug, Default)]
pub struct ScoreTracker {
    state: ScoreState,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, outcome: Outcome) -> ScoreState {
        self.state = self.state.with(outcome);
        self.state
    }

    pub fn reset(&mut self) -> ScoreState {
        self.state = ScoreState::default();
        self.state
    }

    pub fn score(&self) -> ScoreState {
        self.state
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn accumulates_mixed_outcomes() {
        let mut t = ScoreTracker::new();
        for o in [Outcome::Win, Outcome::Tie, Outcome::Lose, Outcome::Win] {
            t.apply(o);
        }
        assert_eq!(t.score(), ScoreState { wins: 2, losses: 1, ties: 1 });
        assert_eq!(t.score().rounds(), 4);
    }

    #[test]
    fn apply_returns_new_snapshot() {
        let mut t = ScoreTracker::new();
        let before = t.score();
        let after = t.apply(Outcome::Lose);
        assert_eq!(before, ScoreState::default());
        assert_eq!(after, ScoreState { wins: 0, losses: 1, ties: 0 });
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut t = ScoreTracker::new();
        for _ in 0..3 { t.apply(Outcome::Win); }
        t.apply(Outcome::Tie);
        assert_eq!(t.reset(), ScoreState::default());
        assert_eq!(t.score(), ScoreState { wins: 0, losses: 0, ties: 0 });
    }
}
