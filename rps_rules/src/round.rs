//! Round resolution against a computer opponent.
//!
//! The resolver owns an [`Opponent`] and nothing else; it keeps no history.
//! Swapping the opponent is how tests force the computer's move.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::moves::{Move, Outcome};

// ════════════════════════════════════════════════════════════════════════════
// Opponent — where the computer's move comes from
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can pick the computer's move for the next round.
pub trait Opponent {
    fn choose(&mut self) -> Move;
}

// ── uniform random ────────────────────────────────────────────────────────

/// Draws uniformly from [`Move::ALL`], independently of previous rounds.
#[derive(Debug, Clone)]
pub struct RandomOpponent<R: Rng = SmallRng> {
    rng: R,
}

impl<R: Rng> RandomOpponent<R> {
    pub fn new(rng: R) -> Self {
        RandomOpponent { rng }
    }
}

impl RandomOpponent<SmallRng> {
    /// Reproducible opponent; the same seed yields the same move sequence.
    pub fn seeded(seed: u64) -> Self {
        RandomOpponent::new(SmallRng::seed_from_u64(seed))
    }

    /// Opponent seeded from the operating system.
    pub fn from_entropy() -> Self {
        RandomOpponent::new(SmallRng::from_os_rng())
    }
}

impl<R: Rng> Opponent for RandomOpponent<R> {
    fn choose(&mut self) -> Move {
        Move::ALL[self.rng.random_range(0..Move::ALL.len())]
    }
}

// ── scripted ──────────────────────────────────────────────────────────────

/// Plays a fixed list of moves in order, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedOpponent {
    script: Vec<Move>,
    next:   usize,
}

impl ScriptedOpponent {
    /// An empty script falls back to always playing Rock.
    pub fn new(script: Vec<Move>) -> Self {
        let script = if script.is_empty() { vec![Move::Rock] } else { script };
        ScriptedOpponent { script, next: 0 }
    }
}

impl Opponent for ScriptedOpponent {
    fn choose(&mut self) -> Move {
        let m = self.script[self.next % self.script.len()];
        self.next = (self.next + 1) % self.script.len();
        m
    }
}

impl<O: Opponent + ?Sized> Opponent for Box<O> {
    fn choose(&mut self) -> Move {
        (**self).choose()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Round
// ════════════════════════════════════════════════════════════════════════════

/// A completed round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub player:   Move,
    pub computer: Move,
    pub outcome:  Outcome,
}

impl Round {
    /// Score a round with both moves already known.
    pub fn between(player: Move, computer: Move) -> Round {
        Round { player, computer, outcome: Outcome::of(player, computer) }
    }

    /// One-line verdict, e.g. `"You win! Rock beats scissors."`.
    pub fn message(&self) -> String {
        match self.outcome {
            Outcome::Tie  => "It's a tie!".to_string(),
            Outcome::Win  => format!("You win! {} beats {}.", self.player.title(), self.computer),
            Outcome::Lose => format!("I win! {} beats {}.", self.computer.title(), self.player),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// RoundResolver
// ════════════════════════════════════════════════════════════════════════════

/// Draws the computer's move and scores it against a confirmed player move.
#[derive(Debug, Clone)]
pub struct RoundResolver<O: Opponent = RandomOpponent> {
    opponent: O,
}

impl<O: Opponent> RoundResolver<O> {
    pub fn new(opponent: O) -> Self {
        RoundResolver { opponent }
    }

    pub fn resolve(&mut self, player: Move) -> Round {
        let computer = self.opponent.choose();
        let round = Round::between(player, computer);
        log::debug!("round: {} vs {} -> {}", player, computer, round.outcome);
        round
    }

    pub fn opponent_mut(&mut self) -> &mut O {
        &mut self.opponent
    }
}

impl RoundResolver<RandomOpponent> {
    pub fn seeded(seed: u64) -> Self {
        RoundResolver::new(RandomOpponent::seeded(seed))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_opponent_wraps() {
        let mut o = ScriptedOpponent::new(vec![Move::Paper, Move::Pencil]);
        let drawn: Vec<Move> = (0..5).map(|_| o.choose()).collect();
        assert_eq!(drawn, [Move::Paper, Move::Pencil, Move::Paper, Move::Pencil, Move::Paper]);
    }

    #[test]
    fn empty_script_plays_rock() {
        let mut o = ScriptedOpponent::new(vec![]);
        assert_eq!(o.choose(), Move::Rock);
    }

    #[test]
    fn forced_scissors_loses_to_rock() {
        let mut r = RoundResolver::new(ScriptedOpponent::new(vec![Move::Scissors]));
        let round = r.resolve(Move::Rock);
        assert_eq!(round, Round { player: Move::Rock, computer: Move::Scissors, outcome: Outcome::Win });
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RoundResolver::seeded(42);
        let mut b = RoundResolver::seeded(42);
        for _ in 0..50 {
            assert_eq!(a.resolve(Move::Paper), b.resolve(Move::Paper));
        }
    }

    #[test]
    fn random_opponent_is_roughly_uniform() {
        let mut o = RandomOpponent::seeded(7);
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            let m = o.choose();
            counts[Move::ALL.iter().position(|&x| x == m).unwrap()] += 1;
        }
        for (m, &c) in Move::ALL.iter().zip(counts.iter()) {
            assert!((800..1200).contains(&c), "{} drawn {} times out of 4000", m, c);
        }
    }

    #[test]
    fn messages_follow_outcome() {
        assert_eq!(Round::between(Move::Rock, Move::Rock).message(), "It's a tie!");
        assert_eq!(
            Round::between(Move::Rock, Move::Scissors).message(),
            "You win! Rock beats scissors."
        );
        assert_eq!(
            Round::between(Move::Pencil, Move::Scissors).message(),
            "I win! Scissors beats pencil."
        );
    }

    #[test]
    fn boxed_opponent_delegates() {
        let boxed: Box<dyn Opponent> = Box::new(ScriptedOpponent::new(vec![Move::Pencil]));
        let mut r = RoundResolver::new(boxed);
        assert_eq!(r.resolve(Move::Paper).outcome, Outcome::Lose);
    }
}
