//! Moves, outcomes, and the beats relation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ════════════════════════════════════════════════════════════════════════════
// Move
// ════════════════════════════════════════════════════════════════════════════

/// One of the four playable gestures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
    Pencil,
}

impl Move {
    /// Every playable move, in table order.
    pub const ALL: [Move; 4] = [Move::Rock, Move::Paper, Move::Scissors, Move::Pencil];

    /// The moves this one defeats.
    pub fn defeats(self) -> &'static [Move] {
        match self {
            Move::Rock     => &[Move::Scissors, Move::Pencil],
            Move::Paper    => &[Move::Rock],
            Move::Scissors => &[Move::Paper, Move::Pencil],
            Move::Pencil   => &[Move::Paper],
        }
    }

    /// True if `self` defeats `other`.
    pub fn beats(self, other: Move) -> bool {
        self.defeats().contains(&other)
    }

    /// Lower-case name, as used in status messages.
    pub fn name(self) -> &'static str {
        match self {
            Move::Rock     => "rock",
            Move::Paper    => "paper",
            Move::Scissors => "scissors",
            Move::Pencil   => "pencil",
        }
    }

    /// Capitalised name, for the first word of a sentence.
    pub fn title(self) -> &'static str {
        match self {
            Move::Rock     => "Rock",
            Move::Paper    => "Paper",
            Move::Scissors => "Scissors",
            Move::Pencil   => "Pencil",
        }
    }

    /// How the player forms this move with one hand.
    pub fn hand_shape(self) -> &'static str {
        match self {
            Move::Rock     => "Fist",
            Move::Paper    => "Open palm",
            Move::Scissors => "Index + middle fingers",
            Move::Pencil   => "Index finger only",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing a [`Move`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown move {0:?} (expected rock, paper, scissors or pencil)")]
pub struct ParseMoveError(pub String);

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Accepts full names or single-letter abbreviations, any case.
    /// `n` is Pencil, since `p` is taken by Paper.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock"     | "r" => Ok(Move::Rock),
            "paper"    | "p" => Ok(Move::Paper),
            "scissors" | "s" => Ok(Move::Scissors),
            "pencil"   | "n" => Ok(Move::Pencil),
            _                => Err(ParseMoveError(s.to_string())),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Outcome
// ════════════════════════════════════════════════════════════════════════════

/// Result of one round, from the player's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
    Tie,
}

impl Outcome {
    /// Score `player` against `computer`.
    pub fn of(player: Move, computer: Move) -> Outcome {
        let win  = player.beats(computer);
        let lose = computer.beats(player);
        debug_assert!(
            [win, lose, player == computer].iter().filter(|&&b| b).count() == 1,
            "beats relation is not exclusive for {} vs {}", player, computer,
        );
        if win {
            Outcome::Win
        } else if lose {
            Outcome::Lose
        } else {
            Outcome::Tie
        }
    }

    /// The same round seen from the other side.
    pub fn reversed(self) -> Outcome {
        match self {
            Outcome::Win  => Outcome::Lose,
            Outcome::Lose => Outcome::Win,
            Outcome::Tie  => Outcome::Tie,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Win  => "win",
            Outcome::Lose => "lose",
            Outcome::Tie  => "tie",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defeats_table_is_exact() {
        assert_eq!(Move::Rock.defeats(),     &[Move::Scissors, Move::Pencil]);
        assert_eq!(Move::Paper.defeats(),    &[Move::Rock]);
        assert_eq!(Move::Scissors.defeats(), &[Move::Paper, Move::Pencil]);
        assert_eq!(Move::Pencil.defeats(),   &[Move::Paper]);
    }

    #[test]
    fn no_move_beats_itself() {
        for m in Move::ALL {
            assert!(!m.beats(m), "{} beats itself", m);
        }
    }

    #[test]
    fn every_pair_has_exactly_one_outcome() {
        for p in Move::ALL {
            for c in Move::ALL {
                let cases = [p.beats(c), c.beats(p), p == c];
                assert_eq!(
                    cases.iter().filter(|&&b| b).count(), 1,
                    "{} vs {} is not decided by exactly one rule", p, c,
                );
            }
        }
    }

    #[test]
    fn outcome_is_antisymmetric() {
        for a in Move::ALL {
            for b in Move::ALL {
                assert_eq!(Outcome::of(a, b), Outcome::of(b, a).reversed());
            }
        }
    }

    #[test]
    fn mirror_match_is_tie() {
        for m in Move::ALL {
            assert_eq!(Outcome::of(m, m), Outcome::Tie);
        }
    }

    #[test]
    fn pencil_loses_to_rock_and_scissors() {
        assert_eq!(Outcome::of(Move::Pencil, Move::Rock),     Outcome::Lose);
        assert_eq!(Outcome::of(Move::Pencil, Move::Scissors), Outcome::Lose);
        assert_eq!(Outcome::of(Move::Pencil, Move::Paper),    Outcome::Win);
    }

    #[test]
    fn parse_names_and_letters() {
        assert_eq!("Rock".parse::<Move>(), Ok(Move::Rock));
        assert_eq!(" p ".parse::<Move>(),  Ok(Move::Paper));
        assert_eq!("S".parse::<Move>(),    Ok(Move::Scissors));
        assert_eq!("n".parse::<Move>(),    Ok(Move::Pencil));
        assert!("lizard".parse::<Move>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for m in Move::ALL {
            assert_eq!(m.to_string().parse::<Move>(), Ok(m));
        }
    }
}
