//! # rps_rules
//!
//! Rules engine for Rock, Paper, Scissors, **Pencil**.
//!
//! * [`Move`] — the four playable gestures.  "No gesture" is never a move;
//!   callers that may not have one carry an `Option<Move>`.
//! * [`Move::beats`] — the fixed beats relation (see table below).
//! * [`RoundResolver`] — draws the computer's move from an [`Opponent`] and
//!   scores the round.
//! * [`ScoreTracker`] — wins / losses / ties from the player's perspective.
//!
//! ## Beats relation
//!
//! | Move | Beats |
//! |---|---|
//! | Rock | Scissors, Pencil |
//! | Paper | Rock |
//! | Scissors | Paper, Pencil |
//! | Pencil | Paper |
//!
//! The relation is not a cycle: Rock and Scissors each beat two moves,
//! Paper and Pencil each beat one.
//!
//! ## Quick start
//!
//! ```rust
//! use rps_rules::{Move, Outcome, RoundResolver, ScriptedOpponent, ScoreTracker};
//!
//! let mut resolver = RoundResolver::new(ScriptedOpponent::new(vec![Move::Scissors]));
//! let mut score    = ScoreTracker::default();
//!
//! let round = resolver.resolve(Move::Rock);
//! assert_eq!(round.outcome, Outcome::Win);
//! assert_eq!(score.apply(round.outcome).wins, 1);
//! ```

pub mod moves;
pub mod round;
pub mod score;

pub use moves::{Move, Outcome, ParseMoveError};
pub use round::{Opponent, RandomOpponent, Round, RoundResolver, ScriptedOpponent};
pub use score::{ScoreState, ScoreTracker};
