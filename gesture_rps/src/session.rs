//! One game session: the per-tick decision pipeline.
//!
//! ```text
//!  frame ─► Classifier ─► Stabilizer ─► (confirmed?) ─► RoundResolver ─► ScoreTracker
//! ```
//!
//! `Session` owns every piece of mutable game state and is the only writer
//! of it.  Each call to [`Session::tick`] consumes exactly one frame and
//! yields one [`DisplayUpdate`].

use hand_gesture::{Classifier, HandLandmarks, Stabilizer};
use rps_rules::{Move, Opponent, Outcome, RandomOpponent, Round, RoundResolver, ScoreState, ScoreTracker};

// ════════════════════════════════════════════════════════════════════════════
// DisplayUpdate
// ════════════════════════════════════════════════════════════════════════════

/// Everything the presentation layer needs after one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayUpdate {
    /// This frame's raw classification.
    pub detected: Option<Move>,
    /// The round resolved on this tick, if the gesture was just confirmed.
    pub round:    Option<Round>,
    pub score:    ScoreState,
    /// Stabilizer progress toward confirming `detected`, 0.0–1.0.
    pub progress: f32,
}

impl DisplayUpdate {
    pub fn player_move(&self)   -> Option<Move>    { self.round.map(|r| r.player) }
    pub fn computer_move(&self) -> Option<Move>    { self.round.map(|r| r.computer) }
    pub fn outcome(&self)       -> Option<Outcome> { self.round.map(|r| r.outcome) }
}

// ════════════════════════════════════════════════════════════════════════════
// Session
// ════════════════════════════════════════════════════════════════════════════

pub struct Session<O: Opponent = RandomOpponent> {
    classifier: Classifier,
    stabilizer: Stabilizer,
    resolver:   RoundResolver<O>,
    score:      ScoreTracker,
    last_round: Option<Round>,
}

impl<O: Opponent> Session<O> {
    pub fn new(classifier: Classifier, required_streak: u32, opponent: O) -> Self {
        Session {
            classifier,
            stabilizer: Stabilizer::new(required_streak),
            resolver:   RoundResolver::new(opponent),
            score:      ScoreTracker::new(),
            last_round: None,
        }
    }

    /// Run one frame through the pipeline.  A `None` frame (no hand) is an
    /// ordinary "no gesture" observation.
    pub fn tick(&mut self, frame: Option<&HandLandmarks>) -> DisplayUpdate {
        let detected = self.classifier.classify(frame);
        let round = self.stabilizer.observe(detected).map(|player| {
            let round = self.resolver.resolve(player);
            let score = self.score.apply(round.outcome);
            log::debug!("{} → score {}-{}-{}", round.message(), score.wins, score.losses, score.ties);
            round
        });
        if round.is_some() {
            self.last_round = round;
        }

        DisplayUpdate {
            detected,
            round,
            score:    self.score.score(),
            progress: if detected.is_some() { self.stabilizer.progress() } else { 0.0 },
        }
    }

    /// Zero the score.  The stabilizer keeps its lock, so a gesture still
    /// being held does not immediately start a new round.
    pub fn reset(&mut self) -> ScoreState {
        self.last_round = None;
        log::info!("scores cleared");
        self.score.reset()
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn score(&self)      -> ScoreState     { self.score.score() }
    pub fn last_round(&self) -> Option<Round>  { self.last_round }
    pub fn opponent_mut(&mut self) -> &mut O   { self.resolver.opponent_mut() }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
