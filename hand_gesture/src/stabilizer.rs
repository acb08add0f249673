//! Debounce and lockout for the per-frame move stream.
//!
//! A gesture is *confirmed* once it has been seen on `required_streak`
//! consecutive frames.  After confirming, the stabilizer locks: holding the
//! same gesture never confirms again.  The lock releases only when a frame
//! classifies differently, including a frame with no gesture at all.
//!
//! Alternating quickly between two gestures confirms neither.

use rps_rules::Move;

/// Frames a gesture must be held before it counts.  At ~30 fps this is a
/// third of a second.
pub const DEFAULT_REQUIRED_STREAK: u32 = 10;

/// Short-term state owned by a [`Stabilizer`].
///
/// `locked` implies `streak >= required_streak` for the current candidate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StabilizerState {
    pub candidate: Option<Move>,
    pub streak:    u32,
    pub locked:    bool,
}

#[derive(Clone, Debug)]
pub struct Stabilizer {
    state:           StabilizerState,
    required_streak: u32,
}

impl Default for Stabilizer {
    fn default() -> Self {
        Stabilizer::new(DEFAULT_REQUIRED_STREAK)
    }
}

impl Stabilizer {
    /// `required_streak` is clamped to at least 1.
    pub fn new(required_streak: u32) -> Self {
        Stabilizer {
            state:           StabilizerState::default(),
            required_streak: required_streak.max(1),
        }
    }

    /// Feed one frame's classification.  Returns the move on the single
    /// frame where it becomes confirmed, `None` otherwise.
    pub fn observe(&mut self, detected: Option<Move>) -> Option<Move> {
        let Some(m) = detected else {
            self.state = StabilizerState::default();
            return None;
        };

        if self.state.candidate == Some(m) {
            self.state.streak = self.state.streak.saturating_add(1);
        } else {
            self.state = StabilizerState { candidate: Some(m), streak: 1, locked: false };
        }

        if !self.state.locked && self.state.streak >= self.required_streak {
            self.state.locked = true;
            log::debug!("confirmed {} after {} frames", m, self.state.streak);
            return Some(m);
        }
        None
    }

    pub fn reset(&mut self) {
        self.state = StabilizerState::default();
    }

    pub fn state(&self) -> StabilizerState {
        self.state
    }

    pub fn required_streak(&self) -> u32 {
        self.required_streak
    }

    /// Fraction of the way to confirming the current candidate, 0.0–1.0.
    /// Stays at 1.0 while locked.
    pub fn progress(&self) -> f32 {
        (self.state.streak as f32 / self.required_streak as f32).min(1.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
