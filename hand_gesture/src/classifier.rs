//! Frame-by-frame landmark classification.
//!
//! Each finger is reduced to one bit, *extended* or *curled*, by comparing
//! its tip with its reference joint along the hand's axis.  The resulting
//! [`FingerPattern`] maps to a move:
//!
//! | index | middle | ring | pinky | move |
//! |---|---|---|---|---|
//! | – | – | – | – | Rock |
//! | ✓ | ✓ | ✓ | ✓ | Paper |
//! | ✓ | ✓ | – | – | Scissors |
//! | ✓ | – | – | – | Pencil |
//!
//! Every other pattern, and a frame without a hand, yields `None`.  The
//! classifier keeps no state between frames.

use rps_rules::Move;
use serde::{Deserialize, Serialize};

use crate::landmark::{Finger, HandLandmarks, Landmark};

// ════════════════════════════════════════════════════════════════════════════
// Configuration
// ════════════════════════════════════════════════════════════════════════════

/// Direction a finger points when it is extended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionAxis {
    /// Up the image: extended when the tip is higher (smaller `y`) than the
    /// reference joint.  Assumes an upright hand facing the camera.
    #[default]
    ImageUp,
    /// Along the wrist → middle-MCP direction, measured in palm lengths.
    /// Works for tilted and upside-down hands.
    Palm,
}

/// Whether the thumb takes part in Rock and Paper.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThumbPolicy {
    /// Thumb is ignored entirely.
    #[default]
    Ignore,
    /// Rock also needs the thumb curled; Paper also needs it extended.
    Strict,
}

/// Geometry thresholds for [`Classifier`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub axis: ExtensionAxis,
    /// How far past its reference joint a tip must reach to count as
    /// extended.  Image units for `ImageUp`, palm lengths for `Palm`.
    pub extension_margin: f32,
    pub thumb: ThumbPolicy,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            axis:             ExtensionAxis::ImageUp,
            extension_margin: 0.0,
            thumb:            ThumbPolicy::Ignore,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FingerPattern
// ════════════════════════════════════════════════════════════════════════════

/// Extended (`true`) / curled (`false`) state of each finger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FingerPattern {
    pub thumb:  bool,
    pub index:  bool,
    pub middle: bool,
    pub ring:   bool,
    pub pinky:  bool,
}

impl FingerPattern {
    pub const FIST: FingerPattern = FingerPattern::new(false, false, false, false, false);
    pub const OPEN: FingerPattern = FingerPattern::new(true, true, true, true, true);

    pub const fn new(thumb: bool, index: bool, middle: bool, ring: bool, pinky: bool) -> Self {
        FingerPattern { thumb, index, middle, ring, pinky }
    }

    /// The canonical hand shape for `m`.  Classifies as `m` under every
    /// [`ThumbPolicy`].
    pub const fn for_move(m: Move) -> FingerPattern {
        match m {
            Move::Rock     => FingerPattern::FIST,
            Move::Paper    => FingerPattern::OPEN,
            Move::Scissors => FingerPattern::new(false, true, true, false, false),
            Move::Pencil   => FingerPattern::new(false, true, false, false, false),
        }
    }

    /// All 32 patterns, thumb as the high bit.
    pub fn all() -> impl Iterator<Item = FingerPattern> {
        (0u8..32).map(|b| FingerPattern::new(
            b & 0b10000 != 0,
            b & 0b01000 != 0,
            b & 0b00100 != 0,
            b & 0b00010 != 0,
            b & 0b00001 != 0,
        ))
    }

    pub fn get(&self, f: Finger) -> bool {
        match f {
            Finger::Thumb  => self.thumb,
            Finger::Index  => self.index,
            Finger::Middle => self.middle,
            Finger::Ring   => self.ring,
            Finger::Pinky  => self.pinky,
        }
    }

    fn set(&mut self, f: Finger, extended: bool) {
        match f {
            Finger::Thumb  => self.thumb  = extended,
            Finger::Index  => self.index  = extended,
            Finger::Middle => self.middle = extended,
            Finger::Ring   => self.ring   = extended,
            Finger::Pinky  => self.pinky  = extended,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Classifier
// ════════════════════════════════════════════════════════════════════════════

/// Maps one frame's landmarks to a move.
#[derive(Clone, Copy, Debug, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Classifier { config }
    }

    /// Classify one frame.  `None` in, `None` out.
    pub fn classify(&self, frame: Option<&HandLandmarks>) -> Option<Move> {
        let hand = frame?;
        let pattern = self.finger_pattern(hand)?;
        self.move_for(pattern)
    }

    /// Per-finger extension, or `None` when the palm axis is degenerate.
    pub fn finger_pattern(&self, hand: &HandLandmarks) -> Option<FingerPattern> {
        let margin = self.config.extension_margin;
        let mut pattern = FingerPattern::default();

        match self.config.axis {
            ExtensionAxis::ImageUp => {
                for f in Finger::ALL {
                    let tip   = hand.get(f.tip());
                    let joint = hand.get(f.reference_joint());
                    pattern.set(f, joint.y - tip.y > margin);
                }
            }
            ExtensionAxis::Palm => {
                let axis = hand.get(Landmark::MiddleMcp).sub(hand.get(Landmark::Wrist));
                let palm_sq = axis.dot(axis);
                if palm_sq <= f32::EPSILON {
                    return None;
                }
                for f in Finger::ALL {
                    let reach = hand.get(f.tip()).sub(hand.get(f.reference_joint()));
                    pattern.set(f, reach.dot(axis) / palm_sq > margin);
                }
            }
        }
        Some(pattern)
    }

    /// Apply the move rules to a finger pattern.
    pub fn move_for(&self, p: FingerPattern) -> Option<Move> {
        let strict = self.config.thumb == ThumbPolicy::Strict;
        match (p.index, p.middle, p.ring, p.pinky) {
            (false, false, false, false) if !(strict && p.thumb) => Some(Move::Rock),
            (true,  true,  true,  true ) if !strict || p.thumb   => Some(Move::Paper),
            (true,  true,  false, false)                          => Some(Move::Scissors),
            (true,  false, false, false)                          => Some(Move::Pencil),
            _                                                     => None,
        }
    }
}

/// Classify with the default thresholds.
pub fn classify(frame: Option<&HandLandmarks>) -> Option<Move> {
    Classifier::default().classify(frame)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
