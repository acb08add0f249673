//! Synthetic hands for simulation and tests.
//!
//! [`posed_hand`] builds an upright right hand, palm toward the camera, in
//! normalised image coordinates.  Extended fingers point straight up;
//! curled fingers fold so the tip sits below the PIP joint.  Every one of
//! the 32 finger patterns round-trips through the classifier under both
//! extension axes.

use rand::Rng;
use rps_rules::Move;

use crate::classifier::FingerPattern;
use crate::landmark::{Finger, HandLandmarks, LandmarkFrame, Point, LANDMARK_COUNT};

const WRIST: Point = Point::new(0.50, 0.85, 0.0);

/// MCP position and relative length of each non-thumb finger.
fn finger_base(f: Finger) -> (Point, f32) {
    match f {
        Finger::Index  => (Point::new(0.42, 0.60, 0.0), 1.0),
        Finger::Middle => (Point::new(0.50, 0.58, 0.0), 1.1),
        Finger::Ring   => (Point::new(0.57, 0.60, 0.0), 1.0),
        Finger::Pinky  => (Point::new(0.63, 0.64, 0.0), 0.8),
        Finger::Thumb  => (Point::new(0.37, 0.74, 0.0), 1.0),
    }
}

/// Joints after the MCP: PIP, DIP, tip.
fn finger_joints(f: Finger, extended: bool) -> [Point; 3] {
    let (m, len) = finger_base(f);
    if extended {
        [
            Point::new(m.x, m.y - 0.09 * len, 0.0),
            Point::new(m.x, m.y - 0.15 * len, 0.0),
            Point::new(m.x, m.y - 0.20 * len, 0.0),
        ]
    } else {
        [
            Point::new(m.x, m.y - 0.05, -0.02),
            Point::new(m.x, m.y - 0.02, -0.04),
            Point::new(m.x, m.y + 0.03, -0.03),
        ]
    }
}

/// Thumb CMC, MCP, IP, tip.
fn thumb_chain(extended: bool) -> [Point; 4] {
    let tip = if extended {
        Point::new(0.30, 0.61, 0.0)
    } else {
        Point::new(0.41, 0.72, -0.03)
    };
    [
        Point::new(0.43, 0.80, 0.0),
        finger_base(Finger::Thumb).0,
        Point::new(0.33, 0.68, 0.0),
        tip,
    ]
}

/// An upright hand showing `pattern`.
pub fn posed_hand(pattern: FingerPattern) -> HandLandmarks {
    let mut points = Vec::with_capacity(LANDMARK_COUNT);
    points.push(WRIST);
    points.extend(thumb_chain(pattern.thumb));
    for f in Finger::NON_THUMB {
        points.push(finger_base(f).0);
        points.extend(finger_joints(f, pattern.get(f)));
    }
    // Every coordinate above is a finite constant.
    HandLandmarks::new(points).unwrap_or_else(|e| unreachable!("synthetic hand is malformed: {}", e))
}

/// The canonical hand for `m`.
pub fn hand_for(m: Move) -> HandLandmarks {
    posed_hand(FingerPattern::for_move(m))
}

/// Largest noise amount applied; one full image width.
pub const MAX_JITTER: f32 = 1.0;

/// Add uniform noise in `[-amount, amount]` to every coordinate.
///
/// A non-finite or non-positive `amount` leaves the hand unchanged; larger
/// amounts are capped at [`MAX_JITTER`].
pub fn jittered<R: Rng>(hand: &HandLandmarks, rng: &mut R, amount: f32) -> HandLandmarks {
    if !amount.is_finite() || amount <= 0.0 {
        return hand.clone();
    }
    let amount = amount.min(MAX_JITTER);
    hand.map_points(|p| Point::new(
        p.x + rng.random_range(-amount..=amount),
        p.y + rng.random_range(-amount..=amount),
        p.z + rng.random_range(-amount..=amount),
    ))
    .unwrap_or_else(|_| hand.clone())
}

/// `frames` copies of the canonical frame for `m` (`None` = no hand).
pub fn hold(m: Option<Move>, frames: usize) -> Vec<LandmarkFrame> {
    let frame = m.map(hand_for);
    vec![frame; frames]
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classifier;
    use crate::landmark::Landmark;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn landmarks_land_in_their_slots() {
        let h = posed_hand(FingerPattern::OPEN);
        assert_eq!(h.get(Landmark::Wrist), WRIST);
        assert_eq!(h.get(Landmark::MiddleMcp), finger_base(Finger::Middle).0);
        assert!(h.get(Landmark::IndexTip).y < h.get(Landmark::IndexPip).y);
        assert!(h.get(Landmark::PinkyTip).y < h.get(Landmark::PinkyPip).y);
    }

    #[test]
    fn light_jitter_keeps_the_move() {
        let mut rng = SmallRng::seed_from_u64(3);
        let c = Classifier::default();
        for m in Move::ALL {
            for _ in 0..50 {
                let h = jittered(&hand_for(m), &mut rng, 0.01);
                assert_eq!(c.classify(Some(&h)), Some(m));
            }
        }
    }

    #[test]
    fn unusable_jitter_leaves_hand_alone() {
        let mut rng = SmallRng::seed_from_u64(1);
        let rock = hand_for(Move::Rock);
        for amount in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, -0.5, 0.0] {
            assert_eq!(jittered(&rock, &mut rng, amount), rock);
        }
    }

    #[test]
    fn huge_jitter_is_capped() {
        let mut rng = SmallRng::seed_from_u64(1);
        let rock = hand_for(Move::Rock);
        let noisy = jittered(&rock, &mut rng, 3e38);
        let bound = MAX_JITTER + 1e-4;
        for (a, b) in rock.points().iter().zip(noisy.points()) {
            assert!((a.x - b.x).abs() <= bound);
            assert!((a.y - b.y).abs() <= bound);
            assert!((a.z - b.z).abs() <= bound);
        }
    }

    #[test]
    fn hold_repeats_frame() {
        let frames = hold(Some(Move::Paper), 3);
        assert_eq!(frames.len(), 3);
        assert!(frames.iter().all(|f| f.as_ref() == Some(&hand_for(Move::Paper))));
        assert!(hold(None, 2).iter().all(Option::is_none));
    }
}
