//! Hand landmarks in the 21-point layout used by common hand trackers.
//!
//! ```text
//!            8   12  16  20        tips
//!            7   11  15  19        DIP
//!     4      6   10  14  18        PIP   (thumb: 3 = IP)
//!      3     5   9   13  17        MCP   (thumb: 2 = MCP)
//!       2
//!        1                         thumb CMC
//!              0                   wrist
//! ```
//!
//! Coordinates are normalised image coordinates: `x` to the right, `y`
//! **downward**, `z` toward the camera.  Nothing here depends on the
//! detector that produced them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of landmarks in one hand.
pub const LANDMARK_COUNT: usize = 21;

// ════════════════════════════════════════════════════════════════════════════
// Point
// ════════════════════════════════════════════════════════════════════════════

/// One landmark position.  Serialised as `[x, y, z]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Point { x, y, z }
    }

    pub fn sub(self, o: Point) -> Point {
        Point::new(self.x - o.x, self.y - o.y, self.z - o.z)
    }

    pub fn dot(self, o: Point) -> f32 {
        self.x * o.x + self.y * o.y + self.z * o.z
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Point {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Point { x, y, z }
    }
}

impl From<Point> for [f32; 3] {
    fn from(p: Point) -> Self {
        [p.x, p.y, p.z]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Landmark / Finger — named indices
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Landmark {
    Wrist      = 0,
    ThumbCmc   = 1,
    ThumbMcp   = 2,
    ThumbIp    = 3,
    ThumbTip   = 4,
    IndexMcp   = 5,
    IndexPip   = 6,
    IndexDip   = 7,
    IndexTip   = 8,
    MiddleMcp  = 9,
    MiddlePip  = 10,
    MiddleDip  = 11,
    MiddleTip  = 12,
    RingMcp    = 13,
    RingPip    = 14,
    RingDip    = 15,
    RingTip    = 16,
    PinkyMcp   = 17,
    PinkyPip   = 18,
    PinkyDip   = 19,
    PinkyTip   = 20,
}

impl Landmark {
    pub fn index(self) -> usize { self as usize }
}

/// Bone pairs for drawing a hand skeleton.
pub const HAND_CONNECTIONS: [(Landmark, Landmark); 21] = {
    use Landmark::*;
    [
        (Wrist, ThumbCmc), (ThumbCmc, ThumbMcp), (ThumbMcp, ThumbIp), (ThumbIp, ThumbTip),
        (Wrist, IndexMcp), (IndexMcp, IndexPip), (IndexPip, IndexDip), (IndexDip, IndexTip),
        (IndexMcp, MiddleMcp), (MiddleMcp, MiddlePip), (MiddlePip, MiddleDip), (MiddleDip, MiddleTip),
        (MiddleMcp, RingMcp), (RingMcp, RingPip), (RingPip, RingDip), (RingDip, RingTip),
        (RingMcp, PinkyMcp), (PinkyMcp, PinkyPip), (PinkyPip, PinkyDip), (PinkyDip, PinkyTip),
        (Wrist, PinkyMcp),
    ]
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [Finger::Thumb, Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    /// The four fingers that decide a move.
    pub const NON_THUMB: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    pub fn tip(self) -> Landmark {
        match self {
            Finger::Thumb  => Landmark::ThumbTip,
            Finger::Index  => Landmark::IndexTip,
            Finger::Middle => Landmark::MiddleTip,
            Finger::Ring   => Landmark::RingTip,
            Finger::Pinky  => Landmark::PinkyTip,
        }
    }

    /// Joint the tip is compared against: IP for the thumb, PIP otherwise.
    pub fn reference_joint(self) -> Landmark {
        match self {
            Finger::Thumb  => Landmark::ThumbIp,
            Finger::Index  => Landmark::IndexPip,
            Finger::Middle => Landmark::MiddlePip,
            Finger::Ring   => Landmark::RingPip,
            Finger::Pinky  => Landmark::PinkyPip,
        }
    }

    /// Base-to-tip chain of four landmarks.
    pub fn chain(self) -> [Landmark; 4] {
        use Landmark::*;
        match self {
            Finger::Thumb  => [ThumbCmc,  ThumbMcp,  ThumbIp,   ThumbTip],
            Finger::Index  => [IndexMcp,  IndexPip,  IndexDip,  IndexTip],
            Finger::Middle => [MiddleMcp, MiddlePip, MiddleDip, MiddleTip],
            Finger::Ring   => [RingMcp,   RingPip,   RingDip,   RingTip],
            Finger::Pinky  => [PinkyMcp,  PinkyPip,  PinkyDip,  PinkyTip],
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandLandmarks
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LandmarkError {
    #[error("expected 21 landmarks, got {0}")]
    WrongCount(usize),

    #[error("landmark {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// The 21 landmarks of one detected hand.  Always exactly
/// [`LANDMARK_COUNT`] finite points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct HandLandmarks {
    points: Vec<Point>,
}

/// One camera frame: a hand, or `None` when no hand was detected.
pub type LandmarkFrame = Option<HandLandmarks>;

impl HandLandmarks {
    pub fn new(points: Vec<Point>) -> Result<Self, LandmarkError> {
        if points.len() != LANDMARK_COUNT {
            return Err(LandmarkError::WrongCount(points.len()));
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(LandmarkError::NonFinite { index });
        }
        Ok(HandLandmarks { points })
    }

    pub fn get(&self, l: Landmark) -> Point {
        self.points[l.index()]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Rotate every point in the image plane about the wrist.  A
    /// non-finite angle is rejected like any other non-finite point.
    pub fn rotated(&self, radians: f32) -> Result<HandLandmarks, LandmarkError> {
        let c = self.get(Landmark::Wrist);
        let (sin, cos) = radians.sin_cos();
        self.map_points(|p| {
            let dx = p.x - c.x;
            let dy = p.y - c.y;
            Point::new(c.x + dx * cos - dy * sin, c.y + dx * sin + dy * cos, p.z)
        })
    }

    /// Apply `f` to every point.  Non-finite results are rejected.
    pub fn map_points(&self, f: impl FnMut(Point) -> Point) -> Result<HandLandmarks, LandmarkError> {
        HandLandmarks::new(self.points.iter().copied().map(f).collect())
    }
}

impl TryFrom<Vec<Point>> for HandLandmarks {
    type Error = LandmarkError;
    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        HandLandmarks::new(points)
    }
}

impl From<HandLandmarks> for Vec<Point> {
    fn from(h: HandLandmarks) -> Self {
        h.points
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_hand() -> Vec<Point> {
        (0..LANDMARK_COUNT).map(|i| Point::new(i as f32 * 0.01, 0.5, 0.0)).collect()
    }

    #[test]
    fn rejects_wrong_count() {
        let mut pts = flat_hand();
        pts.pop();
        assert_eq!(HandLandmarks::new(pts), Err(LandmarkError::WrongCount(20)));
    }

    #[test]
    fn rejects_nan() {
        let mut pts = flat_hand();
        pts[7].y = f32::NAN;
        assert_eq!(HandLandmarks::new(pts), Err(LandmarkError::NonFinite { index: 7 }));
    }

    #[test]
    fn finger_chains_end_at_tip() {
        for f in Finger::ALL {
            assert_eq!(f.chain()[3], f.tip());
            assert!(f.chain().contains(&f.reference_joint()));
        }
    }

    #[test]
    fn connections_cover_every_landmark() {
        let mut seen = [false; LANDMARK_COUNT];
        for (a, b) in HAND_CONNECTIONS {
            seen[a.index()] = true;
            seen[b.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn full_turn_is_identity() {
        let h = HandLandmarks::new(flat_hand()).unwrap();
        let r = h.rotated(std::f32::consts::TAU).unwrap();
        for (a, b) in h.points().iter().zip(r.points()) {
            assert!((a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5);
        }
    }

    #[test]
    fn non_finite_rotation_is_rejected() {
        let h = HandLandmarks::new(flat_hand()).unwrap();
        assert!(matches!(h.rotated(f32::NAN), Err(LandmarkError::NonFinite { .. })));
        assert!(matches!(h.rotated(f32::INFINITY), Err(LandmarkError::NonFinite { .. })));
    }
}
