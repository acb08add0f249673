//! Frame sources: where each tick's hand landmarks come from.
//!
//! The public interface is [`FrameSource`], polled once per tick on the
//! main loop.  Consumers don't need to know whether frames come from real
//! hardware, a recording, or the keyboard simulator.

use hand_gesture::synth::{hand_for, jittered};
use hand_gesture::{LandmarkFrame, Recording};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rps_rules::Move;
use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════
// FrameSource trait — unified interface for hw, replay and sim
// ════════════════════════════════════════════════════════════════════════════

pub trait FrameSource {
    /// The next frame, `Some(None)` when no hand is visible, or `None` once
    /// the source is exhausted.
    fn next_frame(&mut self) -> Option<LandmarkFrame>;

    /// Short name for logs and the status bar.
    fn name(&self) -> &str;

    /// The pose held on the keyboard this tick.  Sources that observe a
    /// real or recorded hand ignore it.
    fn set_pose(&mut self, _pose: Option<Move>) {}
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn next_frame(&mut self) -> Option<LandmarkFrame> { (**self).next_frame() }
    fn name(&self) -> &str                           { (**self).name() }
    fn set_pose(&mut self, pose: Option<Move>)        { (**self).set_pose(pose) }
}

// ════════════════════════════════════════════════════════════════════════════
// SimFrameSource — keyboard-held poses (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Noise applied to simulated hands.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Uniform per-coordinate noise, image units.
    pub jitter:  f32,
    /// Probability that a frame loses the hand entirely.
    pub dropout: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig { jitter: 0.004, dropout: 0.0 }
    }
}

/// Renders the currently held pose as synthetic landmarks every tick.
pub struct SimFrameSource {
    pose:   Option<Move>,
    config: SimConfig,
    rng:    SmallRng,
}

impl SimFrameSource {
    pub fn new(config: SimConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None    => SmallRng::from_os_rng(),
        };
        SimFrameSource { pose: None, config, rng }
    }
}

impl FrameSource for SimFrameSource {
    fn next_frame(&mut self) -> Option<LandmarkFrame> {
        let Some(m) = self.pose else { return Some(None) };
        let dropout = f64::from(self.config.dropout).clamp(0.0, 1.0);
        if dropout > 0.0 && self.rng.random_bool(dropout) {
            return Some(None);
        }
        Some(Some(jittered(&hand_for(m), &mut self.rng, self.config.jitter)))
    }

    fn name(&self) -> &str {
        "keyboard"
    }

    fn set_pose(&mut self, pose: Option<Move>) {
        if pose != self.pose {
            log::debug!("sim pose: {:?}", pose);
        }
        self.pose = pose;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ReplaySource — recorded frames
// ════════════════════════════════════════════════════════════════════════════

pub struct ReplaySource {
    frames:  Vec<LandmarkFrame>,
    pos:     usize,
    looping: bool,
}

impl ReplaySource {
    pub fn new(recording: Recording, looping: bool) -> Self {
        ReplaySource {
            frames: recording.frames.into_iter().map(|f| f.hand).collect(),
            pos:    0,
            looping,
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }
}

impl FrameSource for ReplaySource {
    fn next_frame(&mut self) -> Option<LandmarkFrame> {
        if self.pos >= self.frames.len() {
            if !self.looping || self.frames.is_empty() {
                return None;
            }
            self.pos = 0;
        }
        let frame = self.frames[self.pos].clone();
        self.pos += 1;
        Some(frame)
    }

    fn name(&self) -> &str {
        "replay"
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapFrameSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Frame source backed by a LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
///
/// Leap joints are in millimetres above the device with `y` pointing up.
/// They are mapped into the image-style layout the classifier expects: a
/// 400 mm cube centred over the device, `y` flipped so it grows downward.
/// The right hand is preferred when both are visible.
#[cfg(feature = "leap")]
pub struct LeapFrameSource {
    connection: leaprs::Connection,
}

#[cfg(feature = "leap")]
impl LeapFrameSource {
    const POLL_MS:  u32 = 30;
    const SPAN_MM:  f32 = 400.0;
    const FLOOR_MM: f32 = 360.0;

    pub fn open() -> Result<Self, crate::error::AppError> {
        use crate::error::AppError;
        use leaprs::*;

        let mut connection = Connection::create(ConnectionConfig::default())
            .map_err(|e| AppError::Tracker(format!("cannot create LeapC connection: {:?}", e)))?;
        connection
            .open()
            .map_err(|e| AppError::Tracker(format!("cannot open LeapMotion device: {:?}", e)))?;
        log::info!("LeapMotion connection open");
        Ok(LeapFrameSource { connection })
    }

    fn to_image(x: f32, y: f32, z: f32) -> hand_gesture::Point {
        hand_gesture::Point::new(
            0.5 + x / Self::SPAN_MM,
            (Self::FLOOR_MM - y) / Self::SPAN_MM,
            z / Self::SPAN_MM,
        )
    }

    fn landmarks(hand: &leaprs::Hand) -> Option<hand_gesture::HandLandmarks> {
        macro_rules! joint {
            ($v:expr) => {{
                let v = $v;
                Self::to_image(v.x, v.y, v.z)
            }};
        }

        let digits: Vec<_> = hand.digits().collect();
        if digits.len() < 5 {
            return None;
        }

        let mut points = Vec::with_capacity(hand_gesture::LANDMARK_COUNT);
        points.push(joint!(digits[2].metacarpal().prev_joint()));
        // Leap's thumb metacarpal has zero length; its proximal bone starts at the CMC.
        let thumb = &digits[0];
        points.push(joint!(thumb.proximal().prev_joint()));
        points.push(joint!(thumb.intermediate().prev_joint()));
        points.push(joint!(thumb.distal().prev_joint()));
        points.push(joint!(thumb.distal().next_joint()));
        for d in &digits[1..5] {
            points.push(joint!(d.proximal().prev_joint()));
            points.push(joint!(d.intermediate().prev_joint()));
            points.push(joint!(d.distal().prev_joint()));
            points.push(joint!(d.distal().next_joint()));
        }

        match hand_gesture::HandLandmarks::new(points) {
            Ok(h)  => Some(h),
            Err(e) => {
                log::warn!("dropping malformed tracking frame: {}", e);
                None
            }
        }
    }
}

#[cfg(feature = "leap")]
impl FrameSource for LeapFrameSource {
    fn next_frame(&mut self) -> Option<LandmarkFrame> {
        use leaprs::*;

        let msg = match self.connection.poll(Self::POLL_MS) {
            Ok(m)  => m,
            Err(e) => {
                log::debug!("leap poll: {:?}", e);
                return Some(None);
            }
        };

        if let Event::Tracking(frame) = msg.event() {
            let hands: Vec<_> = frame.hands().collect();
            let hand = hands
                .iter()
                .find(|h| h.hand_type() == HandType::Right)
                .or_else(|| hands.first());
            return Some(hand.and_then(|h| Self::landmarks(h)));
        }
        Some(None)
    }

    fn name(&self) -> &str {
        "leap"
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_gesture::{classify, synth::hold};

    fn quiet() -> SimConfig {
        SimConfig { jitter: 0.0, dropout: 0.0 }
    }

    #[test]
    fn sim_without_pose_shows_no_hand() {
        let mut src = SimFrameSource::new(quiet(), Some(1));
        for _ in 0..5 {
            assert_eq!(src.next_frame(), Some(None));
        }
    }

    #[test]
    fn sim_renders_held_pose() {
        let mut src = SimFrameSource::new(SimConfig::default(), Some(1));
        for m in Move::ALL {
            src.set_pose(Some(m));
            let frame = src.next_frame().unwrap();
            assert_eq!(classify(frame.as_ref()), Some(m));
        }
        src.set_pose(None);
        assert_eq!(src.next_frame(), Some(None));
    }

    #[test]
    fn sim_dropout_one_always_loses_hand() {
        let mut src = SimFrameSource::new(SimConfig { jitter: 0.0, dropout: 1.0 }, Some(1));
        src.set_pose(Some(Move::Paper));
        assert!((0..20).all(|_| src.next_frame() == Some(None)));
    }

    #[test]
    fn sim_dropout_is_partial() {
        let mut src = SimFrameSource::new(SimConfig { jitter: 0.0, dropout: 0.3 }, Some(9));
        src.set_pose(Some(Move::Rock));
        let dropped = (0..1000).filter(|_| src.next_frame() == Some(None)).count();
        assert!((200..400).contains(&dropped), "dropped {}", dropped);
    }

    #[test]
    fn seeded_sim_is_reproducible() {
        let mut a = SimFrameSource::new(SimConfig::default(), Some(42));
        let mut b = SimFrameSource::new(SimConfig::default(), Some(42));
        a.set_pose(Some(Move::Pencil));
        b.set_pose(Some(Move::Pencil));
        for _ in 0..10 {
            assert_eq!(a.next_frame(), b.next_frame());
        }
    }

    fn recording(frames: Vec<LandmarkFrame>) -> Recording {
        let mut rec = Recording::default();
        rec.extend_frames(frames);
        rec
    }

    #[test]
    fn replay_ends() {
        let mut src = ReplaySource::new(recording(hold(Some(Move::Rock), 3)), false);
        assert_eq!(src.len(), 3);
        assert_eq!((0..3).filter_map(|_| src.next_frame()).count(), 3);
        assert_eq!(src.next_frame(), None);
    }

    #[test]
    fn replay_loops() {
        let mut frames = hold(Some(Move::Rock), 1);
        frames.push(None);
        let mut src = ReplaySource::new(recording(frames), true);
        let seen: Vec<bool> = (0..5).map(|_| src.next_frame().unwrap().is_some()).collect();
        assert_eq!(seen, [true, false, true, false, true]);
    }

    #[test]
    fn empty_looping_replay_still_ends() {
        let mut src = ReplaySource::new(Recording::default(), true);
        assert!(src.is_empty());
        assert_eq!(src.next_frame(), None);
    }

    #[test]
    fn boxed_source_forwards() {
        let mut src: Box<dyn FrameSource> = Box::new(SimFrameSource::new(quiet(), Some(1)));
        src.set_pose(Some(Move::Scissors));
        assert_eq!(src.name(), "keyboard");
        assert_eq!(classify(src.next_frame().unwrap().as_ref()), Some(Move::Scissors));
    }
}
