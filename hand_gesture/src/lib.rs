//! # hand_gesture
//!
//! Turns a stream of per-frame hand landmarks into confirmed
//! Rock / Paper / Scissors / Pencil moves.
//!
//! ```text
//!  LandmarkFrame ──► Classifier ──► Option<Move> ──► Stabilizer ──► confirmed Move
//!   (per frame)      (stateless)     (per frame)     (lockout)      (once per hold)
//! ```
//!
//! * [`landmark`] — the 21-point hand layout and validated [`HandLandmarks`].
//! * [`classifier`] — finger extension → move, with tunable thresholds.
//! * [`stabilizer`] — debounce / lockout so one held gesture is one round.
//! * [`synth`] — synthetic hands for simulation and tests.
//! * [`recording`] — JSON recordings and labeled fixture sets.
//!
//! ## Example
//!
//! ```rust
//! use hand_gesture::{synth, Classifier, Stabilizer};
//! use rps_rules::Move;
//!
//! let classifier = Classifier::default();
//! let mut stabilizer = Stabilizer::new(3);
//!
//! let confirmed: Vec<Move> = synth::hold(Some(Move::Rock), 5)
//!     .iter()
//!     .filter_map(|f| stabilizer.observe(classifier.classify(f.as_ref())))
//!     .collect();
//! assert_eq!(confirmed, [Move::Rock]);
//! ```

pub mod classifier;
pub mod landmark;
pub mod recording;
pub mod stabilizer;
pub mod synth;

pub use classifier::{classify, Classifier, ClassifierConfig, ExtensionAxis, FingerPattern, ThumbPolicy};
pub use landmark::{Finger, HandLandmarks, Landmark, LandmarkError, LandmarkFrame, Point, HAND_CONNECTIONS, LANDMARK_COUNT};
pub use recording::{RecordedFrame, Recording, RecordingError};
pub use stabilizer::{Stabilizer, StabilizerState, DEFAULT_REQUIRED_STREAK};
