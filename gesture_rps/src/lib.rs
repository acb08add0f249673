//! # gesture_rps
//!
//! Rock, Paper, Scissors, Pencil against the computer, played with hand
//! gestures.  One hand is tracked per frame; a gesture held steadily for a
//! short streak is confirmed as a move, the computer draws its move at
//! random, and the round is scored.
//!
//! ## Gestures
//!
//! | Move | Hand shape | Beats |
//! |---|---|---|
//! | Rock | Fist | Scissors, Pencil |
//! | Paper | Open palm | Rock |
//! | Scissors | Index + middle fingers | Paper, Pencil |
//! | Pencil | Index finger only | Paper |
//!
//! Holding a gesture plays one round.  To play the same move again, drop
//! the hand or change gesture first.
//!
//! ## Visualization
//!
//! The left of the window shows the tracked hand skeleton, coloured by the
//! move it currently reads as, with a streak meter filling toward
//! confirmation.  The right side shows the score, the status line, the
//! gesture legend and the most recent rounds.
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: keys held on the keyboard pose a
//!   synthetic hand.
//! * `leap` — **Hardware mode**: polls a real LeapMotion controller via LeapC.
//!
//! ### Keyboard
//!
//! | Key | Action |
//! |---|---|
//! | `1` (hold) | Rock |
//! | `2` (hold) | Paper |
//! | `3` (hold) | Scissors |
//! | `4` (hold) | Pencil |
//! | `X` | Reset the score |
//! | `Q` / `Escape` | Quit |

pub mod app;
pub mod error;
pub mod hud;
pub mod session;
pub mod source;
pub mod visualizer;

pub use app::{run, run_headless, App, AppConfig, HeadlessReport};
pub use error::AppError;
pub use session::{DisplayUpdate, Session};
pub use source::{FrameSource, ReplaySource, SimConfig, SimFrameSource};
#[cfg(feature = "leap")]
pub use source::LeapFrameSource;
