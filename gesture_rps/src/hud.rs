//! Heads-up display state.
//!
//! Everything drawn around the hand view that changes over time: the
//! status line, the result flash after each round, the recent-round tray
//! and the streak meter.  Pure state; the visualizer only reads it.

use rps_rules::{Move, Outcome, Round, ScoreState};

use crate::session::DisplayUpdate;

// ════════════════════════════════════════════════════════════════════════════
// Color palette — move → RGB
// ════════════════════════════════════════════════════════════════════════════

/// ARGB colour for a move: four hues a quarter-turn apart.
pub fn move_color(m: Move) -> u32 {
    let i = Move::ALL.iter().position(|&x| x == m).unwrap_or(0);
    hsv_to_argb(i as f32 * 90.0 + 15.0, 0.70, 0.95)
}

pub fn outcome_color(o: Outcome) -> u32 {
    match o {
        Outcome::Win  => 0xFF4CD964,
        Outcome::Lose => 0xFFFF5A5F,
        Outcome::Tie  => 0xFFFFD700,
    }
}

/// Convert HSV → packed ARGB (0xAARRGGBB, A=0xFF).
pub fn hsv_to_argb(h: f32, s: f32, v: f32) -> u32 {
    let h  = h.rem_euclid(360.0);
    let hi = (h / 60.0) as u32;
    let f  = h / 60.0 - hi as f32;
    let p  = v * (1.0 - s);
    let q  = v * (1.0 - s * f);
    let t  = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match hi {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    let ri = (r * 255.0) as u32;
    let gi = (g * 255.0) as u32;
    let bi = (b * 255.0) as u32;
    0xFF000000 | (ri << 16) | (gi << 8) | bi
}

// ════════════════════════════════════════════════════════════════════════════
// Legend
// ════════════════════════════════════════════════════════════════════════════

/// `"Rock = Fist"` and so on, one line per move.
pub fn legend() -> impl Iterator<Item = String> {
    Move::ALL.into_iter().map(|m| format!("{} = {}", m.title(), m.hand_shape()))
}

// ════════════════════════════════════════════════════════════════════════════
// StatusLine
// ════════════════════════════════════════════════════════════════════════════

pub const STATUS_START:   &str = "Show a gesture to start!";
pub const STATUS_WAITING: &str = "Waiting for a gesture…";
pub const STATUS_PROMPT:  &str = "Show a gesture to play!";
pub const STATUS_CLEARED: &str = "Scores cleared. Show a gesture to play!";

/// The player-facing status text.
///
/// A round result stays up for `hold_ticks` ticks, then gives way to the
/// play prompt.  Outside that window a tick with no recognised gesture
/// shows the waiting message.
#[derive(Clone, Debug)]
pub struct StatusLine {
    text:       String,
    hold_ticks: u32,
    remaining:  u32,
}

impl StatusLine {
    pub fn new(hold_ticks: u32) -> Self {
        StatusLine { text: STATUS_START.to_string(), hold_ticks, remaining: 0 }
    }

    pub fn update(&mut self, u: &DisplayUpdate) {
        if let Some(round) = u.round {
            self.text = played(&round);
            self.remaining = self.hold_ticks;
            return;
        }
        if self.remaining > 0 {
            self.remaining -= 1;
            if self.remaining == 0 {
                self.text = STATUS_PROMPT.to_string();
            }
            return;
        }
        if u.detected.is_none() {
            self.text = STATUS_WAITING.to_string();
        }
    }

    pub fn cleared(&mut self) {
        self.text = STATUS_CLEARED.to_string();
        self.remaining = 0;
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// `"You played rock. I played scissors.\nYou win! Rock beats scissors."`
pub fn played(round: &Round) -> String {
    format!("You played {}. I played {}.\n{}", round.player, round.computer, round.message())
}

// ════════════════════════════════════════════════════════════════════════════
// ResultFlash — banner animation after a round
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct ResultFlash {
    pub round:    Round,
    /// 0.0 → 1.0; drives the fade.
    pub progress: f32,
}

impl ResultFlash {
    pub fn new(round: Round) -> Self {
        ResultFlash { round, progress: 0.0 }
    }
    pub fn tick(&mut self) { self.progress = (self.progress + 0.03).min(1.0); }
    pub fn done(&self) -> bool { self.progress >= 1.0 }
    /// Banner intensity: full for the first half, then fading out.
    pub fn intensity(&self) -> f32 {
        if self.progress < 0.5 { 1.0 } else { (1.0 - self.progress) * 2.0 }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// RoundTray — recent rounds on the side panel
// ════════════════════════════════════════════════════════════════════════════

pub const TRAY_CAPACITY: usize = 8;

#[derive(Clone, Debug)]
pub struct TrayEntry {
    pub round:    Round,
    /// Animation: how far the entry has slid into the tray (0.0–1.0).
    pub slide_in: f32,
}

/// The most recent rounds, oldest first.
#[derive(Debug, Default)]
pub struct RoundTray {
    pub entries: Vec<TrayEntry>,
}

impl RoundTray {
    pub fn record(&mut self, round: Round) {
        self.entries.push(TrayEntry { round, slide_in: 0.0 });
        if self.entries.len() > TRAY_CAPACITY {
            self.entries.remove(0);
        }
    }

    /// Advance slide-in animations.
    pub fn tick(&mut self) {
        for e in &mut self.entries {
            if e.slide_in < 1.0 {
                e.slide_in = (e.slide_in + 0.08).min(1.0);
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Hud
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct Hud {
    pub status:   StatusLine,
    pub flash:    Option<ResultFlash>,
    pub tray:     RoundTray,
    pub score:    ScoreState,
    /// This tick's classification and stabilizer progress (streak meter).
    pub detected: Option<Move>,
    pub streak:   f32,
}

impl Hud {
    pub fn new(hold_ticks: u32) -> Self {
        Hud {
            status:   StatusLine::new(hold_ticks),
            flash:    None,
            tray:     RoundTray::default(),
            score:    ScoreState::default(),
            detected: None,
            streak:   0.0,
        }
    }

    pub fn apply(&mut self, u: &DisplayUpdate) {
        self.status.update(u);
        self.score    = u.score;
        self.detected = u.detected;
        self.streak   = u.progress;
        if let Some(round) = u.round {
            self.flash = Some(ResultFlash::new(round));
            self.tray.record(round);
        }
    }

    /// Advance animations by one frame.
    pub fn tick(&mut self) {
        if let Some(ref mut f) = self.flash {
            f.tick();
            if f.done() { self.flash = None; }
        }
        self.tray.tick();
    }

    pub fn cleared(&mut self, score: ScoreState) {
        self.status.cleared();
        self.score = score;
        self.flash = None;
        self.tray.clear();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
