//! Software-rendered visualizer using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────┬───────────────────────┐
//! │  ROCK PAPER SCISSORS PENCIL              │  YOU    ME    TIES    │
//! │                                          │   2      1      0     │
//! │        [hand skeleton]                   │                       │
//! │                                          │  status line          │
//! │        [result banner]                   │                       │
//! │                                          │  legend               │
//! │  [streak meter ▓▓▓▓▓▓░░░░]               │  recent rounds        │
//! ├──────────────────────────────────────────┴───────────────────────┤
//! │  key help                                                        │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use hand_gesture::{Finger, HandLandmarks, Landmark, HAND_CONNECTIONS};
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use rps_rules::Move;

use crate::error::AppError;
use crate::hud::{legend, move_color, outcome_color, Hud};

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W:     usize = 1280;
pub const WIN_H:     usize = 720;
const SIDE_W:        usize = 440;
const VIEW_W:        usize = WIN_W - SIDE_W;
const VIEW_X:        usize = 40;
const VIEW_Y:        usize = 70;
const VIEW_SIZE:     usize = 540;
const METER_Y:       usize = VIEW_Y + VIEW_SIZE + 16;
const METER_H:       usize = 14;
const HELP_Y:        usize = WIN_H - 24;
const BG_COLOR:      u32   = 0xFF1A1A2E;
const SIDE_BG:       u32   = 0xFF16213E;
const VIEW_BG:       u32   = 0xFF0F1A2C;
const TEXT_BG:       u32   = 0xFF0F3460;
const IDLE_COLOR:    u32   = 0xFF8899AA;
const TEXT_COLOR:    u32   = 0xFFEEEEEE;
const DIM_COLOR:     u32   = 0xFF888888;
const GOLD:          u32   = 0xFFFFD700;

/// Keys held to show a pose in simulation.
pub const POSE_KEYS: [(Key, Move); 4] = [
    (Key::Key1, Move::Rock),
    (Key::Key2, Move::Paper),
    (Key::Key3, Move::Scissors),
    (Key::Key4, Move::Pencil),
];

/// One tick of keyboard input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Input {
    pub pose:  Option<Move>,
    pub reset: bool,
    pub quit:  bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf:    Vec<u32>,
}

impl Visualizer {
    pub fn new(frame_interval_ms: u64) -> Result<Self, AppError> {
        let mut window = Window::new(
            "Rock Paper Scissors Pencil",
            WIN_W, WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| AppError::Window(e.to_string()))?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(frame_interval_ms)));
        log::info!("window open ({}×{}, {} ms/frame)", WIN_W, WIN_H, frame_interval_ms);

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    pub fn poll_input(&self) -> Input {
        let quit = !self.window.is_open()
            || self.window.is_key_pressed(Key::Q, KeyRepeat::No)
            || self.window.is_key_pressed(Key::Escape, KeyRepeat::No);
        let reset = self.window.is_key_pressed(Key::X, KeyRepeat::No);
        // First held key wins when several are down.
        let pose = POSE_KEYS
            .iter()
            .find(|(k, _)| self.window.is_key_down(*k))
            .map(|&(_, m)| m);
        Input { pose, reset, quit }
    }

    /// Render one frame.
    pub fn render(&mut self, hud: &Hud, hand: Option<&HandLandmarks>, source: &str) {
        self.buf.fill(BG_COLOR);

        // ── Title ─────────────────────────────────────────────────────────
        self.draw_label("ROCK PAPER SCISSORS PENCIL", VIEW_X, 24, 3, GOLD);
        self.draw_label(&format!("source: {}", source), VIEW_X + 560, 32, 2, DIM_COLOR);

        // ── Hand view ─────────────────────────────────────────────────────
        self.fill_rect(VIEW_X, VIEW_Y, VIEW_SIZE, VIEW_SIZE, VIEW_BG);
        self.draw_border(VIEW_X, VIEW_Y, VIEW_SIZE, VIEW_SIZE, TEXT_BG);
        match hand {
            Some(h) => self.draw_hand(h, hud.detected.map_or(IDLE_COLOR, move_color)),
            None    => self.draw_label("no hand", VIEW_X + VIEW_SIZE / 2 - 42, VIEW_Y + VIEW_SIZE / 2, 3, DIM_COLOR),
        }
        if let Some(m) = hud.detected {
            self.draw_label(m.title(), VIEW_X + 12, VIEW_Y + 12, 3, move_color(m));
        }

        // ── Result banner ─────────────────────────────────────────────────
        if let Some(flash) = &hud.flash {
            let color = blend(VIEW_BG, outcome_color(flash.round.outcome), flash.intensity());
            let y = VIEW_Y + VIEW_SIZE - 90;
            self.fill_rect(VIEW_X + 20, y, VIEW_SIZE - 40, 60, blend(VIEW_BG, TEXT_BG, flash.intensity()));
            let banner = match flash.round.outcome {
                rps_rules::Outcome::Win  => "YOU WIN",
                rps_rules::Outcome::Lose => "I WIN",
                rps_rules::Outcome::Tie  => "TIE",
            };
            self.draw_label(banner, VIEW_X + 40, y + 14, 6, color);
        }

        // ── Streak meter ──────────────────────────────────────────────────
        self.fill_rect(VIEW_X, METER_Y, VIEW_SIZE, METER_H, TEXT_BG);
        let filled = (VIEW_SIZE as f32 * hud.streak.clamp(0.0, 1.0)) as usize;
        self.fill_rect(VIEW_X, METER_Y, filled, METER_H, hud.detected.map_or(IDLE_COLOR, move_color));
        self.draw_border(VIEW_X, METER_Y, VIEW_SIZE, METER_H, DIM_COLOR);

        // ── Side panel ────────────────────────────────────────────────────
        self.fill_rect(VIEW_W, 0, SIDE_W, HELP_Y, SIDE_BG);
        self.draw_side_panel(hud);

        // ── Key help ──────────────────────────────────────────────────────
        self.fill_rect(0, HELP_Y, WIN_W, WIN_H - HELP_Y, TEXT_BG);
        self.draw_label(
            "hold 1=rock 2=paper 3=scissors 4=pencil   x=reset   q/esc=quit",
            10, HELP_Y + 6, 2, DIM_COLOR,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── Hand skeleton ─────────────────────────────────────────────────────

    fn view_point(p: hand_gesture::Point) -> (isize, isize) {
        let x = VIEW_X as f32 + p.x.clamp(0.0, 1.0) * VIEW_SIZE as f32;
        let y = VIEW_Y as f32 + p.y.clamp(0.0, 1.0) * VIEW_SIZE as f32;
        (x as isize, y as isize)
    }

    fn draw_hand(&mut self, hand: &HandLandmarks, color: u32) {
        for (a, b) in HAND_CONNECTIONS {
            let pa = Self::view_point(hand.get(a));
            let pb = Self::view_point(hand.get(b));
            self.draw_line(pa, pb, color);
        }
        for (i, &p) in hand.points().iter().enumerate() {
            let (x, y) = Self::view_point(p);
            let tip = is_fingertip(i);
            let r = if tip { 5 } else { 3 };
            let c = if i == Landmark::Wrist.index() { GOLD } else { TEXT_COLOR };
            self.fill_rect(
                (x - r).max(0) as usize, (y - r).max(0) as usize,
                (2 * r) as usize, (2 * r) as usize, c,
            );
        }
    }

    // ── Side panel ────────────────────────────────────────────────────────

    fn draw_side_panel(&mut self, hud: &Hud) {
        let x = VIEW_W + 24;

        // Score
        let cols = [("YOU", hud.score.wins), ("ME", hud.score.losses), ("TIES", hud.score.ties)];
        for (i, (label, n)) in cols.iter().enumerate() {
            let cx = x + i * 130;
            self.draw_label(label, cx, 30, 2, DIM_COLOR);
            self.draw_label(&n.to_string(), cx, 52, 6, TEXT_COLOR);
        }

        // Status
        let mut y = 130;
        self.fill_rect(VIEW_W + 12, y - 10, SIDE_W - 24, 80, TEXT_BG);
        for line in hud.status.text().lines() {
            self.draw_label(line, x, y, 2, TEXT_COLOR);
            y += 20;
        }

        // Legend
        let mut y = 230;
        self.draw_label("GESTURES", x, y, 2, GOLD);
        y += 24;
        for (m, line) in Move::ALL.into_iter().zip(legend()) {
            self.fill_rect(x, y, 10, 10, move_color(m));
            self.draw_label(&line, x + 18, y, 2, TEXT_COLOR);
            y += 20;
        }

        // Recent rounds, newest first
        let mut y = 360;
        self.draw_label("RECENT ROUNDS", x, y, 2, GOLD);
        y += 26;
        for entry in hud.tray.entries.iter().rev() {
            let ex = x + ((SIDE_W - 48) as f32 * (1.0 - entry.slide_in)) as usize;
            let r = entry.round;
            self.fill_rect(ex, y, 14, 14, move_color(r.player));
            self.fill_rect(ex + 18, y, 14, 14, move_color(r.computer));
            let text = format!("{} v {}  {}", r.player, r.computer, r.outcome.label());
            self.draw_label(&text, ex + 42, y + 2, 2, outcome_color(r.outcome));
            y += 22;
            if y + 22 > HELP_Y { break; }
        }
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y+h).min(WIN_H) {
            for col in x..(x+w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        if w == 0 || h == 0 { return; }
        for col in x..(x+w).min(WIN_W) {
            self.set_pixel(col, y, color);
            self.set_pixel(col, y + h - 1, color);
        }
        for row in y..(y+h).min(WIN_H) {
            self.set_pixel(x, row, color);
            self.set_pixel(x + w - 1, row, color);
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < WIN_W && y < WIN_H {
            self.buf[y * WIN_W + x] = color;
        }
    }

    /// Bresenham, two pixels thick.
    fn draw_line(&mut self, (x0, y0): (isize, isize), (x1, y1): (isize, isize), color: u32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let (mut x, mut y, mut err) = (x0, y0, dx + dy);
        loop {
            if x >= 0 && y >= 0 {
                let (ux, uy) = (x as usize, y as usize);
                self.set_pixel(ux,     uy,     color);
                self.set_pixel(ux + 1, uy,     color);
                self.set_pixel(ux,     uy + 1, color);
                self.set_pixel(ux + 1, uy + 1, color);
            }
            if x == x1 && y == y1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x += sx; }
            if e2 <= dx { err += dx; y += sy; }
        }
    }

    /// 3×5 bitmap text, each font pixel drawn as a `scale`×`scale` block.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch).unwrap_or(FALLBACK_GLYPH);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
            if cx + 4 * scale > WIN_W { break; }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

const FALLBACK_GLYPH: [u8; 5] = [0b000, 0b000, 0b010, 0b000, 0b000];

fn char_glyph(c: char) -> Option<[u8; 5]> {
    Some(match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '…' => [0b000, 0b000, 0b000, 0b000, 0b101],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => return None,
    })
}

fn is_fingertip(i: usize) -> bool {
    Finger::ALL.iter().any(|f| f.tip().index() == i)
}

/// Alpha-blend two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0-t) + cb as f32 * t) as u32;
    let ar = (a >> 16) & 0xFF; let br = (b >> 16) & 0xFF;
    let ag = (a >>  8) & 0xFF; let bg = (b >>  8) & 0xFF;
    let ab =  a        & 0xFF; let bb =  b        & 0xFF;
    0xFF000000 | (lerp(ar,br) << 16) | (lerp(ag,bg) << 8) | lerp(ab,bb)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
