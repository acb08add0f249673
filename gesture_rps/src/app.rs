//! Top-level application.
//!
//! `App` owns the [`Session`] and the [`Hud`] and advances both once per
//! tick.  [`run`] drives it from a window; [`run_headless`] drives it from a
//! finite frame source and reports the rounds played.

use std::fs;
use std::path::Path;

use hand_gesture::{Classifier, ClassifierConfig, LandmarkFrame, DEFAULT_REQUIRED_STREAK};
use rps_rules::{Opponent, RandomOpponent, Round, ScoreState};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::hud::Hud;
use crate::session::{DisplayUpdate, Session};
use crate::source::{FrameSource, SimConfig};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// How long a round result stays on the status line.
const RESULT_HOLD_MS: u64 = 1800;

/// Configuration for the full application.  Every field is optional in
/// the JSON file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub classifier:        ClassifierConfig,
    /// Consecutive frames a gesture must be held to count.
    pub required_streak:   u32,
    /// Seed for the computer's moves and the simulator; entropy when absent.
    pub seed:              Option<u64>,
    pub frame_interval_ms: u64,
    pub sim:               SimConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            classifier:        ClassifierConfig::default(),
            required_streak:   DEFAULT_REQUIRED_STREAK,
            seed:              None,
            frame_interval_ms: 30,
            sim:               SimConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| AppError::ConfigRead { path: path.to_path_buf(), source })?;
        let cfg = Self::from_json(&text)
            .map_err(|source| AppError::ConfigParse { path: path.to_path_buf(), source })?;
        cfg.validate()?;
        log::info!("loaded config from {}", path.display());
        Ok(cfg)
    }

    /// Reject values the classifier or simulator cannot use.
    pub fn validate(&self) -> Result<(), AppError> {
        let margin = self.classifier.extension_margin;
        if !margin.is_finite() {
            return Err(AppError::Config(format!("classifier.extension_margin must be finite, got {}", margin)));
        }
        let jitter = self.sim.jitter;
        if !jitter.is_finite() || jitter < 0.0 {
            return Err(AppError::Config(format!("sim.jitter must be a finite value >= 0, got {}", jitter)));
        }
        let dropout = self.sim.dropout;
        if !(0.0..=1.0).contains(&dropout) {
            return Err(AppError::Config(format!("sim.dropout must be between 0 and 1, got {}", dropout)));
        }
        Ok(())
    }

    /// Ticks a round result stays on the status line.
    pub fn result_hold_ticks(&self) -> u32 {
        (RESULT_HOLD_MS / self.frame_interval_ms.max(1)).max(1) as u32
    }

    pub fn opponent(&self) -> RandomOpponent {
        match self.seed {
            Some(s) => RandomOpponent::seeded(s),
            None    => RandomOpponent::from_entropy(),
        }
    }

    pub fn session(&self) -> Session<RandomOpponent> {
        Session::new(Classifier::new(self.classifier), self.required_streak, self.opponent())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// App
// ════════════════════════════════════════════════════════════════════════════

pub struct App<O: Opponent = RandomOpponent> {
    session:    Session<O>,
    hud:        Hud,
    last_frame: LandmarkFrame,
}

impl<O: Opponent> App<O> {
    pub fn new(session: Session<O>, hold_ticks: u32) -> Self {
        App { session, hud: Hud::new(hold_ticks), last_frame: None }
    }

    /// Process one frame and advance the HUD.
    pub fn step(&mut self, frame: LandmarkFrame) -> DisplayUpdate {
        let update = self.session.tick(frame.as_ref());
        self.hud.apply(&update);
        self.hud.tick();
        self.last_frame = frame;
        update
    }

    /// Advance animations without a new frame.
    pub fn idle(&mut self) {
        self.hud.tick();
    }

    pub fn reset(&mut self) {
        let score = self.session.reset();
        self.hud.cleared(score);
    }

    // ── Accessors for the render loop ─────────────────────────────────────

    pub fn hud(&self)         -> &Hud            { &self.hud }
    pub fn session(&self)     -> &Session<O>     { &self.session }
    pub fn last_frame(&self)  -> &LandmarkFrame  { &self.last_frame }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the windowed loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the game in a window until it is closed or `Q`/`Esc` is pressed.
///
/// The loop ticks at `frame_interval_ms`.  Each tick the held pose keys are
/// handed to the source (only the simulator uses them), one frame is
/// pulled and pushed through the session, and the window is redrawn.  A
/// replay that runs out leaves the last state on screen.
pub fn run(cfg: &AppConfig, mut source: Box<dyn FrameSource>) -> Result<ScoreState, AppError> {
    let mut vis = Visualizer::new(cfg.frame_interval_ms)?;
    let mut app = App::new(cfg.session(), cfg.result_hold_ticks());
    let mut ended = false;
    log::info!("frame source: {}", source.name());

    while vis.is_open() {
        let input = vis.poll_input();
        if input.quit { break; }
        if input.reset { app.reset(); }

        source.set_pose(input.pose);
        if ended {
            app.idle();
        } else if let Some(frame) = source.next_frame() {
            app.step(frame);
        } else {
            log::info!("{} source ended", source.name());
            ended = true;
        }

        vis.render(app.hud(), app.last_frame().as_ref(), source.name());
    }

    Ok(app.session().score())
}

// ════════════════════════════════════════════════════════════════════════════
// Headless replay
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeadlessReport {
    /// Each round with the index of the frame that confirmed it.
    pub rounds: Vec<(usize, Round)>,
    pub frames: usize,
    pub score:  ScoreState,
}

/// Feed every frame from `source` through `session` with no window.
/// At most `max_frames` are read, so a looping source still terminates.
pub fn run_headless<O: Opponent>(
    session:    &mut Session<O>,
    source:     &mut dyn FrameSource,
    max_frames: usize,
) -> HeadlessReport {
    let mut report = HeadlessReport::default();
    while report.frames < max_frames {
        let Some(frame) = source.next_frame() else { break };
        if let Some(round) = session.tick(frame.as_ref()).round {
            report.rounds.push((report.frames, round));
        }
        report.frames += 1;
    }
    report.score = session.score();
    log::info!("replayed {} frames, {} rounds", report.frames, report.rounds.len());
    report
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hud::{STATUS_CLEARED, STATUS_START};
    use crate::source::ReplaySource;
    use hand_gesture::synth::hold;
    use hand_gesture::{ExtensionAxis, Recording, ThumbPolicy};
    use pretty_assertions::assert_eq;
    use rps_rules::{Move, ScriptedOpponent};

    fn app(computer: Move, streak: u32) -> App<ScriptedOpponent> {
        let session = Session::new(Classifier::default(), streak, ScriptedOpponent::new(vec![computer]));
        App::new(session, 5)
    }

    #[test]
    fn config_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.required_streak, 10);
        assert_eq!(cfg.frame_interval_ms, 30);
        assert_eq!(cfg.result_hold_ticks(), 60);
        assert_eq!(AppConfig::from_json("{}").unwrap(), cfg);
    }

    #[test]
    fn config_partial_json() {
        let cfg = AppConfig::from_json(r#"{
            "required_streak": 4,
            "seed": 7,
            "classifier": { "axis": "palm", "thumb": "strict" },
            "sim": { "dropout": 0.1 }
        }"#).unwrap();
        assert_eq!(cfg.required_streak, 4);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.classifier.axis, ExtensionAxis::Palm);
        assert_eq!(cfg.classifier.thumb, ThumbPolicy::Strict);
        assert_eq!(cfg.classifier.extension_margin, 0.0);
        assert_eq!(cfg.sim.dropout, 0.1);
        assert_eq!(cfg.sim.jitter, SimConfig::default().jitter);
    }

    #[test]
    fn config_rejects_bad_axis() {
        assert!(AppConfig::from_json(r#"{ "classifier": { "axis": "sideways" } }"#).is_err());
    }

    #[test]
    fn missing_config_file_names_path() {
        let err = AppConfig::load("/nonexistent/gesture_rps.json").unwrap_err();
        assert!(matches!(err, AppError::ConfigRead { .. }));
        assert!(err.to_string().contains("/nonexistent/gesture_rps.json"));
    }

    #[test]
    fn validate_rejects_unusable_numbers() {
        assert!(AppConfig::default().validate().is_ok());

        for jitter in [f32::NAN, f32::INFINITY, -0.1] {
            let cfg = AppConfig { sim: SimConfig { jitter, ..SimConfig::default() }, ..AppConfig::default() };
            assert!(matches!(cfg.validate(), Err(AppError::Config(_))), "jitter {}", jitter);
        }
        for dropout in [f32::NAN, -0.5, 1.5] {
            let cfg = AppConfig { sim: SimConfig { dropout, ..SimConfig::default() }, ..AppConfig::default() };
            assert!(matches!(cfg.validate(), Err(AppError::Config(_))), "dropout {}", dropout);
        }
        let mut cfg = AppConfig::default();
        cfg.classifier.extension_margin = f32::NEG_INFINITY;
        assert!(matches!(cfg.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn load_rejects_negative_jitter() {
        let path = std::env::temp_dir().join(format!("gesture_rps_cfg_{}.json", std::process::id()));
        fs::write(&path, r#"{ "sim": { "jitter": -1.0 } }"#).unwrap();
        let err = AppConfig::load(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(err.to_string().contains("sim.jitter"));
    }

    #[test]
    fn hold_ticks_never_zero() {
        let cfg = AppConfig { frame_interval_ms: 5000, ..AppConfig::default() };
        assert_eq!(cfg.result_hold_ticks(), 1);
    }

    #[test]
    fn step_feeds_hud() {
        let mut a = app(Move::Scissors, 3);
        assert_eq!(a.hud().status.text(), STATUS_START);
        for f in hold(Some(Move::Rock), 3) {
            a.step(f);
        }
        assert_eq!(a.hud().score, ScoreState { wins: 1, losses: 0, ties: 0 });
        assert_eq!(a.hud().tray.entries.len(), 1);
        assert!(a.last_frame().is_some());
    }

    #[test]
    fn reset_clears_hud_and_score() {
        let mut a = app(Move::Paper, 2);
        for f in hold(Some(Move::Rock), 2) {
            a.step(f);
        }
        assert_eq!(a.session().score().losses, 1);
        a.reset();
        assert_eq!(a.session().score(), ScoreState::default());
        assert_eq!(a.hud().status.text(), STATUS_CLEARED);
    }

    #[test]
    fn headless_reports_rounds_in_order() {
        let mut frames = hold(Some(Move::Rock), 3);
        frames.extend(hold(None, 2));
        frames.extend(hold(Some(Move::Pencil), 3));
        let mut rec = Recording::default();
        rec.extend_frames(frames);

        let mut session = Session::new(Classifier::default(), 3, ScriptedOpponent::new(vec![Move::Paper]));
        let report = run_headless(&mut session, &mut ReplaySource::new(rec, false), usize::MAX);

        assert_eq!(report.frames, 8);
        assert_eq!(report.rounds, vec![
            (2, Round::between(Move::Rock, Move::Paper)),
            (7, Round::between(Move::Pencil, Move::Paper)),
        ]);
        assert_eq!(report.score, ScoreState { wins: 1, losses: 1, ties: 0 });
    }

    #[test]
    fn headless_stops_looping_source() {
        let mut rec = Recording::default();
        rec.extend_frames(hold(Some(Move::Paper), 2));
        let mut session = Session::new(Classifier::default(), 2, ScriptedOpponent::new(vec![Move::Rock]));
        let report = run_headless(&mut session, &mut ReplaySource::new(rec, true), 50);
        assert_eq!(report.frames, 50);
        // a held gesture replayed in a loop never releases
        assert_eq!(report.rounds.len(), 1);
    }
}
