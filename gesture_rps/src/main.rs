//! gesture_rps — entry point.

use std::path::PathBuf;

use clap::Parser;
use gesture_rps::{run, run_headless, AppConfig, AppError, FrameSource, ReplaySource};
use hand_gesture::Recording;
use rps_rules::ScoreState;

/// Frames read by a looping headless replay before it stops.
const HEADLESS_LOOP_LIMIT: usize = 100_000;

#[derive(Parser, Debug)]
#[command(name = "gesture_rps", about = "Rock, Paper, Scissors, Pencil with hand gestures")]
struct Args {
    /// JSON config file (every field optional)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Replay a recorded landmark sequence instead of a live source
    #[arg(long)]
    replay: Option<PathBuf>,

    /// No window: run the replay to the end and print the rounds
    #[arg(long)]
    headless: bool,

    /// Seed for the computer's moves
    #[arg(long)]
    seed: Option<u64>,

    /// Frames a gesture must be held to count
    #[arg(long)]
    required_streak: Option<u32>,

    /// Simulated landmark noise, image units
    #[arg(long)]
    jitter: Option<f32>,

    /// Restart the replay when it ends
    #[arg(long = "loop")]
    looping: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Rock · Paper · Scissors · Pencil — gestures         ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    match try_main(args) {
        Ok(score) => {
            println!();
            println!("  Final score — you {}  me {}  ties {}", score.wins, score.losses, score.ties);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn try_main(args: Args) -> Result<ScoreState, AppError> {
    let mut cfg = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None       => AppConfig::default(),
    };
    if let Some(seed)   = args.seed            { cfg.seed = Some(seed); }
    if let Some(n)      = args.required_streak { cfg.required_streak = n; }
    if let Some(jitter) = args.jitter          { cfg.sim.jitter = jitter; }
    cfg.validate()?;

    if args.headless {
        let path = args.replay.as_ref().ok_or(AppError::HeadlessWithoutReplay)?;
        let mut source = ReplaySource::new(Recording::load(path)?, args.looping);
        if source.is_looping() {
            log::warn!("looping headless replay stops after {} frames", HEADLESS_LOOP_LIMIT);
        }
        println!("  Mode: headless replay of {}", path.display());
        println!();

        let mut session = cfg.session();
        let report = run_headless(&mut session, &mut source, HEADLESS_LOOP_LIMIT);
        for (frame, round) in &report.rounds {
            println!(
                "  [frame {:>5}]  You played {}. I played {}.  {}",
                frame, round.player, round.computer, round.message()
            );
        }
        println!();
        println!("  {} frames, {} rounds", report.frames, report.rounds.len());
        return Ok(report.score);
    }

    let source: Box<dyn FrameSource> = match &args.replay {
        Some(path) => {
            println!("  Mode: replay of {}", path.display());
            Box::new(ReplaySource::new(Recording::load(path)?, args.looping))
        }
        None => live_source(&cfg)?,
    };

    println!();
    println!("  Opening window…");
    println!();
    run(&cfg, source)
}

#[cfg(feature = "leap")]
fn live_source(_cfg: &AppConfig) -> Result<Box<dyn FrameSource>, AppError> {
    println!("  Mode: LeapMotion hardware");
    Ok(Box::new(gesture_rps::LeapFrameSource::open()?))
}

#[cfg(not(feature = "leap"))]
fn live_source(cfg: &AppConfig) -> Result<Box<dyn FrameSource>, AppError> {
    println!("  Mode: keyboard simulation  (use --features leap for hardware)");
    Ok(Box::new(gesture_rps::SimFrameSource::new(cfg.sim, cfg.seed)))
}
