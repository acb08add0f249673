//! landmark_check — run the classifier over a labeled landmark recording
//! and report every frame whose classification disagrees with its label.

use clap::{Parser, ValueEnum};
use hand_gesture::{Classifier, ClassifierConfig, ExtensionAxis, Recording, ThumbPolicy};
use rps_rules::Move;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Axis {
    ImageUp,
    Palm,
}

#[derive(Parser, Debug)]
#[command(name = "landmark_check", about = "Validate classifier thresholds against labeled hand landmarks")]
struct Args {
    /// Recording with a `label` on each frame
    path: String,

    /// Extension axis
    #[arg(long, value_enum, default_value = "image-up")]
    axis: Axis,

    /// Extension margin
    #[arg(long, default_value_t = 0.0)]
    margin: f32,

    /// Require the thumb for Rock (curled) and Paper (extended)
    #[arg(long)]
    strict_thumb: bool,

    /// Print every frame, not only mismatches
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let recording = match Recording::load(&args.path) {
        Ok(r)  => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let classifier = Classifier::new(ClassifierConfig {
        axis: match args.axis {
            Axis::ImageUp => ExtensionAxis::ImageUp,
            Axis::Palm    => ExtensionAxis::Palm,
        },
        extension_margin: args.margin,
        thumb: if args.strict_thumb { ThumbPolicy::Strict } else { ThumbPolicy::Ignore },
    });

    let mut mismatches = 0usize;
    for (i, frame) in recording.frames.iter().enumerate() {
        let got = classifier.classify(frame.hand.as_ref());
        let ok = got == frame.label;
        if !ok {
            mismatches += 1;
        }
        if !ok || args.verbose {
            let pattern = frame.hand.as_ref().and_then(|h| classifier.finger_pattern(h));
            println!(
                "  [{:>4}]  {}  expected {:<9} got {:<9} fingers {:?}",
                i,
                if ok { "✓" } else { "✗" },
                label(frame.label),
                label(got),
                pattern,
            );
        }
    }

    let total = recording.len();
    println!();
    println!("  {} / {} frames match ({} mismatched)", total - mismatches, total, mismatches);
    if mismatches > 0 {
        std::process::exit(1);
    }
}

fn label(m: Option<Move>) -> &'static str {
    m.map_or("none", Move::name)
}
