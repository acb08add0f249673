//! Print the beats table and play typed rounds against the random opponent.

use clap::Parser;
use rps_rules::{Move, Outcome, RandomOpponent, RoundResolver, ScoreTracker};
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(name = "rps_table", about = "Rock, Paper, Scissors, Pencil rules explorer")]
struct Args {
    /// Seed for the computer's moves (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the beats table and exit
    #[arg(long)]
    table_only: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║      Rock · Paper · Scissors · Pencil — Rules        ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    print_table();
    if args.table_only {
        return;
    }

    let opponent = match args.seed {
        Some(seed) => RandomOpponent::seeded(seed),
        None       => RandomOpponent::from_entropy(),
    };
    let mut resolver = RoundResolver::new(opponent);
    let mut score    = ScoreTracker::new();

    loop {
        let Some(line) = read_line("Your move (r/p/s/n, x=reset, q=quit): ") else {
            break;
        };
        let choice = line.trim();
        if choice.is_empty() {
            continue;
        }
        if choice.eq_ignore_ascii_case("q") {
            println!("\nGoodbye!\n");
            break;
        }
        if choice.eq_ignore_ascii_case("x") {
            let s = score.reset();
            println!("  Scores cleared ({}-{}-{}).\n", s.wins, s.losses, s.ties);
            continue;
        }

        let player: Move = match choice.parse() {
            Ok(m)  => m,
            Err(e) => { println!("  ⚠  {}\n", e); continue; }
        };

        let round = resolver.resolve(player);
        let s = score.apply(round.outcome);
        println!("  You played {}. I played {}.", round.player, round.computer);
        println!("  {}", round.message());
        println!("  You {}  ·  Me {}  ·  Ties {}\n", s.wins, s.losses, s.ties);
    }
}

fn print_table() {
    print!("  {:>10} │", "");
    for c in Move::ALL {
        print!(" {:^9}", c.title());
    }
    println!();
    println!("  {:─>10}─┼{:─>40}", "", "");
    for p in Move::ALL {
        print!("  {:>10} │", p.title());
        for c in Move::ALL {
            let cell = match Outcome::of(p, c) {
                Outcome::Win  => "win",
                Outcome::Lose => "lose",
                Outcome::Tie  => "·",
            };
            print!(" {:^9}", cell);
        }
        println!();
    }
    println!();
    for m in Move::ALL {
        let beaten: Vec<&str> = m.defeats().iter().map(|d| d.name()).collect();
        println!("  {:<8} = {:<24} beats {}", m.title(), m.hand_shape(), beaten.join(", "));
    }
    println!();
}

/// `None` once stdin is closed.
fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_)          => Some(buf),
    }
}
