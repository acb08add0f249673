//! Property tests for the beats relation and score keeping.

use proptest::prelude::*;
use rps_rules::{Move, Outcome, Round, RoundResolver, ScoreState, ScoreTracker};

fn any_move() -> impl Strategy<Value = Move> {
    prop::sample::select(Move::ALL.to_vec())
}

fn any_outcome() -> impl Strategy<Value = Outcome> {
    prop::sample::select(vec![Outcome::Win, Outcome::Lose, Outcome::Tie])
}

proptest! {
    #[test]
    fn win_one_way_is_loss_the_other(a in any_move(), b in any_move()) {
        let ab = Outcome::of(a, b);
        let ba = Outcome::of(b, a);
        match ab {
            Outcome::Win  => prop_assert_eq!(ba, Outcome::Lose),
            Outcome::Lose => prop_assert_eq!(ba, Outcome::Win),
            Outcome::Tie  => {
                prop_assert_eq!(ba, Outcome::Tie);
                prop_assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn seeded_resolver_matches_round_between(seed in any::<u64>(), player in any_move()) {
        let round = RoundResolver::seeded(seed).resolve(player);
        prop_assert_eq!(round, Round::between(player, round.computer));
    }

    #[test]
    fn tracker_counts_every_outcome(outcomes in prop::collection::vec(any_outcome(), 0..64)) {
        let mut t = ScoreTracker::new();
        for &o in &outcomes {
            t.apply(o);
        }
        let expected = ScoreState {
            wins:   outcomes.iter().filter(|&&o| o == Outcome::Win).count() as u32,
            losses: outcomes.iter().filter(|&&o| o == Outcome::Lose).count() as u32,
            ties:   outcomes.iter().filter(|&&o| o == Outcome::Tie).count() as u32,
        };
        prop_assert_eq!(t.score(), expected);
        prop_assert_eq!(t.reset(), ScoreState::default());
    }
}

#[test]
fn sixteen_pairs_cover_each_outcome() {
    let mut wins = 0;
    let mut losses = 0;
    let mut ties = 0;
    for p in Move::ALL {
        for c in Move::ALL {
            match Outcome::of(p, c) {
                Outcome::Win  => wins += 1,
                Outcome::Lose => losses += 1,
                Outcome::Tie  => ties += 1,
            }
        }
    }
    // Six winning pairs in the table, each mirrored as a loss.
    assert_eq!((wins, losses, ties), (6, 6, 4));
}
