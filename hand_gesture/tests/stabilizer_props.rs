use hand_gesture::Stabilizer;
use proptest::prelude::*;
use rps_rules::Move;

fn frame() -> impl Strategy<Value = Option<Move>> {
    prop_oneof![
        Just(None),
        Just(Some(Move::Rock)),
        Just(Some(Move::Paper)),
        Just(Some(Move::Scissors)),
        Just(Some(Move::Pencil)),
    ]
}

/// Split a frame sequence into maximal runs of the same value.
fn runs(seq: &[Option<Move>]) -> Vec<(Option<Move>, usize)> {
    let mut out: Vec<(Option<Move>, usize)> = Vec::new();
    for &m in seq {
        match out.last_mut() {
            Some((prev, n)) if *prev == m => *n += 1,
            _ => out.push((m, 1)),
        }
    }
    out
}

proptest! {
    #[test]
    fn confirms_only_when_streak_reaches_required(
        seq in prop::collection::vec(frame(), 0..200),
        required in 1u32..12,
    ) {
        let mut s = Stabilizer::new(required);
        for &m in &seq {
            let before = s.state();
            let out = s.observe(m);
            let after = s.state();
            if let Some(c) = out {
                prop_assert_eq!(Some(c), m);
                prop_assert_eq!(after.streak, required);
                prop_assert!(!before.locked || before.candidate != m);
            }
            if after.locked {
                prop_assert!(after.streak >= required);
            }
        }
    }

    #[test]
    fn one_confirmation_per_sufficient_run(
        seq in prop::collection::vec(frame(), 0..200),
        required in 1u32..12,
    ) {
        let mut s = Stabilizer::new(required);
        let confirmed: Vec<Move> = seq.iter().filter_map(|&m| s.observe(m)).collect();
        let expected: Vec<Move> = runs(&seq)
            .into_iter()
            .filter_map(|(m, n)| m.filter(|_| n >= required as usize))
            .collect();
        prop_assert_eq!(confirmed, expected);
    }
}
