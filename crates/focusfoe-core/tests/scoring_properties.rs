//! Property tests for the scoring contract.

use focusfoe_core::scoring::{
    session_multiplier, MultiplierInput, WrapGrade, MULTIPLIER_CEIL, MULTIPLIER_FLOOR,
};
use proptest::prelude::*;

fn grades() -> impl Strategy<Value = WrapGrade> {
    prop_oneof![
        Just(WrapGrade::A),
        Just(WrapGrade::B),
        Just(WrapGrade::C),
    ]
}

proptest! {
    #[test]
    fn multiplier_stays_clamped_for_captured_ready(
        total in 1u64..=86_400_000,
        frac in 0.0f64..=1.0,
        grade in grades(),
    ) {
        let ready = ((total as f64) * frac).floor() as u64;
        let input = MultiplierInput {
            ready_at_ms: Some(ready.min(total)),
            prestart_total_ms: total,
            wrap_grade: grade,
        };
        let m = session_multiplier(&input).unwrap();
        prop_assert!((MULTIPLIER_FLOOR..=MULTIPLIER_CEIL).contains(&m));
    }

    #[test]
    fn multiplier_stays_clamped_for_missed_ready(
        total in 1u64..=86_400_000,
        grade in grades(),
    ) {
        let input = MultiplierInput {
            ready_at_ms: None,
            prestart_total_ms: total,
            wrap_grade: grade,
        };
        let m = session_multiplier(&input).unwrap();
        prop_assert!((MULTIPLIER_FLOOR..=MULTIPLIER_CEIL).contains(&m));
    }

    #[test]
    fn earlier_ready_never_scores_lower(
        total in 1u64..=86_400_000,
        frac_a in 0.0f64..=1.0,
        frac_b in 0.0f64..=1.0,
        grade in grades(),
    ) {
        let ready_a = ((total as f64) * frac_a.min(frac_b)).floor() as u64;
        let ready_b = ((total as f64) * frac_a.max(frac_b)).floor() as u64;
        let at = |ready: u64| MultiplierInput {
            ready_at_ms: Some(ready.min(total)),
            prestart_total_ms: total,
            wrap_grade: grade,
        };
        let early = session_multiplier(&at(ready_a)).unwrap();
        let late = session_multiplier(&at(ready_b)).unwrap();
        prop_assert!(early >= late);
    }

    #[test]
    fn a_beats_b_beats_c(
        total in 1u64..=86_400_000,
        frac in 0.0f64..=1.0,
    ) {
        let ready = ((total as f64) * frac).floor() as u64;
        let with = |grade| MultiplierInput {
            ready_at_ms: Some(ready.min(total)),
            prestart_total_ms: total,
            wrap_grade: grade,
        };
        let a = session_multiplier(&with(WrapGrade::A)).unwrap();
        let b = session_multiplier(&with(WrapGrade::B)).unwrap();
        let c = session_multiplier(&with(WrapGrade::C)).unwrap();
        prop_assert!(a > b);
        prop_assert!(b > c);
    }
}
