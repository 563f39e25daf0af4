//! Property-based invariant tests for pane weights.
//!
//! 1. Any drag on any pane from any in-bounds start keeps every weight in bounds
//! 2. Maximize is idempotent from any start
//! 3. Maximize gives the pane the maximum and the others the minimum
//! 4. Sequences of drags and maximizes never leave the bounds

use proptest::prelude::*;
use triptych_core::{PaneId, WeightBounds, WeightDistributor};

// ── Strategies ──────────────────────────────────────────────────────────

fn weight() -> impl Strategy<Value = f32> {
    0.1f32..=0.8
}

fn start() -> impl Strategy<Value = [f32; 3]> {
    (weight(), weight(), weight()).prop_map(|(a, b, c)| [a, b, c])
}

fn pane() -> impl Strategy<Value = PaneId> {
    (0usize..3).prop_map(|i| PaneId::ALL[i])
}

/// Any finite delta, weighted toward the extremes as well as the usual range
fn delta() -> impl Strategy<Value = f32> {
    prop_oneof![
        -2.0f32..2.0,
        -1e30f32..1e30,
        Just(1e30f32),
        Just(-1e30f32),
        Just(f32::MAX),
        Just(f32::MIN),
        Just(0.0f32),
        proptest::num::f32::NORMAL | proptest::num::f32::SUBNORMAL | proptest::num::f32::ZERO,
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Drag(PaneId, f32),
    Maximize(PaneId),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (pane(), delta()).prop_map(|(p, d)| Op::Drag(p, d)),
        1 => pane().prop_map(Op::Maximize),
    ]
}

fn distributor(start: [f32; 3]) -> WeightDistributor {
    WeightDistributor::new(start, WeightBounds::default()).unwrap()
}

fn assert_in_bounds(d: &WeightDistributor) -> Result<(), TestCaseError> {
    for w in d.weights() {
        prop_assert!((0.1..=0.8).contains(&w), "weight {} out of bounds in {:?}", w, d.weights());
    }
    Ok(())
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn drag_keeps_weights_in_bounds(start in start(), pane in pane(), delta in delta()) {
        let mut d = distributor(start);
        d.apply_drag(pane, delta);
        assert_in_bounds(&d)?;
    }

    #[test]
    fn maximize_is_idempotent(start in start(), pane in pane()) {
        let mut once = distributor(start);
        once.apply_maximize(pane);

        let mut twice = once.clone();
        twice.apply_maximize(pane);

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn maximize_sets_max_and_min(start in start(), pane in pane()) {
        let mut d = distributor(start);
        d.apply_maximize(pane);

        prop_assert_eq!(d.weight(pane), 0.8);
        for other in pane.others() {
            prop_assert_eq!(d.weight(other), 0.1);
        }
    }

    #[test]
    fn op_sequences_stay_in_bounds(start in start(), ops in proptest::collection::vec(op(), 1..64)) {
        let mut d = distributor(start);
        for op in &ops {
            match *op {
                Op::Drag(pane, delta) => d.apply_drag(pane, delta),
                Op::Maximize(pane) => d.apply_maximize(pane),
            }
            assert_in_bounds(&d)?;
        }
    }
}
