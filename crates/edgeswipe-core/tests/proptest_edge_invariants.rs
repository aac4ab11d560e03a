//! Property-based invariant tests for edge detection and swipe classification.
//!
//! ## Invariants
//!
//! 1. Top wins: `offset ≤ tolerance` is always `Top`, even for short content.
//! 2. Short content: `content ≤ viewport` with offset within tolerance is `Top`.
//! 3. Bottom: not top and `remaining ≤ tolerance` is `Bottom`.
//! 4. Malformed input (negative, non-finite) is `None`.
//! 5. `ScrollMetrics::edge` agrees with `detect_edge`.
//! 6. Classification: the dominant axis decides, ties are vertical, distance
//!    equals the dominant magnitude.
//! 7. Sign convention: positive `dx` is `Left`, positive `dy` is `Up`.

use edgeswipe_core::{EdgeState, ScrollMetrics, SwipeDirection, SwipeResult, detect_edge};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

fn arb_size() -> impl Strategy<Value = f64> {
    (0u32..=20_000).prop_map(f64::from)
}

fn arb_tolerance() -> impl Strategy<Value = f64> {
    (0u32..=40).prop_map(|x| f64::from(x) / 4.0)
}

fn arb_delta() -> impl Strategy<Value = f64> {
    (-2_000i32..=2_000).prop_map(f64::from)
}

fn arb_bad_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        (1u32..=10_000).prop_map(|x| -f64::from(x)),
    ]
}

// ── 1-3. Edge classification ──────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn offset_within_tolerance_is_top(
        content in arb_size(),
        viewport in arb_size(),
        tolerance in arb_tolerance(),
        frac in 0u32..=100,
    ) {
        let offset = tolerance * f64::from(frac) / 100.0;
        prop_assert_eq!(detect_edge(offset, content, viewport, tolerance), EdgeState::Top);
    }

    #[test]
    fn short_content_is_top(
        viewport in 1u32..=5_000,
        shortfall in 0u32..=5_000,
        tolerance in arb_tolerance(),
    ) {
        let viewport = f64::from(viewport);
        let content = (viewport - f64::from(shortfall)).max(0.0);
        prop_assert_eq!(detect_edge(0.0, content, viewport, tolerance), EdgeState::Top);
    }

    #[test]
    fn classification_matches_definition(
        offset in arb_size(),
        content in arb_size(),
        viewport in arb_size(),
        tolerance in arb_tolerance(),
    ) {
        let edge = detect_edge(offset, content, viewport, tolerance);
        let expected = if offset <= tolerance {
            EdgeState::Top
        } else if content - (offset + viewport) <= tolerance {
            EdgeState::Bottom
        } else {
            EdgeState::None
        };
        prop_assert_eq!(edge, expected);
    }

    #[test]
    fn metrics_agree_with_detect_edge(
        offset in arb_size(),
        content in arb_size(),
        viewport in arb_size(),
        tolerance in arb_tolerance(),
    ) {
        let metrics = ScrollMetrics::new(offset, content, viewport);
        prop_assert_eq!(
            metrics.edge(tolerance),
            detect_edge(offset, content, viewport, tolerance)
        );
    }
}

// ── 4. Malformed input ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn malformed_input_is_none(
        bad in arb_bad_value(),
        slot in 0usize..4,
        a in arb_size(),
        b in arb_size(),
        c in arb_size(),
    ) {
        let mut args = [a, b, c, 1.0];
        args[slot] = bad;
        prop_assert_eq!(detect_edge(args[0], args[1], args[2], args[3]), EdgeState::None);
    }
}

// ── 6-7. Swipe classification ─────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn dominant_axis_decides(dx in arb_delta(), dy in arb_delta()) {
        match SwipeResult::classify(dx, dy) {
            None => {
                let dominant = if dx.abs() > dy.abs() { dx } else { dy };
                prop_assert_eq!(dominant, 0.0);
            }
            Some(r) => {
                prop_assert_eq!(r.is_horizontal, dx.abs() > dy.abs());
                prop_assert_eq!(r.direction.is_horizontal(), r.is_horizontal);
                let expected = if r.is_horizontal { dx.abs() } else { dy.abs() };
                prop_assert_eq!(r.distance, expected);
                prop_assert!(r.distance > 0.0);
            }
        }
    }

    #[test]
    fn sign_convention(magnitude in 1i32..=2_000, minor in 0i32..=1_000) {
        let m = f64::from(magnitude);
        let small = f64::from(minor.min(magnitude - 1));
        let dir = |dx: f64, dy: f64| SwipeResult::classify(dx, dy).map(|r| r.direction);
        prop_assert_eq!(dir(m, small), Some(SwipeDirection::Left));
        prop_assert_eq!(dir(-m, small), Some(SwipeDirection::Right));
        prop_assert_eq!(dir(small, m), Some(SwipeDirection::Up));
        prop_assert_eq!(dir(small, -m), Some(SwipeDirection::Down));
    }

    #[test]
    fn equal_magnitudes_are_vertical(m in 1i32..=2_000, sx in any::<bool>(), sy in any::<bool>()) {
        let v = f64::from(m);
        let dx = if sx { v } else { -v };
        let dy = if sy { v } else { -v };
        let r = SwipeResult::classify(dx, dy);
        prop_assert!(r.is_some_and(|r| !r.is_horizontal));
    }
}
