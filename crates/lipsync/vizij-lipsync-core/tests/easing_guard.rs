mod common;

use common::{assert_holds_decode, mk_map, mk_timeline};
use vizij_lipsync_core::{
    sample_curve, Curve, EaseConfig, KeyInterpolation, Keyframe, LipSync, LipSyncConfig,
};

fn wide_guard_config() -> LipSyncConfig {
    LipSyncConfig {
        // Long segments below make the guard hit this cap: 0.2s.
        max_guard_seconds: 0.2,
        ..LipSyncConfig::default()
    }
}

#[test]
fn wide_guard_clamps_ease_and_stays_inside_the_band() {
    let bake = LipSync::new(wide_guard_config())
        .unwrap()
        .bake(
            &mk_map(&[("A", "a.png"), ("B", "b.png"), ("C", "c.png")]),
            &mk_timeline(&[("A", 0.0, 1.0), ("C", 1.0, 2.0), ("B", 2.0, 3.0)]),
        )
        .unwrap();
    let eps = bake.guard_seconds();
    assert!((eps - 0.2).abs() < 1e-12);

    // reach = 33 * 0.5 * 0.2 / |dv| > 1 for every transition here.
    let clamped = bake
        .diagnostics
        .iter()
        .filter(|d| d.kind() == "EaseClamped")
        .count();
    assert!(clamped >= 4, "{:?}", bake.diagnostics);

    // Inside each guard band the value never leaves the span's two end values.
    let keys = bake.curve.keyframes();
    for w in keys.windows(2) {
        let (lo, hi) = if w[0].value <= w[1].value {
            (w[0].value as f64, w[1].value as f64)
        } else {
            (w[1].value as f64, w[0].value as f64)
        };
        for k in 0..=100 {
            let t = w[0].time + (w[1].time - w[0].time) * (k as f64) / 100.0;
            let v = sample_curve(&bake.curve, t);
            assert!(
                v >= lo - 1e-9 && v <= hi + 1e-9,
                "t={t} v={v} escaped [{lo}, {hi}]"
            );
        }
    }
    assert_holds_decode(&bake);
}

#[test]
fn unclamped_handles_would_overshoot() {
    let mut left = Keyframe::hold(0.8, 1);
    left.ease_out_percent = 50.0;
    left.ease_out_speed = 33.0;
    let mut right = Keyframe::hold(1.0, 2);
    right.ease_in_percent = 50.0;
    right.ease_in_speed = 33.0;
    let curve = Curve::new(vec![left, right], 0.2, KeyInterpolation::Eased).unwrap();

    let peak = (0..=100)
        .map(|k| sample_curve(&curve, 0.8 + 0.2 * (k as f64) / 100.0))
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(peak > 2.0, "expected overshoot past the next hold value, peak={peak}");
}

#[test]
fn zero_influence_is_linear_across_the_band() {
    let cfg = LipSyncConfig {
        ease: EaseConfig {
            ease_influence: 0.0,
            ease_speed: 33.0,
        },
        ..LipSyncConfig::default()
    };
    let bake = LipSync::new(cfg)
        .unwrap()
        .bake(
            &mk_map(&[("A", "a.png"), ("B", "b.png")]),
            &mk_timeline(&[("A", 0.0, 0.5), ("B", 0.5, 1.0)]),
        )
        .unwrap();
    let eps = bake.guard_seconds();
    let mid = 0.5 - eps / 2.0;
    assert!((sample_curve(&bake.curve, mid) - 1.5).abs() < 1e-9);
    assert!(bake.diagnostics.is_empty());
}

#[test]
fn default_ease_is_stamped_with_speed_only_on_transitions() {
    let bake = LipSync::new(LipSyncConfig::default())
        .unwrap()
        .bake(
            &mk_map(&[("A", "a.png")]),
            &mk_timeline(&[("A", 0.0, 0.5)]),
        )
        .unwrap();
    let keys = bake.curve.keyframes();
    for k in keys {
        assert_eq!(k.ease_in_percent + k.ease_out_percent, 100.0);
    }
    for pair in keys.windows(2) {
        let moving = pair[0].value != pair[1].value;
        let expected = if moving { 33.0 } else { 0.0 };
        assert_eq!(pair[0].ease_out_speed, expected);
        assert_eq!(pair[1].ease_in_speed, expected);
    }
    assert_eq!(keys[0].ease_in_speed, 0.0);
    assert_eq!(keys[keys.len() - 1].ease_out_speed, 0.0);
}
