//! Curve sampling: the value a host reads from the channel at time `t` (seconds).
//!
//! Model:
//! - Before the first key and after the last key the nearest key value is held.
//! - A NaN time reads as neutral 0.0.
//! - A key at exactly `t` wins, giving half-open `[key, next_key)` spans.
//! - `Hold` curves step (left key value).
//! - `Eased` curves use bezier timing from the keys' ease fields, then blend values
//!   linearly. Spans between equal values are flat whatever the ease.

use crate::interp::functions::bezier_value;
use crate::synth::{Curve, KeyInterpolation, Keyframe};

/// Find the span `[i, i+1]` containing `t` and return `(i, i+1, local_t)`,
/// where `local_t` is normalized to [0, 1] between the two key times.
/// Edge cases:
/// - If t <= first.time, returns (0, 0, 0) and caller should pick keys[0].
/// - If t >= last.time, returns (last, last, 0) and caller should pick keys[last].
/// - If t is NaN, returns (0, 0, 0).
fn find_span(keys: &[Keyframe], t: f64) -> (usize, usize, f64) {
    let n = keys.len();
    if n <= 1 || t.is_nan() || t <= keys[0].time {
        return (0, 0, 0.0);
    }
    if t >= keys[n - 1].time {
        return (n - 1, n - 1, 0.0);
    }
    // Keys at or before t; at least one because t > keys[0].time.
    let after = keys.partition_point(|k| k.time <= t);
    let i = after - 1;
    let t0 = keys[i].time;
    let t1 = keys[after].time;
    let lt = (t - t0) / (t1 - t0);
    (i, after, lt.clamp(0.0, 1.0))
}

/// Sample `curve` at `t` seconds. An empty curve, or a NaN `t`, reads as neutral 0.0.
pub fn sample_curve(curve: &Curve, t: f64) -> f64 {
    let keys = curve.keyframes();
    if keys.is_empty() || t.is_nan() {
        return 0.0;
    }
    let (i0, i1, lt) = find_span(keys, t);
    let left = &keys[i0];
    if i0 == i1 || lt == 0.0 {
        return f64::from(left.value);
    }
    match curve.interpolation() {
        KeyInterpolation::Hold => f64::from(left.value),
        KeyInterpolation::Eased => bezier_value(left, &keys[i1], lt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(keys: Vec<Keyframe>, mode: KeyInterpolation) -> Curve {
        Curve::new(keys, 0.1, mode).unwrap()
    }

    #[test]
    fn linear_span_blends_and_ends_clamp() {
        let c = curve(
            vec![Keyframe::hold(1.0, 0), Keyframe::hold(2.0, 4)],
            KeyInterpolation::Eased,
        );
        assert_eq!(sample_curve(&c, 0.0), 0.0);
        assert!((sample_curve(&c, 1.5) - 2.0).abs() < 1e-12);
        assert_eq!(sample_curve(&c, 2.0), 4.0);
        assert_eq!(sample_curve(&c, 9.0), 4.0);
    }

    #[test]
    fn hold_mode_steps_on_the_left_key() {
        let c = curve(
            vec![Keyframe::hold(0.0, 1), Keyframe::hold(1.0, 3)],
            KeyInterpolation::Hold,
        );
        assert_eq!(sample_curve(&c, 0.999), 1.0);
        assert_eq!(sample_curve(&c, 1.0), 3.0);
    }

    #[test]
    fn exact_key_time_reads_that_key() {
        let c = curve(
            vec![
                Keyframe::hold(0.0, 1),
                Keyframe::hold(0.4, 1),
                Keyframe::hold(0.5, 2),
                Keyframe::hold(0.9, 2),
            ],
            KeyInterpolation::Eased,
        );
        assert_eq!(sample_curve(&c, 0.5), 2.0);
        assert_eq!(sample_curve(&c, 0.4), 1.0);
    }

    #[test]
    fn non_finite_times() {
        let c = curve(
            vec![
                Keyframe::hold(0.0, 1),
                Keyframe::hold(0.4, 1),
                Keyframe::hold(0.5, 2),
            ],
            KeyInterpolation::Eased,
        );
        assert_eq!(sample_curve(&c, f64::NAN), 0.0);
        assert_eq!(sample_curve(&c, f64::NEG_INFINITY), 1.0);
        assert_eq!(sample_curve(&c, f64::INFINITY), 2.0);
        assert_eq!(find_span(c.keyframes(), f64::NAN), (0, 0, 0.0));
    }

    #[test]
    fn single_key_host_curve_holds_everywhere() {
        let json = r#"{
            "keyframes": [{
                "time": 0.25, "value": 3,
                "easeInPercent": 50, "easeOutPercent": 50,
                "easeInSpeed": 0, "easeOutSpeed": 0
            }],
            "guardSeconds": 0.04,
            "interpolation": "eased"
        }"#;
        let c: Curve = serde_json::from_str(json).unwrap();
        assert_eq!(c.len(), 1);
        for t in [-1.0, 0.0, 0.25, 0.3, 100.0, f64::INFINITY] {
            assert_eq!(sample_curve(&c, t), 3.0, "t={t}");
        }
        assert_eq!(sample_curve(&c, f64::NAN), 0.0);
    }

    #[test]
    fn empty_curve_is_neutral() {
        let c = curve(vec![], KeyInterpolation::Eased);
        assert_eq!(sample_curve(&c, 3.0), 0.0);
    }
}
