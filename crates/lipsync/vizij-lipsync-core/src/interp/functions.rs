//! Interpolation helpers:
//! - lerp (scalar blend)
//! - cubic-bezier timing with x inverted by bisection
//! - ease controls derived from keyframe influence/speed

use crate::synth::Keyframe;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Cubic Bezier basis function
#[inline]
fn cubic_bezier(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Given control points (x1, y1, x2, y2) and an input t in [0,1],
/// compute the eased y by inverting the x bezier via binary search.
#[inline]
pub fn bezier_ease_t(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    // Fast path: Bezier(0,0,1,1) is exactly linear -> eased t == t
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    // Monotonic X in [0,1] assumed for x1/x2 ∈ [0,1]
    let mut lo = 0.0f64;
    let mut hi = 1.0f64;
    let mut mid = t;
    for _ in 0..48 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-9 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}

/// Bezier timing controls `[x1, y1, x2, y2]` for the span `left -> right`.
///
/// Influence is the fraction of the span the handle reaches along time. Speed is in
/// value units per second along the direction of travel, expressed here as progress
/// of `|dv|`. A flat span has no direction and is returned as linear.
pub fn span_controls(left: &Keyframe, right: &Keyframe) -> [f64; 4] {
    let dt = right.time - left.time;
    let dv = (f64::from(right.value) - f64::from(left.value)).abs();
    if dt <= 0.0 || dv == 0.0 {
        return [0.0, 0.0, 1.0, 1.0];
    }
    let out_frac = left.ease_out_percent / 100.0;
    let in_frac = right.ease_in_percent / 100.0;
    let x1 = out_frac;
    let y1 = left.ease_out_speed * out_frac * dt / dv;
    let x2 = 1.0 - in_frac;
    let y2 = 1.0 - right.ease_in_speed * in_frac * dt / dv;
    [x1, y1, x2, y2]
}

/// Progress-space overshoot of a handle with the given influence and speed.
/// Values above 1.0 push the span beyond its end value.
#[inline]
pub fn handle_reach(influence_percent: f64, speed: f64, dt: f64, dv: f64) -> f64 {
    if dv == 0.0 {
        return 0.0;
    }
    speed * (influence_percent / 100.0) * dt / dv.abs()
}

/// Eased value between two keyframes at local time `lt` in [0,1].
pub fn bezier_value(left: &Keyframe, right: &Keyframe, lt: f64) -> f64 {
    let a = f64::from(left.value);
    let b = f64::from(right.value);
    if a == b {
        return a;
    }
    let ctrl = span_controls(left, right);
    let eased = bezier_ease_t(lt, ctrl[0], ctrl[1], ctrl[2], ctrl[3]);
    lerp(a, b, eased)
}
