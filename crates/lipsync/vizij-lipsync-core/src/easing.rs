//! Easing policy: stamps the configured temporal ease onto every keyframe, clamping
//! influence where a handle would carry the value past the end of its span.
//!
//! Speed is only set on key sides that face a value change. Sides facing a hold span
//! (or nothing, at the curve ends) get speed 0, so a host that treats speed as the
//! velocity at the key still draws the hold flat.
//!
//! Only spans that change value can overshoot, and in a synthesized curve those are
//! exactly the guard bands. A handle reaches `speed * influence * dt / |dv|` of the
//! span's progress; anything above 1.0 leaves `[v0, v1]` and could decode to a third
//! index inside the band. Influence is cut to the largest value with reach <= 1.0.

use crate::config::EaseConfig;
use crate::diagnostics::{Diagnostic, Diagnostics, EaseSide};
use crate::interp::functions::handle_reach;
use crate::synth::{Curve, KeyInterpolation, Keyframe};

#[derive(Clone, Debug, PartialEq)]
pub struct EasingPolicy {
    influence: f64,
    speed: f64,
}

impl EasingPolicy {
    pub fn new(cfg: &EaseConfig) -> Self {
        Self {
            influence: cfg.ease_influence.clamp(0.0, 100.0),
            speed: cfg.ease_speed.max(0.0),
        }
    }

    /// Return a new curve with ease applied. `Hold` curves are returned unchanged;
    /// stepped hosts ignore ease.
    pub fn apply(&self, curve: &Curve, diagnostics: &mut Diagnostics) -> Curve {
        if curve.interpolation() == KeyInterpolation::Hold {
            return curve.clone();
        }

        let mut keys: Vec<Keyframe> = curve
            .keyframes()
            .iter()
            .map(|k| Keyframe {
                ease_in_percent: self.influence,
                ease_out_percent: self.influence,
                ease_in_speed: 0.0,
                ease_out_speed: 0.0,
                ..*k
            })
            .collect();

        for i in 1..keys.len() {
            let (before, after) = keys.split_at_mut(i);
            let left = &mut before[i - 1];
            let right = &mut after[0];
            let dt = right.time - left.time;
            let dv = f64::from(right.value) - f64::from(left.value);
            // Hold spans keep speed 0 on both sides so hosts draw them flat.
            if dv != 0.0 {
                left.ease_out_speed = self.speed;
                right.ease_in_speed = self.speed;
                self.clamp_span(left, right, dt, dv, diagnostics);
            }

            // Handles may not cross in time.
            let total = left.ease_out_percent + right.ease_in_percent;
            if total > 100.0 {
                let scale = 100.0 / total;
                left.ease_out_percent *= scale;
                right.ease_in_percent *= scale;
            }
        }

        curve.with_keyframes(keys)
    }

    fn clamp_span(
        &self,
        left: &mut Keyframe,
        right: &mut Keyframe,
        dt: f64,
        dv: f64,
        diagnostics: &mut Diagnostics,
    ) {
        let limit = self.clamp_limit(dt, dv);
        if left.ease_out_percent > limit {
            diagnostics.record(Diagnostic::EaseClamped {
                time: left.time,
                side: EaseSide::Out,
                requested: left.ease_out_percent,
                applied: limit,
            });
            left.ease_out_percent = limit;
        }
        if right.ease_in_percent > limit {
            diagnostics.record(Diagnostic::EaseClamped {
                time: right.time,
                side: EaseSide::In,
                requested: right.ease_in_percent,
                applied: limit,
            });
            right.ease_in_percent = limit;
        }
    }

    /// Largest influence (percent) whose handle stays within the span's progress.
    fn clamp_limit(&self, dt: f64, dv: f64) -> f64 {
        let reach = handle_reach(self.influence, self.speed, dt, dv);
        if reach <= 1.0 {
            return self.influence;
        }
        self.influence / reach
    }
}
