//! Interpolation helpers shared by curve sampling and the easing policy.
//!
//! Spans follow the vizij timing model: a cubic bezier over normalized time, then a
//! linear blend between the two key values.

pub mod functions;

pub use functions::{bezier_ease_t, bezier_value, handle_reach, lerp, span_controls};
