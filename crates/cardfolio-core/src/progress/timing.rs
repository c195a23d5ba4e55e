//! Elapsed-time fractions and interpolation

use std::time::{Duration, Instant};

/// Fraction of `duration` elapsed between `start` and `now`, in [0, 1]
///
/// A zero duration counts as already finished.
#[inline]
pub fn progress(start: Instant, now: Instant, duration: Duration) -> f64 {
    match duration.as_secs_f64() {
        total if total > 0.0 => {
            (now.saturating_duration_since(start).as_secs_f64() / total).min(1.0)
        }
        _ => 1.0,
    }
}

#[inline]
pub fn is_complete(start: Instant, now: Instant, duration: Duration) -> bool {
    start + duration <= now
}

#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + t * (to - from)
}

/// Linear interpolation with `t` clamped to [0, 1]
#[inline]
pub fn lerp_clamped(from: f64, to: f64, t: f64) -> f64 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    lerp(from, to, t)
}

/// Map `x` from `[in_start, in_end]` onto `[out_start, out_end]`
///
/// Holds `out_start` at or before `in_start` and `out_end` at or after
/// `in_end`. A zero-width input range behaves as a step at `in_end`.
#[inline]
pub fn map_range_clamped(x: f64, in_start: f64, in_end: f64, out_start: f64, out_end: f64) -> f64 {
    if x <= in_start && x < in_end {
        return out_start;
    }
    if x >= in_end {
        return out_end;
    }
    lerp(out_start, out_end, (x - in_start) / (in_end - in_start))
}
