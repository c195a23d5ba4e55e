use crate::config::SpringConfig;

/// Damping ratios this close to 1 use the critically damped solution
const CRITICAL_EPSILON: f64 = 1e-6;

/// A single spring-smoothed value
///
/// `step` advances the exact solution of `m·x'' + c·x' + k·x = 0` for the
/// displacement `x = value - target`, so any tick interval is stable: a long
/// frame only moves the value further along the same trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    value: f64,
    velocity: f64,
    target: f64,
    /// Multiplier on the configured rest threshold
    precision: f64,
}

impl Spring {
    /// A spring at rest on `value`
    pub fn at(value: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            precision: 1.0,
        }
    }

    /// Scale the rest threshold for a channel whose travel is much smaller
    /// (or larger) than the unit the threshold is configured in
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Retarget without touching the current value or velocity
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Jump to the target and stop
    pub fn snap(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
    }

    pub fn is_at_rest(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Advance by `dt` seconds; returns true while still moving
    pub fn step(&mut self, params: &SpringConfig, dt: f64) -> bool {
        if self.is_at_rest() {
            return false;
        }
        if dt > 0.0 && dt.is_finite() {
            let x0 = self.value - self.target;
            let (x, v) = oscillate(params, x0, self.velocity, dt);
            self.value = self.target + x;
            self.velocity = v;
        }

        let threshold = params.rest_threshold * self.precision;
        if (self.value - self.target).abs() < threshold && self.velocity.abs() < threshold {
            self.snap();
            return false;
        }
        true
    }
}

/// Displacement and velocity after `t` seconds, starting from `(x0, v0)`
fn oscillate(params: &SpringConfig, x0: f64, v0: f64, t: f64) -> (f64, f64) {
    let omega = (params.stiffness / params.mass).sqrt();
    let zeta = params.damping / (2.0 * (params.stiffness * params.mass).sqrt());

    if (zeta - 1.0).abs() < CRITICAL_EPSILON {
        let decay = (-omega * t).exp();
        let b = v0 + omega * x0;
        let x = decay * (x0 + b * t);
        let v = decay * (v0 - omega * b * t);
        (x, v)
    } else if zeta < 1.0 {
        let a = zeta * omega;
        let omega_d = omega * (1.0 - zeta * zeta).sqrt();
        let decay = (-a * t).exp();
        let (sin, cos) = (omega_d * t).sin_cos();
        let b = (v0 + a * x0) / omega_d;
        let x = decay * (x0 * cos + b * sin);
        let v = decay * (v0 * cos - ((a * v0 + omega * omega * x0) / omega_d) * sin);
        (x, v)
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -omega * (zeta - root);
        let r2 = -omega * (zeta + root);
        let c2 = (v0 - r1 * x0) / (r2 - r1);
        let c1 = x0 - c2;
        let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
        (c1 * e1 + c2 * e2, c1 * r1 * e1 + c2 * r2 * e2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    /// Ticks until the spring comes to rest, recording distance to target
    fn run_to_rest(params: &SpringConfig, spring: &mut Spring, max_ticks: usize) -> Vec<f64> {
        let mut distances = Vec::new();
        for _ in 0..max_ticks {
            let moving = spring.step(params, FRAME);
            distances.push((spring.value() - spring.target()).abs());
            if !moving {
                break;
            }
        }
        distances
    }

    #[test]
    fn test_step_input_settles_monotonically() {
        let params = SpringConfig::default();
        let mut spring = Spring::at(1000.0);
        spring.set_target(0.0);

        let distances = run_to_rest(&params, &mut spring, 200);

        assert!(spring.is_at_rest(), "not settled after {} ticks", distances.len());
        assert!(distances.len() <= 200);
        assert_eq!(spring.value(), 0.0);
        for pair in distances.windows(2) {
            assert!(pair[1] <= pair[0], "distance grew: {:?}", pair);
        }
    }

    #[test]
    fn test_small_scale_step_settles() {
        let params = SpringConfig::default();
        let mut spring = Spring::at(0.9);
        spring.set_target(1.05);

        let distances = run_to_rest(&params, &mut spring, 200);
        assert!(spring.is_at_rest());
        assert!(distances.len() < 100);
    }

    #[test]
    fn test_precision_tightens_rest_snap() {
        let params = SpringConfig::default();
        let mut coarse = Spring::at(0.9);
        let mut fine = Spring::at(0.9).with_precision(1e-3);
        coarse.set_target(1.0);
        fine.set_target(1.0);

        let coarse_ticks = run_to_rest(&params, &mut coarse, 200).len();
        let fine_ticks = run_to_rest(&params, &mut fine, 200).len();
        assert!(fine.is_at_rest());
        assert!(fine_ticks > coarse_ticks);
    }

    #[test]
    fn test_underdamped_spring_settles() {
        let params = SpringConfig {
            stiffness: 300.0,
            damping: 10.0,
            ..Default::default()
        };
        let mut spring = Spring::at(0.0);
        spring.set_target(500.0);

        let distances = run_to_rest(&params, &mut spring, 400);
        assert!(spring.is_at_rest(), "not settled after {} ticks", distances.len());

        // Underdamped motion overshoots the target at least once
        let mut probe = Spring::at(0.0);
        probe.set_target(500.0);
        let overshoot = (0..60).any(|_| {
            probe.step(&params, FRAME);
            probe.value() > 500.0
        });
        assert!(overshoot);
    }

    #[test]
    fn test_overdamped_spring_settles() {
        let params = SpringConfig {
            damping: 60.0,
            ..Default::default()
        };
        let mut spring = Spring::at(100.0);
        spring.set_target(0.0);

        let distances = run_to_rest(&params, &mut spring, 400);
        assert!(spring.is_at_rest(), "not settled after {} ticks", distances.len());
        for pair in distances.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
    }

    #[test]
    fn test_huge_interval_is_stable() {
        let params = SpringConfig::default();
        let mut spring = Spring::at(1000.0);
        spring.set_target(60.0);

        let moving = spring.step(&params, 30.0);
        assert!(!moving);
        assert_eq!(spring.value(), 60.0);
    }

    #[test]
    fn test_zero_interval_changes_nothing() {
        let params = SpringConfig::default();
        let mut spring = Spring::at(10.0);
        spring.set_target(20.0);

        assert!(spring.step(&params, 0.0));
        assert_eq!(spring.value(), 10.0);
    }

    #[test]
    fn test_retarget_keeps_velocity() {
        let params = SpringConfig::default();
        let mut spring = Spring::at(0.0);
        spring.set_target(100.0);
        spring.step(&params, FRAME);
        let velocity = spring.velocity();
        assert!(velocity > 0.0);

        spring.set_target(0.0);
        assert_eq!(spring.velocity(), velocity);
    }
}
