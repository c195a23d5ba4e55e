use std::time::Duration;

use super::spring::Spring;
use crate::config::SpringConfig;

/// Rest threshold multiplier for scale channels
///
/// The configured threshold is in position units, and a card's scale travels
/// about a thousandth of its position range.
const SCALE_PRECISION: f64 = 1e-3;

/// Smoothed channels of one stacked card
#[derive(Debug, Clone, Copy)]
struct ItemChannels {
    position: Spring,
    scale: Spring,
}

/// Spring smoothing for the position and scale of every card
///
/// Opacity and z-order are not smoothed; the layout engine takes them
/// straight from the raw pose.
#[derive(Debug, Clone)]
pub struct MotionSmoother {
    params: SpringConfig,
    items: Vec<ItemChannels>,
}

impl MotionSmoother {
    pub fn new(params: SpringConfig) -> Self {
        Self {
            params,
            items: Vec::new(),
        }
    }

    pub fn params(&self) -> &SpringConfig {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resize to `count` items
    ///
    /// Existing channels keep their state; new channels start at rest on the
    /// `(position, scale)` returned by `initial` for their index.
    pub fn resize_with<F>(&mut self, count: usize, initial: F)
    where
        F: Fn(usize) -> (f64, f64),
    {
        if count < self.items.len() {
            self.items.truncate(count);
            return;
        }
        for index in self.items.len()..count {
            let (position, scale) = initial(index);
            self.items.push(ItemChannels {
                position: Spring::at(position),
                scale: Spring::at(scale).with_precision(SCALE_PRECISION),
            });
        }
    }

    pub fn set_target(&mut self, index: usize, position: f64, scale: f64) {
        if let Some(item) = self.items.get_mut(index) {
            item.position.set_target(position);
            item.scale.set_target(scale);
        }
    }

    /// Advance every channel; returns true while any channel is still moving
    pub fn step(&mut self, dt: Duration) -> bool {
        let dt = dt.as_secs_f64();
        let mut moving = false;
        for item in &mut self.items {
            moving |= item.position.step(&self.params, dt);
            moving |= item.scale.step(&self.params, dt);
        }
        moving
    }

    /// Jump every channel to its target
    pub fn snap(&mut self) {
        for item in &mut self.items {
            item.position.snap();
            item.scale.snap();
        }
    }

    pub fn is_settled(&self) -> bool {
        self.items
            .iter()
            .all(|item| item.position.is_at_rest() && item.scale.is_at_rest())
    }

    pub fn position(&self, index: usize) -> Option<f64> {
        self.items.get(index).map(|item| item.position.value())
    }

    pub fn scale(&self, index: usize) -> Option<f64> {
        self.items.get(index).map(|item| item.scale.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_channels_start_at_rest() {
        let mut smoother = MotionSmoother::new(SpringConfig::default());
        smoother.resize_with(3, |i| (i as f64 * 60.0, 1.0));

        assert_eq!(smoother.len(), 3);
        assert!(smoother.is_settled());
        assert_eq!(smoother.position(2), Some(120.0));
        assert_eq!(smoother.scale(0), Some(1.0));
    }

    #[test]
    fn test_resize_keeps_existing_state() {
        let mut smoother = MotionSmoother::new(SpringConfig::default());
        smoother.resize_with(2, |_| (1000.0, 0.9));
        smoother.set_target(0, 0.0, 1.0);
        smoother.step(Duration::from_millis(16));
        let moved = smoother.position(0).unwrap();

        smoother.resize_with(4, |_| (5.0, 1.0));
        assert_eq!(smoother.position(0), Some(moved));
        assert_eq!(smoother.position(3), Some(5.0));

        smoother.resize_with(1, |_| (0.0, 0.0));
        assert_eq!(smoother.len(), 1);
        assert_eq!(smoother.position(1), None);
    }

    #[test]
    fn test_step_until_settled() {
        let mut smoother = MotionSmoother::new(SpringConfig::default());
        smoother.resize_with(2, |_| (1000.0, 0.9));
        smoother.set_target(0, 0.0, 1.0);
        smoother.set_target(1, 60.0, 1.0);

        let mut ticks = 0;
        while smoother.step(Duration::from_millis(16)) {
            ticks += 1;
            assert!(ticks < 200, "smoother did not settle");
        }
        assert!(smoother.is_settled());
        assert_eq!(smoother.position(1), Some(60.0));
    }

    #[test]
    fn test_scale_snaps_close_to_target() {
        let mut smoother = MotionSmoother::new(SpringConfig::default());
        smoother.resize_with(1, |_| (0.0, 0.9));
        smoother.set_target(0, 0.0, 1.0);

        // The final tick snaps; the gap it closes must be a tiny share of the travel
        let mut ticks = 0;
        let last_gap = loop {
            let gap = (smoother.scale(0).unwrap() - 1.0).abs();
            if !smoother.step(Duration::from_millis(16)) {
                break gap;
            }
            ticks += 1;
            assert!(ticks < 200, "scale did not settle");
        };
        assert_eq!(smoother.scale(0), Some(1.0));
        assert!(last_gap < 1e-4, "snapped across {}", last_gap);
    }

    #[test]
    fn test_out_of_range_target_is_ignored() {
        let mut smoother = MotionSmoother::new(SpringConfig::default());
        smoother.set_target(4, 1.0, 1.0);
        assert!(smoother.is_empty());
    }
}
