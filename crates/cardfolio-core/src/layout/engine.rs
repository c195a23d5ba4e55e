use std::time::Duration;

use tracing::{debug, warn};

use super::mapper::raw_pose;
use super::pose::ItemPose;
use crate::config::{AppConfig, SpringConfig, StackConfig};
use crate::motion::MotionSmoother;
use crate::progress::clamp_progress;

/// Stack layout for a scroll-driven wallet
///
/// Owns the spring state for every card. Each progress or selection change
/// retargets the springs; `tick` advances them; `poses` reads the displayed
/// result. The active card is pinned to the focused pose while its springs
/// keep following the progress-derived target underneath.
#[derive(Debug, Clone)]
pub struct StackLayoutEngine {
    config: StackConfig,
    smoother: MotionSmoother,
    progress: f64,
    count: usize,
    active: Option<usize>,
}

impl StackLayoutEngine {
    pub fn new(config: StackConfig, spring: SpringConfig) -> Self {
        Self {
            config,
            smoother: MotionSmoother::new(spring),
            progress: 0.0,
            count: 0,
            active: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.stack.clone(), config.spring)
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Set the number of cards
    ///
    /// Cards that appear start at rest on their pose for the current progress.
    pub fn set_count(&mut self, count: usize) {
        if count == self.count {
            return;
        }
        if !self.config.fits(count) {
            warn!(
                count,
                last_window_end = self.config.last_window_end(count),
                "Entry windows extend past the end of the progress domain"
            );
        }

        let config = &self.config;
        let progress = self.progress;
        self.smoother.resize_with(count, |index| {
            let pose = raw_pose(config, progress, index, count, false);
            (pose.position, pose.scale)
        });
        self.count = count;
        if self.active.is_some_and(|i| i >= count) {
            self.active = None;
        }
        self.retarget();
    }

    /// Set the global progress (clamped to [0, 1])
    pub fn set_progress(&mut self, progress: f64) {
        let progress = clamp_progress(progress);
        if progress == self.progress {
            return;
        }
        self.progress = progress;
        self.retarget();
    }

    /// Set the active card; indices outside the stack clear it
    pub fn set_active(&mut self, active: Option<usize>) {
        let active = active.filter(|&i| i < self.count);
        if active != self.active {
            debug!(?active, "Active card changed");
            self.active = active;
        }
    }

    /// Update inputs and return the poses aligned with `items`
    pub fn compute_poses<T>(
        &mut self,
        progress: f64,
        items: &[T],
        active: Option<usize>,
    ) -> Vec<ItemPose> {
        self.set_count(items.len());
        self.set_progress(progress);
        self.set_active(active);
        self.poses()
    }

    /// Advance the springs; returns true while any card is still moving
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.smoother.step(dt)
    }

    /// Jump every spring to its target
    pub fn settle(&mut self) {
        self.smoother.snap();
    }

    pub fn is_settled(&self) -> bool {
        self.smoother.is_settled()
    }

    /// Displayed poses for the current state
    pub fn poses(&self) -> Vec<ItemPose> {
        (0..self.count).map(|index| self.pose(index)).collect()
    }

    fn pose(&self, index: usize) -> ItemPose {
        let active = self.active == Some(index);
        let raw = raw_pose(&self.config, self.progress, index, self.count, active);
        if active {
            return raw;
        }
        ItemPose {
            position: self.smoother.position(index).unwrap_or(raw.position),
            scale: self.smoother.scale(index).unwrap_or(raw.scale),
            ..raw
        }
    }

    fn retarget(&mut self) {
        for index in 0..self.count {
            let raw = raw_pose(&self.config, self.progress, index, self.count, false);
            self.smoother.set_target(index, raw.position, raw.scale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_micros(16_667);

    fn engine() -> StackLayoutEngine {
        StackLayoutEngine::from_config(&AppConfig::default())
    }

    fn run_until_settled(engine: &mut StackLayoutEngine) -> usize {
        let mut ticks = 0;
        while engine.tick(FRAME) {
            ticks += 1;
            assert!(ticks <= 200, "layout did not settle");
        }
        ticks
    }

    #[test]
    fn test_initial_poses_match_raw() {
        let mut engine = engine();
        let items = ["a", "b", "c"];
        let poses = engine.compute_poses(0.0, &items, None);

        assert_eq!(poses.len(), 3);
        for pose in &poses {
            assert_eq!(pose.position, 1000.0);
            assert_eq!(pose.opacity, 0.0);
        }
        assert!(engine.is_settled());
    }

    #[test]
    fn test_progress_change_is_smoothed() {
        let mut engine = engine();
        let items = [(); 3];
        engine.compute_poses(0.0, &items, None);
        let poses = engine.compute_poses(1.0, &items, None);

        // Springs have not moved yet; opacity is immediate
        assert_eq!(poses[0].position, 1000.0);
        assert_eq!(poses[0].opacity, 1.0);

        engine.tick(FRAME);
        let moving = engine.poses();
        assert!(moving[0].position < 1000.0);
        assert!(moving[0].position > 0.0);

        run_until_settled(&mut engine);
        for (index, pose) in engine.poses().iter().enumerate() {
            assert_eq!(pose.position, index as f64 * 60.0);
            assert_eq!(pose.scale, 1.0);
        }
    }

    #[test]
    fn test_active_card_is_pinned_regardless_of_progress() {
        let mut engine = engine();
        let items = [(); 4];
        for progress in [0.0, 0.5, 1.0] {
            let poses = engine.compute_poses(progress, &items, Some(2));
            assert_eq!(poses[2].position, 0.0);
            assert_eq!(poses[2].scale, 1.05);
            assert_eq!(poses[2].depth, 100.0);
            assert_eq!(poses[2].z_order, 100);
        }
    }

    #[test]
    fn test_deselected_card_returns_to_progress_pose() {
        let mut engine = engine();
        let items = [(); 4];
        engine.compute_poses(1.0, &items, None);
        engine.settle();

        engine.compute_poses(1.0, &items, Some(1));
        engine.compute_poses(1.0, &items, Some(3));
        let poses = engine.poses();

        assert_eq!(poses[1].position, 60.0);
        assert_eq!(poses[1].z_order, 11);
        assert_eq!(poses[3].position, 0.0);
    }

    #[test]
    fn test_springs_track_underneath_active_card() {
        let mut engine = engine();
        let items = [(); 2];
        engine.compute_poses(0.0, &items, Some(0));
        engine.compute_poses(1.0, &items, Some(0));
        run_until_settled(&mut engine);

        let poses = engine.compute_poses(1.0, &items, None);
        assert_eq!(poses[0].position, 0.0);
        assert_eq!(poses[1].position, 60.0);
    }

    #[test]
    fn test_z_order_uniqueness() {
        let mut engine = engine();
        let items = [(); 8];
        let poses = engine.compute_poses(0.7, &items, Some(5));
        let top = poses[5].z_order;
        let mut rest: Vec<i32> = poses
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 5)
            .map(|(_, p)| p.z_order)
            .collect();
        assert!(rest.iter().all(|z| *z < top));
        rest.dedup();
        assert_eq!(rest.len(), 7);
    }

    #[test]
    fn test_empty_items() {
        let mut engine = engine();
        let items: [u8; 0] = [];
        assert!(engine.compute_poses(0.5, &items, Some(0)).is_empty());
        assert_eq!(engine.active(), None);
        assert!(!engine.tick(FRAME));
    }

    #[test]
    fn test_shrinking_clears_out_of_range_active() {
        let mut engine = engine();
        engine.compute_poses(0.5, &[(); 5], Some(4));
        assert_eq!(engine.active(), Some(4));
        engine.set_count(3);
        assert_eq!(engine.active(), None);
        assert_eq!(engine.poses().len(), 3);
    }

    #[test]
    fn test_new_cards_appear_at_rest() {
        let mut engine = engine();
        engine.compute_poses(1.0, &[(); 2], None);
        let poses = engine.compute_poses(1.0, &[(); 3], None);
        assert_eq!(poses[2].position, 120.0);
    }
}
