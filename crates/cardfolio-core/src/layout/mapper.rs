//! Pure mapping from progress to raw (unsmoothed) card poses

use super::pose::{EntryWindow, ItemPose};
use crate::config::StackConfig;
use crate::progress::{clamp_progress, map_range_clamped};

/// Progress at which the scroll hint has fully faded out
const SCROLL_HINT_FADE_END: f64 = 0.2;

/// Entry window of card `index` out of `count`
///
/// `start = index / count * stagger_span`, `end = start + entry_width`.
/// Adjacent windows overlap so neighbouring cards move together.
pub fn entry_window(config: &StackConfig, index: usize, count: usize) -> EntryWindow {
    let count = count.max(1);
    let step = 1.0 / count as f64;
    let start = index as f64 * step * config.stagger_span;
    EntryWindow {
        start,
        end: start + config.entry_width,
    }
}

/// z-order of the active card: above every resting card, at least `focus_z_order`
pub fn focus_z_order(config: &StackConfig, count: usize) -> i32 {
    let above_stack = config.base_z_order.saturating_add(clamp_count(count));
    above_stack.max(config.focus_z_order)
}

fn clamp_count(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

/// Raw pose of card `index` out of `count` at `progress`
///
/// Before its window opens a card sits off-stage (offstage position, entry
/// scale, transparent); after the window it rests at `index * slot_spacing`.
/// Opacity fades in over the first `fade_width` of the window. An active card
/// takes the focused pose but keeps its progress-derived opacity.
pub fn raw_pose(
    config: &StackConfig,
    progress: f64,
    index: usize,
    count: usize,
    active: bool,
) -> ItemPose {
    let progress = clamp_progress(progress);
    let window = entry_window(config, index, count);
    let opacity = map_range_clamped(
        progress,
        window.start,
        window.start + config.fade_width,
        0.0,
        1.0,
    );

    if active {
        return ItemPose {
            position: 0.0,
            depth: config.focus_depth,
            scale: config.focus_scale,
            opacity,
            z_order: focus_z_order(config, count),
        };
    }

    let rest_position = index as f64 * config.slot_spacing;
    ItemPose {
        position: map_range_clamped(
            progress,
            window.start,
            window.end,
            config.offstage_position,
            rest_position,
        ),
        depth: index as f64 * config.depth_spacing,
        scale: map_range_clamped(
            progress,
            window.start,
            window.end,
            config.entry_scale,
            config.rest_scale,
        ),
        opacity,
        z_order: config.base_z_order.saturating_add(clamp_count(index)),
    }
}

/// Raw poses for `count` cards, aligned with their indices
pub fn raw_poses(
    config: &StackConfig,
    progress: f64,
    count: usize,
    active: Option<usize>,
) -> Vec<ItemPose> {
    (0..count)
        .map(|index| raw_pose(config, progress, index, count, active == Some(index)))
        .collect()
}

/// Opacity of the "Scroll" hint: fully visible at 0, gone by 0.2
pub fn scroll_hint_opacity(progress: f64) -> f64 {
    map_range_clamped(clamp_progress(progress), 0.0, SCROLL_HINT_FADE_END, 1.0, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StackConfig {
        StackConfig::default()
    }

    #[test]
    fn test_windows_are_ordered_and_fit() {
        let config = config();
        for n in 1..=40 {
            for i in 0..n {
                let w = entry_window(&config, i, n);
                assert!(w.start < w.end, "n={} i={}", n, i);
                assert!(w.end <= 1.0, "n={} i={} end={}", n, i, w.end);
                assert!(w.start >= 0.0);
            }
        }
    }

    #[test]
    fn test_window_formula() {
        let w = entry_window(&config(), 3, 6);
        assert!((w.start - 0.25).abs() < 1e-12);
        assert!((w.end - 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_adjacent_windows_overlap() {
        let config = config();
        let a = entry_window(&config, 0, 6);
        let b = entry_window(&config, 1, 6);
        assert!(b.start < a.end);
    }

    #[test]
    fn test_everything_offstage_at_zero() {
        let config = config();
        for pose in raw_poses(&config, 0.0, 6, None) {
            assert_eq!(pose.position, 1000.0);
            assert_eq!(pose.scale, 0.9);
            assert_eq!(pose.opacity, 0.0);
        }
    }

    #[test]
    fn test_everything_at_rest_at_one() {
        let config = config();
        for (index, pose) in raw_poses(&config, 1.0, 6, None).into_iter().enumerate() {
            assert_eq!(pose.position, index as f64 * 60.0);
            assert_eq!(pose.scale, 1.0);
            assert_eq!(pose.opacity, 1.0);
            assert_eq!(pose.depth, index as f64 * 40.0);
        }
    }

    #[test]
    fn test_midway_through_window() {
        let config = config();
        // Card 1 of 2: window [0.25, 0.65]
        let pose = raw_pose(&config, 0.45, 1, 2, false);
        assert!((pose.position - 530.0).abs() < 1e-9);
        assert!((pose.scale - 0.95).abs() < 1e-9);
        assert_eq!(pose.opacity, 1.0);

        // Fade covers [0.25, 0.35]
        let pose = raw_pose(&config, 0.30, 1, 2, false);
        assert!((pose.opacity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        let config = config();
        assert_eq!(
            raw_pose(&config, -5.0, 2, 4, false),
            raw_pose(&config, 0.0, 2, 4, false)
        );
        assert_eq!(
            raw_pose(&config, 9.0, 2, 4, false),
            raw_pose(&config, 1.0, 2, 4, false)
        );
        assert_eq!(
            raw_pose(&config, f64::NAN, 2, 4, false),
            raw_pose(&config, 0.0, 2, 4, false)
        );
    }

    #[test]
    fn test_active_pose_is_pinned() {
        let config = config();
        for progress in [0.0, 0.3, 1.0] {
            let pose = raw_pose(&config, progress, 4, 6, true);
            assert_eq!(pose.position, 0.0);
            assert_eq!(pose.scale, 1.05);
            assert_eq!(pose.depth, 100.0);
            assert_eq!(pose.z_order, 100);
        }
    }

    #[test]
    fn test_z_orders_unique_and_active_on_top() {
        let config = config();
        for n in [1usize, 2, 6, 89, 90, 91, 150] {
            let poses = raw_poses(&config, 0.5, n, None);
            let mut z: Vec<i32> = poses.iter().map(|p| p.z_order).collect();
            z.dedup();
            assert_eq!(z.len(), n, "duplicate z-order for n={}", n);

            let active = n / 2;
            let poses = raw_poses(&config, 0.5, n, Some(active));
            let top = poses[active].z_order;
            for (i, pose) in poses.iter().enumerate() {
                if i != active {
                    assert!(pose.z_order < top, "n={} i={}", n, i);
                }
            }
        }
    }

    #[test]
    fn test_empty_collection() {
        assert!(raw_poses(&config(), 0.5, 0, None).is_empty());
    }

    #[test]
    fn test_scroll_hint_fades() {
        assert_eq!(scroll_hint_opacity(0.0), 1.0);
        assert!((scroll_hint_opacity(0.1) - 0.5).abs() < 1e-9);
        assert_eq!(scroll_hint_opacity(0.2), 0.0);
        assert_eq!(scroll_hint_opacity(0.8), 0.0);
    }
}
