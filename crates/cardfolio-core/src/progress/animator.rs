//! Progress animation controller
//!
//! Combines easing functions and timing utilities to move the wallet's
//! progress value smoothly toward a target.

use std::time::{Duration, Instant};

use super::easing::{EasingType, EasingTypeExt};
use super::source::clamp_progress;
use super::timing::{is_complete, lerp, progress};
use crate::config::ScrollConfig;

/// Extension trait for ScrollConfig with utility methods
pub trait ScrollConfigExt {
    /// Get animation duration as Duration
    fn animation_duration(&self) -> Duration;

    /// Get tick duration for animation FPS
    fn animation_tick_duration(&self) -> Duration;

    /// Check if smooth scrolling is effectively enabled
    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

/// Progress animation controller
///
/// Call `scroll_to()` or `scroll_by()` to request movement, then `update()`
/// each frame to get the current interpolated progress.
#[derive(Debug, Clone)]
pub struct ProgressAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    current: f64,
    /// Scroll steps requested since the last update
    pending_steps: i32,
}

impl Default for ProgressAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ProgressAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current: 0.0,
            pending_steps: 0,
        }
    }

    pub fn set_config(&mut self, config: ScrollConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Check if there's pending work (animation or batched steps)
    /// Use this to determine if we need high frame rate
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_steps != 0
    }

    /// Progress value the current animation ends at
    pub fn target(&self) -> f64 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current)
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Set progress immediately (no animation)
    pub fn set(&mut self, value: f64) {
        self.animation = None;
        self.current = clamp_progress(value);
        self.pending_steps = 0;
    }

    /// Start an animation toward `target`
    ///
    /// Starts from the currently displayed value, so retargeting mid-flight
    /// never jumps.
    pub fn scroll_to(&mut self, target: f64) {
        self.scroll_to_at(target, Instant::now());
    }

    pub fn scroll_to_at(&mut self, target: f64, now: Instant) {
        let target = clamp_progress(target);

        if !self.config.is_smooth() {
            self.current = target;
            self.animation = None;
            return;
        }

        if self.current == target {
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.current,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
    }

    /// Scroll by a number of steps (positive = further into the stack)
    ///
    /// Multiple calls within the same frame are batched together.
    pub fn scroll_by(&mut self, steps: i32) {
        if !self.config.is_smooth() {
            let delta = steps as f64 * self.config.scroll_step;
            self.current = clamp_progress(self.current + delta);
            self.animation = None;
            return;
        }

        self.pending_steps += steps;
    }

    /// Update animation state and return the current progress
    ///
    /// Call this every frame to advance the animation.
    pub fn update(&mut self) -> f64 {
        self.update_at(Instant::now())
    }

    pub fn update_at(&mut self, now: Instant) -> f64 {
        if self.pending_steps != 0 {
            let delta = self.pending_steps as f64 * self.config.scroll_step;
            let new_target = clamp_progress(self.target() + delta);
            self.pending_steps = 0;

            if new_target != self.current {
                self.animation = Some(ActiveAnimation {
                    start: now,
                    from: self.current,
                    to: new_target,
                    duration: self.config.animation_duration(),
                    easing: self.config.easing,
                });
            }
        }

        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, now, anim.duration) {
                self.current = anim.to;
                self.animation = None;
            } else {
                let t = progress(anim.start, now, anim.duration);
                self.current = lerp(anim.from, anim.to, anim.easing.apply(t));
            }
        }

        self.current
    }

    /// Cancel any active animation and stop at the current value
    pub fn cancel(&mut self) {
        self.animation = None;
        self.pending_steps = 0;
    }

    pub fn reset(&mut self) {
        self.animation = None;
        self.current = 0.0;
        self.pending_steps = 0;
    }
}
