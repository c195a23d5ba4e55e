//! Progress input for the stack layout
//!
//! The wallet stack is driven by a single normalized progress value in [0, 1].
//! This module provides the pieces that produce and shape that value:
//!
//! - `easing` - Pure easing curves over [0, 1]
//! - `timing` - Elapsed-time progress and clamped interpolation
//! - `source` - Abstract progress producer with watch-based subscription
//! - `animator` - Eased, time-based animation of the progress value
//!
//! # Usage
//!
//! ```ignore
//! use cardfolio_core::progress::{ProgressAnimator, ProgressChannel, ProgressSource};
//!
//! let channel = ProgressChannel::new(0.0);
//! let mut rx = channel.subscribe();
//! let mut animator = ProgressAnimator::new(config.scroll.clone());
//!
//! animator.scroll_by(1);
//! // Each frame:
//! channel.set(animator.update());
//! ```

pub mod animator;
pub mod easing;
pub mod source;
pub mod timing;

pub use animator::{ProgressAnimator, ScrollConfigExt};
pub use easing::EasingTypeExt;
pub use source::{clamp_progress, ProgressChannel, ProgressSource};
pub use timing::{lerp, lerp_clamped, map_range_clamped};
