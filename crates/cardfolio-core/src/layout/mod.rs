//! Scroll-progress-driven stack layout
//!
//! - `pose` - Pose and entry-window value types
//! - `mapper` - Pure progress → raw pose mapping
//! - `engine` - Stateful layout combining the mapper with spring smoothing

mod engine;
pub mod mapper;
mod pose;

pub use engine::StackLayoutEngine;
pub use mapper::{entry_window, focus_z_order, raw_pose, raw_poses, scroll_hint_opacity};
pub use pose::{EntryWindow, ItemPose};
