use serde::Serialize;

/// Visual placement of one card at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemPose {
    /// Vertical offset in logical units (larger is further down)
    pub position: f64,
    /// Offset toward the camera
    pub depth: f64,
    pub scale: f64,
    /// In [0, 1]
    pub opacity: f64,
    /// Stacking order; higher draws on top
    pub z_order: i32,
}

/// Progress sub-range over which a card moves from off-stage to rest
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntryWindow {
    pub start: f64,
    pub end: f64,
}

impl EntryWindow {
    pub fn contains(&self, progress: f64) -> bool {
        progress >= self.start && progress <= self.end
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}
