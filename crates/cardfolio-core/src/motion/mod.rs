//! Spring smoothing for pose channels
//!
//! `spring` holds the closed-form damped oscillator; `smoother` keeps one
//! position spring and one scale spring per stacked card.

mod smoother;
mod spring;

pub use smoother::MotionSmoother;
pub use spring::Spring;
