//! Timed flip/zoom reveal of a single card
//!
//! `machine` is the clock-injected state machine; `driver` runs one on tokio
//! timers and publishes snapshots.

mod driver;
mod machine;

pub use driver::{RevealCommand, RevealDriver};
pub use machine::{CardFace, RevealSnapshot, RevealState, RevealStateMachine};
