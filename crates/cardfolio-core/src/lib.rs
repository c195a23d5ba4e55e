pub mod card;
pub mod config;
pub mod error;
pub mod layout;
pub mod motion;
pub mod progress;
pub mod reveal;
pub mod selection;

pub use card::{CardRecord, NavigationTarget, Wallet};
pub use config::{
    AppConfig, EasingType, KeymapConfig, RevealConfig, ScrollConfig, SpringConfig, StackConfig,
};
pub use error::{Error, Result};
pub use layout::{ItemPose, StackLayoutEngine};
pub use reveal::{CardFace, RevealDriver, RevealSnapshot, RevealState, RevealStateMachine};
pub use selection::{CommitSignal, SelectionController, TapOutcome};
