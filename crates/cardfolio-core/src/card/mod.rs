mod models;
mod wallet;

pub use models::{CardRecord, NavigationTarget, SavedCard};
pub use wallet::Wallet;
