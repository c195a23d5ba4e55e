mod card_stack;
mod reveal_card;
mod status_bar;

pub use card_stack::CardStackWidget;
pub use reveal_card::RevealCardWidget;
pub use status_bar::StatusBarWidget;
