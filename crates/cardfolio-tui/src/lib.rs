pub mod app;
pub mod event;
pub mod input;
pub mod keymap;
pub mod theme;
pub mod widgets;

pub use app::{App, View};
pub use theme::PlatinumNoir;
