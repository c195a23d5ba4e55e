pub mod list;
pub mod poses;
pub mod reveal;
pub mod run;
