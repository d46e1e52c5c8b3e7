//! Interactive lookup TUI
//!
//! Two tabs over one search controller:
//! - 字: type a character, every keystroke re-runs the substring search
//! - 部首: pick a stroke count, then a radical, then search by radical number

pub mod app;
pub mod event;
pub mod terminal;
pub mod ui;

pub use terminal::run;
