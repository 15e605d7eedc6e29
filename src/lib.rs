//! dsa-sheet - A terminal tracker for working through a DSA practice sheet
//!
//! Browse the sheet by topic, mark problems as you solve them, and watch
//! progress add up per topic and per difficulty.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod progress;
pub mod stats;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use theme::Theme;
