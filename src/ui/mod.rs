//! User Interface module
//!
//! Terminal quest board using ratatui.

pub mod app;

pub use app::App;
