//! clipdeck: a terminal video catalog with a categorized feed and an overlay
//! player.
//!
//! The binary in `main.rs` wires these modules to a real terminal; everything
//! below is usable on its own, which is how the integration tests drive it.

pub mod app;
pub mod catalog;
pub mod config;
pub mod feed;
pub mod keybindings;
pub mod media;
pub mod player;
pub mod theme;
pub mod ui;
pub mod util;
