//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard and mouse input handling
//! - `events` - App event processing (media, fullscreen, task failures)
//! - `render` - View rendering dispatch
//! - `feed` - Category pill bar and card list
//! - `player` - Full, mini and fullscreen player views
//! - `status` - Status bar widget
//! - `help` - Keybinding overlay

mod events;
mod feed;
mod help;
mod input;
mod loop_runner;
mod player;
mod render;
mod status;

pub use loop_runner::{run, Action};

/// Loading spinner animation frames.
pub(crate) const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
