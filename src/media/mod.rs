//! Media capability surface consumed by the player.
//!
//! The player never decodes anything itself. It drives an opaque
//! `MediaCapability` (play, pause, seek, volume) and receives asynchronous
//! `MediaEvent`s back through the application event channel. Every event is
//! tagged with the `MediaInstance` that produced it so the player can drop
//! events from a capability it has already replaced.
//!
//! # Module Structure
//!
//! - `simulated` - tokio-driven playhead backend used by the terminal UI
//! - `fullscreen` - platform fullscreen capability and its terminal implementation

pub mod fullscreen;
pub mod simulated;

use std::fmt;

use crate::catalog::Video;

pub use fullscreen::{FullscreenCapability, FullscreenEvent, TerminalFullscreen};
pub use simulated::{Playhead, SimulatedBackend, SimulatedOptions};

/// Identity of one capability instance. Allocated by the backend, never reused
/// within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaInstance(pub u64);

impl fmt::Display for MediaInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Embedding parameters handed to the media widget on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaParams {
    /// Suppress the provider's branding overlay.
    pub modest_branding: bool,
    /// Show related-video suggestions at the end.
    pub show_related: bool,
    /// Show the widget's own transport controls.
    pub native_controls: bool,
    /// Let the widget handle keyboard shortcuts.
    pub keyboard_shortcuts: bool,
    /// Origin the playback is pinned to.
    pub origin: String,
}

impl Default for MediaParams {
    fn default() -> Self {
        Self {
            modest_branding: true,
            show_related: false,
            native_controls: false,
            keyboard_shortcuts: false,
            origin: "clipdeck://local".to_string(),
        }
    }
}

impl MediaParams {
    /// Render as a query string, in the form embed widgets accept.
    pub fn to_query(&self) -> String {
        let flag = |b: bool| if b { "1" } else { "0" };
        format!(
            "modestbranding={}&rel={}&controls={}&disablekb={}&origin={}",
            flag(self.modest_branding),
            flag(self.show_related),
            flag(self.native_controls),
            flag(!self.keyboard_shortcuts),
            self.origin
        )
    }
}

/// Lifecycle events emitted by a capability.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Enough data is buffered to start.
    CanPlay,
    /// Playback actually started or resumed after buffering.
    Playing,
    /// Playback stalled waiting for data.
    Waiting,
    /// A play request was accepted.
    Play,
    Pause,
    Ended,
    TimeUpdate { current_time: f64 },
    DurationChange { duration: f64 },
    /// A play request was refused by the platform (e.g. autoplay policy).
    PlayRejected { reason: String },
}

/// A single loaded media source.
///
/// All methods are fire-and-forget: outcomes come back as `MediaEvent`s.
pub trait MediaCapability: Send {
    fn instance(&self) -> MediaInstance;
    fn play(&mut self);
    fn pause(&mut self);
    /// Jump to an absolute position in seconds.
    fn seek_to(&mut self, seconds: f64);
    /// Offset the current position. The capability clamps to `[0, duration]`.
    fn seek_by(&mut self, delta_seconds: f64);
    fn set_volume(&mut self, fraction: f64);
    /// Stop playback and detach. No events are emitted afterwards.
    fn release(&mut self);
}

/// Factory for capabilities, one per bound video.
pub trait MediaBackend: Send {
    fn open(&mut self, video: &Video, params: &MediaParams) -> Box<dyn MediaCapability>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_query() {
        assert_eq!(
            MediaParams::default().to_query(),
            "modestbranding=1&rel=0&controls=0&disablekb=1&origin=clipdeck://local"
        );
    }

    #[test]
    fn test_instance_display() {
        assert_eq!(MediaInstance(7).to_string(), "#7");
    }
}
