//! Platform fullscreen capability.
//!
//! Requests are asynchronous in the same way browser fullscreen is: the caller
//! asks, and the outcome arrives later as a `FullscreenEvent`. The platform may
//! also leave fullscreen on its own, which is reported the same way.
use tokio::sync::mpsc;

use crate::app::AppEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FullscreenEvent {
    /// Fullscreen state changed, by request or by the platform.
    Changed(bool),
    /// A request was denied. State is unchanged.
    Rejected { reason: String },
}

pub trait FullscreenCapability: Send {
    fn request(&mut self);
    fn exit(&mut self);
    fn is_active(&self) -> bool;
    /// Viewport size changed. Platforms that cannot keep fullscreen at the new
    /// size leave it and report `Changed(false)`.
    fn on_resize(&mut self, _width: u16, _height: u16) {}
}

/// Fullscreen for the terminal: the player takes the whole screen.
///
/// Only granted while the terminal is at least `min_width` x `min_height`.
/// Shrinking below that while active drops out of fullscreen.
///
/// Events go out on an unbounded channel of their own: `active` flips before
/// the event is sent, so a dropped `Changed` would desync the player.
pub struct TerminalFullscreen {
    min_width: u16,
    min_height: u16,
    width: u16,
    height: u16,
    active: bool,
    events: mpsc::UnboundedSender<AppEvent>,
}

impl TerminalFullscreen {
    pub fn new(min_width: u16, min_height: u16, events: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            min_width,
            min_height,
            width: u16::MAX,
            height: u16::MAX,
            active: false,
            events,
        }
    }

    fn fits(&self) -> bool {
        self.width >= self.min_width && self.height >= self.min_height
    }

    fn emit(&self, event: FullscreenEvent) {
        if let Err(e) = self.events.send(AppEvent::Fullscreen(event)) {
            tracing::warn!(error = %e, "Failed to deliver fullscreen event");
        }
    }
}

impl FullscreenCapability for TerminalFullscreen {
    fn request(&mut self) {
        if self.active {
            return;
        }
        if !self.fits() {
            self.emit(FullscreenEvent::Rejected {
                reason: format!(
                    "terminal too small ({}x{}, need {}x{})",
                    self.width, self.height, self.min_width, self.min_height
                ),
            });
            return;
        }
        self.active = true;
        self.emit(FullscreenEvent::Changed(true));
    }

    fn exit(&mut self) {
        if self.active {
            self.active = false;
            self.emit(FullscreenEvent::Changed(false));
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn on_resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        if self.active && !self.fits() {
            tracing::info!(width, height, "Terminal shrank below fullscreen minimum");
            self.active = false;
            self.emit(FullscreenEvent::Changed(false));
        }
    }
}
