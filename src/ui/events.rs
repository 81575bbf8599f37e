//! App event processing.
//!
//! Media and fullscreen events are forwarded to the app, which routes them
//! into the playback session. Task failures surface in the status bar.

use crate::app::{App, AppEvent};

pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Media { instance, event } => {
            tracing::trace!(%instance, ?event, "Media event");
            app.handle_media_event(instance, event);
        }
        AppEvent::Fullscreen(event) => {
            tracing::debug!(?event, "Fullscreen event");
            app.handle_fullscreen_event(event);
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, %error, "Background task panicked");
            app.set_status(format!("Internal error in {}: {}", task, error));
        }
    }
}
