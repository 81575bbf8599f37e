use crate::catalog::Catalog;
use crate::config::Config;
use crate::feed::FeedView;
use crate::keybindings::{Context as KbContext, KeybindingRegistry};
use crate::media::{
    FullscreenCapability, FullscreenEvent, MediaBackend, MediaEvent, MediaInstance,
};
use crate::player::{
    recommended_videos, DragOutcome, EventDisposition, PlaybackSession, PlayerMode, SessionOptions,
};
use crate::theme::{StyleMap, ThemeVariant};
use crate::util::validate_url_for_open;
use anyhow::{Context, Result};
use ratatui::layout::Rect;
use ratatui::style::Style;
use std::borrow::Cow;
use tokio::time::Instant;

// ============================================================================
// Events
// ============================================================================

/// Everything that reaches the UI loop from outside the terminal input stream.
#[derive(Debug)]
pub enum AppEvent {
    /// A media capability reported a lifecycle change.
    Media {
        instance: MediaInstance,
        event: MediaEvent,
    },
    /// The platform fullscreen state changed or a request was refused.
    Fullscreen(FullscreenEvent),
    /// A background task panicked.
    ///
    /// - `task`: name of the task (e.g. "playhead")
    /// - `error`: the panic message
    TaskPanicked { task: &'static str, error: String },
}

// ============================================================================
// Mouse Hit Testing
// ============================================================================

/// What a clickable region on screen stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Category pill, by position in the pill bar.
    Pill(usize),
    /// Feed card, by index into the displayed cards.
    Card(usize),
    /// "Up Next" entry, by index into the flattened list.
    Recommendation(usize),
    Scrubber,
    /// Full player body; pressing here starts a drag-to-dismiss.
    DragHandle,
    MiniBar,
    MiniPlay,
    CloseButton,
    PlayButton,
    SkipBack,
    SkipForward,
    MuteButton,
    FullscreenButton,
    MinimizeButton,
}

/// Clickable regions recorded by the last render, front-most last.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, Hit)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, area: Rect, hit: Hit) {
        if area.width > 0 && area.height > 0 {
            self.regions.push((area, hit));
        }
    }

    /// Front-most region containing the cell, with its rectangle.
    pub fn at(&self, column: u16, row: u16) -> Option<(Rect, Hit)> {
        self.regions
            .iter()
            .rev()
            .find(|(r, _)| {
                column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
            })
            .copied()
    }

    /// Rectangle of the first region of the given kind.
    pub fn area_of(&self, hit: Hit) -> Option<Rect> {
        self.regions.iter().find(|(_, h)| *h == hit).map(|(r, _)| *r)
    }
}

/// A mouse gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerGesture {
    /// Dragging the scrubber thumb.
    Scrub,
    /// Dragging the full player down from `start_row`.
    Dismiss { start_row: u16 },
}

// ============================================================================
// App
// ============================================================================

/// Root of the application: owns the catalog, the feed, and the one optional
/// playback session, and is the only place a session is created or destroyed.
pub struct App {
    pub catalog: Catalog,
    pub feed: FeedView,
    pub player: Option<PlaybackSession>,
    backend: Box<dyn MediaBackend>,
    fullscreen: Box<dyn FullscreenCapability>,

    pub config: Config,
    session_options: SessionOptions,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    pub keybindings: KeybindingRegistry,

    /// Status message with expiry. Cow avoids allocation for static literals.
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Dirty flag to skip unnecessary frame renders
    pub needs_redraw: bool,

    pub show_help: bool,
    pub help_scroll_offset: usize,

    /// Loading spinner frame, advanced on tick while media is buffering.
    pub spinner_frame: usize,

    /// Clickable regions from the last frame.
    pub hits: HitMap,
    pub gesture: Option<PointerGesture>,
}

impl App {
    pub fn new(
        catalog: Catalog,
        config: Config,
        backend: Box<dyn MediaBackend>,
        fullscreen: Box<dyn FullscreenCapability>,
    ) -> Self {
        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme, falling back to dark");
            ThemeVariant::Dark
        });

        let mut keybindings = KeybindingRegistry::new();
        let warnings = keybindings.apply_overrides(&config.keybindings);
        for warning in &warnings {
            tracing::warn!(%warning, "Keybinding override skipped");
        }

        let mut app = Self {
            catalog,
            feed: FeedView::new(),
            player: None,
            backend,
            fullscreen,
            session_options: config.session_options(),
            config,
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            keybindings,
            status_message: None,
            needs_redraw: true,
            show_help: false,
            help_scroll_offset: 0,
            spinner_frame: 0,
            hits: HitMap::default(),
            gesture: None,
        };
        if !warnings.is_empty() {
            app.set_status(format!("{} keybinding override(s) ignored, see log", warnings.len()));
        }
        app
    }

    // ========================================================================
    // Theme and status
    // ========================================================================

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant. Returns the new theme's name.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear the status message if older than 3 seconds.
    /// Returns true if a message was actually cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    // ========================================================================
    // Derived view state
    // ========================================================================

    /// Current player layout, or `None` with no video bound.
    pub fn player_mode(&self) -> Option<PlayerMode> {
        self.player.as_ref().map(PlaybackSession::mode)
    }

    /// The feed is shown unless the player covers it.
    pub fn feed_visible(&self) -> bool {
        self.player_mode().map_or(true, |mode| !mode.hides_feed())
    }

    /// Keybinding context for the current layout.
    pub fn key_context(&self) -> KbContext {
        match self.player_mode() {
            None => KbContext::Feed,
            Some(PlayerMode::Minimized) => KbContext::MiniPlayer,
            Some(PlayerMode::Full) => KbContext::Player,
            Some(PlayerMode::Fullscreen) => KbContext::Fullscreen,
        }
    }

    // ========================================================================
    // Session lifecycle
    // ========================================================================

    /// Bind the video with `slug`, creating the session if needed.
    ///
    /// Returns false if no such video exists.
    pub fn activate_video(&mut self, slug: &str) -> bool {
        let Some(video) = self.catalog.find_video(slug).cloned() else {
            tracing::warn!(%slug, "Activate for unknown video");
            return false;
        };
        match self.player.as_mut() {
            Some(session) => session.activate(video, self.backend.as_mut()),
            None => {
                self.player = Some(PlaybackSession::open(
                    video,
                    self.backend.as_mut(),
                    &self.session_options,
                ));
            }
        }
        self.clear_gesture();
        true
    }

    /// Activate the card under the feed cursor.
    pub fn activate_selected_card(&mut self) -> bool {
        let Some(slug) = self
            .feed
            .selected_card(&self.catalog)
            .map(|(_, video)| video.slug.clone())
        else {
            return false;
        };
        self.activate_video(&slug)
    }

    /// Rebind the open player to another video. No-op for the bound video or
    /// with no session.
    pub fn switch_video(&mut self, slug: &str) -> bool {
        let Some(video) = self.catalog.find_video(slug).cloned() else {
            return false;
        };
        match self.player.as_mut() {
            Some(session) => session.switch_video(video, self.backend.as_mut()),
            None => false,
        }
    }

    /// Switch to the "Up Next" entry under the cursor.
    pub fn switch_to_selected_recommendation(&mut self) -> bool {
        let Some(slug) = self
            .player
            .as_ref()
            .and_then(|s| s.selected_recommendation(&self.catalog))
            .map(|v| v.slug.clone())
        else {
            return false;
        };
        self.switch_video(&slug)
    }

    /// Switch to the `index`th "Up Next" entry.
    pub fn switch_to_recommendation(&mut self, index: usize) -> bool {
        let Some(slug) = self.player.as_ref().and_then(|s| {
            recommended_videos(&self.catalog, s.video())
                .get(index)
                .map(|v| v.slug.clone())
        }) else {
            return false;
        };
        self.switch_video(&slug)
    }

    /// Destroy the session and release its media.
    pub fn close_player(&mut self) {
        if let Some(session) = self.player.take() {
            session.close(self.fullscreen.as_mut());
        }
        self.clear_gesture();
    }

    pub fn minimize_player(&mut self) {
        if let Some(session) = self.player.as_mut() {
            session.minimize(self.fullscreen.as_mut());
        }
        self.clear_gesture();
    }

    /// Drop any pointer gesture in progress. An unfinished scrub is cancelled
    /// so the session does not stay in seeking mode.
    pub fn clear_gesture(&mut self) {
        if self.gesture.take() == Some(PointerGesture::Scrub) {
            if let Some(session) = self.player.as_mut() {
                session.cancel_seek();
            }
        }
    }

    pub fn restore_player(&mut self) {
        if let Some(session) = self.player.as_mut() {
            session.restore();
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        if let Some(session) = self.player.as_mut() {
            session.toggle_fullscreen(self.fullscreen.as_mut());
        }
    }

    /// Finish a drag on the full player at `offset` units below its start.
    pub fn end_dismiss_drag(&mut self, offset: f64) -> DragOutcome {
        let outcome = self
            .player
            .as_mut()
            .map_or(DragOutcome::Ignored, |s| s.drag_end(offset));
        if outcome == DragOutcome::Minimized {
            tracing::debug!(offset, "Player dismissed by drag");
        }
        outcome
    }

    // ========================================================================
    // External events
    // ========================================================================

    pub fn handle_media_event(&mut self, instance: MediaInstance, event: MediaEvent) {
        let Some(session) = self.player.as_mut() else {
            tracing::debug!(%instance, ?event, "Media event with no session");
            return;
        };
        if session.apply_media_event(instance, &event) == EventDisposition::Stale {
            return;
        }
        match event {
            MediaEvent::PlayRejected { reason } => {
                self.set_status(format!("Playback blocked: {}. Press Space to play.", reason));
            }
            MediaEvent::Ended => self.set_status("Finished. Press Space to replay."),
            _ => {}
        }
    }

    pub fn handle_fullscreen_event(&mut self, event: FullscreenEvent) {
        match self.player.as_mut() {
            Some(session) => session.apply_fullscreen_event(&event),
            None => {
                // Nothing to show fullscreen; undo a late grant.
                if event == FullscreenEvent::Changed(true) {
                    self.fullscreen.exit();
                }
            }
        }
        if let FullscreenEvent::Rejected { reason } = event {
            self.set_status(format!("Fullscreen unavailable: {}", reason));
        }
    }

    /// Terminal resized.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.fullscreen.on_resize(width, height);
        self.needs_redraw = true;
    }

    /// Periodic tick. Returns true if anything visible changed.
    pub fn tick(&mut self, spinner_frames: usize) -> bool {
        let loading = self.player.as_ref().is_some_and(|s| s.is_loading());
        if loading {
            self.spinner_frame = (self.spinner_frame + 1) % spinner_frames.max(1);
        }
        loading
    }

    // ========================================================================
    // Browser hand-off
    // ========================================================================

    /// Open the bound video's page in the system browser.
    pub fn open_in_browser(&mut self) -> Result<()> {
        let Some(session) = self.player.as_ref() else {
            return Ok(());
        };
        let url = validate_url_for_open(&session.video().media_url)
            .with_context(|| format!("Refusing to open '{}'", session.video().media_url))?;
        open::that(url.as_str()).with_context(|| format!("Failed to open {}", url))?;
        tracing::info!(%url, "Opened video in browser");
        Ok(())
    }
}

/// Release the media and leave fullscreen when the app goes away.
impl Drop for App {
    fn drop(&mut self) {
        if let Some(session) = self.player.take() {
            session.close(self.fullscreen.as_mut());
            tracing::debug!("Closed playback session on App drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::fixtures::music_and_news;
    use crate::catalog::Video;
    use crate::media::{MediaCapability, MediaParams};
    use std::sync::{Arc, Mutex};
    use tokio::time::{self, Duration};

    #[derive(Default, Clone)]
    struct Log(Arc<Mutex<Vec<String>>>);

    impl Log {
        fn push(&self, entry: String) {
            self.0.lock().unwrap().push(entry);
        }
        fn entries(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct NullMedia(MediaInstance, Log);

    impl MediaCapability for NullMedia {
        fn instance(&self) -> MediaInstance {
            self.0
        }
        fn play(&mut self) {}
        fn pause(&mut self) {}
        fn seek_to(&mut self, _: f64) {}
        fn seek_by(&mut self, _: f64) {}
        fn set_volume(&mut self, _: f64) {}
        fn release(&mut self) {
            self.1.push(format!("release {}", self.0));
        }
    }

    struct NullBackend(u64, Log);

    impl MediaBackend for NullBackend {
        fn open(&mut self, video: &Video, _: &MediaParams) -> Box<dyn MediaCapability> {
            self.0 += 1;
            self.1.push(format!("open {}", video.slug));
            Box::new(NullMedia(MediaInstance(self.0), self.1.clone()))
        }
    }

    struct SyncFullscreen {
        active: bool,
        log: Log,
    }

    impl FullscreenCapability for SyncFullscreen {
        fn request(&mut self) {
            self.active = true;
            self.log.push("fs request".into());
        }
        fn exit(&mut self) {
            self.active = false;
            self.log.push("fs exit".into());
        }
        fn is_active(&self) -> bool {
            self.active
        }
    }

    fn test_app() -> (App, Log) {
        let log = Log::default();
        let app = App::new(
            music_and_news(),
            Config::default(),
            Box::new(NullBackend(0, log.clone())),
            Box::new(SyncFullscreen {
                active: false,
                log: log.clone(),
            }),
        );
        (app, log)
    }

    #[test]
    fn test_feed_visible_without_player() {
        let (app, _) = test_app();
        assert!(app.feed_visible());
        assert_eq!(app.key_context(), KbContext::Feed);
    }

    #[test]
    fn test_activate_hides_feed() {
        let (mut app, log) = test_app();
        assert!(app.activate_video("b"));
        assert!(!app.feed_visible());
        assert_eq!(app.key_context(), KbContext::Player);
        assert_eq!(log.entries(), vec!["open b".to_string()]);
    }

    #[test]
    fn test_activate_unknown_video() {
        let (mut app, _) = test_app();
        assert!(!app.activate_video("nope"));
        assert!(app.player.is_none());
    }

    #[test]
    fn test_minimize_shows_feed_and_keeps_filter() {
        let (mut app, _) = test_app();
        app.feed.select_filter(crate::feed::CategoryFilter::Named("News".into()));
        app.activate_video("c");
        app.minimize_player();

        assert!(app.feed_visible());
        assert_eq!(app.key_context(), KbContext::MiniPlayer);
        assert_eq!(app.feed.filter().label(), "News");
    }

    #[test]
    fn test_activate_from_feed_while_minimized_restores() {
        let (mut app, log) = test_app();
        app.activate_video("a");
        app.minimize_player();
        app.activate_video("c");

        assert_eq!(app.player_mode(), Some(PlayerMode::Full));
        assert_eq!(app.player.as_ref().map(|s| s.video().slug.as_str()), Some("c"));
        assert!(log.entries().contains(&"release #1".to_string()));
    }

    #[test]
    fn test_close_player_releases() {
        let (mut app, log) = test_app();
        app.activate_video("a");
        app.close_player();
        assert!(app.player.is_none());
        assert!(app.feed_visible());
        assert_eq!(log.entries().last().map(String::as_str), Some("release #1"));
    }

    #[test]
    fn test_fullscreen_round_trip_through_events() {
        let (mut app, _) = test_app();
        app.activate_video("a");
        app.toggle_fullscreen();
        app.handle_fullscreen_event(FullscreenEvent::Changed(true));
        assert_eq!(app.key_context(), KbContext::Fullscreen);

        app.minimize_player();
        app.handle_fullscreen_event(FullscreenEvent::Changed(false));
        assert_eq!(app.player_mode(), Some(PlayerMode::Minimized));
    }

    #[test]
    fn test_fullscreen_rejection_sets_status() {
        let (mut app, _) = test_app();
        app.activate_video("a");
        app.handle_fullscreen_event(FullscreenEvent::Rejected {
            reason: "terminal too small".into(),
        });
        let msg = app.status_message.as_ref().map(|(m, _)| m.to_string());
        assert_eq!(msg.as_deref(), Some("Fullscreen unavailable: terminal too small"));
        assert_eq!(app.player_mode(), Some(PlayerMode::Full));
    }

    #[test]
    fn test_late_fullscreen_grant_without_session_is_undone() {
        let (mut app, log) = test_app();
        app.handle_fullscreen_event(FullscreenEvent::Changed(true));
        assert_eq!(log.entries(), vec!["fs exit".to_string()]);
    }

    #[test]
    fn test_stale_media_event_ignored() {
        let (mut app, _) = test_app();
        app.activate_video("a");
        app.activate_video("b");
        app.handle_media_event(MediaInstance(1), MediaEvent::Ended);
        assert!(app.player.as_ref().is_some_and(|s| !s.is_ended()));
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_switch_to_recommendation() {
        let (mut app, _) = test_app();
        app.activate_video("a");
        // Up Next for "a" is [b, c]
        assert!(app.switch_to_recommendation(1));
        assert_eq!(app.player.as_ref().map(|s| s.video().slug.as_str()), Some("c"));
        assert!(!app.switch_to_recommendation(9));
    }

    #[test]
    fn test_activate_selected_card_uses_cursor() {
        let (mut app, _) = test_app();
        app.feed.nav_down(&app.catalog);
        assert!(app.activate_selected_card());
        assert_eq!(app.player.as_ref().map(|s| s.video().slug.as_str()), Some("b"));
    }

    #[test]
    fn test_open_in_browser_rejects_non_web_url() {
        let mut catalog = music_and_news();
        catalog.sections[0].contents[0].media_url = "file:///etc/passwd".into();
        let log = Log::default();
        let mut app = App::new(
            catalog,
            Config::default(),
            Box::new(NullBackend(0, log.clone())),
            Box::new(SyncFullscreen { active: false, log }),
        );
        app.activate_video("a");
        let err = app.open_in_browser().unwrap_err();
        assert!(err.to_string().contains("Refusing to open"));
    }

    #[test]
    fn test_drop_releases_session() {
        let (mut app, log) = test_app();
        app.activate_video("a");
        drop(app);
        assert!(log.entries().contains(&"release #1".to_string()));
    }

    #[test]
    fn test_hit_map_front_most_wins() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(0, 0, 10, 10), Hit::DragHandle);
        hits.push(Rect::new(2, 5, 6, 1), Hit::Scrubber);
        assert_eq!(hits.at(3, 5).map(|(_, h)| h), Some(Hit::Scrubber));
        assert_eq!(hits.at(3, 6).map(|(_, h)| h), Some(Hit::DragHandle));
        assert_eq!(hits.at(20, 20), None);
        assert_eq!(hits.area_of(Hit::Scrubber), Some(Rect::new(2, 5, 6, 1)));
    }

    #[test]
    fn test_keybinding_warnings_surface_in_status() {
        let mut config = Config::default();
        config
            .keybindings
            .insert("refresh_all".to_string(), "r".to_string());
        let log = Log::default();
        let app = App::new(
            music_and_news(),
            config,
            Box::new(NullBackend(0, log.clone())),
            Box::new(SyncFullscreen { active: false, log }),
        );
        assert!(app.status_message.is_some());
    }

    // Status message expiry with time control
    #[tokio::test]
    async fn test_status_expires_after_3_seconds() {
        time::pause();
        let (mut app, _) = test_app();
        app.set_status("Hello");
        assert!(!app.clear_expired_status());

        time::advance(Duration::from_secs(3)).await;
        assert!(app.clear_expired_status());
        assert!(app.status_message.is_none());
    }
}
