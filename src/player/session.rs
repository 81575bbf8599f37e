use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Video};
use crate::media::{
    FullscreenCapability, FullscreenEvent, MediaBackend, MediaCapability, MediaEvent,
    MediaInstance, MediaParams,
};

use super::gesture::DragOutcome;
use super::mode::PlayerMode;
use super::recommend::recommended_videos;

/// Settings the session is created with.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Volume a new session starts at, in `[0, 1]`.
    pub initial_volume: f64,
    pub media_params: MediaParams,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
            media_params: MediaParams::default(),
        }
    }
}

/// What happened to an incoming media event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    Applied,
    /// Came from a capability this session already replaced.
    Stale,
}

/// Playback state for the one active video.
///
/// The session exists exactly while a video is bound; closing the player
/// consumes it. Volume survives switching to another video, everything else
/// transport-related is reset on each activation.
pub struct PlaybackSession {
    video: Video,
    media: Box<dyn MediaCapability>,
    instance: MediaInstance,
    media_params: MediaParams,

    is_playing: bool,
    is_ended: bool,
    is_loading: bool,
    is_seeking: bool,
    is_minimized: bool,
    is_fullscreen: bool,

    /// Fraction of `duration` played, in `[0, 1]`.
    progress: f64,
    /// Seconds; 0 until the capability reports a duration.
    duration: f64,
    volume: f64,
    /// Last non-zero volume, restored on un-mute.
    previous_volume: f64,

    /// Live downward displacement while the full player is being dragged.
    drag_offset: f64,
    /// Cursor into the flattened "Up Next" list.
    recommendation_cursor: usize,
}

impl std::fmt::Debug for PlaybackSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("video", &self.video.slug)
            .field("instance", &self.instance)
            .field("is_playing", &self.is_playing)
            .field("is_ended", &self.is_ended)
            .field("progress", &self.progress)
            .field("duration", &self.duration)
            .field("volume", &self.volume)
            .field("mode", &self.mode())
            .finish_non_exhaustive()
    }
}

impl PlaybackSession {
    /// Bind a first video and start playing it.
    pub fn open(video: Video, backend: &mut dyn MediaBackend, options: &SessionOptions) -> Self {
        let volume = clamp_unit(options.initial_volume).unwrap_or(1.0);
        let media = backend.open(&video, &options.media_params);
        let instance = media.instance();
        let mut session = Self {
            video,
            media,
            instance,
            media_params: options.media_params.clone(),
            is_playing: false,
            is_ended: false,
            is_loading: true,
            is_seeking: false,
            is_minimized: false,
            is_fullscreen: false,
            progress: 0.0,
            duration: 0.0,
            volume,
            previous_volume: if volume > 0.0 { volume } else { 1.0 },
            drag_offset: 0.0,
            recommendation_cursor: 0,
        };
        session.start_bound();
        session
    }

    /// Bind `video`, replacing whatever was bound, and play from the start.
    ///
    /// Always resets transport state and un-minimizes, even when `video` is
    /// already the bound one.
    pub fn activate(&mut self, video: Video, backend: &mut dyn MediaBackend) {
        self.media.release();
        self.media = backend.open(&video, &self.media_params);
        self.instance = self.media.instance();
        self.video = video;
        self.start_bound();
    }

    /// Replace the bound video from the "Up Next" list. Returns false, doing
    /// nothing, if `video` is already bound.
    pub fn switch_video(&mut self, video: Video, backend: &mut dyn MediaBackend) -> bool {
        if self.video.same_as(&video) {
            return false;
        }
        self.activate(video, backend);
        true
    }

    fn start_bound(&mut self) {
        self.progress = 0.0;
        self.duration = 0.0;
        self.is_ended = false;
        self.is_loading = true;
        self.is_seeking = false;
        self.is_minimized = false;
        self.drag_offset = 0.0;
        self.recommendation_cursor = 0;

        self.media.set_volume(self.volume);
        self.media.play();
        self.is_playing = true;
        info!(video = %self.video.slug, instance = %self.instance, "Video bound");
    }

    /// Release the capability and end the session.
    pub fn close(mut self, fullscreen: &mut dyn FullscreenCapability) {
        if fullscreen.is_active() {
            fullscreen.exit();
        }
        self.media.release();
        info!(video = %self.video.slug, "Player closed");
    }

    // ========================================================================
    // Transport
    // ========================================================================

    /// Play/pause. A finished video restarts from the beginning.
    pub fn toggle_play(&mut self) {
        if self.is_ended {
            self.media.seek_to(0.0);
            self.media.play();
            self.is_ended = false;
            self.is_playing = true;
            self.progress = 0.0;
            return;
        }
        if self.is_playing {
            self.media.pause();
        } else {
            self.media.play();
        }
        self.is_playing = !self.is_playing;
    }

    /// Scrubber is being dragged to `percent` of the duration. The media is
    /// not touched until `seek_commit`.
    pub fn seek_drag(&mut self, percent: f64) {
        let Some(fraction) = percent_to_fraction(percent) else {
            return;
        };
        self.is_seeking = true;
        self.progress = fraction;
    }

    /// Scrubber released at `percent`. Returns the seek target in seconds, or
    /// `None` if no drag was in progress.
    pub fn seek_commit(&mut self, percent: f64) -> Option<f64> {
        if !self.is_seeking {
            return None;
        }
        self.is_seeking = false;
        let fraction = percent_to_fraction(percent).unwrap_or(self.progress);
        self.progress = fraction;
        let target = fraction * self.duration;
        self.media.seek_to(target);
        debug!(target, "Seek committed");
        Some(target)
    }

    /// Abandon a scrub without seeking. Progress follows the media again.
    pub fn cancel_seek(&mut self) {
        if self.is_seeking {
            self.is_seeking = false;
            debug!(video = %self.video.slug, "Seek cancelled");
        }
    }

    /// Drag-and-release in one step, for keyboard scrubbing.
    pub fn seek_to_percent(&mut self, percent: f64) -> Option<f64> {
        self.seek_drag(percent);
        self.seek_commit(percent)
    }

    /// Skip forward or back by `delta_seconds`. Clamping is the capability's.
    pub fn skip(&mut self, delta_seconds: f64) {
        if delta_seconds.is_finite() {
            self.media.seek_by(delta_seconds);
        }
    }

    /// Set volume, clamped to `[0, 1]`. Non-finite values are ignored.
    pub fn set_volume(&mut self, value: f64) {
        let Some(value) = clamp_unit(value) else {
            return;
        };
        self.volume = value;
        if value > 0.0 {
            self.previous_volume = value;
        }
        self.media.set_volume(value);
    }

    pub fn toggle_mute(&mut self) {
        if self.volume > 0.0 {
            self.previous_volume = self.volume;
            self.volume = 0.0;
            self.media.set_volume(0.0);
        } else {
            let restored = self.previous_volume;
            self.set_volume(restored);
        }
    }

    pub fn volume_up(&mut self, step: f64) {
        self.set_volume(self.volume + step);
    }

    pub fn volume_down(&mut self, step: f64) {
        self.set_volume(self.volume - step);
    }

    // ========================================================================
    // Layout
    // ========================================================================

    pub fn mode(&self) -> PlayerMode {
        PlayerMode::from_flags(self.is_minimized, self.is_fullscreen)
    }

    /// Dock the player as a mini bar, leaving fullscreen first if needed.
    pub fn minimize(&mut self, fullscreen: &mut dyn FullscreenCapability) {
        if self.is_fullscreen || fullscreen.is_active() {
            fullscreen.exit();
        }
        self.is_minimized = true;
        self.drag_offset = 0.0;
        debug!(video = %self.video.slug, "Player minimized");
    }

    pub fn restore(&mut self) {
        self.is_minimized = false;
    }

    /// Ask the platform to enter or leave fullscreen. `is_fullscreen` only
    /// changes once the platform reports back.
    pub fn toggle_fullscreen(&mut self, fullscreen: &mut dyn FullscreenCapability) {
        if self.is_minimized {
            return;
        }
        if fullscreen.is_active() {
            fullscreen.exit();
        } else {
            fullscreen.request();
        }
    }

    pub fn apply_fullscreen_event(&mut self, event: &FullscreenEvent) {
        match event {
            FullscreenEvent::Changed(active) => {
                self.is_fullscreen = *active;
            }
            FullscreenEvent::Rejected { reason } => {
                warn!(%reason, "Fullscreen request rejected");
            }
        }
    }

    /// Drag on the full player moved to `offset` rows-scaled units below the
    /// press point. Upward drags clamp to zero.
    pub fn drag_update(&mut self, offset: f64) {
        if self.mode() != PlayerMode::Full || !offset.is_finite() {
            return;
        }
        self.drag_offset = offset.max(0.0);
    }

    /// Drag released at `offset`. Past the dismiss threshold the player
    /// minimizes; otherwise it snaps back.
    pub fn drag_end(&mut self, offset: f64) -> DragOutcome {
        if self.mode() != PlayerMode::Full {
            return DragOutcome::Ignored;
        }
        self.drag_offset = 0.0;
        let outcome = DragOutcome::for_offset(offset);
        if outcome == DragOutcome::Minimized {
            self.is_minimized = true;
        }
        outcome
    }

    // ========================================================================
    // Recommendations
    // ========================================================================

    /// The "Up Next" entry under the cursor.
    pub fn selected_recommendation<'a>(&self, catalog: &'a Catalog) -> Option<&'a Video> {
        recommended_videos(catalog, &self.video)
            .get(self.recommendation_cursor)
            .copied()
    }

    pub fn recommendation_index(&self) -> usize {
        self.recommendation_cursor
    }

    pub fn next_recommendation(&mut self, catalog: &Catalog) {
        let count = recommended_videos(catalog, &self.video).len();
        if self.recommendation_cursor + 1 < count {
            self.recommendation_cursor += 1;
        }
    }

    pub fn prev_recommendation(&mut self) {
        self.recommendation_cursor = self.recommendation_cursor.saturating_sub(1);
    }

    /// Move the cursor to `index` if it addresses an entry.
    pub fn select_recommendation(&mut self, index: usize, catalog: &Catalog) -> bool {
        if index < recommended_videos(catalog, &self.video).len() {
            self.recommendation_cursor = index;
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Capability events
    // ========================================================================

    /// Fold one capability event into the session state.
    pub fn apply_media_event(
        &mut self,
        instance: MediaInstance,
        event: &MediaEvent,
    ) -> EventDisposition {
        if instance != self.instance {
            debug!(%instance, current = %self.instance, ?event, "Dropping stale media event");
            return EventDisposition::Stale;
        }

        match event {
            MediaEvent::CanPlay | MediaEvent::Playing => self.is_loading = false,
            MediaEvent::Waiting => self.is_loading = true,
            MediaEvent::Play => {
                self.is_playing = true;
                self.is_ended = false;
            }
            MediaEvent::Pause => self.is_playing = false,
            MediaEvent::Ended => {
                self.is_playing = false;
                self.is_ended = true;
            }
            MediaEvent::TimeUpdate { current_time } => {
                if !self.is_seeking && self.duration > 0.0 && current_time.is_finite() {
                    self.progress = (current_time / self.duration).clamp(0.0, 1.0);
                }
            }
            MediaEvent::DurationChange { duration } => {
                if duration.is_finite() && *duration > 0.0 {
                    self.duration = *duration;
                }
            }
            MediaEvent::PlayRejected { reason } => {
                warn!(video = %self.video.slug, %reason, "Play request rejected");
                self.is_playing = false;
            }
        }
        EventDisposition::Applied
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn video(&self) -> &Video {
        &self.video
    }

    pub fn instance(&self) -> MediaInstance {
        self.instance
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_ended(&self) -> bool {
        self.is_ended
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_seeking(&self) -> bool {
        self.is_seeking
    }

    pub fn is_minimized(&self) -> bool {
        self.is_minimized
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Seconds played, derived from progress.
    pub fn elapsed(&self) -> f64 {
        self.progress * self.duration
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn previous_volume(&self) -> f64 {
        self.previous_volume
    }

    pub fn is_muted(&self) -> bool {
        self.volume == 0.0
    }

    pub fn drag_offset(&self) -> f64 {
        self.drag_offset
    }
}

fn clamp_unit(value: f64) -> Option<f64> {
    value.is_finite().then(|| value.clamp(0.0, 1.0))
}

fn percent_to_fraction(percent: f64) -> Option<f64> {
    percent
        .is_finite()
        .then(|| percent.clamp(0.0, 100.0) / 100.0)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::catalog::types::fixtures::{music_and_news, video};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Play,
        Pause,
        SeekTo(f64),
        SeekBy(f64),
        Volume(f64),
        Release,
    }

    struct FakeMedia {
        instance: MediaInstance,
        calls: Arc<Mutex<Vec<(MediaInstance, Call)>>>,
    }

    impl FakeMedia {
        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push((self.instance, call));
        }
    }

    impl MediaCapability for FakeMedia {
        fn instance(&self) -> MediaInstance {
            self.instance
        }
        fn play(&mut self) {
            self.record(Call::Play);
        }
        fn pause(&mut self) {
            self.record(Call::Pause);
        }
        fn seek_to(&mut self, seconds: f64) {
            self.record(Call::SeekTo(seconds));
        }
        fn seek_by(&mut self, delta_seconds: f64) {
            self.record(Call::SeekBy(delta_seconds));
        }
        fn set_volume(&mut self, fraction: f64) {
            self.record(Call::Volume(fraction));
        }
        fn release(&mut self) {
            self.record(Call::Release);
        }
    }

    #[derive(Default)]
    struct FakeBackend {
        next: u64,
        calls: Arc<Mutex<Vec<(MediaInstance, Call)>>>,
    }

    impl MediaBackend for FakeBackend {
        fn open(&mut self, _video: &Video, _params: &MediaParams) -> Box<dyn MediaCapability> {
            self.next += 1;
            Box::new(FakeMedia {
                instance: MediaInstance(self.next),
                calls: Arc::clone(&self.calls),
            })
        }
    }

    #[derive(Default)]
    struct FakeFullscreen {
        active: bool,
        requests: usize,
        exits: usize,
    }

    impl FullscreenCapability for FakeFullscreen {
        fn request(&mut self) {
            self.requests += 1;
            self.active = true;
        }
        fn exit(&mut self) {
            self.exits += 1;
            self.active = false;
        }
        fn is_active(&self) -> bool {
            self.active
        }
    }

    fn open_a(backend: &mut FakeBackend) -> PlaybackSession {
        PlaybackSession::open(video("a", "Song A"), backend, &SessionOptions::default())
    }

    #[test]
    fn test_open_plays_from_start() {
        let mut backend = FakeBackend::default();
        let session = open_a(&mut backend);

        assert!(session.is_playing());
        assert!(session.is_loading());
        assert_eq!(session.progress(), 0.0);
        assert_eq!(session.mode(), PlayerMode::Full);
        let calls = backend.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                (MediaInstance(1), Call::Volume(1.0)),
                (MediaInstance(1), Call::Play)
            ]
        );
    }

    #[test]
    fn test_toggle_play_restarts_when_ended() {
        let mut backend = FakeBackend::default();
        let mut session = open_a(&mut backend);
        let inst = session.instance();
        session.apply_media_event(inst, &MediaEvent::DurationChange { duration: 100.0 });
        session.apply_media_event(inst, &MediaEvent::TimeUpdate { current_time: 100.0 });
        session.apply_media_event(inst, &MediaEvent::Ended);
        backend.calls.lock().unwrap().clear();

        session.toggle_play();

        assert!(session.is_playing());
        assert!(!session.is_ended());
        let calls = backend.calls.lock().unwrap().clone();
        assert_eq!(calls, vec![(inst, Call::SeekTo(0.0)), (inst, Call::Play)]);
    }

    #[test]
    fn test_seek_commit_targets_fraction_of_duration() {
        let mut backend = FakeBackend::default();
        let mut session = open_a(&mut backend);
        let inst = session.instance();
        session.apply_media_event(inst, &MediaEvent::DurationChange { duration: 200.0 });

        session.seek_drag(25.0);
        assert!(session.is_seeking());
        assert_eq!(session.progress(), 0.25);

        assert_eq!(session.seek_commit(25.0), Some(50.0));
        assert!(!session.is_seeking());
    }

    #[test]
    fn test_cancel_seek_resumes_time_updates() {
        let mut backend = FakeBackend::default();
        let mut session = open_a(&mut backend);
        let inst = session.instance();
        session.apply_media_event(inst, &MediaEvent::DurationChange { duration: 100.0 });
        backend.calls.lock().unwrap().clear();

        session.seek_drag(20.0);
        session.cancel_seek();
        assert!(!session.is_seeking());
        session.apply_media_event(inst, &MediaEvent::TimeUpdate { current_time: 75.0 });

        assert_eq!(session.progress(), 0.75);
        assert_eq!(session.seek_commit(50.0), None);
        assert!(backend.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_seek_commit_without_drag_is_ignored() {
        let mut backend = FakeBackend::default();
        let mut session = open_a(&mut backend);
        assert_eq!(session.seek_commit(50.0), None);
    }

    #[test]
    fn test_time_update_ignored_while_seeking() {
        let mut backend = FakeBackend::default();
        let mut session = open_a(&mut backend);
        let inst = session.instance();
        session.apply_media_event(inst, &MediaEvent::DurationChange { duration: 100.0 });
        session.seek_drag(80.0);
        session.apply_media_event(inst, &MediaEvent::TimeUpdate { current_time: 10.0 });
        assert_eq!(session.progress(), 0.8);
    }

    #[test]
    fn test_time_update_without_duration_keeps_progress() {
        let mut backend = FakeBackend::default();
        let mut session = open_a(&mut backend);
        let inst = session.instance();
        session.apply_media_event(inst, &MediaEvent::TimeUpdate { current_time: 10.0 });
        assert_eq!(session.progress(), 0.0);
    }

    #[test]
    fn test_mute_roundtrip() {
        let mut backend = FakeBackend::default();
        let mut session = open_a(&mut backend);
        session.set_volume(0.6);
        session.toggle_mute();
        assert!(session.is_muted());
        session.toggle_mute();
        assert_eq!(session.volume(), 0.6);
    }

    #[test]
    fn test_unmute_defaults_to_full_volume() {
        let mut backend = FakeBackend::default();
        let options = SessionOptions {
            initial_volume: 0.0,
            ..SessionOptions::default()
        };
        let mut session = PlaybackSession::open(video("a", "A"), &mut backend, &options);
        session.toggle_mute();
        assert_eq!(session.volume(), 1.0);
    }

    #[test]
    fn test_volume_clamped() {
        let mut backend = FakeBackend::default();
        let mut session = open_a(&mut backend);
        session.set_volume(1.7);
        assert_eq!(session.volume(), 1.0);
        session.set_volume(-0.3);
        assert_eq!(session.volume(), 0.0);
        session.set_volume(f64::NAN);
        assert_eq!(session.volume(), 0.0);
    }

    #[test]
    fn test_stale_events_are_dropped() {
        let mut backend = FakeBackend::default();
        let mut session = open_a(&mut backend);
        let old = session.instance();
        session.activate(video("b", "Song B"), &mut backend);

        let disposition = session.apply_media_event(old, &MediaEvent::Ended);

        assert_eq!(disposition, EventDisposition::Stale);
        assert!(!session.is_ended());
        assert!(session.is_playing());
    }

    #[test]
    fn test_activate_releases_previous_capability() {
        let mut backend = FakeBackend::default();
        let mut session = open_a(&mut backend);
        session.activate(video("b", "Song B"), &mut backend);
        let calls = backend.calls.lock().unwrap().clone();
        assert!(calls.contains(&(MediaInstance(1), Call::Release)));
        assert_eq!(session.instance(), MediaInstance(2));
    }

    #[test]
    fn test_switch_to_same_video_is_noop() {
        let mut backend = FakeBackend::default();
        let mut session = open_a(&mut backend);
        assert!(!session.switch_video(video("a", "Song A"), &mut backend));
        assert_eq!(session.instance(), MediaInstance(1));
    }

    #[test]
    fn test_switch_keeps_volume() {
        let mut backend = FakeBackend::default();
        let mut session = open_a(&mut backend);
        session.set_volume(0.4);
        assert!(session.switch_video(video("b", "Song B"), &mut backend));
        assert_eq!(session.volume(), 0.4);
        let calls = backend.calls.lock().unwrap().clone();
        assert!(calls.contains(&(MediaInstance(2), Call::Volume(0.4))));
    }

    #[test]
    fn test_minimize_exits_fullscreen_first() {
        let mut backend = FakeBackend::default();
        let mut fs = FakeFullscreen::default();
        let mut session = open_a(&mut backend);
        session.toggle_fullscreen(&mut fs);
        session.apply_fullscreen_event(&FullscreenEvent::Changed(true));
        assert_eq!(session.mode(), PlayerMode::Fullscreen);

        session.minimize(&mut fs);

        assert_eq!(fs.exits, 1);
        assert_eq!(session.mode(), PlayerMode::Minimized);
    }

    #[test]
    fn test_fullscreen_follows_platform_events() {
        let mut backend = FakeBackend::default();
        let mut fs = FakeFullscreen::default();
        let mut session = open_a(&mut backend);

        session.toggle_fullscreen(&mut fs);
        assert_eq!(fs.requests, 1);
        assert!(!session.is_fullscreen());

        session.apply_fullscreen_event(&FullscreenEvent::Changed(true));
        assert!(session.is_fullscreen());

        // Exit through another channel.
        session.apply_fullscreen_event(&FullscreenEvent::Changed(false));
        assert_eq!(session.mode(), PlayerMode::Full);
    }

    #[test]
    fn test_fullscreen_ignored_while_minimized() {
        let mut backend = FakeBackend::default();
        let mut fs = FakeFullscreen::default();
        let mut session = open_a(&mut backend);
        session.minimize(&mut fs);
        session.toggle_fullscreen(&mut fs);
        assert_eq!(fs.requests, 0);
    }

    #[test]
    fn test_drag_past_threshold_minimizes() {
        let mut backend = FakeBackend::default();
        let mut session = open_a(&mut backend);
        session.drag_update(200.0);
        assert_eq!(session.drag_offset(), 200.0);
        assert_eq!(session.drag_end(200.0), DragOutcome::Minimized);
        assert!(session.is_minimized());
        assert_eq!(session.drag_offset(), 0.0);
    }

    #[test]
    fn test_short_drag_snaps_back() {
        let mut backend = FakeBackend::default();
        let mut session = open_a(&mut backend);
        session.drag_update(100.0);
        assert_eq!(session.drag_end(100.0), DragOutcome::SnapBack);
        assert!(!session.is_minimized());
        assert_eq!(session.drag_offset(), 0.0);
    }

    #[test]
    fn test_drag_ignored_when_minimized() {
        let mut backend = FakeBackend::default();
        let mut fs = FakeFullscreen::default();
        let mut session = open_a(&mut backend);
        session.minimize(&mut fs);
        session.drag_update(300.0);
        assert_eq!(session.drag_offset(), 0.0);
        assert_eq!(session.drag_end(300.0), DragOutcome::Ignored);
    }

    #[test]
    fn test_recommendation_cursor() {
        let mut backend = FakeBackend::default();
        let catalog = music_and_news();
        let mut session = open_a(&mut backend);

        assert_eq!(session.selected_recommendation(&catalog).map(|v| v.slug.as_str()), Some("b"));
        session.next_recommendation(&catalog);
        session.next_recommendation(&catalog);
        assert_eq!(session.selected_recommendation(&catalog).map(|v| v.slug.as_str()), Some("c"));
        session.prev_recommendation();
        assert_eq!(session.recommendation_index(), 0);
        assert!(!session.select_recommendation(5, &catalog));
    }

    #[test]
    fn test_play_rejected_clears_playing() {
        let mut backend = FakeBackend::default();
        let mut session = open_a(&mut backend);
        let inst = session.instance();
        session.apply_media_event(
            inst,
            &MediaEvent::PlayRejected {
                reason: "autoplay blocked".into(),
            },
        );
        assert!(!session.is_playing());
    }

    #[test]
    fn test_close_releases_and_exits_fullscreen() {
        let mut backend = FakeBackend::default();
        let mut fs = FakeFullscreen {
            active: true,
            ..FakeFullscreen::default()
        };
        let session = open_a(&mut backend);
        session.close(&mut fs);
        assert_eq!(fs.exits, 1);
        let calls = backend.calls.lock().unwrap().clone();
        assert_eq!(calls.last(), Some(&(MediaInstance(1), Call::Release)));
    }
}
