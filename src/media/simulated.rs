//! Simulated media backend.
//!
//! Each opened capability is a tokio task that owns a `Playhead` and a command
//! channel. The task models what an embedded web player reports: a buffering
//! phase, duration discovery, periodic time updates, and the end of the
//! stream. Nothing is decoded; the terminal renders the playhead state.
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::{MediaBackend, MediaCapability, MediaEvent, MediaInstance, MediaParams};
use crate::app::AppEvent;
use crate::catalog::Video;
use crate::util::catch_task_panic;

/// Playhead clock period. Also the time-update cadence.
const TICK: Duration = Duration::from_millis(250);

// ============================================================================
// Playhead
// ============================================================================

/// Position/duration bookkeeping for one stream. Pure and synchronous.
#[derive(Debug, Clone, PartialEq)]
pub struct Playhead {
    position: f64,
    duration: f64,
    playing: bool,
    ready: bool,
    ended: bool,
}

impl Playhead {
    pub fn new(duration: f64) -> Self {
        Self {
            position: 0.0,
            duration: if duration.is_finite() && duration > 0.0 {
                duration
            } else {
                0.0
            },
            playing: false,
            ready: false,
            ended: false,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn mark_ready(&mut self) {
        self.ready = true;
    }

    /// Start playback. Starting an ended stream rewinds it first.
    /// Returns false if it was already playing.
    pub fn start(&mut self) -> bool {
        if self.playing {
            return false;
        }
        if self.ended {
            self.position = 0.0;
            self.ended = false;
        }
        self.playing = true;
        true
    }

    /// Returns false if it was already stopped.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.playing, false)
    }

    /// Jump to `seconds`, clamped to `[0, duration]`. Non-finite targets are
    /// ignored. Returns the resulting position.
    pub fn seek_to(&mut self, seconds: f64) -> f64 {
        if seconds.is_finite() {
            self.position = seconds.clamp(0.0, self.duration);
            if self.position < self.duration {
                self.ended = false;
            }
        }
        self.position
    }

    pub fn seek_by(&mut self, delta: f64) -> f64 {
        self.seek_to(self.position + delta)
    }

    /// Advance the clock by `dt` seconds while playing. Returns true exactly
    /// when this step reaches the end of the stream.
    pub fn advance(&mut self, dt: f64) -> bool {
        if !self.playing || !self.ready {
            return false;
        }
        self.position = (self.position + dt).min(self.duration);
        if self.position >= self.duration {
            self.playing = false;
            self.ended = true;
            return true;
        }
        false
    }
}

// ============================================================================
// Backend
// ============================================================================

/// Tunables for simulated streams.
#[derive(Debug, Clone)]
pub struct SimulatedOptions {
    /// Buffering time before `CanPlay`.
    pub load_delay: Duration,
    /// Length used when a video carries no duration hint.
    pub default_duration: f64,
    /// When false, play requests before the stream is ready are rejected.
    pub autoplay: bool,
}

impl Default for SimulatedOptions {
    fn default() -> Self {
        Self {
            load_delay: Duration::from_millis(600),
            default_duration: 180.0,
            autoplay: true,
        }
    }
}

/// Opens one playhead task per bound video.
pub struct SimulatedBackend {
    options: SimulatedOptions,
    events: mpsc::Sender<AppEvent>,
    next_instance: u64,
}

impl SimulatedBackend {
    pub fn new(options: SimulatedOptions, events: mpsc::Sender<AppEvent>) -> Self {
        Self {
            options,
            events,
            next_instance: 0,
        }
    }
}

impl MediaBackend for SimulatedBackend {
    fn open(&mut self, video: &Video, params: &MediaParams) -> Box<dyn MediaCapability> {
        self.next_instance += 1;
        let instance = MediaInstance(self.next_instance);
        let duration = video
            .duration_hint
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(self.options.default_duration);

        tracing::debug!(
            %instance,
            slug = %video.slug,
            source = %video.media_url,
            params = %params.to_query(),
            duration,
            "Opening simulated media"
        );

        let (tx, rx) = mpsc::unbounded_channel();
        let events = self.events.clone();
        let body = run_playhead(
            instance,
            Playhead::new(duration),
            self.options.clone(),
            rx,
            self.events.clone(),
        );
        let task = tokio::spawn(async move {
            if let Err(error) = catch_task_panic(body).await {
                tracing::error!(%instance, %error, "Playhead task panicked");
                let _ = events
                    .send(AppEvent::TaskPanicked {
                        task: "playhead",
                        error,
                    })
                    .await;
            }
        });

        Box::new(SimulatedMedia {
            instance,
            commands: tx,
            task: Some(task),
        })
    }
}

#[derive(Debug)]
enum Command {
    Play,
    Pause,
    SeekTo(f64),
    SeekBy(f64),
    SetVolume(f64),
}

/// Handle to a running playhead task.
struct SimulatedMedia {
    instance: MediaInstance,
    commands: mpsc::UnboundedSender<Command>,
    task: Option<JoinHandle<()>>,
}

impl SimulatedMedia {
    fn send(&self, command: Command) {
        if self.task.is_none() {
            tracing::debug!(instance = %self.instance, ?command, "Command after release ignored");
            return;
        }
        if let Err(e) = self.commands.send(command) {
            tracing::warn!(instance = %self.instance, error = %e, "Playhead task is gone");
        }
    }
}

impl MediaCapability for SimulatedMedia {
    fn instance(&self) -> MediaInstance {
        self.instance
    }

    fn play(&mut self) {
        self.send(Command::Play);
    }

    fn pause(&mut self) {
        self.send(Command::Pause);
    }

    fn seek_to(&mut self, seconds: f64) {
        self.send(Command::SeekTo(seconds));
    }

    fn seek_by(&mut self, delta_seconds: f64) {
        self.send(Command::SeekBy(delta_seconds));
    }

    fn set_volume(&mut self, fraction: f64) {
        self.send(Command::SetVolume(fraction));
    }

    fn release(&mut self) {
        if let Some(handle) = self.task.take() {
            handle.abort();
            tracing::debug!(instance = %self.instance, "Released simulated media");
        }
    }
}

impl Drop for SimulatedMedia {
    fn drop(&mut self) {
        self.release();
    }
}

/// Playhead task body. Exits when the handle is dropped or the app channel closes.
async fn run_playhead(
    instance: MediaInstance,
    mut playhead: Playhead,
    options: SimulatedOptions,
    mut commands: mpsc::UnboundedReceiver<Command>,
    events: mpsc::Sender<AppEvent>,
) {
    let emit = |event: MediaEvent| {
        let events = events.clone();
        async move {
            events
                .send(AppEvent::Media { instance, event })
                .await
                .is_ok()
        }
    };

    if !emit(MediaEvent::Waiting).await {
        return;
    }

    let ready = tokio::time::sleep(options.load_delay);
    tokio::pin!(ready);
    let mut ticker = interval_at(Instant::now() + TICK, TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let mut out: Vec<MediaEvent> = Vec::with_capacity(3);

        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else { break };
                match command {
                    Command::Play => {
                        if !playhead.is_ready() && !options.autoplay {
                            out.push(MediaEvent::PlayRejected {
                                reason: "autoplay blocked before media is ready".to_string(),
                            });
                        } else if playhead.start() {
                            out.push(MediaEvent::Play);
                            if playhead.is_ready() {
                                out.push(MediaEvent::Playing);
                            }
                        }
                    }
                    Command::Pause => {
                        if playhead.stop() {
                            out.push(MediaEvent::Pause);
                        }
                    }
                    Command::SeekTo(t) => {
                        let current_time = playhead.seek_to(t);
                        out.push(MediaEvent::TimeUpdate { current_time });
                    }
                    Command::SeekBy(d) => {
                        let current_time = playhead.seek_by(d);
                        out.push(MediaEvent::TimeUpdate { current_time });
                    }
                    Command::SetVolume(v) => {
                        tracing::trace!(%instance, volume = v, "Volume changed");
                    }
                }
            }

            _ = &mut ready, if !playhead.is_ready() => {
                playhead.mark_ready();
                out.push(MediaEvent::DurationChange { duration: playhead.duration() });
                out.push(MediaEvent::CanPlay);
                if playhead.is_playing() {
                    out.push(MediaEvent::Playing);
                }
            }

            _ = ticker.tick(), if playhead.is_ready() && playhead.is_playing() => {
                let ended = playhead.advance(TICK.as_secs_f64());
                out.push(MediaEvent::TimeUpdate { current_time: playhead.position() });
                if ended {
                    out.push(MediaEvent::Ended);
                }
            }
        }

        for event in out {
            if !emit(event).await {
                tracing::debug!(%instance, "Event channel closed, stopping playhead");
                return;
            }
        }
    }
}
