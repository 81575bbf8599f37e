//! End-to-end media lifecycle: simulated backend, event channel and app state,
//! with tokio's clock paused so the playhead runs instantly.

use std::time::Duration;

use clipdeck::app::{App, AppEvent};
use clipdeck::catalog::{Catalog, CatalogSection, Category, Video};
use clipdeck::config::Config;
use clipdeck::media::{
    MediaBackend, MediaEvent, MediaInstance, MediaParams, SimulatedBackend, SimulatedOptions,
    TerminalFullscreen,
};
use clipdeck::player::PlayerMode;
use tokio::sync::mpsc;
use tokio::time::timeout;

fn video(slug: &str, duration: f64) -> Video {
    Video {
        slug: slug.to_string(),
        title: slug.to_uppercase(),
        thumbnail_url: String::new(),
        media_url: format!("https://www.youtube.com/watch?v={}", slug),
        duration_hint: Some(duration),
    }
}

fn catalog() -> Catalog {
    Catalog::new(vec![CatalogSection {
        category: Category {
            slug: "shorts".into(),
            name: "Shorts".into(),
            icon_url: String::new(),
        },
        contents: vec![video("one", 1.0), video("two", 2.0)],
    }])
}

fn options(autoplay: bool) -> SimulatedOptions {
    SimulatedOptions {
        load_delay: Duration::from_millis(600),
        default_duration: 30.0,
        autoplay,
    }
}

/// Receive media events for `instance` until `stop` matches one, or time runs out.
async fn collect_until(
    rx: &mut mpsc::Receiver<AppEvent>,
    instance: MediaInstance,
    stop: impl Fn(&MediaEvent) -> bool,
) -> Vec<MediaEvent> {
    let mut out = Vec::new();
    loop {
        match timeout(Duration::from_secs(60), rx.recv()).await {
            Ok(Some(AppEvent::Media { instance: i, event })) if i == instance => {
                let done = stop(&event);
                out.push(event);
                if done {
                    return out;
                }
            }
            Ok(Some(_)) => {}
            Ok(None) | Err(_) => return out,
        }
    }
}

#[tokio::test(start_paused = true)]
async fn stream_buffers_plays_and_ends() {
    let (tx, mut rx) = mpsc::channel(64);
    let mut backend = SimulatedBackend::new(options(true), tx);
    let mut media = backend.open(&video("one", 1.0), &MediaParams::default());
    let instance = media.instance();
    media.play();

    let events = collect_until(&mut rx, instance, |e| *e == MediaEvent::Ended).await;

    assert_eq!(events.first(), Some(&MediaEvent::Waiting));
    assert_eq!(events.last(), Some(&MediaEvent::Ended));
    let duration_at = events
        .iter()
        .position(|e| *e == MediaEvent::DurationChange { duration: 1.0 })
        .unwrap();
    let can_play_at = events.iter().position(|e| *e == MediaEvent::CanPlay).unwrap();
    assert!(duration_at < can_play_at);
    assert!(events.contains(&MediaEvent::Play));
    assert!(events.contains(&MediaEvent::Playing));

    let times: Vec<f64> = events
        .iter()
        .filter_map(|e| match e {
            MediaEvent::TimeUpdate { current_time } => Some(*current_time),
            _ => None,
        })
        .collect();
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(times.last().copied(), Some(1.0));
}

#[tokio::test(start_paused = true)]
async fn early_play_rejected_without_autoplay() {
    let (tx, mut rx) = mpsc::channel(64);
    let mut backend = SimulatedBackend::new(options(false), tx);
    let mut media = backend.open(&video("one", 1.0), &MediaParams::default());
    let instance = media.instance();
    media.play();

    let events = collect_until(&mut rx, instance, |e| *e == MediaEvent::CanPlay).await;
    assert!(events
        .iter()
        .any(|e| matches!(e, MediaEvent::PlayRejected { .. })));
    assert!(!events.contains(&MediaEvent::Play));
}

#[tokio::test(start_paused = true)]
async fn released_media_goes_quiet() {
    let (tx, mut rx) = mpsc::channel(64);
    let mut backend = SimulatedBackend::new(options(true), tx);
    let mut media = backend.open(&video("one", 1.0), &MediaParams::default());
    media.play();
    media.release();

    let next = timeout(Duration::from_secs(5), rx.recv()).await;
    assert!(next.is_err(), "expected no events, got {:?}", next);
}

#[tokio::test(start_paused = true)]
async fn instances_are_distinct() {
    let (tx, _rx) = mpsc::channel(64);
    let mut backend = SimulatedBackend::new(options(true), tx);
    let a = backend.open(&video("one", 1.0), &MediaParams::default());
    let b = backend.open(&video("two", 1.0), &MediaParams::default());
    assert_ne!(a.instance(), b.instance());
}

// ============================================================================
// Through the app
// ============================================================================

struct Channels {
    media: mpsc::Receiver<AppEvent>,
    fullscreen: mpsc::UnboundedReceiver<AppEvent>,
}

fn app_with_channels() -> (App, Channels) {
    let (media_tx, media) = mpsc::channel(64);
    let (fullscreen_tx, fullscreen) = mpsc::unbounded_channel();
    let config = Config::default();
    let backend = SimulatedBackend::new(options(config.autoplay), media_tx);
    let fs = TerminalFullscreen::new(60, 16, fullscreen_tx);
    let app = App::new(catalog(), config, Box::new(backend), Box::new(fs));
    (app, Channels { media, fullscreen })
}

/// Feed queued events to the app until `done` holds or time runs out.
async fn pump(app: &mut App, channels: &mut Channels, done: impl Fn(&App) -> bool) {
    while !done(app) {
        let next = async {
            tokio::select! {
                biased;
                Some(event) = channels.fullscreen.recv() => Some(event),
                event = channels.media.recv() => event,
            }
        };
        match timeout(Duration::from_secs(60), next).await {
            Ok(Some(AppEvent::Media { instance, event })) => {
                app.handle_media_event(instance, event)
            }
            Ok(Some(AppEvent::Fullscreen(event))) => app.handle_fullscreen_event(event),
            Ok(Some(AppEvent::TaskPanicked { task, error })) => {
                panic!("{} panicked: {}", task, error)
            }
            Ok(None) | Err(_) => return,
        }
    }
}

#[tokio::test(start_paused = true)]
async fn app_session_follows_stream() {
    let (mut app, mut channels) = app_with_channels();
    assert!(app.activate_video("two"));

    pump(&mut app, &mut channels, |app| {
        app.player.as_ref().is_some_and(|s| !s.is_loading())
    })
    .await;
    let session = app.player.as_ref().unwrap();
    assert_eq!(session.duration(), 2.0);
    assert!(session.is_playing());

    pump(&mut app, &mut channels, |app| {
        app.player.as_ref().is_some_and(|s| s.is_ended())
    })
    .await;
    let session = app.player.as_ref().unwrap();
    assert!(!session.is_playing());
    assert_eq!(session.progress(), 1.0);
    assert!(app.status_message.is_some());
}

#[tokio::test(start_paused = true)]
async fn switching_video_ignores_old_stream() {
    let (mut app, mut channels) = app_with_channels();
    app.activate_video("one");
    pump(&mut app, &mut channels, |app| {
        app.player.as_ref().is_some_and(|s| !s.is_loading())
    })
    .await;

    assert!(app.switch_video("two"));
    let session = app.player.as_ref().unwrap();
    assert_eq!(session.duration(), 0.0);
    assert!(session.is_loading());

    pump(&mut app, &mut channels, |app| {
        app.player.as_ref().is_some_and(|s| s.duration() > 0.0)
    })
    .await;
    assert_eq!(app.player.as_ref().map(|s| s.duration()), Some(2.0));
}

#[tokio::test(start_paused = true)]
async fn fullscreen_rejected_on_small_terminal() {
    let (mut app, mut channels) = app_with_channels();
    app.handle_resize(40, 12);
    app.activate_video("one");
    app.toggle_fullscreen();

    pump(&mut app, &mut channels, |app| app.status_message.is_some()).await;
    assert_eq!(app.player_mode(), Some(PlayerMode::Full));
    let msg = app.status_message.as_ref().map(|(m, _)| m.to_string());
    assert!(msg.is_some_and(|m| m.starts_with("Fullscreen unavailable")));
}

#[tokio::test(start_paused = true)]
async fn shrinking_terminal_drops_fullscreen() {
    let (mut app, mut channels) = app_with_channels();
    app.handle_resize(120, 40);
    app.activate_video("one");
    app.toggle_fullscreen();
    pump(&mut app, &mut channels, |app| {
        app.player_mode() == Some(PlayerMode::Fullscreen)
    })
    .await;
    assert_eq!(app.player_mode(), Some(PlayerMode::Fullscreen));

    app.handle_resize(50, 12);
    pump(&mut app, &mut channels, |app| app.player_mode() == Some(PlayerMode::Full)).await;
    assert_eq!(app.player_mode(), Some(PlayerMode::Full));
}
