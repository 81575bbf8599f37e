//! Main event loop for the TUI.
//!
//! Multiplexes terminal input, app events from background tasks, signals and
//! a periodic tick.

use crate::app::{App, AppEvent};
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use super::events::handle_app_event;
use super::input::{handle_key, handle_mouse};
use super::render::render;
use super::SPINNER_FRAMES;

/// Result of handling an input event.
pub enum Action {
    Continue,
    /// Exit the application and restore the terminal.
    Quit,
}

/// Runs the TUI application event loop.
///
/// Uses `tokio::select!` to multiplex:
/// - **Signals**: SIGTERM/SIGINT shut down gracefully
/// - **Terminal input**: keys, mouse and resize from crossterm's event stream
/// - **App events**: media notifications on the bounded `AppEvent` channel,
///   fullscreen changes on their own unbounded one
/// - **Periodic tick**: 250ms timer for the loading spinner and status expiry
///
/// A panic hook restores the terminal before unwinding.
pub async fn run(
    app: &mut App,
    mut event_rx: mpsc::Receiver<AppEvent>,
    mut fullscreen_rx: mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let size = terminal.size()?;
    app.handle_resize(size.width, size.height);

    let mut event_stream = crossterm::event::EventStream::new();
    let mut tick_interval = tokio::time::interval(Duration::from_millis(250));

    #[cfg(unix)]
    let mut sigterm = signal(SignalKind::terminate())?;
    #[cfg(unix)]
    let mut sigint = signal(SignalKind::interrupt())?;

    loop {
        if app.needs_redraw {
            terminal.draw(|f| render(f, app))?;
            app.needs_redraw = false;
        }

        if app.clear_expired_status() {
            app.needs_redraw = true;
        }

        // Drain queued app events first so a burst of time updates never
        // starves input handling.
        while let Ok(event) = fullscreen_rx.try_recv() {
            app.needs_redraw = true;
            handle_app_event(app, event);
        }
        while let Ok(event) = event_rx.try_recv() {
            app.needs_redraw = true;
            handle_app_event(app, event);
        }

        #[cfg(unix)]
        let sigterm_fut = sigterm.recv();
        #[cfg(not(unix))]
        let sigterm_fut = std::future::pending::<Option<()>>();

        #[cfg(unix)]
        let sigint_fut = sigint.recv();
        #[cfg(not(unix))]
        let sigint_fut = std::future::pending::<Option<()>>();

        tokio::select! {
            biased;

            _ = sigterm_fut => {
                tracing::info!("Received SIGTERM, shutting down gracefully");
                break;
            }

            _ = sigint_fut => {
                tracing::info!("Received SIGINT, shutting down gracefully");
                break;
            }

            maybe_event = event_stream.next() => {
                let action = match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind != KeyEventKind::Release => {
                        app.needs_redraw = true;
                        handle_key(app, key.code, key.modifiers)
                    }
                    Some(Ok(Event::Mouse(mouse))) => {
                        app.needs_redraw = true;
                        handle_mouse(app, mouse)
                    }
                    Some(Ok(Event::Resize(width, height))) => {
                        app.handle_resize(width, height);
                        Ok(Action::Continue)
                    }
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "Terminal event stream error");
                        Ok(Action::Continue)
                    }
                    None => break,
                    _ => Ok(Action::Continue),
                };
                match action {
                    Ok(Action::Quit) => break,
                    Ok(Action::Continue) => {}
                    Err(e) => app.set_status(format!("Error: {:#}", e)),
                }
            }

            Some(event) = fullscreen_rx.recv() => {
                app.needs_redraw = true;
                handle_app_event(app, event);
            }

            Some(event) = event_rx.recv() => {
                app.needs_redraw = true;
                handle_app_event(app, event);
            }

            _ = tick_interval.tick() => {
                if app.tick(SPINNER_FRAMES.len()) {
                    app.needs_redraw = true;
                }
            }
        }
    }

    restore_terminal(terminal)?;
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}
