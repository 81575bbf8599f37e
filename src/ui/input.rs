//! Input handling for the TUI.
//!
//! Keys are resolved through the keybinding registry for the current player
//! layout. Mouse presses are resolved against the hit regions recorded by the
//! last render.

use crate::app::{App, Hit, PointerGesture};
use crate::feed::CategoryFilter;
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::player::DragOutcome;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use super::Action;

/// Main key dispatch function.
pub(super) fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Result<Action> {
    // Help overlay captures all keys when visible
    if app.show_help {
        return Ok(handle_help_input(app, code));
    }

    let context = app.key_context();
    let Some(action) = app.keybindings.action_for_key(code, modifiers, context) else {
        return Ok(Action::Continue);
    };
    dispatch(app, action, context)
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

fn dispatch(app: &mut App, action: KbAction, context: KbContext) -> Result<Action> {
    let skip = app.config.skip_seconds;
    let step = app.config.volume_step;

    match action {
        KbAction::Quit => return Ok(Action::Quit),
        KbAction::ShowHelp => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        KbAction::CycleTheme => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        KbAction::NavDown => match context {
            KbContext::Player | KbContext::Fullscreen => {
                if let Some(session) = app.player.as_mut() {
                    session.next_recommendation(&app.catalog);
                }
            }
            _ => app.feed.nav_down(&app.catalog),
        },
        KbAction::NavUp => match context {
            KbContext::Player | KbContext::Fullscreen => {
                if let Some(session) = app.player.as_mut() {
                    session.prev_recommendation();
                }
            }
            _ => app.feed.nav_up(),
        },
        KbAction::NextCategory => {
            app.feed.next_pill(&app.catalog);
        }
        KbAction::PrevCategory => {
            app.feed.prev_pill(&app.catalog);
        }
        KbAction::Select => match context {
            KbContext::Player | KbContext::Fullscreen => {
                app.switch_to_selected_recommendation();
            }
            _ => {
                if !app.activate_selected_card() {
                    app.set_status("No videos in this category");
                }
            }
        },
        KbAction::TogglePlay => with_session(app, |s| s.toggle_play()),
        KbAction::SkipForward => with_session(app, |s| s.skip(skip)),
        KbAction::SkipBack => with_session(app, |s| s.skip(-skip)),
        KbAction::VolumeUp => with_session(app, |s| s.volume_up(step)),
        KbAction::VolumeDown => with_session(app, |s| s.volume_down(step)),
        KbAction::ToggleMute => with_session(app, |s| s.toggle_mute()),
        KbAction::SeekPercent(pct) => with_session(app, |s| {
            s.seek_to_percent(f64::from(pct));
        }),
        KbAction::ToggleFullscreen => app.toggle_fullscreen(),
        KbAction::Minimize => app.minimize_player(),
        KbAction::RestorePlayer => app.restore_player(),
        KbAction::ClosePlayer => app.close_player(),
        KbAction::OpenInBrowser => {
            if let Err(e) = app.open_in_browser() {
                app.set_status(format!("{:#}", e));
            }
        }
    }
    Ok(Action::Continue)
}

fn with_session(app: &mut App, f: impl FnOnce(&mut crate::player::PlaybackSession)) {
    if let Some(session) = app.player.as_mut() {
        f(session);
    }
}

// ============================================================================
// Mouse
// ============================================================================

/// Route a mouse event through the hit regions of the last frame.
pub(super) fn handle_mouse(app: &mut App, mouse: MouseEvent) -> Result<Action> {
    if app.show_help {
        return Ok(Action::Continue);
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => on_press(app, mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => on_drag(app, mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => on_release(app, mouse.column, mouse.row),
        MouseEventKind::ScrollDown => {
            let context = app.key_context();
            return dispatch(app, KbAction::NavDown, context);
        }
        MouseEventKind::ScrollUp => {
            let context = app.key_context();
            return dispatch(app, KbAction::NavUp, context);
        }
        _ => {}
    }
    Ok(Action::Continue)
}

fn on_press(app: &mut App, column: u16, row: u16) {
    let Some((area, hit)) = app.hits.at(column, row) else {
        return;
    };
    tracing::trace!(?hit, column, row, "Mouse press");

    match hit {
        Hit::Pill(index) => {
            let label = app
                .feed
                .pills(&app.catalog)
                .get(index)
                .map(|p| p.label.to_string());
            if let Some(label) = label {
                app.feed.select_filter(CategoryFilter::from_label(&label));
            }
        }
        Hit::Card(index) => {
            app.feed.select_card(index, &app.catalog);
            app.activate_selected_card();
        }
        Hit::Recommendation(index) => {
            app.switch_to_recommendation(index);
        }
        Hit::Scrubber => {
            let pct = scrub_percent(area, column);
            with_session(app, |s| s.seek_drag(pct));
            app.gesture = Some(PointerGesture::Scrub);
        }
        Hit::DragHandle => {
            app.gesture = Some(PointerGesture::Dismiss { start_row: row });
        }
        Hit::MiniBar => app.restore_player(),
        Hit::MiniPlay | Hit::PlayButton => with_session(app, |s| s.toggle_play()),
        Hit::CloseButton => app.close_player(),
        Hit::SkipBack => {
            let skip = app.config.skip_seconds;
            with_session(app, |s| s.skip(-skip));
        }
        Hit::SkipForward => {
            let skip = app.config.skip_seconds;
            with_session(app, |s| s.skip(skip));
        }
        Hit::MuteButton => with_session(app, |s| s.toggle_mute()),
        Hit::FullscreenButton => app.toggle_fullscreen(),
        Hit::MinimizeButton => app.minimize_player(),
    }
}

fn on_drag(app: &mut App, column: u16, row: u16) {
    match app.gesture {
        Some(PointerGesture::Scrub) => {
            if let Some(area) = app.hits.area_of(Hit::Scrubber) {
                let pct = scrub_percent(area, column);
                with_session(app, |s| s.seek_drag(pct));
            }
        }
        Some(PointerGesture::Dismiss { start_row }) => {
            let offset = dismiss_offset(start_row, row, app.config.drag_units_per_row);
            with_session(app, |s| s.drag_update(offset));
        }
        None => {}
    }
}

fn on_release(app: &mut App, column: u16, row: u16) {
    match app.gesture.take() {
        Some(PointerGesture::Scrub) => {
            let pct = app
                .hits
                .area_of(Hit::Scrubber)
                .map(|area| scrub_percent(area, column));
            with_session(app, |s| {
                let pct = pct.unwrap_or_else(|| s.progress() * 100.0);
                s.seek_commit(pct);
            });
        }
        Some(PointerGesture::Dismiss { start_row }) => {
            let offset = dismiss_offset(start_row, row, app.config.drag_units_per_row);
            if app.end_dismiss_drag(offset) == DragOutcome::Minimized {
                app.set_status("Player minimized");
            }
        }
        None => {}
    }
}

/// Percent along the scrubber for a column, clamped to the bar.
fn scrub_percent(area: Rect, column: u16) -> f64 {
    if area.width <= 1 {
        return 0.0;
    }
    let offset = column.saturating_sub(area.x).min(area.width - 1);
    f64::from(offset) / f64::from(area.width - 1) * 100.0
}

/// Downward drag distance; dragging upward counts as zero.
fn dismiss_offset(start_row: u16, row: u16, units_per_row: f64) -> f64 {
    f64::from(row.saturating_sub(start_row)) * units_per_row
}
